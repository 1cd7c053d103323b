mod emit;
mod error;
mod fetch;
mod parser;
mod settings;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::builder::NonEmptyStringValueParser;
use clap::Parser;
use tracing::info;

use settings::Settings;

#[derive(Parser)]
#[command(
    name = "section_scraper",
    about = "Split an HTML page into heading-labelled sections as JSON Lines"
)]
struct Cli {
    /// Page URL to fetch
    #[arg(value_parser = NonEmptyStringValueParser::new())]
    url: String,
    /// Output file (default: $SECTIONS_OUTPUT or cpp.jsonl)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let settings = Settings::load().context("Failed to load settings")?;
    info!(settings = ?settings, "Starting section scraper");

    let output = cli.output.unwrap_or(settings.output);

    let html = fetch::fetch_page(&cli.url, &settings.user_agent)
        .await
        .with_context(|| format!("error while fetching page {}", cli.url))?;

    let sections = parser::extract_sections(&cli.url, &html)
        .with_context(|| format!("error while parsing page {}", cli.url))?;

    emit::write_jsonl(&output, &sections)
        .with_context(|| format!("error while writing {}", output.display()))?;

    println!("Wrote {} sections to {}", sections.len(), output.display());

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("Done in {}", format_duration(elapsed));
    }

    Ok(())
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
