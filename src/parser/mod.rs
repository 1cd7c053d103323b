pub mod dom;
pub mod sections;
pub mod text;

use tracing::info;

use crate::error::ExtractError;
use sections::Section;

/// Two-pass pipeline: markup → tree → sections.
pub fn extract_sections(url: &str, markup: &str) -> Result<Vec<Section>, ExtractError> {
    let root = dom::parse(markup)?;
    let sections = sections::walk(url, &root);
    info!("Extracted {} sections from {}", sections.len(), url);
    Ok(sections)
}
