use std::path::PathBuf;

use config::{Config, ConfigError, Environment, Map};
use serde::Deserialize;

const ENV_PREFIX: &str = "SECTIONS";
const DEFAULT_OUTPUT: &str = "cpp.jsonl";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Where the JSON Lines file is written, relative to the working directory.
    pub output: PathBuf,
    pub user_agent: String,
}

impl Settings {
    /// Defaults overlaid with `SECTIONS_*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::build(None)
    }

    fn build(env: Option<Map<String, String>>) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("output", DEFAULT_OUTPUT)?
            .set_default("user_agent", default_user_agent())?
            .add_source(Environment::with_prefix(ENV_PREFIX).source(env))
            .build()?
            .try_deserialize()
    }
}

fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}
