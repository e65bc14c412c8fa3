use config::{Config, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub mod validator;

use crate::engine::{SubmitPolicy, DEFAULT_SUBMIT_TITLE};
use crate::repository::DEFAULT_BASE_URL;

/// Repository and rendering settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    /// Reject rendering of values whose schema was not added in advance
    #[serde(default)]
    pub strict: bool,
    /// Whether form descriptors end with a submit directive
    #[serde(default)]
    pub submit: SubmitPolicy,
    #[serde(default = "default_submit_title")]
    pub submit_title: String,
    /// URL prefix of the schema endpoint and static assets, ends with `/`
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_submit_title() -> String {
    DEFAULT_SUBMIT_TITLE.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            strict: false,
            submit: SubmitPolicy::default(),
            submit_title: default_submit_title(),
            base_url: default_base_url(),
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, anyhow::Error> {
        Self::from_root(".")
    }

    /// Load `jsonform.{toml,yaml,json}` from `root`, falling back to defaults
    pub fn from_root(root: &str) -> Result<Self, anyhow::Error> {
        let config_path = Path::new(root).join("jsonform");
        Self::load(File::from(config_path).required(false))
    }

    /// Load settings from an explicit file, which must exist
    pub fn from_file(path: &Path) -> Result<Self, anyhow::Error> {
        Self::load(File::from(path).required(true))
    }

    fn load<S>(source: S) -> Result<Self, anyhow::Error>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let s = Config::builder()
            .add_source(source)
            .set_default("strict", false)?
            .set_default("submit", "append")?
            .set_default("submit_title", DEFAULT_SUBMIT_TITLE)?
            .set_default("base_url", DEFAULT_BASE_URL)?
            .build()?;

        let settings: Settings = s.try_deserialize()?;

        validator::ConfigValidator::validate(&settings).map_err(|errors| {
            let error_messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            anyhow::anyhow!(
                "Configuration validation failed:\n{}",
                error_messages.join("\n")
            )
        })?;

        Ok(settings)
    }
}
