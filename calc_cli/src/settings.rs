//! CLI settings.
//!
//! Loaded from an optional JSON file (`--config`), then overridden by
//! command-line flags. Every field has a default, so a partial file such as
//! `{"precision": 4}` is valid.
//!
//! ```json
//! {
//!   "output": "json",
//!   "precision": 4,
//!   "prompt": false,
//!   "logging": { "default": "warn", "modules": { "calc_core": "debug" } }
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// How results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// `= 5` / `error[CODE]: message`
    #[default]
    Text,
    /// One JSON object per result
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub output: OutputFormat,

    /// Decimal places for floating-point results in text output
    /// (`None` prints the shortest exact representation)
    pub precision: Option<usize>,

    /// Show a `> ` prompt when stdin is a terminal
    pub prompt: bool,

    pub logging: LoggingSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            output: OutputFormat::Text,
            precision: None,
            prompt: true,
            logging: LoggingSettings::default(),
        }
    }
}

impl Settings {
    /// Read settings from a JSON file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings from '{}'", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("invalid settings file '{}'", path.display()))
    }
}

/// Log levels: a default plus per-module overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub default: String,
    pub modules: BTreeMap<String, String>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            default: "warn".to_string(),
            modules: BTreeMap::new(),
        }
    }
}

impl LoggingSettings {
    /// `EnvFilter` directive string, e.g. `warn,calc_core=debug`
    pub fn filter_directive(&self) -> String {
        let mut directive = self.default.clone();
        for (module, level) in &self.modules {
            directive.push_str(&format!(",{module}={level}"));
        }
        directive
    }
}
