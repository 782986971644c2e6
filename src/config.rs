//! Trace/output-format configuration.
//!
//! Loaded from an optional TOML file via `--config`; absence of the file
//! is not an error, defaults apply. Nothing here affects simulated cycle
//! counts or register/memory results — it only changes what gets printed.

use serde::Deserialize;

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub trace: TraceConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct TraceConfig {
    /// Print every stage's latch each cycle (`display` mode) rather than
    /// only the instruction that advanced.
    #[serde(default = "default_true")]
    pub full_diagram: bool,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            full_diagram: default_true(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Loads a TOML config file, or falls back to defaults if `path` is `None`.
    pub fn load(path: Option<&std::path::Path>) -> Self {
        let Some(path) = path else {
            return Config::default();
        };
        match std::fs::read_to_string(path) {
            Ok(text) => toml::from_str(&text).unwrap_or_else(|err| {
                tracing::error!(%err, path = %path.display(), "malformed config file, using defaults");
                Config::default()
            }),
            Err(err) => {
                tracing::info!(%err, path = %path.display(), "no config file found, using defaults");
                Config::default()
            }
        }
    }
}
