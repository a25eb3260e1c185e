//! TOML configuration for the terminal calculator.
//!
//! Every key is optional:
//!
//! ```toml
//! [calculator]
//! debounce_ms = 300
//!
//! [display]
//! currency_symbol = "$"
//!
//! [audio]
//! sound_path = "assets/click.m4a"
//!
//! [logging]
//! level = "info"
//! file = "tip-calculator.log"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tip_core::CalculatorConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub calculator: CalculatorSection,
    pub display: DisplaySection,
    pub audio: AudioSection,
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CalculatorSection {
    /// Quiet period for bill text, in milliseconds.
    pub debounce_ms: u64,
}

impl Default for CalculatorSection {
    fn default() -> Self {
        Self {
            debounce_ms: CalculatorConfig::DEFAULT_QUIET_PERIOD.as_millis() as u64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DisplaySection {
    pub currency_symbol: String,
}

impl Default for DisplaySection {
    fn default() -> Self {
        Self {
            currency_symbol: "$".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AudioSection {
    pub sound_path: PathBuf,
}

impl Default for AudioSection {
    fn default() -> Self {
        Self {
            sound_path: PathBuf::from("assets/click.m4a"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Filter directive; `RUST_LOG` takes precedence when set.
    pub level: Option<String>,
    pub file: Option<PathBuf>,
}

impl UiConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn calculator_config(&self) -> CalculatorConfig {
        CalculatorConfig::default()
            .with_quiet_period(Duration::from_millis(self.calculator.debounce_ms))
    }
}
