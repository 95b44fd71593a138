//! Layered configuration: defaults, TOML file, environment, command line.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use crate::cli::Cli;
use crate::speech::SpeechConfig;
use crate::translate::EndpointConfig;

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "babelterm.toml";

/// Prefix of environment variable overrides (`BABELTERM_TARGET_LANG=fr`).
pub const ENV_PREFIX: &str = "BABELTERM_";

/// Default cap on the source panel, in characters.
pub const DEFAULT_MAX_SOURCE_CHARS: usize = 5000;

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid configuration: {0}")]
    Figment(#[from] figment::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// All runtime settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Initial source language code
    pub source_lang: String,
    /// Initial target language code
    pub target_lang: String,
    /// Start in dark mode
    pub dark_mode: bool,
    /// Characters kept from typed source text
    pub max_source_chars: usize,
    /// Directory exported translations are written to
    pub export_dir: PathBuf,
    /// Catalog file replacing the built-in languages
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,
    /// Translation endpoint
    pub endpoint: EndpointConfig,
    /// Speech synthesizer
    pub speech: SpeechConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source_lang: "en".to_string(),
            target_lang: "es".to_string(),
            dark_mode: true,
            max_source_chars: DEFAULT_MAX_SOURCE_CHARS,
            export_dir: PathBuf::from("."),
            catalog: None,
            endpoint: EndpointConfig::default(),
            speech: SpeechConfig::default(),
        }
    }
}

/// Nested overrides that do not map onto a flat CLI field.
#[derive(Debug, Default, Serialize)]
struct NestedOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    dark_mode: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    endpoint: Option<EndpointOverride>,
}

#[derive(Debug, Serialize)]
struct EndpointOverride {
    url: String,
}

impl Settings {
    /// Merge defaults, the config file, `BABELTERM_*` variables and CLI flags.
    ///
    /// `--config` must exist when given; the default file is optional.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let file = match &cli.config {
            Some(path) => {
                if !path.is_file() {
                    return Err(ConfigError::Io(std::io::Error::new(
                        std::io::ErrorKind::NotFound,
                        format!("config file not found: {}", path.display()),
                    )));
                }
                path.clone()
            }
            None => PathBuf::from(DEFAULT_CONFIG_FILE),
        };
        Self::figment(&file, cli).extract().map_err(ConfigError::from)
    }

    /// Build the provider stack without extracting it.
    pub fn figment(file: &Path, cli: &Cli) -> Figment {
        let nested = NestedOverrides {
            dark_mode: cli.dark_mode(),
            endpoint: cli
                .endpoint
                .clone()
                .map(|url| EndpointOverride { url }),
        };

        Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .merge(Serialized::defaults(cli))
            .merge(Serialized::defaults(nested))
    }

    /// Save settings to a TOML file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
