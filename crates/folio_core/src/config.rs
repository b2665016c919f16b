//! Layered configuration.
//!
//! Sources, later overriding earlier:
//! - Bundled defaults (include_str! from folio.toml)
//! - ~/.config/folio/folio.toml
//! - ./folio.toml

use crate::Protocol;
use derive_getters::Getters;
use folio_error::{ConfigError, FolioError, FolioResult};
use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../../../folio.toml");

/// Where Worlds are persisted.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding one JSON document per World
    data_dir: PathBuf,
}

/// Completion provider settings.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Base URL of an OpenAI-compatible API
    base_url: String,
    /// Model identifier
    model: String,
    /// Environment variable holding the API key
    api_key_env: String,
    /// Completion length cap
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    /// Sampling temperature
    #[serde(default, skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

/// Prompt protocol settings.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Which tag protocol prompts use
    #[serde(default)]
    protocol: Protocol,
    /// Repeat the instructions at the end of enhanced prompts
    #[serde(default = "default_repeat")]
    repeat_instructions: bool,
    /// File replacing the built-in story template
    #[serde(default, skip_serializing_if = "Option::is_none")]
    story_template: Option<PathBuf>,
    /// File replacing the built-in scene template
    #[serde(default, skip_serializing_if = "Option::is_none")]
    scene_template: Option<PathBuf>,
}

fn default_repeat() -> bool {
    true
}

/// HTTP transport settings.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Socket address to listen on
    bind: String,
}

/// Top-level Folio configuration.
///
/// # Example
///
/// ```no_run
/// use folio_core::FolioConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = FolioConfig::load()?;
/// println!("Worlds live in {}", config.storage().data_dir().display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct FolioConfig {
    /// World persistence
    storage: StorageConfig,
    /// Completion provider
    provider: ProviderConfig,
    /// Prompt protocol
    generation: GenerationConfig,
    /// HTTP transport
    server: ServerConfig,
}

impl FolioConfig {
    /// Bundled defaults only.
    ///
    /// ```
    /// use folio_core::{FolioConfig, Protocol};
    ///
    /// let config = FolioConfig::bundled().unwrap();
    /// assert_eq!(*config.generation().protocol(), Protocol::Basic);
    /// assert_eq!(config.provider().api_key_env(), "CEREBRAS_API_KEY");
    /// ```
    pub fn bundled() -> FolioResult<Self> {
        Self::build(Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml)))
    }

    /// Bundled defaults overridden by one explicit file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> FolioResult<Self> {
        debug!("Loading configuration from file");

        Self::build(
            Config::builder()
                .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
                .add_source(File::from(path.as_ref())),
        )
    }

    /// Load configuration with precedence: current dir > home dir > bundled defaults.
    ///
    /// User config files are optional and silently skipped when absent.
    #[instrument]
    pub fn load() -> FolioResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/folio/folio.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("folio").required(false));

        Self::build(builder)
    }

    fn build(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> FolioResult<Self> {
        builder
            .build()
            .map_err(|e| {
                FolioError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                FolioError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }

    /// Replace the data directory.
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.storage.data_dir = data_dir.into();
        self
    }

    /// Replace the bind address.
    pub fn with_bind(mut self, bind: impl Into<String>) -> Self {
        self.server.bind = bind.into();
        self
    }
}
