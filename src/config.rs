use articlesync_core::DEFAULT_ARTICLES_URL;
use serde::{Deserialize, Serialize, Serializer};
use std::path::PathBuf;

/// Source of a configuration value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    Default,
    File,
    Environment,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "default"),
            ConfigSource::File => write!(f, "file"),
            ConfigSource::Environment => write!(f, "environment"),
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }
}

/// Articles API configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApiConfig {
    /// Articles endpoint (default: the hosted articles API)
    pub url: Option<String>,
    /// Bearer token sent with every request
    #[serde(serialize_with = "redact")]
    pub token: Option<String>,
}

impl ApiConfig {
    /// Returns the configured endpoint or the default one.
    pub fn endpoint(&self) -> &str {
        self.url.as_deref().unwrap_or(DEFAULT_ARTICLES_URL)
    }
}

fn redact<S: Serializer>(token: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
    match token {
        Some(_) => serializer.serialize_some("<redacted>"),
        None => serializer.serialize_none(),
    }
}

/// Application configuration with source tracking
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Path to the managed collection file
    pub collection_path: ConfigValue<PathBuf>,
    /// Config file path used (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
    /// Articles API configuration
    pub api: ApiConfig,
}

/// Internal struct for deserializing config file
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    collection_path: Option<PathBuf>,
    api: Option<ApiConfig>,
}

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let default_collection_path = Self::default_data_dir().join("collection.json");

        // Start with defaults
        let mut collection_path =
            ConfigValue::new(default_collection_path, ConfigSource::Default);
        let mut config_file = None;
        let mut api = ApiConfig::default();

        // Try to load from config file
        let path = config_path.unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
            let file_config: ConfigFile = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(path.clone(), e))?;

            config_file = Some(path.clone());

            if let Some(file_path) = file_config.collection_path {
                // Resolve relative paths against config file's directory
                let resolved_path = if file_path.is_relative() {
                    path.parent()
                        .map(|p| p.join(&file_path))
                        .unwrap_or(file_path)
                } else {
                    file_path
                };
                collection_path = ConfigValue::new(resolved_path, ConfigSource::File);
            }
            if let Some(api_config) = file_config.api {
                api = api_config;
            }
        }

        // Apply environment variable overrides
        if let Ok(file_path) = std::env::var("ARTICLESYNC_COLLECTION_PATH") {
            collection_path =
                ConfigValue::new(PathBuf::from(file_path), ConfigSource::Environment);
        }
        if let Ok(url) = std::env::var("ARTICLESYNC_API_URL") {
            api.url = Some(url);
        }
        if let Ok(token) = std::env::var("ARTICLESYNC_API_TOKEN") {
            api.token = Some(token);
        }

        Ok(Self {
            collection_path,
            config_file,
            api,
        })
    }

    /// Default config directory (platform-specific):
    /// - Linux: ~/.config/articlesync/
    /// - macOS: ~/Library/Application Support/articlesync/
    /// - Windows: %APPDATA%/articlesync/
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("articlesync")
    }

    /// Default data directory (platform-specific):
    /// - Linux: ~/.local/share/articlesync/
    /// - macOS: ~/Library/Application Support/articlesync/
    /// - Windows: %APPDATA%/articlesync/
    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("articlesync")
    }

    /// Default config file path (platform-specific config dir + config.yaml)
    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join("config.yaml")
    }
}

#[derive(Debug)]
pub enum ConfigError {
    ReadError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
