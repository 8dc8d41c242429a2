use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use ini::{EscapePolicy, Ini, ParseOption, WriteOption};

use self::api::ApiConfig;
use self::paths::PathsConfig;

pub mod api;
pub mod paths;

/// Default config location, relative to the working directory
pub const CONFIG_FILE: &str = "config.ini";
/// Environment variable overriding [`CONFIG_FILE`]
pub const CONFIG_ENV: &str = "SNAPASK_CONFIG";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read config: {0}")]
    Ini(#[from] ini::Error),

    #[error("Invalid value for [{section}] {key}: '{value}'")]
    InvalidValue {
        section: &'static str,
        key: &'static str,
        value: String,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub api: ApiConfig,
    pub paths: PathsConfig,
}

impl Config {
    fn from_ini(ini: &Ini) -> Result<Self, ConfigError> {
        Ok(Self {
            api: ApiConfig::from_section(ini.section(Some(api::SECTION)))?,
            paths: PathsConfig::from_section(ini.section(Some(paths::SECTION))),
        })
    }

    fn to_ini(&self) -> Ini {
        let mut ini = Ini::new();
        self.api.write_section(&mut ini);
        self.paths.write_section(&mut ini);
        ini
    }

    /// Create the screenshot directory if it does not exist yet
    pub fn ensure_screenshot_dir(&self) -> Result<&Path, ConfigError> {
        let dir = self.paths.screenshot_dir.as_path();
        fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        Ok(dir)
    }
}

/// Reads and writes the config file at a fixed path
pub struct ConfigStore {
    path: PathBuf,
    defaults: Config,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            defaults: Config::default(),
        }
    }

    /// Use [`CONFIG_ENV`] if set, else [`CONFIG_FILE`]
    pub fn from_env() -> Self {
        let path = env::var(CONFIG_ENV).unwrap_or_else(|_| CONFIG_FILE.to_string());
        Self::new(path)
    }

    /// Replace the configuration written on first run
    pub fn with_defaults(mut self, defaults: Config) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the config, creating it from defaults if the file is missing
    pub fn load(&self) -> Result<Config, ConfigError> {
        if !self.path.exists() {
            tracing::info!("No config at {}, writing defaults", self.path.display());
            let config = self.defaults.clone();
            config.ensure_screenshot_dir()?;
            self.save(&config)?;
            return Ok(config);
        }

        tracing::debug!("Loading config from {}", self.path.display());
        Config::from_ini(&self.read_document()?)
    }

    /// Overwrite the config file with `config`
    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        self.write_document(&config.to_ini())
    }

    /// Persist a new screenshot directory, leaving every other entry untouched
    pub fn set_screenshot_dir(&self, dir: &Path) -> Result<(), ConfigError> {
        // First run still needs the full default file
        self.load()?;

        let mut document = self.read_document()?;
        document
            .with_section(Some(paths::SECTION))
            .set(paths::SCREENSHOT_DIR_KEY, dir.to_string_lossy().into_owned());
        self.write_document(&document)?;

        tracing::info!("Screenshot directory set to {}", dir.display());
        Ok(())
    }

    fn read_document(&self) -> Result<Ini, ConfigError> {
        // Windows paths carry backslashes, keep them literal
        let option = ParseOption {
            enabled_quote: false,
            enabled_escape: false,
            ..Default::default()
        };
        Ok(Ini::load_from_file_opt(&self.path, option)?)
    }

    fn write_document(&self, document: &Ini) -> Result<(), ConfigError> {
        let option = WriteOption {
            escape_policy: EscapePolicy::Nothing,
            ..Default::default()
        };
        document
            .write_to_file_opt(&self.path, option)
            .map_err(|source| ConfigError::Io {
                path: self.path.clone(),
                source,
            })
    }
}

/// Boolean spellings accepted in the config file
pub(crate) fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "yes" | "true" | "on" => Some(true),
        "0" | "no" | "false" | "off" => Some(false),
        _ => None,
    }
}
