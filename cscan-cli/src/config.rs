//! Configuration module for the cscan CLI.
//!
//! Settings live in a `cscan.toml` file. Every key is optional:
//!
//! ```toml
//! default_language = "java"
//! jobs = 8
//!
//! [scan]
//! allow_multiline_literals = false
//!
//! [strip]
//! policy = "collapse"
//!
//! [languages.cobol]
//! extensions = ["cob", "cbl"]
//! line_comment = "*>"
//! string_quote = "\""
//! ```
//!
//! Custom languages are checked with [`ScanRulesBuilder`] when the file is
//! loaded, so a bad rule set is reported before any input is touched.

use dirs::{config_dir, home_dir};
use indexmap::IndexMap;
use num_cpus::get as get_num_cpus;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use cscan_lex::{Language, ReassemblyPolicy, ScanRules, ScanRulesBuilder};

use crate::error::{CscanError, Result};

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "cscan.toml";

/// Fallback worker count when the CPU count does not fit.
const DEFAULT_THREAD_COUNT: u32 = 4;

/// Application configuration structure.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Language used when neither `--language` nor the file extension decides.
    #[serde(default)]
    pub default_language: Option<String>,

    /// Number of parallel jobs for multi-file runs.
    #[serde(default = "default_parallel_jobs")]
    pub jobs: u32,

    /// Scanner options applied to every language.
    #[serde(default)]
    pub scan: ScanConfig,

    /// Strip-specific options.
    #[serde(default)]
    pub strip: StripConfig,

    /// User-defined languages, in file order.
    #[serde(default)]
    pub languages: IndexMap<String, LanguageConfig>,
}

/// Scanner options.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ScanConfig {
    /// Let string and char literals span lines. Unset keeps each
    /// language's own setting.
    #[serde(default)]
    pub allow_multiline_literals: Option<bool>,
}

/// Strip-specific options.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct StripConfig {
    /// What happens to lines emptied by comment removal.
    #[serde(default)]
    pub policy: ReassemblyPolicy,
}

/// A user-defined language.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LanguageConfig {
    /// File extensions (without the dot) mapped to this language.
    #[serde(default)]
    pub extensions: Vec<String>,
    #[serde(default)]
    pub line_comment: Option<String>,
    /// Start and end token, e.g. `["(*", "*)"]`.
    #[serde(default)]
    pub block_comment: Option<(String, String)>,
    #[serde(default)]
    pub string_quote: Option<char>,
    #[serde(default)]
    pub char_quote: Option<char>,
    #[serde(default)]
    pub escape: Option<char>,
    #[serde(default)]
    pub allow_multiline_literals: Option<bool>,
}

impl LanguageConfig {
    /// Build the scan rules this entry describes.
    ///
    /// `multiline` is the global `[scan]` setting, used when the entry does
    /// not set its own.
    pub fn to_rules(&self, name: &str, multiline: Option<bool>) -> Result<ScanRules> {
        let mut builder = ScanRulesBuilder::default();
        if let Some(token) = &self.line_comment {
            builder = builder.line_comment(token.as_str());
        }
        if let Some((start, end)) = &self.block_comment {
            builder = builder.block_comment(start.as_str(), end.as_str());
        }
        if let Some(quote) = self.string_quote {
            builder = builder.string_quote(quote);
        }
        if let Some(quote) = self.char_quote {
            builder = builder.char_quote(quote);
        }
        if let Some(escape) = self.escape {
            builder = builder.escape(escape);
        }
        let multiline = self.allow_multiline_literals.or(multiline).unwrap_or(false);
        builder
            .allow_multiline_literals(multiline)
            .build()
            .map_err(|e| CscanError::rules(name, e))
    }
}

/// Get the default number of parallel jobs based on CPU count.
fn default_parallel_jobs() -> u32 {
    get_num_cpus().try_into().unwrap_or(DEFAULT_THREAD_COUNT)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_language: None,
            jobs: default_parallel_jobs(),
            scan: ScanConfig::default(),
            strip: StripConfig::default(),
            languages: IndexMap::new(),
        }
    }
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Searches for configuration in the following order:
    /// 1. Current directory
    /// 2. `~/.config/cscan/`
    /// 3. The platform configuration directory
    ///
    /// Returns the default configuration if no config file is found.
    pub fn load() -> Result<Self> {
        match Self::find_config_file() {
            Some(path) => Self::load_from_path(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load and validate configuration from a specific path.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CscanError::Config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&content)?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse and validate configuration text.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .map_err(|e| CscanError::Config(format!("Failed to parse configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Check every custom language and the default language name.
    pub fn validate(&self) -> Result<()> {
        if self.jobs == 0 {
            return Err(CscanError::Config("jobs must be at least 1".to_string()));
        }
        for (name, language) in &self.languages {
            language.to_rules(name, self.scan.allow_multiline_literals)?;
        }
        if let Some(name) = &self.default_language {
            if !self.knows_language(name) {
                return Err(CscanError::Config(format!(
                    "Unknown default language: {}",
                    name
                )));
            }
        }
        Ok(())
    }

    /// Whether `name` is a built-in language, an alias, or a custom language.
    pub fn knows_language(&self, name: &str) -> bool {
        Language::from_name(name).is_some()
            || self.languages.keys().any(|key| key.eq_ignore_ascii_case(name))
    }

    /// Check for config in current directory.
    fn check_current_dir_config() -> Option<PathBuf> {
        let path = PathBuf::from(CONFIG_FILE_NAME);
        path.exists().then_some(path)
    }

    /// Check for config in home directory.
    fn check_home_config() -> Option<PathBuf> {
        home_dir()
            .map(|dir| dir.join(".config").join("cscan").join(CONFIG_FILE_NAME))
            .filter(|path| path.exists())
    }

    /// Check for config in system config directory.
    fn check_system_config() -> Option<PathBuf> {
        config_dir()
            .map(|dir| dir.join("cscan").join(CONFIG_FILE_NAME))
            .filter(|path| path.exists())
    }

    /// Find the configuration file in standard locations.
    fn find_config_file() -> Option<PathBuf> {
        Self::check_current_dir_config()
            .or_else(Self::check_home_config)
            .or_else(Self::check_system_config)
    }
}
