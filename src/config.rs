//! Application configuration management.
//!
//! Settings are merged from several layers, later layers winning:
//!
//! 1. Built-in defaults
//! 2. TOML config file (`--config PATH`, or `config.toml` in the platform
//!    config directory)
//! 3. Environment variables prefixed with `LINEDUPE_` (`__` for nesting)
//! 4. Command-line flags
//!
//! # Example config file
//!
//! ```toml
//! group_size = 3
//! timestamp_mode = "strip"
//! hash = "blake3"
//! report_format = "json"
//! input_dir = "exports"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::cli::Cli;
use crate::dedup::{
    DedupConfig, HashAlgorithm, TimestampMode, DEFAULT_GROUP_SIZE, DEFAULT_STRIP_SYMBOLS,
    DEFAULT_TIMESTAMP_PATTERN,
};
use crate::error::DedupError;
use crate::report::ReportFormat;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "LINEDUPE_";

/// Keys accepted in the config file.
pub const KNOWN_KEYS: &[&str] = &[
    "group_size",
    "strip_symbols",
    "timestamp_pattern",
    "timestamp_mode",
    "hash",
    "input_dir",
    "output_dir",
    "default_file",
    "report_format",
    "progress",
];

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Lines per group.
    pub group_size: usize,
    /// Characters removed before comparison.
    pub strip_symbols: String,
    /// Regex for the leading timestamp of a line.
    pub timestamp_pattern: String,
    /// How timestamped lines are compared.
    pub timestamp_mode: TimestampMode,
    /// Fingerprint digest.
    pub hash: HashAlgorithm,
    /// Folder holding input files.
    pub input_dir: PathBuf,
    /// Folder receiving deduplicated files and reports.
    pub output_dir: PathBuf,
    /// File processed when no name is given.
    pub default_file: String,
    /// Report format.
    pub report_format: ReportFormat,
    /// Show a progress bar.
    pub progress: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            group_size: DEFAULT_GROUP_SIZE,
            strip_symbols: DEFAULT_STRIP_SYMBOLS.to_string(),
            timestamp_pattern: DEFAULT_TIMESTAMP_PATTERN.to_string(),
            timestamp_mode: TimestampMode::default(),
            hash: HashAlgorithm::default(),
            input_dir: PathBuf::from("input"),
            output_dir: PathBuf::from("output"),
            default_file: "_chat.txt".to_string(),
            report_format: ReportFormat::default(),
            progress: true,
        }
    }
}

impl Config {
    /// Load configuration from defaults, a config file, and the environment.
    ///
    /// # Arguments
    ///
    /// * `explicit_path` - Config file given on the command line. When absent,
    ///   the platform config file is used if it exists.
    ///
    /// # Errors
    ///
    /// - `DedupError::ConfigNotFound` if `explicit_path` does not exist
    /// - `DedupError::Config` if a layer cannot be parsed
    pub fn load(explicit_path: Option<&Path>) -> Result<Self, DedupError> {
        let path = match explicit_path {
            Some(path) if !path.is_file() => {
                return Err(DedupError::ConfigNotFound(path.to_path_buf()));
            }
            Some(path) => Some(path.to_path_buf()),
            None => Self::default_path().filter(|p| p.is_file()),
        };

        if let Some(ref path) = path {
            log::debug!("Loading config from {}", path.display());
            warn_unknown_keys(path);
        }

        Self::figment(path.as_deref()).extract().map_err(DedupError::from)
    }

    /// Load configuration from a specific file, falling back to defaults on error.
    #[must_use]
    pub fn load_from_path(path: &Path) -> Self {
        match Self::load(Some(path)) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Failed to load config, using defaults: {}", e);
                Self::default()
            }
        }
    }

    /// The layered figment for an optional config file.
    #[must_use]
    pub fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(path) = path {
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Default platform-specific config file path.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "linedupe", "linedupe")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Override settings with flags given on the command line.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(size) = cli.group_size {
            self.group_size = size;
        }
        if let Some(ref pattern) = cli.timestamp_pattern {
            self.timestamp_pattern.clone_from(pattern);
        }
        if let Some(mode) = cli.timestamp_mode {
            self.timestamp_mode = mode;
        }
        if let Some(hash) = cli.hash {
            self.hash = hash;
        }
        if let Some(ref dir) = cli.input_dir {
            self.input_dir.clone_from(dir);
        }
        if let Some(ref dir) = cli.output_dir {
            self.output_dir.clone_from(dir);
        }
        if let Some(format) = cli.report_format {
            self.report_format = format;
        }
        if cli.no_progress || cli.quiet {
            self.progress = false;
        }
    }

    /// Settings for the dedup core.
    #[must_use]
    pub fn to_dedup_config(&self) -> DedupConfig {
        DedupConfig::default()
            .with_group_size(self.group_size)
            .with_strip_symbols(self.strip_symbols.clone())
            .with_timestamp_pattern(self.timestamp_pattern.clone())
            .with_timestamp_mode(self.timestamp_mode)
            .with_hash_algorithm(self.hash)
    }

    /// Serialize to TOML, e.g. to seed a config file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Keys in a TOML document that are not config keys, each with the closest
/// known key when one is similar enough.
#[must_use]
pub fn unknown_keys(content: &str) -> Vec<(String, Option<&'static str>)> {
    let Ok(table) = content.parse::<toml::Table>() else {
        return Vec::new();
    };
    table
        .keys()
        .filter(|key| !KNOWN_KEYS.contains(&key.as_str()))
        .map(|key| (key.clone(), suggest_key(key)))
        .collect()
}

/// Closest known key by Jaro-Winkler similarity.
fn suggest_key(key: &str) -> Option<&'static str> {
    KNOWN_KEYS
        .iter()
        .map(|known| (*known, strsim::jaro_winkler(key, known)))
        .filter(|(_, score)| *score > 0.8)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(known, _)| known)
}

fn warn_unknown_keys(path: &Path) {
    let Ok(content) = fs::read_to_string(path) else {
        return;
    };
    for (key, suggestion) in unknown_keys(&content) {
        match suggestion {
            Some(known) => log::warn!(
                "Unknown config key '{}' in {} (did you mean '{}'?)",
                key,
                path.display(),
                known
            ),
            None => log::warn!("Unknown config key '{}' in {}", key, path.display()),
        }
    }
}
