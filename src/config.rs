//! Run configuration loaded from TOML.
//!
//! The classification table itself is fixed; configuration only decides how
//! failures are handled, whether reports are written, and which scanned files
//! are considered at all.
//!
//! # Configuration File Format
//!
//! ```toml
//! [organize]
//! mode = "best-effort"
//! reports = true
//!
//! [filters]
//! enable_hidden_files = false
//!
//! [filters.exclude]
//! filenames = ["MASTER_SUMMARY.txt", "DETAILED_REPORT.txt"]
//! patterns = ["*.part"]
//! extensions = ["tmp"]
//! regex = []
//!
//! [filters.include]
//! patterns = []
//! ```

use glob::Pattern;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = ".foldsortrc.toml";

/// Errors that can occur during configuration loading and compilation.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("Invalid configuration: {0}")]
    ConfigInvalid(String),

    #[error("Invalid glob pattern '{0}'")]
    InvalidGlobPattern(String),

    #[error("Invalid regex pattern '{pattern}': {reason}")]
    InvalidRegexPattern { pattern: String, reason: String },

    #[error("IO error reading configuration: {0}")]
    IoError(String),
}

/// How the organizer reacts to a file that cannot be moved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrganizeMode {
    /// Abort the run on the first failure.
    #[default]
    FailFast,
    /// Record the failure and carry on with the next file.
    BestEffort,
}

/// The `[organize]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizeSettings {
    /// Failure handling, `"fail-fast"` (default) or `"best-effort"`.
    #[serde(default)]
    pub mode: OrganizeMode,

    /// Write summary files after a successful run.
    #[serde(default = "default_true")]
    pub reports: bool,
}

impl Default for OrganizeSettings {
    fn default() -> Self {
        Self {
            mode: OrganizeMode::default(),
            reports: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Run behaviour.
    #[serde(default)]
    pub organize: OrganizeSettings,

    /// Which scanned files are organized.
    #[serde(default)]
    pub filters: FilterRules,
}

/// The `[filters]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterRules {
    /// Whether files starting with "." are organized. Defaults to true.
    #[serde(default = "default_true")]
    pub enable_hidden_files: bool,

    /// Rules that leave matching files in place.
    #[serde(default)]
    pub exclude: ExcludeRules,

    /// Whitelist that overrides every exclusion.
    #[serde(default)]
    pub include: IncludeRules,
}

impl Default for FilterRules {
    fn default() -> Self {
        Self {
            enable_hidden_files: true,
            exclude: ExcludeRules::default(),
            include: IncludeRules::default(),
        }
    }
}

/// Rules for leaving files where they are.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcludeRules {
    /// Exact filenames (e.g. "Thumbs.db").
    #[serde(default)]
    pub filenames: Vec<String>,

    /// Glob patterns matched against the filename (e.g. "*.part").
    #[serde(default)]
    pub patterns: Vec<String>,

    /// Extensions without the dot, case-insensitive (e.g. "tmp").
    #[serde(default)]
    pub extensions: Vec<String>,

    /// Regex patterns matched against the filename.
    #[serde(default)]
    pub regex: Vec<String>,
}

/// Rules that force a file to be organized.
///
/// A match here wins over hidden-file handling and every exclude rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncludeRules {
    /// Glob patterns matched against the filename (e.g. "*.pdf").
    #[serde(default)]
    pub patterns: Vec<String>,
}

impl Config {
    /// Load configuration, falling back to defaults.
    ///
    /// Lookup order:
    /// 1. `config_path`, when given (must exist)
    /// 2. `.foldsortrc.toml` in the current directory
    /// 3. `~/.config/foldsort/config.toml`
    /// 4. built-in defaults
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            return Self::load_from_file(path);
        }

        let local_config = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_config.exists() {
            return Self::load_from_file(&local_config);
        }

        if let Ok(home) = std::env::var("HOME") {
            let home_config = PathBuf::from(home)
                .join(".config")
                .join("foldsort")
                .join("config.toml");
            if home_config.exists() {
                return Self::load_from_file(&home_config);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to a TOML configuration file
    ///
    /// # Errors
    ///
    /// `ConfigNotFound` when the file does not exist, `IoError` when it cannot
    /// be read and `ConfigInvalid` when it is not valid TOML for this schema.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::ConfigNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML text.
    ///
    /// Missing tables and keys take their defaults.
    ///
    /// # Example
    ///
    /// ```
    /// use foldsort::config::{Config, OrganizeMode};
    ///
    /// let config = Config::parse("[organize]\nmode = \"best-effort\"\n").unwrap();
    /// assert_eq!(config.organize.mode, OrganizeMode::BestEffort);
    /// assert!(config.organize.reports);
    /// ```
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ConfigInvalid(e.to_string()))
    }
}

impl FilterRules {
    /// Compile the rules into matchers.
    ///
    /// # Errors
    ///
    /// `InvalidGlobPattern` or `InvalidRegexPattern` for the first pattern that
    /// does not compile.
    pub fn compile(&self) -> Result<CompiledFilters, ConfigError> {
        CompiledFilters::new(self)
    }
}

/// Pre-compiled filter rules.
#[derive(Debug, Clone)]
pub struct CompiledFilters {
    enable_hidden_files: bool,
    exclude_filenames: HashSet<String>,
    exclude_extensions: HashSet<String>,
    exclude_patterns: Vec<Pattern>,
    exclude_regexes: Vec<Regex>,
    include_patterns: Vec<Pattern>,
}

impl Default for CompiledFilters {
    /// Filters that include every file.
    fn default() -> Self {
        Self {
            enable_hidden_files: true,
            exclude_filenames: HashSet::new(),
            exclude_extensions: HashSet::new(),
            exclude_patterns: Vec::new(),
            exclude_regexes: Vec::new(),
            include_patterns: Vec::new(),
        }
    }
}

fn compile_globs(patterns: &[String]) -> Result<Vec<Pattern>, ConfigError> {
    patterns
        .iter()
        .map(|pattern| {
            Pattern::new(pattern).map_err(|_| ConfigError::InvalidGlobPattern(pattern.clone()))
        })
        .collect()
}

impl CompiledFilters {
    fn new(rules: &FilterRules) -> Result<Self, ConfigError> {
        let exclude_regexes = rules
            .exclude
            .regex
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| ConfigError::InvalidRegexPattern {
                    pattern: pattern.clone(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            enable_hidden_files: rules.enable_hidden_files,
            exclude_filenames: rules.exclude.filenames.iter().cloned().collect(),
            exclude_extensions: rules
                .exclude
                .extensions
                .iter()
                .map(|ext| ext.trim_start_matches('.').to_lowercase())
                .collect(),
            exclude_patterns: compile_globs(&rules.exclude.patterns)?,
            exclude_regexes,
            include_patterns: compile_globs(&rules.include.patterns)?,
        })
    }

    /// Whether a scanned file should be organized.
    ///
    /// Include patterns win over everything. Otherwise hidden files, exact
    /// names, extensions, glob patterns and regexes exclude, in that order.
    pub fn should_include(&self, file_name: &str) -> bool {
        if self.include_patterns.iter().any(|p| p.matches(file_name)) {
            return true;
        }

        if !self.enable_hidden_files && file_name.starts_with('.') {
            return false;
        }

        if self.exclude_filenames.contains(file_name) {
            return false;
        }

        if let Some(ext) = Path::new(file_name).extension() {
            let ext_lower = ext.to_string_lossy().to_lowercase();
            if self.exclude_extensions.contains(&ext_lower) {
                return false;
            }
        }

        if self.exclude_patterns.iter().any(|p| p.matches(file_name)) {
            return false;
        }

        !self.exclude_regexes.iter().any(|re| re.is_match(file_name))
    }
}
