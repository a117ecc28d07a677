//! Settings for a `dgf-strip` run.
//!
//! Settings are optional and read from YAML. The file is taken from the
//! `DGF_STRIP_CONFIG` environment variable when set, otherwise from
//! `dgf-strip.yml` in the working directory if present.
//!
//! # Example YAML
//!
//! ```yaml
//! strict: false
//! fail_on_diagnostics: true
//! dry_run: false
//! output_directory: unlocked
//! ```

use std::ffi::OsString;
use std::io::BufReader;
use std::path::Path;

use dgf_strip_core::{ParseMode, ParseResult};
use serde::Deserialize;

use crate::error::Result;

/// Environment variable naming the settings file.
pub const CONFIG_ENV: &str = "DGF_STRIP_CONFIG";

/// Settings file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "dgf-strip.yml";

/// Exit status when parsing produced diagnostics.
pub const EXIT_DIAGNOSTICS: i32 = 2;

/// Exit status when at least one file failed.
pub const EXIT_FILE_FAILURES: i32 = 1;

/// Top-level run settings. Every field is optional in the YAML.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StripConfig {
    /// Abort before doing any work on the first parse diagnostic.
    pub strict: bool,
    /// Reflect diagnostics and file failures in the exit status.
    pub fail_on_diagnostics: bool,
    /// Print the resolved plan as JSON instead of processing files.
    pub dry_run: bool,
    /// Output directory used when `-output-directory` is not given.
    pub output_directory: Option<String>,
}

impl StripConfig {
    /// Loads settings from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::error::ConfigError::IoError) if the file
    /// cannot be read, or [`YamlError`](crate::error::ConfigError::YamlError)
    /// if parsing fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config = serde_yaml::from_reader(reader)?;
        Ok(config)
    }

    /// Finds and loads the settings for this process.
    pub fn discover(working_dir: &Path) -> Result<Self> {
        Self::locate(std::env::var_os(CONFIG_ENV), working_dir)
    }

    /// Loads from `explicit` if given (it must exist), else from the
    /// default file in `working_dir` if it exists, else returns defaults.
    pub fn locate(explicit: Option<OsString>, working_dir: &Path) -> Result<Self> {
        if let Some(path) = explicit.filter(|p| !p.is_empty()) {
            return Self::load(path);
        }

        let fallback = working_dir.join(DEFAULT_CONFIG_FILE);
        if fallback.is_file() {
            Self::load(fallback)
        } else {
            Ok(Self::default())
        }
    }

    /// Parser mode implied by these settings.
    pub fn parse_mode(&self) -> ParseMode {
        if self.strict {
            ParseMode::Strict
        } else {
            ParseMode::Lenient
        }
    }

    /// Fills plan fields the command line left unset.
    pub fn apply_defaults(&self, plan: &mut ParseResult) {
        if plan.output_directory.is_empty() {
            if let Some(dir) = &self.output_directory {
                plan.output_directory = dir.clone();
            }
        }
    }

    /// Process exit status for a finished run.
    ///
    /// Always 0 unless `fail_on_diagnostics` is set; diagnostics take
    /// precedence over file failures.
    pub fn exit_status(&self, had_diagnostics: bool, had_failures: bool) -> i32 {
        if !self.fail_on_diagnostics {
            return 0;
        }
        if had_diagnostics {
            EXIT_DIAGNOSTICS
        } else if had_failures {
            EXIT_FILE_FAILURES
        } else {
            0
        }
    }
}
