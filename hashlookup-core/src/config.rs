//! Lookup configuration.
//!
//! Collects the settings a single invocation needs: where JSON output goes
//! and how the database connection is opened.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Default directory for JSON output files.
pub const DEFAULT_OUTPUT_DIR: &str = "static";

/// Configuration for one lookup run.
///
/// # Example
/// ```rust
/// use hashlookup_core::LookupConfig;
/// use std::time::Duration;
///
/// let config = LookupConfig::default()
///     .with_output_dir("out")
///     .with_connect_timeout(Duration::from_secs(5));
///
/// assert!(config.validate().is_ok());
/// assert!(config.read_only);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupConfig {
    /// Directory that receives JSON result files
    pub output_dir: PathBuf,
    /// How long to wait for the database connection
    pub connect_timeout: Duration,
    /// Whether to open the database read-only
    pub read_only: bool,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            connect_timeout: Duration::from_secs(30),
            read_only: true,
        }
    }
}

impl LookupConfig {
    /// Validates configuration parameters.
    ///
    /// # Errors
    /// Returns a configuration error if the output directory is empty or the
    /// connect timeout is zero.
    pub fn validate(&self) -> crate::Result<()> {
        if self.output_dir.as_os_str().is_empty() {
            return Err(crate::error::LookupError::configuration(
                "output_dir cannot be empty",
            ));
        }

        if self.connect_timeout.is_zero() {
            return Err(crate::error::LookupError::configuration(
                "connect_timeout must be greater than 0",
            ));
        }

        Ok(())
    }

    /// Builder method to set the output directory.
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    /// Builder method to set the connect timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Builder method to toggle read-only mode.
    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }
}
