//! # Configuration
//!
//! Settings are loaded by [`confique`], layered in priority order:
//! 1. **CLI flags**: `--records-per-file`, `--output-dir` (applied with
//!    [`TumblerConfig::with_overrides`]).
//! 2. **Environment variables**: `TUMBLER_RECORDS_PER_FILE`,
//!    `TUMBLER_OUTPUT_DIR`, `TUMBLER_PROGRESS_INTERVAL`.
//! 3. **Project file**: `tumbler.toml` in the working directory, if present.
//! 4. **Compiled defaults**.
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `records_per_file` | `5000000` | Locks per output file in quiet mode |
//! | `output_dir` | `.` | Where quiet mode writes its files |
//! | `progress_interval` | `100000` | Locks between progress updates in quiet mode |

use crate::error::{Result, TumblerError};
use confique::Config;
use serde::Serialize;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "tumbler.toml";

#[derive(Config, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct TumblerConfig {
    /// Maximum number of locks written to one output file.
    #[config(default = 5000000, env = "TUMBLER_RECORDS_PER_FILE")]
    pub records_per_file: u64,

    /// Directory receiving the `<inventory>_locks_<n>.txt` files.
    #[config(default = ".", env = "TUMBLER_OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// How many locks pass between progress updates in quiet mode.
    #[config(default = 100000, env = "TUMBLER_PROGRESS_INTERVAL")]
    pub progress_interval: u64,
}

impl Default for TumblerConfig {
    fn default() -> Self {
        Self {
            records_per_file: 5_000_000,
            output_dir: PathBuf::from("."),
            progress_interval: 100_000,
        }
    }
}

impl TumblerConfig {
    /// Load settings from the environment and `dir/tumbler.toml`.
    pub fn load(dir: &Path) -> Result<Self> {
        let config = Self::builder()
            .env()
            .file(dir.join(CONFIG_FILENAME))
            .load()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.records_per_file == 0 {
            return Err(TumblerError::Config(
                "records_per_file must be at least 1".to_string(),
            ));
        }
        if self.progress_interval == 0 {
            return Err(TumblerError::Config(
                "progress_interval must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Apply command line overrides on top of loaded settings.
    pub fn with_overrides(
        mut self,
        records_per_file: Option<u64>,
        output_dir: Option<PathBuf>,
    ) -> Result<Self> {
        if let Some(records) = records_per_file {
            self.records_per_file = records;
        }
        if let Some(dir) = output_dir {
            self.output_dir = dir;
        }
        self.validate()?;
        Ok(self)
    }
}
