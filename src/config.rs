use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{CompactionError, Result};
use crate::utils::constants::{DEFAULT_LABEL, DEFAULT_OUTPUT_DIR, DEFAULT_SAMPLE_INTERVAL_SECS};

/// Explicit pipeline configuration, constructed in `main` and passed down.
/// Loaded from an optional `compactor.toml` plus `COMPACTOR_*` environment
/// variables; command-line flags override individual fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompactorConfig {
    /// Output grid spacing in seconds.
    pub sample_interval_secs: f64,
    /// Directory default output files are written to.
    pub output_dir: PathBuf,
    /// Label woven into default output file names.
    pub label: String,
    /// Abort the batch on the first unclassifiable activity.
    pub strict: bool,
}

impl Default for CompactorConfig {
    fn default() -> Self {
        Self {
            sample_interval_secs: DEFAULT_SAMPLE_INTERVAL_SECS,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            label: DEFAULT_LABEL.to_string(),
            strict: false,
        }
    }
}

impl CompactorConfig {
    /// Layered load: defaults, then `compactor.toml` if present, then
    /// environment variables.
    pub fn load() -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("compactor").required(false))
            .add_source(config::Environment::with_prefix("COMPACTOR").try_parsing(true))
            .build()?;

        let loaded: CompactorConfig = settings.try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    pub fn validate(&self) -> Result<()> {
        if self.sample_interval_secs <= 0.0 {
            return Err(CompactionError::Config(format!(
                "sample interval must be positive, got {}",
                self.sample_interval_secs
            )));
        }
        if self.label.is_empty() {
            return Err(CompactionError::Config(
                "label must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
