use std::fs::read_to_string;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{
    DEFAULT_ANNOTATIONS_FILE, DEFAULT_BREAKTHROUGH_FILE, DEFAULT_MISMATCH_FILE, DEFAULT_PVALUES_FILE,
    DEFAULT_REFERENCE_FILE, DEFAULT_TREATMENT_FILE,
};

///
/// Names of the six input files, resolved by the fetcher (relative to the data
/// directory for [crate::FsFetcher]).
///
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct InputFiles {
    pub reference: String,
    pub p_values: String,
    pub treatment: String,
    pub mismatch: String,
    pub breakthrough: String,
    pub annotations: String,
}

impl Default for InputFiles {
    fn default() -> Self {
        Self {
            reference: DEFAULT_REFERENCE_FILE.to_string(),
            p_values: DEFAULT_PVALUES_FILE.to_string(),
            treatment: DEFAULT_TREATMENT_FILE.to_string(),
            mismatch: DEFAULT_MISMATCH_FILE.to_string(),
            breakthrough: DEFAULT_BREAKTHROUGH_FILE.to_string(),
            annotations: DEFAULT_ANNOTATIONS_FILE.to_string(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct PipelineConfig {
    pub inputs: InputFiles,
    /// Upper bound for a single input fetch. No bound when unset.
    pub fetch_timeout_secs: Option<f64>,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid fetch timeout: {0} (must be a positive number of seconds)")]
    InvalidTimeout(f64),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

impl PipelineConfig {
    pub fn with_timeout(mut self, secs: f64) -> ConfigResult<Self> {
        self.fetch_timeout_secs = Some(secs);
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        match self.fetch_timeout_secs {
            Some(secs) if Duration::try_from_secs_f64(secs).map_or(true, |d| d.is_zero()) => {
                Err(ConfigError::InvalidTimeout(secs))
            }
            _ => Ok(()),
        }
    }

    pub fn fetch_timeout(&self) -> Option<Duration> {
        self.fetch_timeout_secs
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
            .filter(|d| !d.is_zero())
    }
}

impl TryFrom<&Path> for PipelineConfig {
    type Error = ConfigError;

    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let toml_str = read_to_string(path)?;
        let config: PipelineConfig = toml::from_str(&toml_str)?;
        config.validate()?;
        Ok(config)
    }
}
