//! Converter configuration

use crate::error::{PackError, Result};
use crate::sanitize::SanitizePolicy;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings for a [`VolumeConverter`](crate::VolumeConverter)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Non-finite substitution policy
    pub sanitize: SanitizePolicy,

    /// Indent `index.json` instead of writing it compact
    pub pretty_metadata: bool,
}

impl ConverterConfig {
    /// Parse a JSON configuration; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| PackError::Configuration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&json)
    }

    pub fn with_sanitize(mut self, policy: SanitizePolicy) -> Self {
        self.sanitize = policy;
        self
    }

    pub fn with_pretty_metadata(mut self, pretty: bool) -> Self {
        self.pretty_metadata = pretty;
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.sanitize.validate()
    }
}
