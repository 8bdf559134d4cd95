//! Engine configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::engine::series::SeriesCurve;
use crate::error::{ConfigError, SimResult, ValidationError};

/// Longest supported projection, in years.
pub const MAX_HORIZON_YEARS: i32 = 200;

/// Tunables for an [`Engine`](crate::engine::Engine).
///
/// The defaults reproduce the standard 2025-2040 projection. Every field is
/// optional when loading from JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// First year of a generated series (value = neutral baseline).
    pub start_year: i32,
    /// Last year of a generated series (value = computed metric).
    pub end_year: i32,
    /// Shape of the trajectory between the two endpoints.
    pub curve: SeriesCurve,
    /// Apply synergy and tension tables. Off gives the linear-only view.
    pub include_interactions: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            start_year: 2025,
            end_year: 2040,
            curve: SeriesCurve::default(),
            include_interactions: true,
        }
    }
}

impl EngineConfig {
    /// Validate the configuration.
    ///
    /// This is called by `Engine::new`.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidYearRange` if `end_year` is not after
    /// `start_year`, and `ValidationError::InvalidConfig` if the horizon is
    /// longer than [`MAX_HORIZON_YEARS`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.start_year >= self.end_year {
            return Err(ValidationError::InvalidYearRange {
                start: self.start_year,
                end: self.end_year,
            });
        }
        if self.horizon() > i64::from(MAX_HORIZON_YEARS) {
            return Err(ValidationError::InvalidConfig {
                reason: format!("projection horizon must be at most {MAX_HORIZON_YEARS} years"),
            });
        }
        Ok(())
    }

    /// Number of yearly points in a generated series.
    #[must_use]
    pub fn series_len(&self) -> usize {
        usize::try_from(self.horizon() + 1).unwrap_or(0)
    }

    // Widened so extreme years cannot overflow.
    fn horizon(&self) -> i64 {
        i64::from(self.end_year) - i64::from(self.start_year)
    }

    /// Parse and validate a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed JSON and a validation error
    /// if the parsed values are rejected by [`Self::validate`].
    pub fn from_json_str(json: &str) -> SimResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|source| ConfigError::Parse { source })?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if the file cannot be read, otherwise the
    /// errors of [`Self::from_json_str`].
    pub fn from_path(path: impl AsRef<Path>) -> SimResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }
}
