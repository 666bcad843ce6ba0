//! Browse view settings shared by every host.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default REST base URL for native hosts.
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:7070";
/// Route the browse view lives under.
pub const DEFAULT_BROWSE_PATH: &str = "/browse";
/// Oldest year offered by the season-year selector.
pub const EARLIEST_SEASON_YEAR: u16 = 1940;

const MAX_PER_PAGE: u32 = 100;
const MAX_DEBOUNCE_MS: u64 = 10_000;

/// Errors raised while validating [`BrowseSettings`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SettingsError {
    /// Field contained an invalid value.
    #[error("invalid browse setting `{field}`: {reason}")]
    InvalidField {
        /// Offending field name.
        field: &'static str,
        /// Machine-readable reason for the failure.
        reason: &'static str,
    },
    /// Settings payload could not be decoded.
    #[error("failed to decode browse settings: {0}")]
    Decode(String),
}

/// Tunables for the browse view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BrowseSettings {
    /// Quiet period before a keyword edit is applied, in milliseconds.
    pub debounce_ms: u64,
    /// Pathname the synchronizer writes the query under.
    pub browse_path: String,
    /// Page size requested from the API.
    pub per_page: u32,
    /// Newest year offered by the season-year selector.
    pub latest_season_year: u16,
    /// REST base URL used by fetch collaborators.
    pub api_base_url: String,
}

impl Default for BrowseSettings {
    fn default() -> Self {
        Self {
            debounce_ms: 500,
            browse_path: DEFAULT_BROWSE_PATH.to_string(),
            per_page: 30,
            latest_season_year: 2025,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

impl BrowseSettings {
    /// Debounce quiet period as a duration.
    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Parse settings from JSON, filling missing fields with defaults.
    ///
    /// # Errors
    /// Returns [`SettingsError::Decode`] for malformed JSON or unknown fields and
    /// any validation error from [`BrowseSettings::validate`].
    pub fn from_json(raw: &str) -> Result<Self, SettingsError> {
        let settings: Self =
            serde_json::from_str(raw).map_err(|err| SettingsError::Decode(err.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check field ranges.
    ///
    /// # Errors
    /// Returns [`SettingsError::InvalidField`] naming the first field out of range.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.debounce_ms == 0 || self.debounce_ms > MAX_DEBOUNCE_MS {
            return Err(SettingsError::InvalidField {
                field: "debounce_ms",
                reason: "must be between 1 and 10000",
            });
        }
        if !self.browse_path.starts_with('/') {
            return Err(SettingsError::InvalidField {
                field: "browse_path",
                reason: "must start with '/'",
            });
        }
        if self.per_page == 0 || self.per_page > MAX_PER_PAGE {
            return Err(SettingsError::InvalidField {
                field: "per_page",
                reason: "must be between 1 and 100",
            });
        }
        if self.latest_season_year < EARLIEST_SEASON_YEAR {
            return Err(SettingsError::InvalidField {
                field: "latest_season_year",
                reason: "must not precede 1940",
            });
        }
        if self.api_base_url.trim().is_empty() {
            return Err(SettingsError::InvalidField {
                field: "api_base_url",
                reason: "must not be empty",
            });
        }
        Ok(())
    }
}
