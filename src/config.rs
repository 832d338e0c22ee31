//! Generator configuration.
//!
//! Names the two stations with special assignment rules, the marker shown
//! for cells that need manual assignment, and an optional RNG seed.
//!
//! ```toml
//! ood_station = "OOD"
//! rover_station = "Internal Rover"
//! unassigned_marker = "CLICK TO ASSIGN"
//! seed = 42
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::models::{StationRole, UNASSIGNED_MARKER};

/// Station name given the Officer of the Deck rotation by default.
pub const DEFAULT_OOD_STATION: &str = "OOD";

/// Station name exempt from every exclusion rule by default.
pub const DEFAULT_ROVER_STATION: &str = "Internal Rover";

/// Settings for [`WatchbillGenerator`](crate::engine::WatchbillGenerator).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Station with cross-time-block exclusivity.
    pub ood_station: String,
    /// Station that may reuse the same sailor in every block.
    pub rover_station: String,
    /// Text rendered for an unassigned cell.
    pub unassigned_marker: String,
    /// Fixed RNG seed. `None` = fresh entropy per generator.
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            ood_station: DEFAULT_OOD_STATION.to_string(),
            rover_station: DEFAULT_ROVER_STATION.to_string(),
            unassigned_marker: UNASSIGNED_MARKER.to_string(),
            seed: None,
        }
    }
}

impl GeneratorConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the OOD station name.
    pub fn with_ood_station(mut self, name: impl Into<String>) -> Self {
        self.ood_station = name.into();
        self
    }

    /// Sets the Internal Rover station name.
    pub fn with_rover_station(mut self, name: impl Into<String>) -> Self {
        self.rover_station = name.into();
        self
    }

    /// Sets the unassigned marker text.
    pub fn with_unassigned_marker(mut self, marker: impl Into<String>) -> Self {
        self.unassigned_marker = marker.into();
        self
    }

    /// Parses and validates a TOML document. Missing keys take defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    /// Rejects empty role names and a shared OOD/rover name.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ood_station.trim().is_empty() {
            return Err(ConfigError::Invalid("ood_station must not be empty".into()));
        }
        if self.rover_station.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "rover_station must not be empty".into(),
            ));
        }
        if self.ood_station == self.rover_station {
            return Err(ConfigError::Invalid(format!(
                "ood_station and rover_station must differ (both '{}')",
                self.ood_station
            )));
        }
        Ok(())
    }

    /// Classifies a station name under this configuration.
    pub fn role_of(&self, station: &str) -> StationRole {
        if station == self.ood_station {
            StationRole::OfficerOfTheDeck
        } else if station == self.rover_station {
            StationRole::InternalRover
        } else {
            StationRole::Standard
        }
    }
}
