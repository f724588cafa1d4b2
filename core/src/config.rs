//! Game configuration.
//!
//! Every field has a default, so an empty TOML document is a valid config:
//!
//! ```toml
//! size = 4
//! four_probability = 0.1
//! seed = 42
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Settings for a game session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GameConfig {
    /// Board edge length.
    #[serde(default = "defaults::size")]
    pub size: usize,

    /// Chance that a spawned tile is a 4 rather than a 2.
    #[serde(default = "defaults::four_probability")]
    pub four_probability: f64,

    /// Seed for the session's random source. `None` draws one from the OS.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: defaults::size(),
            four_probability: defaults::four_probability(),
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(Error::InvalidSize(self.size));
        }
        self.spawn().validate()
    }

    /// The spawner's share of the configuration.
    pub fn spawn(&self) -> SpawnConfig {
        SpawnConfig {
            four_probability: self.four_probability,
        }
    }
}

/// How new tiles are valued.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnConfig {
    pub four_probability: f64,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            four_probability: defaults::four_probability(),
        }
    }
}

impl SpawnConfig {
    pub fn validate(&self) -> Result<()> {
        let p = self.four_probability;
        if p.is_finite() && (0.0..=1.0).contains(&p) {
            Ok(())
        } else {
            Err(Error::InvalidProbability(p))
        }
    }
}

mod defaults {
    pub fn size() -> usize { crate::grid::DEFAULT_SIZE }
    pub fn four_probability() -> f64 { 0.1 }
}
