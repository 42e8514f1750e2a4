//! # Settings Module
//!
//! ## Purpose
//! Engine-level configuration for StoiChem: the balance cache capacity and
//! the molar mass capability variant. Settings are chosen once at process
//! start, loaded from a JSON file or constructed in code, and handed to
//! `ReactionEngine::new` explicitly - the engine holds no global state.
//!
//! ## Configuration Format
//! ```json
//! {
//!   "cache_capacity": 256,
//!   "molar_mass_mode": "periodic_table"
//! }
//! ```
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Which molar mass capability variant the engine uses (see
/// `molar_mass_api`): the precise table, or the unity fallback whose
/// stoichiometry results are flagged approximate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MolarMassMode {
    PeriodicTable,
    Unity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSettings {
    /// bounded capacity of the balanced-equation LRU cache
    pub cache_capacity: usize,
    pub molar_mass_mode: MolarMassMode,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            cache_capacity: 256,
            molar_mass_mode: MolarMassMode::PeriodicTable,
        }
    }
}

impl EngineSettings {
    /// Load settings from a JSON file. A missing or unreadable file falls
    /// back to defaults with a warning; malformed JSON in an existing file
    /// is a hard error so typos do not silently vanish.
    pub fn from_json_file(path: &str) -> Result<Self, serde_json::Error> {
        if !Path::new(path).exists() {
            warn!("settings file '{}' not found, using defaults", path);
            return Ok(Self::default());
        }
        match fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content),
            Err(e) => {
                warn!("could not read settings file '{}': {}, using defaults", path, e);
                Ok(Self::default())
            }
        }
    }

    pub fn save_json_file(&self, path: &str) -> std::io::Result<()> {
        let content = serde_json::to_string_pretty(self).expect("settings always serialize");
        fs::write(path, content)
    }
}
