//! Configuration types for the store and its engines, loaded from YAML.
//!
//! Everything the original hard-coded is a knob here: backend connection
//! fields, the default root box width, the insertion depth cap, the CSV
//! ingest scaling, and the opening angle.
//!
//! # YAML format
//! A full configuration matching these types:
//!
//! ```yaml
//! store:
//!   user: postgres          # backend user
//!   dbname: postgres        # backend database name
//!   sslmode: disable        # backend ssl mode
//!
//! tree:
//!   default_width: 1000.0   # root box width for trees created on demand
//!   max_depth: 64           # insertion recursion cap
//!
//! ingest:
//!   position_scale: 100000.0  # CSV positions are divided by this
//!   default_mass: 1000.0      # mass assigned to ingested stars
//!   tree_index: 1             # tree receiving ingested stars
//!
//! force:
//!   theta: 0.5              # Barnes-Hut opening angle
//! ```
//!
//! Any section left out of the file falls back to these defaults.

use serde::Deserialize;

/// Backend connection fields.
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct StoreConfig {
    pub user: String,
    pub dbname: String,
    pub sslmode: String,
}

impl StoreConfig {
    /// Connection string in `key=value` form.
    pub fn conn_str(&self) -> String {
        format!(
            "user={} dbname={} sslmode={}",
            self.user, self.dbname, self.sslmode
        )
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            user: "postgres".to_string(),
            dbname: "postgres".to_string(),
            sslmode: "disable".to_string(),
        }
    }
}

/// Tree geometry and insertion limits.
#[derive(Deserialize, Debug, Clone, Copy)]
#[serde(default)]
pub struct TreeConfig {
    pub default_width: f64, // root box width for trees created on demand
    pub max_depth: u32,     // insertion recursion cap
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            default_width: 1000.0,
            max_depth: 64,
        }
    }
}

/// CSV bulk-ingest behavior.
#[derive(Deserialize, Debug, Clone, Copy)]
#[serde(default)]
pub struct IngestConfig {
    pub position_scale: f64, // raw positions are divided by this
    pub default_mass: f64,   // mass assigned to every ingested star
    pub tree_index: i64,     // tree receiving the ingested stars
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            position_scale: 100000.0,
            default_mass: 1000.0,
            tree_index: 1,
        }
    }
}

/// Force-walk accuracy knob.
#[derive(Deserialize, Debug, Clone, Copy)]
#[serde(default)]
pub struct ForceConfig {
    pub theta: f64, // opening angle; smaller is more accurate, more work
}

impl Default for ForceConfig {
    fn default() -> Self {
        Self { theta: 0.5 }
    }
}

/// Top-level configuration.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct SimConfig {
    pub store: StoreConfig,
    pub tree: TreeConfig,
    pub ingest: IngestConfig,
    pub force: ForceConfig,
}
