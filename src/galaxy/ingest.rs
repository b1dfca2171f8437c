//! Bulk CSV ingest of star positions.
//!
//! One record per line, two leading float fields `x,y`. Positions are
//! divided by the configured scale, velocity starts at zero, mass is the
//! configured default, and everything lands in the configured target
//! tree. A record that does not parse aborts the ingest.

use std::fs;
use std::path::Path;

use log::info;

use crate::error::{Result, StoreError};
use crate::storage::star::{NVec2, Star2D};
use crate::storage::store::GalaxyStore;

impl GalaxyStore {
    /// Insert every record of the given CSV file; returns how many stars
    /// were inserted.
    pub fn insert_list(&mut self, path: &Path) -> Result<usize> {
        info!("bulk ingest from {}", path.display());
        let content = fs::read_to_string(path)
            .map_err(|e| StoreError::Backend(format!("read {}: {e}", path.display())))?;

        let scale = self.ingest_cfg.position_scale;
        let mass = self.ingest_cfg.default_mass;
        let tree = self.ingest_cfg.tree_index;

        let mut inserted = 0usize;
        for (idx, raw) in content.lines().enumerate() {
            let line = idx + 1;
            let record = raw.trim();
            if record.is_empty() {
                continue;
            }
            let mut fields = record.split(',');
            let x = parse_field(fields.next(), line, "x")?;
            let y = parse_field(fields.next(), line, "y")?;

            let star = Star2D {
                x: NVec2::new(x / scale, y / scale),
                v: NVec2::zeros(),
                m: mass,
            };
            self.insert_star(tree, star)?;
            inserted += 1;
        }

        info!("ingested {inserted} stars into tree {tree}");
        Ok(inserted)
    }
}

fn parse_field(field: Option<&str>, line: usize, name: &str) -> Result<f64> {
    let raw = field.ok_or_else(|| StoreError::Malformed {
        line,
        reason: format!("missing {name} field"),
    })?;
    raw.trim().parse::<f64>().map_err(|e| StoreError::Malformed {
        line,
        reason: format!("bad {name} field {raw:?}: {e}"),
    })
}
