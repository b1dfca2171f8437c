//! Append-only registry of stars.
//!
//! Ids come from a monotonic counter starting at 1 and are never reused,
//! not even across a full wipe. Besides the star itself each row carries a
//! dedicated slot for the last computed net force, so the velocity fields
//! are never overloaded as scratch space.

use std::collections::BTreeMap;

use log::debug;

use crate::error::{Result, StoreError};
use crate::storage::star::{NVec2, Star2D, StarId};

struct StarRecord {
    star: Star2D,
    force: NVec2, // last computed net force
}

pub struct StarCatalog {
    stars: BTreeMap<StarId, StarRecord>,
    next_id: StarId,
}

impl StarCatalog {
    pub fn new() -> Self {
        Self {
            stars: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Append a star and return its freshly assigned id.
    pub fn insert(&mut self, star: Star2D) -> StarId {
        let id = self.next_id;
        self.next_id += 1;
        self.stars.insert(
            id,
            StarRecord {
                star,
                force: NVec2::zeros(),
            },
        );
        debug!("catalog: star {} at ({}, {})", id, star.x.x, star.x.y);
        id
    }

    pub fn get(&self, id: StarId) -> Result<Star2D> {
        self.stars
            .get(&id)
            .map(|r| r.star)
            .ok_or(StoreError::NotFound { what: "star", id })
    }

    pub fn force(&self, id: StarId) -> Result<NVec2> {
        self.stars
            .get(&id)
            .map(|r| r.force)
            .ok_or(StoreError::NotFound { what: "star", id })
    }

    pub fn set_force(&mut self, id: StarId, force: NVec2) -> Result<()> {
        let record = self
            .stars
            .get_mut(&id)
            .ok_or(StoreError::NotFound { what: "star", id })?;
        record.force = force;
        Ok(())
    }

    /// All stars in id order.
    pub fn list(&self) -> Vec<(StarId, Star2D)> {
        self.stars.iter().map(|(id, r)| (*id, r.star)).collect()
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    /// Remove every star. The id counter keeps running.
    pub fn delete_all(&mut self) {
        debug!("catalog: deleting {} stars", self.stars.len());
        self.stars.clear();
    }
}

impl Default for StarCatalog {
    fn default() -> Self {
        Self::new()
    }
}
