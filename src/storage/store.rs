//! The driver-facing store facade.
//!
//! [`GalaxyStore`] bundles the star catalog, the node arena, and the
//! runtime knobs taken from configuration. Every mutation goes through
//! `&mut self` and every read through `&self`, so the borrow checker is
//! the per-store critical section: readers can share the store freely,
//! and no half-finished insertion or aggregation is ever observable.
//!
//! The backend is in-memory but keeps the contracts of the relational
//! original: a connection string is still formatted from configuration
//! (instead of hard-coded credentials), the table-initialization entry
//! points still exist, and ids behave like database sequences.

use log::{debug, info};

use crate::configuration::config::{IngestConfig, SimConfig, TreeConfig};
use crate::error::{Result, StoreError};
use crate::storage::catalog::StarCatalog;
use crate::storage::nodes::{Node, NodeStore};
use crate::storage::star::{NVec2, NodeId, Star2D, StarId, TreeIndex, NO_STAR};

pub struct GalaxyStore {
    conn: String, // formatted connection target, kept for logging
    pub(crate) stars: StarCatalog,
    pub(crate) nodes: NodeStore,
    pub(crate) tree_cfg: TreeConfig,
    pub(crate) ingest_cfg: IngestConfig,
}

impl GalaxyStore {
    /// Open a store handle for the configured backend.
    pub fn connect(cfg: &SimConfig) -> Result<Self> {
        let conn = cfg.store.conn_str();
        info!("connecting to \"{conn}\"");
        Ok(Self {
            conn,
            stars: StarCatalog::new(),
            nodes: NodeStore::new(),
            tree_cfg: cfg.tree,
            ingest_cfg: cfg.ingest,
        })
    }

    /// Release the handle. All owned resources go with it.
    pub fn close(self) {
        info!("closing \"{}\"", self.conn);
    }

    /// Schema setup parity with the relational original; the in-memory
    /// tables exist from `connect` on, so this only logs.
    pub fn init_stars_table(&mut self) -> Result<()> {
        debug!("init stars table (in-memory, nothing to do)");
        Ok(())
    }

    /// See [`GalaxyStore::init_stars_table`].
    pub fn init_nodes_table(&mut self) -> Result<()> {
        debug!("init nodes table (in-memory, nothing to do)");
        Ok(())
    }

    /// Create a tree at the next free index and return that index.
    pub fn new_tree(&mut self, width: f64) -> TreeIndex {
        self.nodes.new_tree(width)
    }

    pub fn root_of(&self, tree_index: TreeIndex) -> Result<NodeId> {
        self.nodes.root_of(tree_index)
    }

    pub fn get_star(&self, star_id: StarId) -> Result<Star2D> {
        self.stars.get(star_id)
    }

    /// Last force written back for this star, zero until the first
    /// [`GalaxyStore::update_star_force`].
    pub fn get_star_force(&self, star_id: StarId) -> Result<NVec2> {
        self.stars.force(star_id)
    }

    pub fn get_node(&self, node_id: NodeId) -> Result<&Node> {
        self.nodes.get(node_id)
    }

    /// Read access to the node arena, mostly for inspection and tests.
    pub fn nodes(&self) -> &NodeStore {
        &self.nodes
    }

    pub fn star_count(&self) -> usize {
        self.stars.len()
    }

    /// Every star in the catalog, in id order.
    pub fn list_stars(&self) -> Vec<Star2D> {
        self.stars.list().into_iter().map(|(_, star)| star).collect()
    }

    pub fn list_star_ids(&self) -> Vec<StarId> {
        self.stars.list().into_iter().map(|(id, _)| id).collect()
    }

    /// Every star held by some node of the given tree.
    pub fn list_stars_for_tree(&self, tree_index: TreeIndex) -> Result<Vec<Star2D>> {
        let mut out = Vec::new();
        for (_, node) in self.nodes.iter() {
            if node.tree_index == tree_index && node.star_id != NO_STAR {
                out.push(self.stars.get(node.star_id)?);
            }
        }
        Ok(out)
    }

    pub fn list_star_ids_for_tree(&self, tree_index: TreeIndex) -> Vec<StarId> {
        self.nodes
            .iter()
            .filter(|(_, node)| node.tree_index == tree_index && node.star_id != NO_STAR)
            .map(|(_, node)| node.star_id)
            .collect()
    }

    /// Catalog dump as `"id, x, y, vx, vy, m"` rows.
    pub fn list_stars_csv(&self) -> Vec<String> {
        self.stars
            .list()
            .into_iter()
            .map(|(id, s)| {
                format!(
                    "{}, {:.6}, {:.6}, {:.6}, {:.6}, {:.6}",
                    id, s.x.x, s.x.y, s.v.x, s.v.y, s.m
                )
            })
            .collect()
    }

    /// The tree holding the given star.
    pub fn tree_index_of_star(&self, star_id: StarId) -> Result<TreeIndex> {
        if star_id == NO_STAR {
            return Err(StoreError::NotFound {
                what: "star",
                id: star_id,
            });
        }
        for (_, node) in self.nodes.iter() {
            if node.star_id == star_id {
                return Ok(node.tree_index);
            }
        }
        Err(StoreError::NotFound {
            what: "star",
            id: star_id,
        })
    }

    /// Empty the star catalog. Ids are not reset.
    pub fn delete_all_stars(&mut self) {
        self.stars.delete_all();
    }

    /// Empty the node arena and the root table. Ids are not reset.
    pub fn delete_all_nodes(&mut self) {
        self.nodes.delete_all();
    }
}
