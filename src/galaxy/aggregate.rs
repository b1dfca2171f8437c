//! Bottom-up aggregation passes over one tree.
//!
//! Two separate post-order walks: total mass first, then center of mass.
//! The order matters because the center-of-mass pass weights children by
//! their already-computed total mass. Both passes are idempotent; the
//! driver re-runs them after any batch of insertions and before any force
//! query.
//!
//! Emptiness is decided by `total_mass > 0`, not by a center of mass at
//! the origin, so a star sitting exactly at (0, 0) is weighted like any
//! other.

use log::{debug, info};

use crate::error::Result;
use crate::storage::star::{NVec2, NodeId, TreeIndex, NO_STAR};
use crate::storage::store::GalaxyStore;

impl GalaxyStore {
    /// Recompute `total_mass` for every node of the tree.
    ///
    /// Leaves take the mass of their resident star (or zero); internal
    /// nodes take the sum over their four children.
    pub fn update_total_mass(&mut self, tree_index: TreeIndex) -> Result<()> {
        let root = self.nodes.root_of(tree_index)?;
        let total = self.total_mass_node(root)?;
        info!("tree {tree_index}: total mass {total}");
        Ok(())
    }

    fn total_mass_node(&mut self, node_id: NodeId) -> Result<f64> {
        let (is_leaf, children, star_id) = {
            let node = self.nodes.get(node_id)?;
            (node.is_leaf, node.children, node.star_id)
        };

        let mass = if is_leaf {
            if star_id != NO_STAR {
                self.stars.get(star_id)?.m
            } else {
                0.0
            }
        } else {
            let mut sum = 0.0;
            for child in children {
                sum += self.total_mass_node(child)?;
            }
            sum
        };

        self.nodes.get_mut(node_id)?.total_mass = mass;
        Ok(mass)
    }

    /// Recompute `center_of_mass` for every node of the tree.
    ///
    /// Requires an up-to-date total-mass pass. Leaves take their star's
    /// position (or the origin when empty); internal nodes take the
    /// mass-weighted mean over children that carry any mass.
    pub fn update_center_of_mass(&mut self, tree_index: TreeIndex) -> Result<()> {
        let root = self.nodes.root_of(tree_index)?;
        let com = self.center_of_mass_node(root)?;
        debug!("tree {tree_index}: center of mass ({}, {})", com.x, com.y);
        Ok(())
    }

    fn center_of_mass_node(&mut self, node_id: NodeId) -> Result<NVec2> {
        let (is_leaf, children, star_id) = {
            let node = self.nodes.get(node_id)?;
            (node.is_leaf, node.children, node.star_id)
        };

        let com = if is_leaf {
            if star_id != NO_STAR {
                self.stars.get(star_id)?.x
            } else {
                NVec2::zeros()
            }
        } else {
            let mut mass_sum = 0.0;
            let mut weighted = NVec2::zeros();
            for child in children {
                let child_com = self.center_of_mass_node(child)?;
                let child_mass = self.nodes.get(child)?.total_mass;
                // total_mass > 0 marks a subtree that actually holds stars
                if child_mass > 0.0 {
                    mass_sum += child_mass;
                    weighted += child_com * child_mass;
                }
            }
            if mass_sum > 0.0 {
                weighted / mass_sum
            } else {
                NVec2::zeros()
            }
        };

        self.nodes.get_mut(node_id)?.center_of_mass = com;
        Ok(com)
    }
}
