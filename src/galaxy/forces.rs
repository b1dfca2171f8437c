//! # Barnes–Hut force evaluation
//!
//! The net gravitational force on a star is accumulated by walking one
//! tree of the forest. At every internal node the opening angle
//! `local_theta = box_width / distance-to-center-of-mass` decides the
//! branch:
//!
//! - `local_theta < theta`: the whole subtree is far enough away to act
//!   as a single pseudo-star of its total mass sitting at its center of
//!   mass. One pair force, no recursion.
//! - `local_theta >= theta`: too close to approximate; recurse into all
//!   children.
//!
//! Leaves contribute the exact pair interaction with their resident star,
//! skipping the probe star itself. Smaller theta means more exact pairs
//! and more work; theta = 0 degenerates to direct summation over all
//! leaves.
//!
//! Aggregates must be current (both passes of [`crate::galaxy::aggregate`])
//! before any force query.

use log::debug;

use crate::error::{Result, StoreError};
use crate::storage::star::{NVec2, NodeId, Star2D, StarId, TreeIndex, NO_NODE, NO_STAR};
use crate::storage::store::GalaxyStore;

/// Gravitational constant.
pub const G: f64 = 6.6726e-11;

/// Force exerted on `on` by `from`, in Newtons.
///
/// Magnitude `G * m1 * m2 / r^2`, directed from `on` toward `from`
/// (gravity attracts). Two bodies at the same point have no defined
/// direction; that case fails with `Collocated` instead of producing NaN.
pub fn pair_force(on: &Star2D, from: &Star2D) -> Result<NVec2> {
    let d = from.x - on.x;
    let r2 = d.norm_squared();
    if r2 == 0.0 {
        return Err(StoreError::Collocated {
            x: on.x.x,
            y: on.x.y,
        });
    }
    let r = r2.sqrt();
    let magnitude = G * on.m * from.m / r2;
    Ok(d * (magnitude / r))
}

impl GalaxyStore {
    /// Net force on `star` from every star in the given tree.
    ///
    /// The probe star is identified by exact position, so a probe taken
    /// from the tree never attracts itself.
    pub fn calc_force(&self, tree_index: TreeIndex, star: &Star2D, theta: f64) -> Result<NVec2> {
        let root = self.nodes.root_of(tree_index)?;
        debug!(
            "force walk on tree {tree_index} for star at ({}, {}), theta {theta}",
            star.x.x, star.x.y
        );
        self.force_from_node(root, star, theta)
    }

    fn force_from_node(&self, node_id: NodeId, star: &Star2D, theta: f64) -> Result<NVec2> {
        let node = self.nodes.get(node_id)?;

        if node.is_leaf {
            if node.star_id == NO_STAR {
                return Ok(NVec2::zeros());
            }
            let other = self.stars.get(node.star_id)?;
            if other.x == star.x {
                // the probe itself
                return Ok(NVec2::zeros());
            }
            return pair_force(star, &other);
        }

        // A subtree without mass exerts nothing.
        if node.total_mass == 0.0 {
            return Ok(NVec2::zeros());
        }

        let r = (node.center_of_mass - star.x).norm();
        if r > 0.0 && node.box_width / r < theta {
            // Far enough: one monopole for the whole subtree.
            let cluster = Star2D {
                x: node.center_of_mass,
                v: NVec2::zeros(),
                m: node.total_mass,
            };
            return pair_force(star, &cluster);
        }

        let mut force = NVec2::zeros();
        for child in node.children {
            if child != NO_NODE {
                force += self.force_from_node(child, star, theta)?;
            }
        }
        Ok(force)
    }

    /// Write a computed net force back to the star's force slot.
    pub fn update_star_force(&mut self, star_id: StarId, force: NVec2) -> Result<()> {
        self.stars.set_force(star_id, force)
    }
}
