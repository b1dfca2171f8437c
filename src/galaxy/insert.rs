//! # Star insertion
//!
//! This module implements the recursive placement of a star into one
//! quadtree of the forest. The decision at each node is a four-case
//! analysis over `(is_leaf, holds a star)`:
//!
//! | Node state         | Holds a star            | Empty                  |
//! | ------------------ | ----------------------- | ---------------------- |
//! | Leaf               | subdivide, push the     | store the star here    |
//! |                    | resident down, retry    | ("direct insert")      |
//! | Internal           | push the stranded       | route into the child   |
//! |                    | resident down, then     | quadrant and recurse   |
//! |                    | route and recurse       |                        |
//!
//! An internal node holding a star is a half-finished split and cannot
//! occur in a consistent tree; the handling exists so that the same
//! routine also repairs such a node instead of corrupting it further.
//!
//! All of this runs inside a single `&mut self` call, so the moment where
//! a freshly split node still lists its former resident is not observable
//! from outside.

use log::{debug, info};

use crate::error::{Result, StoreError};
use crate::storage::nodes::Quadrant;
use crate::storage::star::{NVec2, NodeId, Star2D, StarId, TreeIndex, NO_STAR};
use crate::storage::store::GalaxyStore;

impl GalaxyStore {
    /// Insert a star into the tree with the given index and return the
    /// star's freshly assigned catalog id.
    ///
    /// If the tree does not exist yet it is created on the spot with the
    /// configured default width. The insert fails with:
    ///
    /// - `StarOutOfBounds` when the position lies outside the root box
    ///   (positions are never clipped or silently misplaced);
    /// - `Collocated` when a star with exactly the same coordinates is
    ///   already in the tree. Collocated stars are refused, not merged,
    ///   and the refusal happens before the catalog or the tree is
    ///   touched;
    /// - `DepthExceeded` when two distinct stars are so close together
    ///   that separating them would subdivide past the configured depth
    ///   cap.
    pub fn insert_star(&mut self, tree_index: TreeIndex, star: Star2D) -> Result<StarId> {
        let root = match self.nodes.root_of(tree_index) {
            Ok(id) => id,
            Err(StoreError::NoSuchTree { .. }) => {
                info!(
                    "no tree {tree_index} yet, creating one with width {}",
                    self.tree_cfg.default_width
                );
                self.nodes
                    .create_tree_at(tree_index, self.tree_cfg.default_width)?
            }
            Err(e) => return Err(e),
        };

        {
            let root_node = self.nodes.get(root)?;
            if !root_node.contains(star.x) {
                return Err(StoreError::StarOutOfBounds {
                    x: star.x.x,
                    y: star.x.y,
                    center_x: root_node.box_center.x,
                    center_y: root_node.box_center.y,
                    width: root_node.box_width,
                });
            }
        }

        self.check_collision(root, star.x)?;

        let star_id = self.stars.insert(star);
        debug!("inserting star {star_id} into tree {tree_index}");
        self.place_star(star_id, root)?;
        Ok(star_id)
    }

    /// Walk read-only to the leaf this position routes to and refuse an
    /// exact coordinate collision with its resident before anything is
    /// mutated.
    fn check_collision(&self, root: NodeId, pos: NVec2) -> Result<()> {
        let mut node_id = root;
        loop {
            let node = self.nodes.get(node_id)?;
            if node.is_leaf {
                if node.star_id != NO_STAR {
                    let resident = self.stars.get(node.star_id)?;
                    if resident.x == pos {
                        return Err(StoreError::Collocated { x: pos.x, y: pos.y });
                    }
                }
                return Ok(());
            }
            node_id = node.child(Quadrant::of(pos, node.box_center));
        }
    }

    /// The four-case recursion. `star_id` is already in the catalog.
    fn place_star(&mut self, star_id: StarId, node_id: NodeId) -> Result<()> {
        // Snapshot by value so no borrow is live across the recursion.
        let (is_leaf, resident, center, depth) = {
            let node = self.nodes.get(node_id)?;
            (node.is_leaf, node.star_id, node.box_center, node.depth)
        };

        // Case: leaf, empty. The star lives here now.
        if is_leaf && resident == NO_STAR {
            self.nodes.get_mut(node_id)?.star_id = star_id;
            return Ok(());
        }

        // Case: leaf, occupied. Split the node, push the resident into its
        // child quadrant, then retry on the now-internal node. Splitting
        // one level deeper than the cap allows is refused up front, before
        // any node is touched.
        if is_leaf {
            if depth + 1 > self.tree_cfg.max_depth {
                return Err(StoreError::DepthExceeded { node_id, depth });
            }
            let children = self.nodes.subdivide(node_id)?;
            self.nodes.get_mut(node_id)?.star_id = NO_STAR;

            let resident_pos = self.stars.get(resident)?.x;
            let quadrant = Quadrant::of(resident_pos, center);
            self.place_star(resident, children[quadrant.index()])?;

            return self.place_star(star_id, node_id);
        }

        // Case: internal, occupied. Repair the half-finished split by
        // pushing the stranded resident down first.
        if resident != NO_STAR {
            let resident_pos = self.stars.get(resident)?.x;
            let quadrant = Quadrant::of(resident_pos, center);
            let child = self.nodes.get(node_id)?.child(quadrant);
            self.nodes.get_mut(node_id)?.star_id = NO_STAR;
            self.place_star(resident, child)?;
        }

        // Case: internal, empty. Route into the matching child quadrant.
        let pos = self.stars.get(star_id)?.x;
        let quadrant = Quadrant::of(pos, center);
        let child = self.nodes.get(node_id)?.child(quadrant);
        self.place_star(star_id, child)
    }
}
