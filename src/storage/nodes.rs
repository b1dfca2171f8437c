//! Quadtree node arena and the forest of roots.
//!
//! Nodes live in a flat id-keyed arena and reference each other through
//! numeric ids rather than pointers, which keeps the structure trivially
//! serializable and free of ownership cycles. A separate root table maps
//! each tree index (one galaxy snapshot per index) to its root node.
//!
//! Geometry conventions:
//! - A node's box is the axis-aligned square `[cx - w/2, cx + w/2] x
//!   [cy - w/2, cy + w/2]`, closed on all sides.
//! - Children span one quarter of the parent box each: half the width,
//!   centers at parent center +- width/4 per axis.
//! - The children array is ordered NE, NW, SW, SE, and [`Quadrant`] returns
//!   the matching index, so classification and child lookup can never
//!   disagree.

use std::collections::BTreeMap;

use log::{debug, info};

use crate::error::{Result, StoreError};
use crate::storage::star::{NVec2, NodeId, StarId, TreeIndex, NO_NODE, NO_STAR};

/// The four children of a quadtree node, in children-array order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quadrant {
    Ne = 0,
    Nw = 1,
    Sw = 2,
    Se = 3,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [Quadrant::Ne, Quadrant::Nw, Quadrant::Sw, Quadrant::Se];

    /// Classify a position against a box center.
    ///
    /// Ties on either axis go south/west: a point exactly on the vertical
    /// center line is west, exactly on the horizontal one is south, so a
    /// point on both lands in SW.
    pub fn of(pos: NVec2, center: NVec2) -> Self {
        if pos.x > center.x {
            if pos.y > center.y {
                Quadrant::Ne
            } else {
                Quadrant::Se
            }
        } else if pos.y > center.y {
            Quadrant::Nw
        } else {
            Quadrant::Sw
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Unit direction from a parent center toward this quadrant's center.
    pub fn offset(self) -> NVec2 {
        match self {
            Quadrant::Ne => NVec2::new(1.0, 1.0),
            Quadrant::Nw => NVec2::new(-1.0, 1.0),
            Quadrant::Sw => NVec2::new(-1.0, -1.0),
            Quadrant::Se => NVec2::new(1.0, -1.0),
        }
    }
}

/// A single quadtree node.
///
/// Aggregate fields (`total_mass`, `center_of_mass`) are only meaningful
/// between a completed aggregation pass and the next structural change.
#[derive(Debug, Clone)]
pub struct Node {
    pub box_center: NVec2,     // center of the bounding square
    pub box_width: f64,        // full edge length of the square
    pub depth: u32,            // 0 at the root
    pub tree_index: TreeIndex, // which galaxy snapshot this node belongs to
    pub is_leaf: bool,         // true iff all children are sentinel
    pub star_id: StarId,       // NO_STAR when the node holds no star
    pub children: [NodeId; 4], // NE, NW, SW, SE; all sentinel or all set
    pub total_mass: f64,
    pub center_of_mass: NVec2,
}

impl Node {
    /// Whether a position lies within this node's closed box.
    pub fn contains(&self, pos: NVec2) -> bool {
        let half = self.box_width / 2.0;
        (pos.x - self.box_center.x).abs() <= half && (pos.y - self.box_center.y).abs() <= half
    }

    /// Child id for the given quadrant (sentinel on leaves).
    pub fn child(&self, quadrant: Quadrant) -> NodeId {
        self.children[quadrant.index()]
    }
}

/// Arena of nodes plus the root table of the forest.
pub struct NodeStore {
    nodes: BTreeMap<NodeId, Node>,
    roots: BTreeMap<TreeIndex, NodeId>,
    next_id: NodeId,
}

impl NodeStore {
    pub fn new() -> Self {
        Self {
            nodes: BTreeMap::new(),
            roots: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Create a tree at the next free index (1 for the first) and return
    /// that index. The root is a width-`width` empty leaf centered at the
    /// origin.
    pub fn new_tree(&mut self, width: f64) -> TreeIndex {
        let index = self.max_tree_index() + 1;
        let root = self.alloc(NVec2::zeros(), width, 0, index);
        self.roots.insert(index, root);
        info!("created tree {index} with width {width} (root node {root})");
        index
    }

    /// Create a tree at a caller-chosen index. Used by the insertion
    /// engine's create-on-demand path.
    pub fn create_tree_at(&mut self, index: TreeIndex, width: f64) -> Result<NodeId> {
        if self.roots.contains_key(&index) {
            return Err(StoreError::Backend(format!("tree {index} already exists")));
        }
        let root = self.alloc(NVec2::zeros(), width, 0, index);
        self.roots.insert(index, root);
        info!("created tree {index} with width {width} (root node {root})");
        Ok(root)
    }

    pub fn root_of(&self, index: TreeIndex) -> Result<NodeId> {
        self.roots
            .get(&index)
            .copied()
            .ok_or(StoreError::NoSuchTree { tree_index: index })
    }

    /// Largest allocated tree index, 0 when the forest is empty.
    pub fn max_tree_index(&self) -> TreeIndex {
        self.roots.keys().next_back().copied().unwrap_or(0)
    }

    pub fn get(&self, node_id: NodeId) -> Result<&Node> {
        self.nodes.get(&node_id).ok_or(StoreError::NotFound {
            what: "node",
            id: node_id,
        })
    }

    pub fn get_mut(&mut self, node_id: NodeId) -> Result<&mut Node> {
        self.nodes.get_mut(&node_id).ok_or(StoreError::NotFound {
            what: "node",
            id: node_id,
        })
    }

    /// Turn a leaf into an internal node by allocating its four children.
    ///
    /// The children inherit the tree index, sit at depth + 1, and cover one
    /// quarter of the parent box each. Any star resident on the node stays
    /// where it is; relocating it is the insertion engine's job.
    pub fn subdivide(&mut self, node_id: NodeId) -> Result<[NodeId; 4]> {
        let (center, width, depth, tree_index) = {
            let node = self.get(node_id)?;
            (node.box_center, node.box_width, node.depth, node.tree_index)
        };

        let quarter = width / 4.0;
        let mut children = [NO_NODE; 4];
        for quadrant in Quadrant::ALL {
            children[quadrant.index()] = self.alloc(
                center + quadrant.offset() * quarter,
                width / 2.0,
                depth + 1,
                tree_index,
            );
        }

        let node = self.get_mut(node_id)?;
        node.children = children;
        node.is_leaf = false;
        debug!("subdivided node {node_id} at depth {depth}");
        Ok(children)
    }

    fn alloc(&mut self, center: NVec2, width: f64, depth: u32, tree_index: TreeIndex) -> NodeId {
        let id = self.next_id;
        self.next_id += 1;
        self.nodes.insert(
            id,
            Node {
                box_center: center,
                box_width: width,
                depth,
                tree_index,
                is_leaf: true,
                star_id: NO_STAR,
                children: [NO_NODE; 4],
                total_mass: 0.0,
                center_of_mass: NVec2::zeros(),
            },
        );
        id
    }

    /// All nodes in id order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.nodes.iter().map(|(id, node)| (*id, node))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Remove every node and root. The id counter keeps running.
    pub fn delete_all(&mut self) {
        debug!("node store: deleting {} nodes", self.nodes.len());
        self.nodes.clear();
        self.roots.clear();
    }
}

impl Default for NodeStore {
    fn default() -> Self {
        Self::new()
    }
}
