//! Bracketed textual dump of one tree, a debug aid.
//!
//! Preorder, one bracket per node:
//! - internal: `[comx comy mass child0 child1 child2 child3]`
//! - leaf with a star: `[x y m]`
//! - empty leaf: `[0 0]`
//!
//! Numbers are rounded to integers. Rendering never fails: unknown trees
//! and dangling node ids come out as `[0 0]`.

use crate::storage::star::{NodeId, TreeIndex, NO_STAR};
use crate::storage::store::GalaxyStore;

impl GalaxyStore {
    /// Render the tree with the given index in forest format.
    pub fn render_forest(&self, tree_index: TreeIndex) -> String {
        match self.nodes.root_of(tree_index) {
            Ok(root) => self.render_node(root),
            Err(_) => "[0 0]".to_string(),
        }
    }

    fn render_node(&self, node_id: NodeId) -> String {
        let node = match self.nodes.get(node_id) {
            Ok(node) => node,
            Err(_) => return "[0 0]".to_string(),
        };

        if node.is_leaf {
            if node.star_id == NO_STAR {
                return "[0 0]".to_string();
            }
            return match self.stars.get(node.star_id) {
                Ok(star) => format!("[{:.0} {:.0} {:.0}]", star.x.x, star.x.y, star.m),
                Err(_) => "[0 0]".to_string(),
            };
        }

        let children: Vec<String> = node
            .children
            .iter()
            .map(|child| self.render_node(*child))
            .collect();
        format!(
            "[{:.0} {:.0} {:.0} {}]",
            node.center_of_mass.x,
            node.center_of_mass.y,
            node.total_mass,
            children.join(" ")
        )
    }
}
