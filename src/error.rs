//! Typed failures for the galaxy store.
//!
//! Every fallible operation returns a [`StoreError`] to the caller instead
//! of terminating the process; the driver decides how to react. Aggregation
//! and force-walk failures propagate to the top-level call and leave the
//! tree structurally unchanged.

use std::fmt;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Everything that can go wrong inside the store.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreError {
    /// A star or node id that is unknown (or the reserved 0 sentinel).
    NotFound {
        what: &'static str,
        id: i64,
    },
    /// The requested tree index has no root.
    NoSuchTree {
        tree_index: i64,
    },
    /// A star position outside the root bounding box of its target tree.
    StarOutOfBounds {
        x: f64,
        y: f64,
        center_x: f64,
        center_y: f64,
        width: f64,
    },
    /// Insertion recursed past the configured depth cap.
    DepthExceeded {
        node_id: i64,
        depth: u32,
    },
    /// Two stars at exactly the same coordinates.
    Collocated {
        x: f64,
        y: f64,
    },
    /// Persistence / external resource failure.
    Backend(String),
    /// A CSV record that does not parse.
    Malformed {
        line: usize,
        reason: String,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { what, id } => write!(f, "{what} {id} not found"),
            Self::NoSuchTree { tree_index } => write!(f, "no tree with index {tree_index}"),
            Self::StarOutOfBounds {
                x,
                y,
                center_x,
                center_y,
                width,
            } => write!(
                f,
                "star at ({x}, {y}) lies outside the root box centered ({center_x}, {center_y}) with width {width}"
            ),
            Self::DepthExceeded { node_id, depth } => write!(
                f,
                "insertion at node {node_id} exceeded the depth cap at depth {depth}"
            ),
            Self::Collocated { x, y } => {
                write!(f, "two stars collocated at ({x}, {y})")
            }
            Self::Backend(reason) => write!(f, "backend failure: {reason}"),
            Self::Malformed { line, reason } => {
                write!(f, "malformed record on line {line}: {reason}")
            }
        }
    }
}

impl std::error::Error for StoreError {}
