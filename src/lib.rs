pub mod benchmark;
pub mod configuration;
pub mod error;
pub mod galaxy;
pub mod storage;

pub use storage::star::{NVec2, NodeId, Star2D, StarId, TreeIndex, NO_NODE, NO_STAR};
pub use storage::catalog::StarCatalog;
pub use storage::nodes::{Node, NodeStore, Quadrant};
pub use storage::store::GalaxyStore;

pub use configuration::config::{ForceConfig, IngestConfig, SimConfig, StoreConfig, TreeConfig};

pub use error::{Result, StoreError};

pub use galaxy::forces::{pair_force, G};

pub use benchmark::benchmark::{bench_force_curve, bench_insert};
