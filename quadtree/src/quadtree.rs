mod api;
mod config;
mod insert;
mod maintenance;
mod query_rect;
mod storage;
mod trace;
mod types;

pub use config::Config;
pub use query_rect::QueryIter;
pub use storage::NodeInfo;
pub use trace::TraceEvent;
pub use types::NodeId;

use crate::collision_detection;
use crate::error::{QuadtreeError, QuadtreeResult};
use common::shapes::Rectangle;
use fxhash::FxHashMap;
use storage::Node;
use types::*;

// One occupant per node; an occupant always fits inside its node.
pub struct QuadTree {
    nodes: Vec<Node>,
    free_blocks: Vec<u32>,
    owner_map: FxHashMap<u32, NodeId>,
    // Values with no free slot on their path to the root.
    overflow: FxHashMap<u32, Rectangle>,
    max_depth: u32,
    min_size: f32,
    observer: Option<Box<dyn FnMut(&TraceEvent)>>,
}
