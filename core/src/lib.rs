//! graph-index-core: compact static in-memory directed graph index.
//!
//! Built once from a stream of `(src, dst)` edges over `u64` node ids, then
//! queried read-only. Each node keeps its outgoing, incoming and undirected
//! neighbors as sorted, exactly-sized `u64` arrays, so edge existence is a
//! binary search and neighbor lookup is a slice borrow.
//!
//! Construction runs in two phases: [`AdjacencyBuilder`]s collect raw
//! neighbor ids, then each is consumed into a frozen [`Adjacency`]. The
//! finished [`Graph`] replays its edges lazily through [`EdgeIter`] in
//! `(src, dst)` order.

mod adjacency;
mod config;
mod edge;
mod error;
mod export;
mod graph;
mod iter;
mod progress;
mod source;

pub use adjacency::{Adjacency, AdjacencyBuilder};
pub use config::{BuildConfig, DEFAULT_PROGRESS_INTERVAL};
pub use edge::{Edge, NodeId, FIELD_SEPARATOR};
pub use error::{GraphError, Result};
pub use export::write_edges;
pub use graph::Graph;
pub use iter::EdgeIter;
pub use progress::{LogProgress, NoProgress, ProgressSink};
pub use source::{EdgeReader, COMMENT_MARKER};
