use std::convert::Infallible;
use std::io::BufRead;
use std::mem::size_of;
use std::path::Path;

use rustc_hash::FxHashMap;
use tracing::info;

use crate::adjacency::{Adjacency, AdjacencyBuilder};
use crate::config::BuildConfig;
use crate::edge::{Edge, NodeId};
use crate::error::{GraphError, Result};
use crate::iter::EdgeIter;
use crate::progress::{LogProgress, ProgressSink};
use crate::source::EdgeReader;

/// Static directed graph: a frozen adjacency per node plus the sorted node index.
///
/// Built once from an edge stream, immutable afterwards. Duplicate edges
/// collapse to one; self-loops are kept.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Box<[NodeId]>,
    adjacency: FxHashMap<NodeId, Adjacency>,
}

impl Graph {
    /// Build from an infallible edge stream with default config, logging progress.
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = Edge>,
    {
        Self::build(edges, &BuildConfig::default(), &mut LogProgress)
    }

    /// Build from a fallible edge stream with default config, logging progress.
    pub fn try_from_edges<I, E>(edges: I) -> std::result::Result<Self, E>
    where
        I: IntoIterator<Item = std::result::Result<Edge, E>>,
    {
        Self::try_build(edges, &BuildConfig::default(), &mut LogProgress)
    }

    pub fn build<I, P>(edges: I, config: &BuildConfig, progress: &mut P) -> Self
    where
        I: IntoIterator<Item = Edge>,
        P: ProgressSink + ?Sized,
    {
        let edges = edges.into_iter().map(Ok::<Edge, Infallible>);
        match Self::try_build(edges, config, progress) {
            Ok(graph) => graph,
            Err(never) => match never {},
        }
    }

    /// Single pass over `edges`, then finalization.
    ///
    /// The first error from the source aborts construction and is returned
    /// unchanged; nothing built so far survives.
    pub fn try_build<I, E, P>(
        edges: I,
        config: &BuildConfig,
        progress: &mut P,
    ) -> std::result::Result<Self, E>
    where
        I: IntoIterator<Item = std::result::Result<Edge, E>>,
        P: ProgressSink + ?Sized,
    {
        info!("reading edges");
        let mut builders: FxHashMap<NodeId, AdjacencyBuilder> = FxHashMap::default();
        let mut processed: u64 = 0;

        for edge in edges {
            let edge = edge?;
            let [src, dst] = edge.nodes();
            builders
                .entry(src)
                .or_insert_with(|| AdjacencyBuilder::new(src))
                .add_edge(&edge);
            if !edge.is_self_loop() {
                builders
                    .entry(dst)
                    .or_insert_with(|| AdjacencyBuilder::new(dst))
                    .add_edge(&edge);
            }

            processed += 1;
            if config.is_checkpoint(processed) {
                progress.progress(processed);
            }
        }

        info!("sorting nodes");
        let mut nodes: Vec<NodeId> = builders.keys().copied().collect();
        nodes.sort_unstable();

        info!("optimizing adjacencies");
        let adjacency: FxHashMap<NodeId, Adjacency> = builders
            .into_iter()
            .map(|(v, builder)| (v, builder.finish()))
            .collect();

        let graph = Self {
            nodes: nodes.into_boxed_slice(),
            adjacency,
        };
        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "graph is built"
        );
        Ok(graph)
    }

    /// Build from `src<TAB>dst` text lines; `#` lines and blank lines are skipped.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        Self::try_from_edges(EdgeReader::new(reader))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::try_from_edges(EdgeReader::open(path)?)
    }

    /// Like [`Graph::from_path`], with an explicit config and progress sink.
    pub fn from_path_with<P>(
        path: impl AsRef<Path>,
        config: &BuildConfig,
        progress: &mut P,
    ) -> Result<Self>
    where
        P: ProgressSink + ?Sized,
    {
        Self::try_build(EdgeReader::open(path)?, config, progress)
    }

    /// All node ids, ascending.
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of distinct edges. Each edge is counted once, in its
    /// destination's incoming array.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(|adj| adj.in_degree()).sum()
    }

    pub fn contains_node(&self, v: NodeId) -> bool {
        self.adjacency.contains_key(&v)
    }

    /// Whether `src -> dst` exists. Unknown `src` is simply `false`.
    pub fn has_edge(&self, src: NodeId, dst: NodeId) -> bool {
        self.adjacency
            .get(&src)
            .is_some_and(|adj| adj.has_out(dst))
    }

    pub fn adjacency(&self, v: NodeId) -> Result<&Adjacency> {
        self.adjacency.get(&v).ok_or(GraphError::NodeNotFound(v))
    }

    /// Sorted distinct nodes connected to `v` in either direction.
    pub fn neighbors(&self, v: NodeId) -> Result<&[NodeId]> {
        self.adjacency(v).map(Adjacency::neighs)
    }

    /// Outgoing neighbors of `v`; empty for unknown nodes.
    pub fn out_neighbors(&self, v: NodeId) -> &[NodeId] {
        self.adjacency.get(&v).map(Adjacency::outs).unwrap_or(&[])
    }

    /// Incoming neighbors of `v`; empty for unknown nodes.
    pub fn in_neighbors(&self, v: NodeId) -> &[NodeId] {
        self.adjacency.get(&v).map(Adjacency::ins).unwrap_or(&[])
    }

    /// Fresh replay of every edge in `(src, dst)` order.
    pub fn edges(&self) -> EdgeIter<'_> {
        EdgeIter::new(self)
    }

    /// Approximate memory usage in bytes. Map slots count key, value and one
    /// control byte each, used or not.
    pub fn memory_usage(&self) -> usize {
        let index_mem = self.nodes.len() * size_of::<NodeId>();
        let slot = size_of::<NodeId>() + size_of::<Adjacency>() + 1;
        let map_mem = self.adjacency.capacity() * slot;
        let adj_mem: usize = self.adjacency.values().map(Adjacency::memory_usage).sum();
        index_mem + map_mem + adj_mem
    }
}

impl<'a> IntoIterator for &'a Graph {
    type Item = Edge;
    type IntoIter = EdgeIter<'a>;

    fn into_iter(self) -> EdgeIter<'a> {
        self.edges()
    }
}
