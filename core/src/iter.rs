use std::iter::FusedIterator;

use crate::edge::{Edge, NodeId};
use crate::error::{GraphError, Result};
use crate::graph::Graph;

/// Lazy replay of every stored edge, ordered by source then destination.
///
/// Two cursors: `outer` walks the sorted node array, `inner` walks the
/// outgoing array of the node currently selected. Nodes without outgoing
/// edges are skipped. Once exhausted the iterator stays exhausted; ask the
/// graph for a fresh one to replay again.
#[derive(Debug, Clone)]
pub struct EdgeIter<'a> {
    graph: &'a Graph,
    /// Index of the next node to select.
    outer: usize,
    node: NodeId,
    outs: &'a [NodeId],
    inner: usize,
}

impl<'a> EdgeIter<'a> {
    pub(crate) fn new(graph: &'a Graph) -> Self {
        Self {
            graph,
            outer: 0,
            node: 0,
            outs: &[],
            inner: 0,
        }
    }

    /// Whether another edge remains. Advances the outer cursor past nodes
    /// whose outgoing array is empty or fully consumed.
    pub fn has_next(&mut self) -> bool {
        while self.inner >= self.outs.len() {
            let Some(&v) = self.graph.nodes().get(self.outer) else {
                return false;
            };
            self.outer += 1;
            self.node = v;
            self.outs = self.graph.out_neighbors(v);
            self.inner = 0;
        }
        true
    }

    /// The next edge, or [`GraphError::Exhausted`] once every edge was yielded.
    pub fn next_edge(&mut self) -> Result<Edge> {
        if !self.has_next() {
            return Err(GraphError::Exhausted);
        }
        let dst = self.outs[self.inner];
        self.inner += 1;
        Ok(Edge::new(self.node, dst))
    }
}

impl Iterator for EdgeIter<'_> {
    type Item = Edge;

    fn next(&mut self) -> Option<Edge> {
        self.next_edge().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let in_current = self.outs.len() - self.inner;
        if self.outer >= self.graph.nodes().len() {
            (in_current, Some(in_current))
        } else {
            (in_current, None)
        }
    }
}

impl FusedIterator for EdgeIter<'_> {}
