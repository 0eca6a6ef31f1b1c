use std::mem::size_of;

use crate::edge::{Edge, NodeId};

/// Ingestion-phase adjacency: unsorted, possibly duplicated neighbor buffers.
///
/// Consumed by [`AdjacencyBuilder::finish`] to produce a frozen [`Adjacency`].
#[derive(Debug, Clone)]
pub struct AdjacencyBuilder {
    node: NodeId,
    outs: Vec<NodeId>,
    ins: Vec<NodeId>,
}

impl AdjacencyBuilder {
    pub fn new(node: NodeId) -> Self {
        Self {
            node,
            outs: Vec::new(),
            ins: Vec::new(),
        }
    }

    /// Record an edge touching this node.
    ///
    /// The destination goes to `outs` when this node is the source, and the
    /// source goes to `ins` when this node is the destination. A self-loop
    /// lands in both.
    pub fn add_edge(&mut self, edge: &Edge) {
        debug_assert!(
            edge.src == self.node || edge.dst == self.node,
            "edge {:?} does not touch node {}",
            edge,
            self.node
        );
        if edge.src == self.node {
            self.outs.push(edge.dst);
        }
        if edge.dst == self.node {
            self.ins.push(edge.src);
        }
    }

    /// Sort, dedup and shrink both buffers and derive the neighbor union.
    pub fn finish(self) -> Adjacency {
        let outs = sorted_unique(self.outs);
        let ins = sorted_unique(self.ins);
        let neighs = merge_unique(&outs, &ins);
        Adjacency {
            node: self.node,
            outs,
            ins,
            neighs,
        }
    }
}

/// Frozen adjacency of one node. Every array is strictly increasing and
/// allocated to its exact length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Adjacency {
    node: NodeId,
    outs: Box<[NodeId]>,
    ins: Box<[NodeId]>,
    neighs: Box<[NodeId]>,
}

impl Adjacency {
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Destinations of edges leaving this node.
    pub fn outs(&self) -> &[NodeId] {
        &self.outs
    }

    /// Sources of edges entering this node.
    pub fn ins(&self) -> &[NodeId] {
        &self.ins
    }

    /// Every node connected to this one by an edge in either direction.
    pub fn neighs(&self) -> &[NodeId] {
        &self.neighs
    }

    pub fn out_degree(&self) -> usize {
        self.outs.len()
    }

    pub fn in_degree(&self) -> usize {
        self.ins.len()
    }

    /// Number of distinct neighbors, regardless of direction.
    pub fn degree(&self) -> usize {
        self.neighs.len()
    }

    pub fn has_out(&self, dst: NodeId) -> bool {
        self.outs.binary_search(&dst).is_ok()
    }

    /// Heap bytes held by the three arrays. The struct itself is counted by
    /// whoever owns it.
    pub fn memory_usage(&self) -> usize {
        (self.outs.len() + self.ins.len() + self.neighs.len()) * size_of::<NodeId>()
    }
}

fn sorted_unique(mut ids: Vec<NodeId>) -> Box<[NodeId]> {
    ids.sort_unstable();
    ids.dedup();
    ids.into_boxed_slice()
}

/// Union of two strictly increasing slices, strictly increasing.
fn merge_unique(a: &[NodeId], b: &[NodeId]) -> Box<[NodeId]> {
    let mut out = Vec::with_capacity(a.len() + b.len());
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => {
                out.push(a[i]);
                i += 1;
            }
            std::cmp::Ordering::Greater => {
                out.push(b[j]);
                j += 1;
            }
            std::cmp::Ordering::Equal => {
                out.push(a[i]);
                i += 1;
                j += 1;
            }
        }
    }
    out.extend_from_slice(&a[i..]);
    out.extend_from_slice(&b[j..]);
    out.into_boxed_slice()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(node: NodeId, edges: &[(u64, u64)]) -> Adjacency {
        let mut b = AdjacencyBuilder::new(node);
        for &(s, d) in edges {
            b.add_edge(&Edge::new(s, d));
        }
        b.finish()
    }

    #[test]
    fn test_outgoing_and_incoming_split() {
        let adj = build(1, &[(1, 3), (2, 1), (1, 2)]);
        assert_eq!(adj.node(), 1);
        assert_eq!(adj.outs(), &[2, 3]);
        assert_eq!(adj.ins(), &[2]);
        assert_eq!(adj.neighs(), &[2, 3]);
    }

    #[test]
    fn test_dedup() {
        let adj = build(1, &[(1, 9), (1, 4), (1, 9), (4, 1), (4, 1)]);
        assert_eq!(adj.outs(), &[4, 9]);
        assert_eq!(adj.ins(), &[4]);
        assert_eq!(adj.neighs(), &[4, 9]);
        assert_eq!(adj.out_degree(), 2);
        assert_eq!(adj.in_degree(), 1);
        assert_eq!(adj.degree(), 2);
    }

    #[test]
    fn test_self_loop_in_both_directions() {
        let adj = build(5, &[(5, 5)]);
        assert_eq!(adj.outs(), &[5]);
        assert_eq!(adj.ins(), &[5]);
        assert_eq!(adj.neighs(), &[5]);
    }

    #[test]
    fn test_empty_builder() {
        let adj = AdjacencyBuilder::new(3).finish();
        assert!(adj.outs().is_empty());
        assert!(adj.ins().is_empty());
        assert!(adj.neighs().is_empty());
        assert!(!adj.has_out(3));
    }

    #[test]
    fn test_has_out_binary_search() {
        let adj = build(0, &[(0, 100), (0, 7), (0, 55), (0, 3)]);
        assert!(adj.has_out(3));
        assert!(adj.has_out(55));
        assert!(adj.has_out(100));
        assert!(!adj.has_out(4));
        assert!(!adj.has_out(u64::MAX));
    }

    #[test]
    fn test_merge_unique() {
        assert_eq!(&*merge_unique(&[1, 3, 5], &[2, 3, 6]), &[1, 2, 3, 5, 6]);
        assert_eq!(&*merge_unique(&[], &[4]), &[4]);
        assert_eq!(&*merge_unique(&[4], &[]), &[4]);
    }

    #[test]
    fn test_memory_usage_counts_entries() {
        let adj = build(1, &[(1, 2), (3, 1)]);
        assert_eq!(AdjacencyBuilder::new(1).finish().memory_usage(), 0);
        assert_eq!(adj.memory_usage(), 4 * size_of::<NodeId>());
    }
}
