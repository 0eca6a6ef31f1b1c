use std::fmt;
use std::str::FromStr;

use crate::error::GraphError;

/// Node identifier.
pub type NodeId = u64;

/// Field separator of the text edge format.
pub const FIELD_SEPARATOR: char = '\t';

/// A directed edge `src -> dst`.
///
/// Ordering is by `(src, dst)`, which is the order the graph replays edges in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge {
    pub src: NodeId,
    pub dst: NodeId,
}

impl Edge {
    pub fn new(src: NodeId, dst: NodeId) -> Self {
        Self { src, dst }
    }

    /// Both endpoints, source first. A self-loop yields the same id twice.
    pub fn nodes(&self) -> [NodeId; 2] {
        [self.src, self.dst]
    }

    pub fn is_self_loop(&self) -> bool {
        self.src == self.dst
    }
}

impl From<(NodeId, NodeId)> for Edge {
    fn from((src, dst): (NodeId, NodeId)) -> Self {
        Self { src, dst }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.src, FIELD_SEPARATOR, self.dst)
    }
}

/// Parses `src<TAB>dst`. A trailing `\r` is tolerated; nothing else is.
impl FromStr for Edge {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let record = s.strip_suffix('\r').unwrap_or(s);
        let malformed = || GraphError::MalformedRecord {
            line: 0,
            record: s.to_string(),
        };

        let mut fields = record.split(FIELD_SEPARATOR);
        let (Some(src), Some(dst), None) = (fields.next(), fields.next(), fields.next()) else {
            return Err(malformed());
        };
        let src = src.parse().map_err(|_| malformed())?;
        let dst = dst.parse().map_err(|_| malformed())?;
        Ok(Self { src, dst })
    }
}
