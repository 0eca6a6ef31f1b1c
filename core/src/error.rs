use std::io;

use thiserror::Error;

use crate::edge::NodeId;

pub type Result<T> = std::result::Result<T, GraphError>;

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// A text record that is not exactly two tab-separated integers.
    /// `line` is 1-based, or 0 when the record was parsed outside a file.
    #[error("malformed edge record at line {line}: {record:?}")]
    MalformedRecord { line: usize, record: String },
    #[error("the node is not present: {0}")]
    NodeNotFound(NodeId),
    #[error("there is no next edge")]
    Exhausted,
}

impl GraphError {
    /// Attach a line number to a `MalformedRecord`; other variants pass through.
    pub(crate) fn at_line(self, line: usize) -> Self {
        match self {
            GraphError::MalformedRecord { record, .. } => {
                GraphError::MalformedRecord { line, record }
            }
            other => other,
        }
    }
}
