use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use tracing::debug;

use crate::edge::Edge;
use crate::error::Result;

/// Lines starting with this are skipped.
pub const COMMENT_MARKER: char = '#';

/// Streams edges out of `src<TAB>dst` text, one record per line.
///
/// Comment and blank lines are skipped. A bad record yields
/// `MalformedRecord` carrying its 1-based line number.
pub struct EdgeReader<R> {
    lines: Lines<R>,
    line_no: usize,
}

impl<R: BufRead> EdgeReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
        }
    }
}

impl EdgeReader<BufReader<File>> {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "opening edge file");
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> Iterator for EdgeReader<R> {
    type Item = Result<Edge>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e.into())),
            };
            self.line_no += 1;

            if line.starts_with(COMMENT_MARKER) || line.trim().is_empty() {
                continue;
            }
            return Some(line.parse::<Edge>().map_err(|e| e.at_line(self.line_no)));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Write};

    use super::*;
    use crate::config::BuildConfig;
    use crate::error::GraphError;
    use crate::graph::Graph;

    fn read_all(text: &str) -> Vec<Result<Edge>> {
        EdgeReader::new(Cursor::new(text)).collect()
    }

    #[test]
    fn test_reads_records() {
        let edges: Vec<Edge> = read_all("1\t2\n3\t4\n")
            .into_iter()
            .map(|r| r.unwrap())
            .collect();
        assert_eq!(edges, vec![Edge::new(1, 2), Edge::new(3, 4)]);
    }

    #[test]
    fn test_skips_comments_and_blank_lines() {
        let text = "# FromNodeId\tToNodeId\n\n1\t2\r\n   \n#3\t4\n5\t6";
        let edges: Vec<Edge> = read_all(text).into_iter().map(|r| r.unwrap()).collect();
        assert_eq!(edges, vec![Edge::new(1, 2), Edge::new(5, 6)]);
    }

    #[test]
    fn test_malformed_line_number() {
        let results = read_all("# header\n1\t2\n1,2\n");
        assert_eq!(results.len(), 2);
        match &results[1] {
            Err(GraphError::MalformedRecord { line, record }) => {
                assert_eq!(*line, 3);
                assert_eq!(record, "1,2");
            }
            other => panic!("expected MalformedRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_graph_from_reader_aborts_on_bad_record() {
        let err = Graph::from_reader(Cursor::new("1\t2\nbad\n3\t4\n")).unwrap_err();
        assert!(matches!(err, GraphError::MalformedRecord { line: 2, .. }));
    }

    #[test]
    fn test_graph_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# Directed graph").unwrap();
        writeln!(file, "1\t2").unwrap();
        writeln!(file, "1\t3").unwrap();
        writeln!(file, "2\t1").unwrap();
        writeln!(file, "1\t2").unwrap();
        file.flush().unwrap();

        let g = Graph::from_path(file.path()).unwrap();
        assert_eq!(g.nodes(), &[1, 2, 3]);
        assert_eq!(g.edge_count(), 3);
    }

    #[test]
    fn test_graph_from_path_with_progress_interval() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# three edges").unwrap();
        writeln!(file, "1\t2").unwrap();
        writeln!(file, "2\t3").unwrap();
        writeln!(file, "3\t1").unwrap();
        file.flush().unwrap();

        let mut seen = Vec::new();
        let config = BuildConfig::default().with_progress_interval(1);
        let g = Graph::from_path_with(file.path(), &config, &mut |n: u64| seen.push(n))
            .unwrap();
        assert_eq!(seen, vec![1, 2, 3]);
        assert_eq!(g.edge_count(), 3);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Graph::from_path(dir.path().join("missing.txt")).unwrap_err();
        assert!(matches!(err, GraphError::Io(_)));
    }
}
