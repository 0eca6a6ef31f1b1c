use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::graph::Graph;

/// Write every edge as `src\tdst\n` in replay order. Returns the edge count.
pub fn write_edges<W: Write>(graph: &Graph, mut writer: W) -> Result<u64> {
    let mut written = 0u64;
    for edge in graph {
        writeln!(writer, "{}", edge)?;
        written += 1;
    }
    writer.flush()?;
    Ok(written)
}

impl Graph {
    /// Save as an edge file readable by [`Graph::from_path`]. Truncates `path`.
    pub fn save_as_text(&self, path: impl AsRef<Path>) -> Result<u64> {
        let path = path.as_ref();
        let written = write_edges(self, BufWriter::new(File::create(path)?))?;
        info!(path = %path.display(), edges = written, "graph saved");
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::Edge;

    #[test]
    fn test_write_edges_format() {
        let g = Graph::from_edges(vec![Edge::new(2, 1), Edge::new(1, 3), Edge::new(1, 2)]);
        let mut out = Vec::new();
        let n = write_edges(&g, &mut out).unwrap();
        assert_eq!(n, 3);
        assert_eq!(String::from_utf8(out).unwrap(), "1\t2\n1\t3\n2\t1\n");
    }

    #[test]
    fn test_write_empty_graph() {
        let mut out = Vec::new();
        assert_eq!(write_edges(&Graph::default(), &mut out).unwrap(), 0);
        assert!(out.is_empty());
    }

    #[test]
    fn test_save_and_reload() {
        let g = Graph::from_edges((0..50u64).flat_map(|i| {
            [Edge::new(i, (i * 7) % 50), Edge::new((i * 3) % 50, i)]
        }));
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.tsv");

        let written = g.save_as_text(&path).unwrap();
        assert_eq!(written as usize, g.edge_count());

        let reloaded = Graph::from_path(&path).unwrap();
        assert_eq!(reloaded.nodes(), g.nodes());
        assert_eq!(reloaded.edge_count(), g.edge_count());
        assert!(reloaded.edges().eq(g.edges()));
    }

    #[test]
    fn test_save_truncates_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.tsv");
        std::fs::write(&path, "9\t9\n8\t8\n7\t7\n6\t6\n").unwrap();

        let g = Graph::from_edges(vec![Edge::new(1, 2)]);
        g.save_as_text(&path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "1\t2\n");
    }
}
