//! Graphviz DOT export for handing the network to a renderer.
//!
//! Node `width` follows the derived size and `fillcolor` the rating band;
//! edges carry their weight and shared subjects.
//!
//! ```text
//! Network → export_dot() → books.dot
//!   → dot -Tsvg books.dot > books.svg   (or neato/fdp for larger graphs)
//! ```

use std::io::Write;

use crate::network::Network;
use crate::Result;

/// Largest node width in inches; sizes are scaled relative to the biggest node.
const MAX_WIDTH: f64 = 2.0;
const MIN_WIDTH: f64 = 0.2;

/// Export the network as an undirected DOT graph.
pub fn export_dot(network: &Network, writer: &mut dyn Write) -> Result<()> {
    let stats = network.stats();
    let largest = network.nodes().map(|n| n.size).max().unwrap_or(0);

    // Header
    writeln!(writer, "// book-network DOT export")?;
    writeln!(writer, "// Nodes: {}", stats.nodes)?;
    writeln!(writer, "// Edges: {}", stats.edges)?;
    writeln!(writer, "graph books {{")?;
    writeln!(writer, "  node [style=filled, shape=circle, fontsize=10];")?;
    writeln!(writer, "  edge [color=gray];")?;

    for node in network.nodes() {
        writeln!(
            writer,
            "  n{} [label={}, width={:.2}, fillcolor={}, band={}];",
            node.id.0,
            quote(node.title()),
            node_width(node.size, largest),
            node.color_band.color_name(),
            node.color_band,
        )?;
    }

    for rel in network.edges() {
        writeln!(
            writer,
            "  n{} -- n{} [weight={}, label={}];",
            rel.src.0,
            rel.dst.0,
            rel.weight,
            quote(&rel.common_subjects.join(", ")),
        )?;
    }

    writeln!(writer, "}}")?;
    Ok(())
}

fn node_width(size: u64, largest: u64) -> f64 {
    if largest == 0 {
        return MIN_WIDTH;
    }
    let width = MAX_WIDTH * (size as f64 / largest as f64).sqrt();
    width.max(MIN_WIDTH)
}

/// Quote a DOT string literal.
fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Book;
    use crate::network::{build, NetworkConfig};

    #[test]
    fn test_quote() {
        assert_eq!(quote("plain"), "\"plain\"");
        assert_eq!(quote("say \"hi\""), "\"say \\\"hi\\\"\"");
        assert_eq!(quote("a\\b"), "\"a\\\\b\"");
    }

    #[test]
    fn test_node_width() {
        assert_eq!(node_width(0, 0), MIN_WIDTH);
        assert_eq!(node_width(100, 100), MAX_WIDTH);
        assert_eq!(node_width(1, 1_000_000), MIN_WIDTH);
    }

    #[test]
    fn test_export_dot_lists_nodes_and_edges() {
        let net = build(
            vec![
                Book::new("A").with_subjects(["x", "y"]).with_rating(4.5),
                Book::new("B").with_subjects(["y"]).with_readinglog_count(3),
                Book::new("C"),
            ],
            &NetworkConfig::default(),
        );
        let mut buf = Vec::new();
        export_dot(&net, &mut buf).unwrap();
        let dot = String::from_utf8(buf).unwrap();

        assert!(dot.starts_with("// book-network DOT export"));
        assert!(dot.contains("graph books {"));
        assert_eq!(dot.lines().filter(|l| l.contains("[label=")).count(), 3);
        assert!(dot.contains("fillcolor=green"));
        assert!(dot.contains("fillcolor=gray"));
        assert!(dot.contains("n0 -- n1 [weight=1, label=\"y\"];"));
        assert!(dot.trim_end().ends_with('}'));
    }
}
