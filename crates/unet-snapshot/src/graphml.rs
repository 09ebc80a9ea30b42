//! GraphML output for the final network.

use std::io::{self, Write};

use crate::NetworkSnapshot;

const GRAPHML_HEADER: &str = concat!(
    "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
    "<graphml xmlns=\"http://graphml.graphdrawing.org/xmlns\" ",
    "xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\" ",
    "xsi:schemaLocation=\"http://graphml.graphdrawing.org/xmlns ",
    "http://graphml.graphdrawing.org/xmlns/1.0/graphml.xsd\">\n",
    "  <graph id=\"G\" edgedefault=\"undirected\">\n",
);

const GRAPHML_FOOTER: &str = "  </graph>\n</graphml>\n";

/// Writes the network as an undirected GraphML document.
///
/// Nodes are numbered `0..agent_count`, edges `e0, e1, ...` in creation order.
pub fn write_graphml<W: Write>(snapshot: &NetworkSnapshot, out: &mut W) -> io::Result<()> {
    out.write_all(GRAPHML_HEADER.as_bytes())?;

    for node in 0..snapshot.agent_count {
        writeln!(out, "    <node id=\"{}\"/>", node)?;
    }

    for (index, edge) in snapshot.edges.iter().enumerate() {
        writeln!(
            out,
            "    <edge id=\"e{}\" source=\"{}\" target=\"{}\"/>",
            index, edge.source, edge.target
        )?;
    }

    out.write_all(GRAPHML_FOOTER.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_graphml_string(snapshot: &NetworkSnapshot) -> String {
        let mut buffer = Vec::new();
        write_graphml(snapshot, &mut buffer).expect("writing into a Vec");
        String::from_utf8(buffer).expect("GraphML is UTF-8")
    }

    #[test]
    fn test_graphml_structure() {
        let snapshot = NetworkSnapshot::new(3).with_edge(0, 1).with_edge(2, 1);
        let xml = to_graphml_string(&snapshot);

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n"));
        assert!(xml.contains("edgedefault=\"undirected\""));
        assert!(xml.contains("    <node id=\"0\"/>\n"));
        assert!(xml.contains("    <node id=\"2\"/>\n"));
        assert!(xml.contains("    <edge id=\"e0\" source=\"0\" target=\"1\"/>\n"));
        assert!(xml.contains("    <edge id=\"e1\" source=\"1\" target=\"2\"/>\n"));
        assert!(xml.ends_with("</graphml>\n"));
        assert_eq!(xml.matches("<node ").count(), 3);
        assert_eq!(xml.matches("<edge ").count(), 2);
    }

    #[test]
    fn test_graphml_empty_network() {
        let xml = to_graphml_string(&NetworkSnapshot::new(0));
        assert!(!xml.contains("<node "));
        assert!(!xml.contains("<edge "));
    }
}
