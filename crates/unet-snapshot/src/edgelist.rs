//! Edge-list and DOT formats.
//!
//! The edge list is the only format that is read back in. It starts with a
//! `nodes N` header so isolated agents survive the round trip, and each edge
//! line carries the link weight:
//!
//! ```text
//! # unet edge list
//! nodes 4
//! 0 1 0.25
//! 1 2 0.8
//! 2 3 0.5
//! ```

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::{EdgeSnapshot, FormatError, NetworkSnapshot};

/// Writes the network in GraphViz DOT form, one `a -- b` line per edge
pub fn write_dot<W: Write>(snapshot: &NetworkSnapshot, out: &mut W) -> io::Result<()> {
    writeln!(out, "graph {{")?;
    for edge in &snapshot.edges {
        writeln!(out, "{} -- {}", edge.source, edge.target)?;
    }
    writeln!(out, "}}")
}

/// Writes the network as an edge list with a node count header
pub fn write_edge_list<W: Write>(snapshot: &NetworkSnapshot, out: &mut W) -> io::Result<()> {
    writeln!(out, "# unet edge list")?;
    writeln!(out, "nodes {}", snapshot.agent_count)?;
    for edge in &snapshot.edges {
        writeln!(out, "{} {} {}", edge.source, edge.target, edge.weight)?;
    }
    Ok(())
}

/// Parses an edge list written by [`write_edge_list`].
///
/// Blank lines and `#` comments are skipped. Endpoints are normalized so the
/// lower id is the source; an optional third column is read as the weight
/// and must be a finite number.
pub fn parse_edge_list(content: &str) -> Result<NetworkSnapshot, FormatError> {
    let mut snapshot: Option<NetworkSnapshot> = None;

    for (index, raw) in content.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some(current) = snapshot.as_mut() else {
            snapshot = Some(parse_header(&tokens, line_no, line)?);
            continue;
        };

        let (a, b, weight) = match tokens.as_slice() {
            [a, b] => (parse_node(a, line_no, line)?, parse_node(b, line_no, line)?, 0.0),
            [a, b, w] => (
                parse_node(a, line_no, line)?,
                parse_node(b, line_no, line)?,
                w.parse::<f64>()
                    .ok()
                    .filter(|weight| weight.is_finite())
                    .ok_or_else(|| malformed(line_no, "a finite weight", line))?,
            ),
            _ => return Err(malformed(line_no, "`<source> <target>`", line)),
        };
        current.edges.push(EdgeSnapshot::new(a, b, weight));
    }

    let snapshot = snapshot.ok_or(FormatError::MissingHeader)?;
    snapshot.validate()?;
    Ok(snapshot)
}

/// Reads and parses an edge-list file
pub fn read_edge_list(path: impl AsRef<Path>) -> Result<NetworkSnapshot, FormatError> {
    let content = fs::read_to_string(path.as_ref())?;
    parse_edge_list(&content)
}

fn parse_header(tokens: &[&str], line_no: usize, line: &str) -> Result<NetworkSnapshot, FormatError> {
    match tokens {
        ["nodes", count] => Ok(NetworkSnapshot::new(parse_node(count, line_no, line)?)),
        _ => Err(FormatError::MissingHeader),
    }
}

fn parse_node(token: &str, line_no: usize, line: &str) -> Result<usize, FormatError> {
    token
        .parse::<usize>()
        .map_err(|_| malformed(line_no, "a non-negative integer", line))
}

fn malformed(line: usize, expected: &'static str, found: &str) -> FormatError {
    FormatError::Malformed {
        line,
        expected,
        found: found.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render<F>(snapshot: &NetworkSnapshot, writer: F) -> String
    where
        F: Fn(&NetworkSnapshot, &mut Vec<u8>) -> io::Result<()>,
    {
        let mut buffer = Vec::new();
        writer(snapshot, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_dot_output() {
        let snapshot = NetworkSnapshot::new(3).with_edge(0, 1).with_edge(1, 2);
        let dot = render(&snapshot, |s, w| write_dot(s, w));
        assert_eq!(dot, "graph {\n0 -- 1\n1 -- 2\n}\n");
    }

    #[test]
    fn test_edge_list_output() {
        let snapshot = NetworkSnapshot::new(5).with_edge(3, 1);
        let text = render(&snapshot, |s, w| write_edge_list(s, w));
        assert_eq!(text, "# unet edge list\nnodes 5\n1 3 0\n");

        let weighted = NetworkSnapshot {
            edges: vec![EdgeSnapshot::new(0, 1, 0.75)],
            ..NetworkSnapshot::new(2)
        };
        let text = render(&weighted, |s, w| write_edge_list(s, w));
        assert!(text.ends_with("0 1 0.75\n"));
        assert_eq!(parse_edge_list(&text).unwrap().edges[0].weight, 0.75);
    }

    #[test]
    fn test_parse_normalizes_order() {
        let snapshot = parse_edge_list("nodes 4\n2 0\n\n# comment\n3 1 0.25\n").unwrap();
        assert_eq!(snapshot.agent_count, 4);
        assert_eq!(snapshot.edges[0].pair(), (0, 2));
        assert_eq!(snapshot.edges[1].pair(), (1, 3));
        assert_eq!(snapshot.edges[1].weight, 0.25);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(parse_edge_list(""), Err(FormatError::MissingHeader)));
        assert!(matches!(parse_edge_list("0 1\n"), Err(FormatError::MissingHeader)));
        assert!(matches!(
            parse_edge_list("nodes 3\n0 x\n"),
            Err(FormatError::Malformed { line: 2, .. })
        ));
        assert!(matches!(
            parse_edge_list("nodes 3\n0 1 2 3\n"),
            Err(FormatError::Malformed { line: 2, .. })
        ));
        for weight in ["NaN", "inf", "-inf", "heavy"] {
            let text = format!("nodes 2\n0 1 {}\n", weight);
            assert!(matches!(
                parse_edge_list(&text),
                Err(FormatError::Malformed { line: 2, .. })
            ));
        }
        assert!(matches!(
            parse_edge_list("nodes 2\n0 5\n"),
            Err(FormatError::NodeOutOfRange { .. })
        ));
        assert!(matches!(
            parse_edge_list("nodes 3\n0 1\n1 0\n"),
            Err(FormatError::DuplicateEdge(0, 1))
        ));
    }
}
