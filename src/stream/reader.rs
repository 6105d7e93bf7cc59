//! Edge record reader
//!
//! One edge per line, `v u label timestamp`, separated by spaces, tabs or
//! commas. Blank lines and lines starting with `#` are skipped. The first
//! malformed line ends the stream with [`Error::InvalidInput`].

use crate::core::error::{Error, Result};
use crate::graph::Edge;
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

/// Parse a single record. `Ok(None)` for blank and comment lines.
pub fn parse_edge(line: &str, line_no: usize) -> Result<Option<Edge>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let fields: Vec<&str> = trimmed
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|f| !f.is_empty())
        .collect();

    let [v, u, label, timestamp] = fields.as_slice() else {
        return Err(Error::invalid_input(format!(
            "line {}: expected 4 fields (v u label timestamp), found {}",
            line_no,
            fields.len()
        )));
    };

    let timestamp: i64 = timestamp.parse().map_err(|_| {
        Error::invalid_input(format!(
            "line {}: timestamp {:?} is not an integer",
            line_no, timestamp
        ))
    })?;

    Ok(Some(Edge::new(*v, *u, *label, timestamp)))
}

/// Streams edges out of any buffered reader
pub struct EdgeReader<R: BufRead> {
    lines: Lines<R>,
    line_no: usize,
    failed: bool,
}

impl<R: BufRead> EdgeReader<R> {
    /// Wrap a buffered reader; lines are numbered from 1
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
            failed: false,
        }
    }
}

impl<R: BufRead> Iterator for EdgeReader<R> {
    type Item = Result<Edge>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e.into()));
                }
            };
            self.line_no += 1;

            match parse_edge(&line, self.line_no) {
                Ok(Some(edge)) => return Some(Ok(edge)),
                Ok(None) => continue,
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

/// Open an edge file
pub fn read_edges(path: impl AsRef<Path>) -> Result<EdgeReader<BufReader<File>>> {
    let file = File::open(path)?;
    Ok(EdgeReader::new(BufReader::new(file)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    #[test]
    fn test_parse_separators() {
        let edge = parse_edge("1 2 3 100", 1).unwrap().unwrap();
        assert_eq!(edge, Edge::new("1", "2", "3", 100));

        let edge = parse_edge("v1,v2,knows,200", 1).unwrap().unwrap();
        assert_eq!(edge, Edge::new("v1", "v2", "knows", 200));

        let edge = parse_edge("  a\tb  l  -5 ", 1).unwrap().unwrap();
        assert_eq!(edge.timestamp(), -5);
    }

    #[test]
    fn test_skip_blank_and_comments() {
        assert!(parse_edge("", 1).unwrap().is_none());
        assert!(parse_edge("   ", 1).unwrap().is_none());
        assert!(parse_edge("# v u label ts", 1).unwrap().is_none());
    }

    #[test]
    fn test_malformed_records() {
        let err = parse_edge("1 2 3", 7).unwrap_err();
        assert!(err.is_input_error());
        assert!(err.to_string().contains("line 7"));

        let err = parse_edge("1 2 3 soon", 2).unwrap_err();
        assert!(err.is_input_error());

        assert!(parse_edge("1 2 3 4 5", 1).is_err());
        assert!(parse_edge("1 2 3 4.5", 1).is_err());
    }

    #[test]
    fn test_reader_stops_at_first_error() {
        let data = "1 2 a 100\n\n# note\n1 3 a 200\nbroken\n2 4 a 300\n";
        let results: Vec<_> = EdgeReader::new(Cursor::new(data)).collect();

        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert_eq!(results[1].as_ref().unwrap().timestamp(), 200);
        let err = results[2].as_ref().unwrap_err();
        assert!(err.to_string().contains("line 5"));
    }

    #[test]
    fn test_read_edges_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "1 2 1 10\n2 3 2 20").unwrap();

        let edges: Vec<_> = read_edges(file.path())
            .unwrap()
            .collect::<Result<Vec<_>>>()
            .unwrap();
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[1], Edge::new("2", "3", "2", 20));

        assert!(matches!(read_edges("/nonexistent/edges.txt"), Err(Error::Io(_))));
    }
}
