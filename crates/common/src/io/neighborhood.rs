use crate::graph::{CapacityError, Graph};
use std::io::{BufRead, Lines, Write};
use std::num::ParseIntError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReadNeighborhoodError {
    #[error("unexpected end of input")]
    MissingToken,
    #[error("invalid vertex count (got {0})")]
    InvalidSize(i64),
    #[error("vertex {vertex} out of range for a graph with {n} vertices")]
    VertexOutOfRange { vertex: i64, n: usize },
    #[error("found self loop at vertex {0}")]
    SelfLoop(usize),
    #[error("found duplicate edge {0}-{1}")]
    DuplicateEdge(usize, usize),
    #[error("capacity error")]
    Capacity(#[from] CapacityError),
    #[error("parse int error")]
    ParseInt(#[from] ParseIntError),
    #[error("io error")]
    IoError(#[from] std::io::Error),
}

/// Reads the candidate stream: records `k u v u v ... -1`, where `k + 1` is
/// the number of vertices, terminated by a `-1` in place of `k`.
///
/// Tokens are whitespace separated and may be spread over lines arbitrarily.
#[derive(Debug)]
pub struct NeighborhoodReader<R> {
    lines: Lines<R>,
    tokens: Vec<String>,
    finished: bool,
}

impl<R: BufRead> NeighborhoodReader<R> {
    pub fn new(reader: R) -> Self {
        Self { lines: reader.lines(), tokens: vec![], finished: false }
    }

    fn next_token(&mut self) -> Result<i64, ReadNeighborhoodError> {
        loop {
            if let Some(token) = self.tokens.pop() {
                return Ok(token.parse()?);
            }
            let line = self.lines.next().ok_or(ReadNeighborhoodError::MissingToken)??;
            self.tokens.extend(line.split_ascii_whitespace().rev().map(str::to_owned));
        }
    }

    fn next_vertex(&mut self, n: usize) -> Result<Option<usize>, ReadNeighborhoodError> {
        match self.next_token()? {
            -1 => Ok(None),
            v if (0..n as i64).contains(&v) => Ok(Some(v as usize)),
            vertex => Err(ReadNeighborhoodError::VertexOutOfRange { vertex, n }),
        }
    }

    /// Reads the next graph. Returns `None` once the terminating `-1` is read.
    pub fn read_graph(&mut self) -> Result<Option<Graph>, ReadNeighborhoodError> {
        let k = match self.next_token()? {
            -1 => return Ok(None),
            k if k < 0 => return Err(ReadNeighborhoodError::InvalidSize(k)),
            k => k,
        };
        let n = usize::try_from(k + 1).map_err(|_| ReadNeighborhoodError::InvalidSize(k))?;
        let mut graph = Graph::new(n)?;
        while let Some(u) = self.next_vertex(n)? {
            let v = self.next_vertex(n)?.ok_or(ReadNeighborhoodError::VertexOutOfRange { vertex: -1, n })?;
            if u == v {
                return Err(ReadNeighborhoodError::SelfLoop(u));
            }
            if graph.has_edge(u, v) {
                return Err(ReadNeighborhoodError::DuplicateEdge(u, v));
            }
            graph.add_edge(u, v);
        }
        Ok(Some(graph))
    }
}

impl<R: BufRead> Iterator for NeighborhoodReader<R> {
    type Item = Result<Graph, ReadNeighborhoodError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let result = self.read_graph().transpose();
        if !matches!(result, Some(Ok(_))) {
            self.finished = true;
        }
        result
    }
}

/// Writes `graph` as one record of the candidate stream.
pub fn write_neighborhood<W: Write>(out: &mut W, graph: &Graph) -> std::io::Result<()> {
    write!(out, "{}", graph.node_count() - 1)?;
    for (u, v) in graph.edges() {
        write!(out, " {u} {v}")?;
    }
    writeln!(out, " -1")
}

/// Marks the end of the candidate stream.
pub fn write_end_of_stream<W: Write>(out: &mut W) -> std::io::Result<()> {
    writeln!(out, "-1")
}

/// Writes the edges as `u-v ` tokens. Edges incident to the last vertex, the
/// outer vertex of a neighborhood, are left out.
pub fn write_readable<W: Write>(out: &mut W, graph: &Graph) -> std::io::Result<()> {
    let last = graph.node_count().saturating_sub(1);
    for (u, v) in graph.edges().filter(|&(_, v)| v < last) {
        write!(out, "{u}-{v} ")?;
    }
    writeln!(out)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::instances;

    fn read_all(input: &str) -> Result<Vec<Graph>, ReadNeighborhoodError> {
        NeighborhoodReader::new(input.as_bytes()).collect()
    }

    #[test]
    fn write_record() {
        let graph = Graph::from_edges(4, [(2, 3), (0, 1), (1, 2)]).unwrap();
        let mut out = Vec::new();
        write_neighborhood(&mut out, &graph).unwrap();
        write_end_of_stream(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "3 0 1 1 2 2 3 -1\n-1\n");
    }

    #[test]
    fn write_edgeless_record() {
        let mut out = Vec::new();
        write_neighborhood(&mut out, &instances::empty_graph(3)).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "2 -1\n");
    }

    #[test]
    fn readable_skips_outer_vertex() {
        let graph = Graph::from_edges(4, [(0, 1), (1, 2), (2, 3), (1, 3)]).unwrap();
        let mut out = Vec::new();
        write_readable(&mut out, &graph).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "0-1 1-2 \n");
    }

    #[test]
    fn read_stream() {
        let graphs = read_all("3 0 1 1 2 2 3 -1\n4 0 1\n 0 2 -1 -1\n").unwrap();
        assert_eq!(graphs.len(), 2);
        assert_eq!(graphs[0], instances::path_graph(4));
        assert_eq!(graphs[1].node_count(), 5);
        assert_eq!(graphs[1].edges().collect::<Vec<_>>(), vec![(0, 1), (0, 2)]);
    }

    #[test]
    fn read_written_stream() {
        let graph = instances::petersen_graph();
        let mut out = Vec::new();
        write_neighborhood(&mut out, &graph).unwrap();
        write_end_of_stream(&mut out).unwrap();
        let graphs = read_all(std::str::from_utf8(&out).unwrap()).unwrap();
        assert_eq!(graphs, vec![graph]);
    }

    #[test]
    fn stops_at_sentinel() {
        let mut reader = NeighborhoodReader::new("2 0 1 -1\n-1\n3 garbage".as_bytes());
        assert!(reader.next().unwrap().is_ok());
        assert!(reader.next().is_none());
        assert!(reader.next().is_none());
    }

    #[test]
    fn malformed_input() {
        assert!(matches!(read_all("3 0 1"), Err(ReadNeighborhoodError::MissingToken)));
        assert!(matches!(read_all(""), Err(ReadNeighborhoodError::MissingToken)));
        assert!(matches!(read_all("3 0 x -1 -1"), Err(ReadNeighborhoodError::ParseInt(_))));
        assert!(matches!(read_all("3 0 4 -1 -1"), Err(ReadNeighborhoodError::VertexOutOfRange { vertex: 4, n: 4 })));
        assert!(matches!(read_all("3 0 -1 -1"), Err(ReadNeighborhoodError::VertexOutOfRange { vertex: -1, n: 4 })));
        assert!(matches!(read_all("3 1 1 -1 -1"), Err(ReadNeighborhoodError::SelfLoop(1))));
        assert!(matches!(read_all("3 0 1 1 0 -1 -1"), Err(ReadNeighborhoodError::DuplicateEdge(1, 0))));
        assert!(matches!(read_all("-3"), Err(ReadNeighborhoodError::InvalidSize(-3))));
        assert!(matches!(read_all("200 -1 -1"), Err(ReadNeighborhoodError::Capacity(_))));
    }
}
