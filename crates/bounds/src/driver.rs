use common::io::{write_readable, NeighborhoodReader, ReadNeighborhoodError};
use common::Graph;
use connected_sets::{boundary_ratio, BoundaryRatio};
use std::io::{BufRead, Write};
use thiserror::Error;
use tracing::{debug, info, instrument};

/// Largest degree accepted by the driver.
pub const MAX_DEGREE: usize = 10;

#[derive(Error, Debug)]
pub enum DriverError {
    #[error("the degree is too large (got {0}, at most {MAX_DEGREE})")]
    DegreeTooLarge(usize),
    #[error("could not read candidate graph")]
    Read(#[from] ReadNeighborhoodError),
    #[error("io error")]
    IoError(#[from] std::io::Error),
}

/// The best boundary ratio seen so far.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Extremum {
    pub count: u64,
    pub ratio: f64,
    pub bound: f64,
}

/// Scores candidate neighborhoods by their boundary ratio and keeps the
/// largest one.
#[derive(Clone, Debug)]
pub struct BoundDriver {
    /// `d² + 1`, the number of vertices within distance two of a vertex in a
    /// graph of maximum degree `d`.
    moore_bound: u32,
    best: Option<Extremum>,
}

impl BoundDriver {
    pub fn new(max_degree: usize) -> Result<Self, DriverError> {
        if max_degree > MAX_DEGREE {
            return Err(DriverError::DegreeTooLarge(max_degree));
        }
        Ok(Self { moore_bound: (max_degree * max_degree + 1) as u32, best: None })
    }

    pub fn moore_bound(&self) -> u32 {
        self.moore_bound
    }

    /// Scores `graph`, whose last vertex is the boundary. Returns the new
    /// extremum if the ratio is strictly larger than every ratio seen before.
    pub fn observe(&mut self, graph: &Graph) -> Option<Extremum> {
        let BoundaryRatio { count, ratio } = boundary_ratio(graph);
        debug!(n = graph.node_count(), count, ratio);
        if ratio <= self.best.map_or(0.0, |best| best.ratio) {
            return None;
        }
        let bound = 2.0 * ratio.powf(1.0 / self.moore_bound as f64);
        let extremum = Extremum { count, ratio, bound };
        self.best = Some(extremum);
        Some(extremum)
    }

    pub fn best(&self) -> Option<Extremum> {
        self.best
    }

    /// The bound derived from the best ratio, `0` before any improvement.
    pub fn bound(&self) -> f64 {
        self.best.map_or(0.0, |best| best.bound)
    }

    /// Scores every graph of a candidate stream and writes the report: the
    /// size of each new batch of candidates, every improvement, and the final
    /// bound. Returns the final bound.
    #[instrument(skip_all)]
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<f64, DriverError> {
        let mut previous_size = None;
        let mut candidates = 0u64;
        for graph in NeighborhoodReader::new(input) {
            let graph = graph?;
            candidates += 1;
            let size = graph.node_count() - 1;
            if previous_size != Some(size) {
                writeln!(out, "n={size}")?;
                previous_size = Some(size);
            }
            if let Some(Extremum { count, ratio, bound }) = self.observe(&graph) {
                write!(out, "  Found a neighborhood with a higher ratio: ")?;
                write_readable(out, &graph)?;
                writeln!(out, "  Boundary-connected sets: {count:6}    Ratio: {ratio:.6}    Bound: {bound:.6}")?;
            }
        }
        let bound = self.bound();
        writeln!(out, "Bound: {bound:.6}^n")?;
        out.flush()?;
        info!(candidates, bound);
        Ok(bound)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use common::io::{write_end_of_stream, write_neighborhood};
    use common::instances;
    use neighborhoods::{enumerate_neighborhoods, NeighborhoodConfig};

    fn report(degree: usize, input: &str) -> (f64, String) {
        let mut driver = BoundDriver::new(degree).unwrap();
        let mut out = Vec::new();
        let bound = driver.run(input.as_bytes(), &mut out).unwrap();
        (bound, String::from_utf8(out).unwrap())
    }

    #[test]
    fn single_candidate() {
        let (bound, out) = report(3, "3 0 1 1 2 2 3 -1\n-1\n");
        assert_eq!(
            out,
            "n=3\n  Found a neighborhood with a higher ratio: 0-1 1-2 \n  Boundary-connected sets:      4    Ratio: 0.500000    Bound: 1.866066\nBound: 1.866066^n\n"
        );
        assert!((bound - 2.0 * 0.5f64.powf(0.1)).abs() < 1e-12);
    }

    #[test]
    fn empty_stream() {
        let (bound, out) = report(3, "-1\n");
        assert_eq!(bound, 0.0);
        assert_eq!(out, "Bound: 0.000000^n\n");
    }

    #[test]
    fn only_strict_improvements_are_reported() {
        let (_, out) = report(3, "3 0 1 1 2 2 3 -1 3 0 1 1 2 2 3 -1 3 0 1 0 2 0 3 -1 -1");
        assert_eq!(out.matches("Found").count(), 2);
        assert_eq!(out.matches("n=3").count(), 1);
    }

    #[test]
    fn observe_is_monotone() {
        let mut driver = BoundDriver::new(3).unwrap();
        assert_eq!(driver.moore_bound(), 10);
        assert!(driver.observe(&instances::path_graph(4)).is_some());
        assert!(driver.observe(&instances::path_graph(4)).is_none());
        assert!(driver.observe(&instances::empty_graph(4)).is_none());
        let star = driver.observe(&instances::star_graph(4, 3)).unwrap();
        assert_eq!((star.count, star.ratio, star.bound), (8, 1.0, 2.0));
        assert_eq!(driver.best(), Some(star));
        assert!(driver.observe(&instances::complete_graph(5)).is_none());
    }

    #[test]
    fn degree_limit() {
        assert!(BoundDriver::new(MAX_DEGREE).is_ok());
        assert!(matches!(BoundDriver::new(MAX_DEGREE + 1), Err(DriverError::DegreeTooLarge(11))));
    }

    #[test]
    fn malformed_stream() {
        let mut driver = BoundDriver::new(3).unwrap();
        let result = driver.run("3 0 1 1 2".as_bytes(), &mut Vec::new());
        assert!(matches!(result, Err(DriverError::Read(ReadNeighborhoodError::MissingToken))));
    }

    #[test]
    fn all_neighborhoods_of_degree_3() {
        let config = NeighborhoodConfig::new(3).unwrap();
        let mut stream = Vec::new();
        for size in config.sizes() {
            enumerate_neighborhoods(&config, size, |g| write_neighborhood(&mut stream, g)).unwrap();
        }
        write_end_of_stream(&mut stream).unwrap();

        let (_, out) = report(3, std::str::from_utf8(&stream).unwrap());
        let sizes: Vec<_> = out.lines().filter(|l| l.starts_with("n=")).collect();
        assert_eq!(sizes, vec!["n=3", "n=4", "n=5", "n=6", "n=7", "n=8", "n=9", "n=10"]);
        assert_eq!(out.matches("Found").count(), 5);
        assert!(out.contains(
            "  Found a neighborhood with a higher ratio: 0-1 0-2 0-3 1-4 1-5 2-4 2-5 3-6 3-7 \n  Boundary-connected sets:    184    Ratio: 0.718750    Bound: 1.935030\n"
        ));
        assert!(out.ends_with("Bound: 1.935030^n\n"));
    }
}
