use common::io::{GadgetCounts, GadgetKind, GadgetRecord};
use common::{CapacityError, Graph};
use connected_sets::{count_anchored, transfer_matrix, Terminals};
use nalgebra::Matrix3;
use std::io::Write;
use thiserror::Error;
use tracing::{info, instrument};

/// Largest amount by which a recorded bound may exceed the recomputed one.
pub const THRESHOLD: f64 = 1e-12;

#[derive(Error, Debug)]
pub enum GadgetError {
    #[error("no gadget with key {0}")]
    UnknownKey(String),
    #[error("gadget {key} has no recorded counts")]
    MissingCounts { key: String },
    #[error("gadget {key} records counts of the wrong type")]
    WrongCounts { key: String },
    #[error("gadget {key} is too small")]
    TooSmall { key: String },
    #[error("gadget {key} has an edge {u}-{v} that is invalid")]
    InvalidEdge { key: String, u: usize, v: usize },
    #[error("recorded bound {recorded} of gadget {key} exceeds the recomputed bound {recomputed}")]
    BoundMismatch { key: String, recorded: f64, recomputed: f64 },
    #[error("capacity error")]
    Capacity(#[from] CapacityError),
}

/// The recomputed lower bound of a gadget and the counts it is based on.
#[derive(Clone, Debug, PartialEq)]
pub struct Recomputed {
    pub bound: f64,
    pub counts: GadgetCounts,
}

/// Builds the gadget graph, rejecting loops, duplicates and vertices out of
/// range.
pub fn gadget_graph(record: &GadgetRecord) -> Result<Graph, GadgetError> {
    let mut graph = Graph::new(record.n)?;
    for &(u, v) in &record.edges {
        if u >= record.n || v >= record.n || u == v || graph.has_edge(u, v) {
            return Err(GadgetError::InvalidEdge { key: record.key(), u, v });
        }
        graph.add_edge(u, v);
    }
    Ok(graph)
}

/// The spectral radius of a matrix, the largest modulus of its eigenvalues.
pub fn spectral_radius(matrix: [[f64; 3]; 3]) -> f64 {
    let matrix = Matrix3::from_fn(|i, j| matrix[i][j]);
    matrix.complex_eigenvalues().iter().map(|e| e.norm()).fold(0.0, f64::max)
}

/// Writes a transfer matrix in row-major order, one entry per line.
pub fn write_transfer_matrix<W: Write>(out: &mut W, matrix: &[[u64; 3]; 3]) -> std::io::Result<()> {
    for value in matrix.iter().flatten() {
        writeln!(out, "{value}")?;
    }
    Ok(())
}

/// Recomputes the lower bound of a gadget. With `recount`, the counts are
/// obtained from the gadget graph, otherwise the recorded counts are used.
///
/// A type I gadget with `c` connected sets through its join vertex gives
/// `c^(1/n)`. A type II gadget gives `ρ^(1/(n - 2))` where `ρ` is the spectral
/// radius of its transfer matrix.
#[instrument(skip_all, fields(key = %record.key()))]
pub fn recompute_bound(record: &GadgetRecord, recount: bool) -> Result<Recomputed, GadgetError> {
    let key = record.key();
    let min_n = match record.kind {
        GadgetKind::TypeI => 1,
        GadgetKind::TypeII => 4,
    };
    if record.n < min_n {
        return Err(GadgetError::TooSmall { key });
    }

    let counts = if recount {
        let graph = gadget_graph(record)?;
        match record.kind {
            GadgetKind::TypeI => GadgetCounts::Sets(count_anchored(&graph, 0)),
            GadgetKind::TypeII => GadgetCounts::Matrix(transfer_matrix(&graph, Terminals::GADGET)),
        }
    } else {
        record.counts.clone().ok_or_else(|| GadgetError::MissingCounts { key: key.clone() })?
    };

    let bound = match (record.kind, &counts) {
        (GadgetKind::TypeI, &GadgetCounts::Sets(sets)) => (sets as f64).powf(1.0 / record.n as f64),
        (GadgetKind::TypeII, GadgetCounts::Matrix(matrix)) => {
            let radius = spectral_radius(matrix.map(|row| row.map(|x| x as f64)));
            radius.powf(1.0 / (record.n - 2) as f64)
        }
        _ => return Err(GadgetError::WrongCounts { key }),
    };
    info!(bound, recorded = record.bound);

    if record.bound - bound >= THRESHOLD {
        return Err(GadgetError::BoundMismatch { key, recorded: record.bound, recomputed: bound });
    }
    Ok(Recomputed { bound, counts })
}
