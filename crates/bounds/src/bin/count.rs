use bounds::gadget::write_transfer_matrix;
use bounds::init_logging;
use clap::Parser;
use common::io::GadgetKind;
use common::Graph;
use connected_sets::{count_anchored, transfer_matrix, Terminals};
use std::error::Error;
use tracing::Level;

/// Counts the connected sets of a lower-bound gadget.
///
/// A type I gadget prints the number of connected sets containing vertex 0. A
/// type II gadget prints the nine entries of its transfer matrix in row-major
/// order, one per line.
#[derive(Debug, Parser)]
struct Cli {
    #[arg(value_enum)]
    kind: GadgetKind,
    /// Number of vertices.
    n: usize,
    /// Edge endpoints, two per edge.
    vertices: Vec<usize>,
    #[arg(long)]
    log_level: Option<Level>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(cli.log_level);

    if cli.vertices.len() % 2 != 0 {
        return Err(format!("expected pairs of vertices (got {} vertices)", cli.vertices.len()).into());
    }
    let mut graph = Graph::new(cli.n)?;
    for edge in cli.vertices.chunks_exact(2) {
        let (u, v) = (edge[0], edge[1]);
        if u >= cli.n || v >= cli.n || u == v || graph.has_edge(u, v) {
            return Err(format!("invalid edge {u}-{v}").into());
        }
        graph.add_edge(u, v);
    }

    match cli.kind {
        GadgetKind::TypeI => {
            if cli.n == 0 {
                return Err("a type I gadget needs vertex 0".into());
            }
            println!("{}", count_anchored(&graph, 0));
        }
        GadgetKind::TypeII => {
            if cli.n < 4 {
                return Err("a type II gadget needs vertices 0 to 3".into());
            }
            let stdout = std::io::stdout();
            write_transfer_matrix(&mut stdout.lock(), &transfer_matrix(&graph, Terminals::GADGET))?;
        }
    }
    Ok(())
}
