use bounds::init_logging;
use clap::Parser;
use common::io::{write_end_of_stream, write_neighborhood};
use neighborhoods::{enumerate_neighborhoods, NeighborhoodConfig};
use std::error::Error;
use std::io::{BufWriter, Write};
use tracing::{info, Level};

/// Writes the candidate neighborhoods of a maximum degree to standard output.
#[derive(Debug, Parser)]
struct Cli {
    degree: usize,
    /// Only enumerate neighborhoods with this many non-outer vertices.
    size: Option<usize>,
    #[arg(long)]
    log_level: Option<Level>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(cli.log_level);

    let config = NeighborhoodConfig::new(cli.degree)?;
    let sizes = match cli.size {
        Some(size) => {
            config.check_size(size)?;
            size..=size
        }
        None => config.sizes(),
    };

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut total = 0;
    for size in sizes {
        total += enumerate_neighborhoods(&config, size, |graph| write_neighborhood(&mut out, graph))?;
    }
    write_end_of_stream(&mut out)?;
    out.flush()?;
    info!(degree = cli.degree, total);
    Ok(())
}
