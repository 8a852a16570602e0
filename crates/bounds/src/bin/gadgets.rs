use bounds::gadget::{recompute_bound, GadgetError};
use bounds::init_logging;
use clap::Parser;
use common::io::{read_gadgets, GadgetCounts};
use std::error::Error;
use std::path::PathBuf;
use tracing::Level;

/// Recomputes the lower bounds of the gadget catalogue.
#[derive(Debug, Parser)]
struct Cli {
    /// Recount the connected sets instead of using the recorded counts.
    #[arg(long)]
    count: bool,
    #[arg(long, default_value = "gadgets.txt")]
    file: PathBuf,
    /// Only check the gadget with this key, e.g. `C-3-10`.
    key: Option<String>,
    #[arg(long)]
    log_level: Option<Level>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(cli.log_level);

    let gadgets = read_gadgets(&cli.file)?;
    let selected: Vec<_> = match &cli.key {
        Some(key) => gadgets.iter().filter(|g| &g.key() == key).collect(),
        None => gadgets.iter().collect(),
    };
    if let (Some(key), true) = (&cli.key, selected.is_empty()) {
        return Err(GadgetError::UnknownKey(key.clone()).into());
    }

    for record in selected {
        let recomputed = recompute_bound(record, cli.count)?;
        let counts = match recomputed.counts {
            GadgetCounts::Sets(sets) => format!("{sets}"),
            GadgetCounts::Matrix(m) => {
                m.iter().map(|row| format!("{},{},{}", row[0], row[1], row[2])).collect::<Vec<_>>().join("|")
            }
        };
        println!(
            "{:<8} type {:<2}  recorded {:.12}  computed {:.12}  counts {counts}",
            record.key(),
            record.kind.roman(),
            record.bound,
            recomputed.bound
        );
    }
    Ok(())
}
