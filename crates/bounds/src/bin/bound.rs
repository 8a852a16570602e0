use bounds::driver::BoundDriver;
use bounds::init_logging;
use clap::Parser;
use std::error::Error;
use std::io::BufWriter;
use tracing::Level;

/// Reads candidate neighborhoods from standard input and reports the upper
/// bound they give.
#[derive(Debug, Parser)]
struct Cli {
    degree: usize,
    #[arg(long)]
    log_level: Option<Level>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(cli.log_level);

    let mut driver = BoundDriver::new(cli.degree)?;
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    driver.run(stdin.lock(), &mut out)?;
    Ok(())
}
