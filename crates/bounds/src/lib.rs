//! Upper bounds on the number of connected sets of a graph of bounded degree
//! and the lower-bound gadgets matching them.
//!
//! [driver::BoundDriver] scores a stream of candidate neighborhoods by the
//! fraction of subsets that are connected to their boundary vertex.
//! [gadget::recompute_bound] checks the recorded lower bound of a gadget of
//! the catalogue.

#![forbid(unsafe_code)]
#![warn(missing_debug_implementations, rust_2018_idioms, unreachable_pub)]

pub mod driver;
pub mod gadget;

use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::FmtSubscriber;

/// Installs a subscriber writing to stderr if a level is given. Standard
/// output is reserved for the results.
pub fn init_logging(level: Option<Level>) {
    let Some(level) = level else { return };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr)
        .finish();
    subscriber.init();
}
