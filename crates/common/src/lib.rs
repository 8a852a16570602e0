pub mod graph;
#[cfg(any(test, feature = "instances"))]
pub mod instances;
pub mod io;

pub use graph::{CapacityError, Graph, MAX_VERTICES};
