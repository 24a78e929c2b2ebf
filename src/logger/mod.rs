//! Tracing setup. `main.rs` bootstraps it before settings are read.

mod logger;
pub use logger::*;

pub use tracing::{debug, error, info, trace, warn};
