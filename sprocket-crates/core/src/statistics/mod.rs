//! Counters describing the size of a compiled model, and the means to log them.
mod compilation_statistics;
pub mod statistic_logging;

pub use compilation_statistics::*;
