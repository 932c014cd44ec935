//! Aggregation over fetched collections.

pub mod aggregator;

pub use aggregator::*;
