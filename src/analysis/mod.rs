//! Analysis modules.
//!
//! Grouping storage and the minimum-sample filter.

pub mod aggregator;

pub use aggregator::*;
