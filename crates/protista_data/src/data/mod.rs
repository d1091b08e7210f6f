//! Core data structures for the Protista decision-tree engine.

pub mod metrics;
pub mod protist;
pub mod tree;
