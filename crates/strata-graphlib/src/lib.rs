//! Graph container APIs used by `strata`.
//!
//! Nodes and edges are keyed by strings and iterate in insertion order, which the layered
//! layout relies on for deterministic tie-breaking.

#![forbid(unsafe_code)]

mod graph;

pub mod alg;

pub use graph::{EdgeKey, Graph, GraphOptions};
