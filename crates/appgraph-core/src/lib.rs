#![forbid(unsafe_code)]

//! Application dependency graphs: where they come from and what they look like.
//!
//! - `config`: base URL and timeout, resolved from the environment
//! - `payload`: the `/graphs` wire schema
//! - `builder`: payload → typed [`AppGraph`], rejecting bad indices and duplicate ids
//! - `ingest`: async HTTP retrieval

pub mod builder;
pub mod config;
pub mod error;
pub mod ingest;
pub mod model;
pub mod payload;

pub use builder::build_graph;
pub use config::IngestConfig;
pub use error::{Error, Result};
pub use ingest::IngestClient;
pub use model::{AppGraph, Edge, Node};
pub use payload::{GraphsResponse, RawEdge, RawGraph, RawNode, parse_response};
