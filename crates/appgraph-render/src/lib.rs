#![forbid(unsafe_code)]

//! Typed graph → layered layout → display primitives.
//!
//! [`layout_graph`] runs the `strata` engine and reports positions in the logical frame of the
//! configured direction; [`project`] maps that result into the node/edge objects a canvas draws.

pub mod adapter;
pub mod config;
pub mod json;
pub mod layout;
pub mod model;

pub use adapter::{RenderGraph, VisualEdge, VisualNode, project, to_display};
pub use config::LayoutConfig;
pub use layout::layout_graph;
pub use model::{LayoutEdge, LayoutNode, LayoutPoint, LayoutResult};
pub use strata::RankDir;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid layout config: {message}")]
    InvalidConfig { message: String },
    #[error("invalid graph model: {message}")]
    InvalidModel { message: String },
    #[error("layout JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
