//! Deterministic layered graph layout.
//!
//! A Sugiyama-style pipeline: break cycles, assign ranks, split long edges into dummy chains,
//! reduce crossings with barycenter sweeps, assign coordinates, then map the internal
//! top-to-bottom frame to the requested [`RankDir`].

#![forbid(unsafe_code)]

pub use strata_graphlib as graphlib;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod model;
pub use model::{DummyKind, EdgeLabel, GraphLabel, NodeLabel, Point, RankDir};

pub mod acyclic;
pub mod coordinate_system;
pub mod normalize;
pub mod order;
pub mod position;
pub mod rank;

mod pipeline;
pub use pipeline::{LayoutStats, layout, layout_with_options};

/// The graph type every phase operates on.
pub type LayoutGraph = graphlib::Graph<NodeLabel, EdgeLabel, GraphLabel>;

/// An empty multigraph carrying `label`, ready for `set_node` / `set_edge_named`.
pub fn new_layout_graph(label: GraphLabel) -> LayoutGraph {
    let mut g = LayoutGraph::new(graphlib::GraphOptions { multigraph: true });
    g.set_graph(label);
    g
}
