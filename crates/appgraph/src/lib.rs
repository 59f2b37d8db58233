#![forbid(unsafe_code)]

//! Fetch → build → lay out → project, as one call or through a [`GraphLoader`] that keeps only
//! the most recently requested result.

mod loader;

pub use appgraph_core::{
    AppGraph, GraphsResponse, IngestClient, IngestConfig, RawGraph, build_graph, parse_response,
};
pub use appgraph_render::{
    LayoutConfig, LayoutResult, RankDir, RenderGraph, VisualEdge, VisualNode, layout_graph,
    project,
};
pub use loader::{CommitOutcome, GraphLoader, LoadState, LoadTicket};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Ingest(#[from] appgraph_core::Error),
    #[error(transparent)]
    Layout(#[from] appgraph_render::Error),
}

impl Error {
    pub fn is_empty_result(&self) -> bool {
        matches!(self, Self::Ingest(e) if e.is_empty_result())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// One full pipeline run against the configured endpoint.
pub async fn load_graph(client: &IngestClient, config: &LayoutConfig) -> Result<RenderGraph> {
    let graph = client.fetch_graph().await?;
    render_graph(&graph, config)
}

/// Lays out an already-built graph and projects it for display.
pub fn render_graph(graph: &AppGraph, config: &LayoutConfig) -> Result<RenderGraph> {
    let layout = layout_graph(graph, config)?;
    tracing::debug!(
        nodes = layout.nodes.len(),
        ranks = layout.rank_count(),
        crossings = layout.crossings,
        "laid out graph"
    );
    Ok(project(&layout))
}

/// Offline variant of [`load_graph`] for a `/graphs` document held in memory. `source` names
/// where it came from in an empty-result error.
pub fn render_document(body: &str, source: &str, config: &LayoutConfig) -> Result<RenderGraph> {
    let raw = parse_response(body)?.into_first(source)?;
    render_graph(&build_graph(raw)?, config)
}
