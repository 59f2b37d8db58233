//! Wire schema of `GET {base}/graphs`.
//!
//! ```json
//! { "graphs": [ { "node_type": "app",
//!                 "nodes": [ { "app_id": "a", "label": "A" } ],
//!                 "edges": [ [0, 1] ] } ] }
//! ```
//!
//! Only `graphs[0]` is consumed. Unknown fields are ignored; missing required fields and values
//! of the wrong type are rejected here, before any model is built.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphsResponse {
    /// Absent and `null` both mean "no graphs".
    #[serde(default)]
    pub graphs: Option<Vec<RawGraph>>,
}

impl GraphsResponse {
    pub fn len(&self) -> usize {
        self.graphs.as_ref().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The first graph, or [`Error::EmptyResult`] naming `url`.
    pub fn into_first(self, url: &str) -> Result<RawGraph> {
        self.graphs
            .and_then(|graphs| graphs.into_iter().next())
            .ok_or_else(|| Error::EmptyResult {
                url: url.to_string(),
            })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawGraph {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_type: Option<String>,
    pub nodes: Vec<RawNode>,
    pub edges: Vec<RawEdge>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawNode {
    pub app_id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

impl RawNode {
    pub fn new(app_id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            label: label.into(),
            name: None,
            description: None,
            parent_id: None,
        }
    }
}

/// `[fromIndex, toIndex]`: positions in the enclosing graph's `nodes` list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEdge(pub usize, pub usize);

/// Parses a `/graphs` response body. Shape violations become [`Error::MalformedData`] carrying
/// the parser's line/column.
pub fn parse_response(body: &str) -> Result<GraphsResponse> {
    serde_json::from_str(body)
        .map_err(|e| Error::malformed(format!("invalid graphs response: {e}")))
}
