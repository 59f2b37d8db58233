//! Single-shot retrieval of the graphs document.
//!
//! One request per call, no retries. The body is read as text and parsed through the typed
//! schema, so a 200 with the wrong shape fails here rather than downstream.

use crate::builder::build_graph;
use crate::config::IngestConfig;
use crate::error::{Error, Result};
use crate::model::AppGraph;
use crate::payload::{GraphsResponse, RawGraph, parse_response};
use reqwest::Client;

#[derive(Debug, Clone)]
pub struct IngestClient {
    client: Client,
    config: IngestConfig,
}

impl IngestClient {
    pub fn new(config: IngestConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::InvalidConfig {
                message: format!("failed to create HTTP client: {e}"),
            })?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &IngestConfig {
        &self.config
    }

    /// The whole `/graphs` document.
    pub async fn fetch_payload(&self) -> Result<GraphsResponse> {
        let url = self.config.graphs_url();
        tracing::info!(%url, "fetching graphs");

        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|source| {
                tracing::warn!(%url, error = %source, "graph request failed");
                Error::Transport {
                    url: url.clone(),
                    source,
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%url, status = status.as_u16(), "graph request rejected");
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await.map_err(|source| Error::Transport {
            url: url.clone(),
            source,
        })?;
        let payload = parse_response(&body)?;
        tracing::debug!(%url, graphs = payload.len(), "received graphs");
        Ok(payload)
    }

    /// `graphs[0]`, or [`Error::EmptyResult`] when the list is missing or empty.
    pub async fn fetch_first(&self) -> Result<RawGraph> {
        let payload = self.fetch_payload().await?;
        payload.into_first(&self.config.graphs_url())
    }

    /// `graphs[0]` built into the typed model.
    pub async fn fetch_graph(&self) -> Result<AppGraph> {
        build_graph(self.fetch_first().await?)
    }
}
