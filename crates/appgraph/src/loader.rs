//! Last-writer-wins loading.
//!
//! Every load takes a ticket carrying a fresh generation. A finished load is committed only
//! if no newer ticket was issued in the meantime; otherwise its result is dropped.

use crate::{RenderGraph, Result, load_graph};
use appgraph_core::IngestClient;
use appgraph_render::LayoutConfig;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone, Default, PartialEq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading {
        generation: u64,
    },
    Ready {
        generation: u64,
        graph: Arc<RenderGraph>,
    },
    Failed {
        generation: u64,
        message: String,
    },
}

impl LoadState {
    pub fn generation(&self) -> Option<u64> {
        match self {
            Self::Idle => None,
            Self::Loading { generation }
            | Self::Ready { generation, .. }
            | Self::Failed { generation, .. } => Some(*generation),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

impl LoadTicket {
    pub fn generation(self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    Committed,
    /// A newer load started after this one; the result was discarded.
    Stale,
}

#[derive(Debug, Default)]
pub struct GraphLoader {
    generation: AtomicU64,
    state: Mutex<LoadState>,
}

impl GraphLoader {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, LoadState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn state(&self) -> LoadState {
        self.lock().clone()
    }

    pub fn latest_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.generation == self.latest_generation()
    }

    /// Starts a load; any ticket issued before this one becomes stale.
    pub fn begin(&self) -> LoadTicket {
        let mut state = self.lock();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        *state = LoadState::Loading { generation };
        LoadTicket { generation }
    }

    pub fn commit(&self, ticket: LoadTicket, result: Result<RenderGraph>) -> CommitOutcome {
        let mut state = self.lock();
        let latest = self.latest_generation();
        if ticket.generation != latest {
            tracing::debug!(
                generation = ticket.generation,
                latest,
                "discarding stale graph load"
            );
            return CommitOutcome::Stale;
        }

        let generation = ticket.generation;
        *state = match result {
            Ok(graph) => LoadState::Ready {
                generation,
                graph: Arc::new(graph),
            },
            Err(e) => {
                tracing::warn!(generation, error = %e, "graph load failed");
                LoadState::Failed {
                    generation,
                    message: e.to_string(),
                }
            }
        };
        CommitOutcome::Committed
    }

    /// `begin` → fetch → layout → `commit`.
    pub async fn load(&self, client: &IngestClient, config: &LayoutConfig) -> CommitOutcome {
        let ticket = self.begin();
        let result = load_graph(client, config).await;
        self.commit(ticket, result)
    }
}
