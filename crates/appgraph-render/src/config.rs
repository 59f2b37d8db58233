use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use strata::{GraphLabel, RankDir};

/// Sizing and spacing for one layout call.
///
/// Sizes follow the flow, not the screen: `node_height` is measured along the rank axis and
/// `node_width` across it, whatever the `direction`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub direction: RankDir,
    pub node_width: f64,
    pub node_height: f64,
    /// Gap between neighbouring nodes of one rank.
    pub lane_sep: f64,
    /// Gap between consecutive ranks.
    pub rank_sep: f64,
    /// Gap next to the bend points of long edges.
    pub edge_sep: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            direction: RankDir::LR,
            node_width: 180.0,
            node_height: 80.0,
            lane_sep: 120.0,
            rank_sep: 100.0,
            edge_sep: 20.0,
        }
    }
}

impl LayoutConfig {
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("node_width", self.node_width),
            ("node_height", self.node_height),
            ("lane_sep", self.lane_sep),
            ("rank_sep", self.rank_sep),
            ("edge_sep", self.edge_sep),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidConfig {
                    message: format!("{name} must be a finite non-negative number, got {value}"),
                });
            }
        }
        Ok(())
    }

    pub(crate) fn graph_label(&self) -> GraphLabel {
        GraphLabel {
            rankdir: self.direction,
            nodesep: self.lane_sep,
            ranksep: self.rank_sep,
            edgesep: self.edge_sep,
            ..Default::default()
        }
    }

    /// Node extent along the logical `x` and `y` axes of the configured direction.
    pub fn node_extent(&self) -> (f64, f64) {
        if self.direction.is_horizontal() {
            (self.node_height, self.node_width)
        } else {
            (self.node_width, self.node_height)
        }
    }
}
