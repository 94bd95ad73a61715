//! Read-only diagnostic snapshots (spec §4.11's ambient observability slot).
//!
//! Grounded on the teacher's `Metrics` registry in shape (a plain data
//! struct callers pull a snapshot from) but scoped down: this engine has no
//! network surface of its own to scrape, so there is no `/metrics` HTTP
//! endpoint here, only the numbers a caller's own exporter would want.
//! Feature-gated behind `metrics` (on by default) so a caller that doesn't
//! want the bookkeeping can build without it.

use tracing::debug;

use crate::cross::CrossIndex;
use crate::grid::GridIndex;

/// Point-in-time stats for a [`GridIndex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridStats {
    pub total_players: usize,
    pub non_empty_cells: usize,
}

impl GridStats {
    pub fn snapshot(index: &GridIndex) -> Self {
        let stats = Self { total_players: index.player_count(), non_empty_cells: index.non_empty_cell_count() };
        debug!(total_players = stats.total_players, non_empty_cells = stats.non_empty_cells, "grid snapshot");
        stats
    }
}

/// Point-in-time stats for a [`CrossIndex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrossStats {
    pub total_players: usize,
    pub beacon_count: usize,
    pub total_candidates: usize,
}

impl CrossStats {
    pub fn snapshot(index: &CrossIndex) -> Self {
        let stats = Self {
            total_players: index.player_count(),
            beacon_count: index.beacon_count(),
            total_candidates: index.total_candidates(),
        };
        debug!(
            total_players = stats.total_players,
            beacon_count = stats.beacon_count,
            total_candidates = stats.total_candidates,
            "cross snapshot"
        );
        stats
    }
}
