//! Counts how often one kind of play is directly followed by another.

use super::clock::is_within_window;
use super::events::EventKind;
use crate::error::AppError;
use crate::report::Table;
use crate::stats_api::models::PlayByPlayRow;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Players without a name (team rebounds and the like) are counted here.
pub const UNKNOWN_PLAYER: &str = "UNKNOWN";

/// An initiating play and the plays that may follow it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayFlow {
    pub init: EventKind,
    pub follow: BTreeSet<EventKind>,
}

impl PlayFlow {
    pub fn new(init: EventKind, follow: impl IntoIterator<Item = EventKind>) -> Self {
        PlayFlow {
            init,
            follow: follow.into_iter().collect(),
        }
    }

    /// A rebound followed by a make, a miss or a turnover.
    pub fn offensive_rebound() -> Self {
        PlayFlow::new(
            EventKind::Rebound,
            [
                EventKind::FieldGoalMade,
                EventKind::FieldGoalMissed,
                EventKind::Turnover,
            ],
        )
    }

    /// Every event kind the flow reports on, initiating kind first.
    pub fn columns(&self) -> Vec<EventKind> {
        std::iter::once(self.init)
            .chain(self.follow.iter().copied().filter(|k| *k != self.init))
            .collect()
    }
}

/// Per-player counts for one flow.
#[derive(Debug)]
pub struct PlayFlowTally {
    flow: PlayFlow,
    max_delta_seconds: i64,
    counts: BTreeMap<String, BTreeMap<EventKind, u32>>,
}

impl PlayFlowTally {
    pub fn new(flow: PlayFlow, max_delta_seconds: i64) -> Self {
        PlayFlowTally {
            flow,
            max_delta_seconds,
            counts: BTreeMap::new(),
        }
    }

    /// Scans one game's consecutive play pairs.
    pub fn add_game(&mut self, plays: &[PlayByPlayRow]) -> Result<(), AppError> {
        let mut matched = 0;
        for pair in plays.windows(2) {
            let (play, next) = (&pair[0], &pair[1]);
            if play.kind() != self.flow.init || !self.flow.follow.contains(&next.kind()) {
                continue;
            }
            if !is_within_window(&play.clock()?, &next.clock()?, self.max_delta_seconds) {
                continue;
            }

            let player = play
                .player1_name
                .clone()
                .unwrap_or_else(|| UNKNOWN_PLAYER.to_string());
            let counts = self.counts.entry(player).or_default();
            *counts.entry(play.kind()).or_default() += 1;
            *counts.entry(next.kind()).or_default() += 1;
            matched += 1;
        }
        debug!("Matched {matched} {} flows", self.flow.init);
        Ok(())
    }

    pub fn count(&self, player: &str, kind: EventKind) -> u32 {
        self.counts
            .get(player)
            .and_then(|c| c.get(&kind))
            .copied()
            .unwrap_or(0)
    }

    /// Pivot with one row per player and one column per event kind.
    pub fn to_table(&self) -> Table {
        let columns = self.flow.columns();
        let headers = std::iter::once("PLAYER".to_string())
            .chain(columns.iter().map(EventKind::label))
            .collect();
        let rows = self
            .counts
            .iter()
            .map(|(player, counts)| {
                std::iter::once(player.clone())
                    .chain(
                        columns
                            .iter()
                            .map(|k| counts.get(k).copied().unwrap_or(0).to_string()),
                    )
                    .collect()
            })
            .collect();
        Table { headers, rows }
    }
}
