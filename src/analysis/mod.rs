//! Play-by-play and box score analysis.
//!
//! Everything here is pure: functions take fetched rows and return report rows,
//! leaving network access to [`crate::stats_api`] and file output to [`crate::report`].

pub mod annotate;
pub mod clock;
pub mod events;
pub mod play_flow;
pub mod player_stats;
pub mod quick_stocks;
pub mod value_stocks;

pub use annotate::{AnnotatedPlay, PlayLabel, TeamSide, annotate_plays};
pub use clock::{GameClock, elapsed_between, is_within_window};
pub use events::{EventKind, Side, StockCredit, describes_stock};
pub use play_flow::{PlayFlow, PlayFlowTally};
pub use player_stats::{MergedPlayerStats, PlayerSeasonStats, PlayerStatsTally, merge_player_stats};
pub use quick_stocks::{QuickStock, QuickStockSummary, find_quick_stocks};
pub use value_stocks::{
    ValueStockEvent, ValueStockTally, ValueStockTotals, aggregate_value_stocks, find_value_stocks,
};
