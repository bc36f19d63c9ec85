pub mod box_score;
pub mod games;
pub mod play_by_play;
pub mod result_set;

pub use box_score::PlayerStatsRow;
pub use games::{GameDetails, GameListingRow};
pub use play_by_play::PlayByPlayRow;
pub use result_set::{ResultSet, StatsResponse};
