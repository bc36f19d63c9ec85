//! Value stocks: steals and blocks that turn into points.
//!
//! This library fetches NBA play-by-play and box score data from the public
//! stats endpoints, finds the stocks (steals and blocks) that were converted
//! into a basket within a few seconds of game clock, and writes per-player
//! spreadsheets.
//!
//! # Examples
//!
//! ```rust,no_run
//! use value_stocks::config::Config;
//! use value_stocks::error::AppError;
//! use value_stocks::pipeline::{GameSelection, run_value_stocks};
//! use value_stocks::stats_api::create_http_client_with_timeout;
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let config = Config::load().await?;
//!     let client = create_http_client_with_timeout(config.http_timeout_seconds)?;
//!
//!     let selection = GameSelection::season("2022-23", "Playoffs");
//!     let output = run_value_stocks(&client, &config, &selection, 7).await?;
//!     output.write_to(Path::new("."))?;
//!
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod config;
pub mod constants;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod stats_api;
pub mod testing_utils;

// Re-export commonly used types for convenience
pub use analysis::{
    GameClock, MergedPlayerStats, PlayFlow, PlayerSeasonStats, ValueStockTotals,
    find_value_stocks,
};
pub use config::Config;
pub use error::AppError;
pub use pipeline::{GameSelection, ValueStocksOutput};
pub use stats_api::models::{PlayByPlayRow, PlayerStatsRow};

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
