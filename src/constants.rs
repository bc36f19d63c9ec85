//! Application-wide constants and configuration values
//!
//! This module centralizes magic numbers, endpoint names and default settings.

/// Default stats API base URL
pub const DEFAULT_API_DOMAIN: &str = "https://stats.nba.com/stats";

/// Default timeout for HTTP requests in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 30;

/// Maximum number of connections per host in the HTTP client pool
pub const HTTP_POOL_MAX_IDLE_PER_HOST: usize = 10;

/// Seconds of game clock allowed between a play and its follow-up
pub const DEFAULT_MAX_TIME_DELTA_SECONDS: i64 = 7;

/// Largest accepted window: one full regulation game
pub const MAX_TIME_DELTA_SECONDS: i64 = 48 * 60;

/// League identifier of the NBA on the stats endpoints
pub const LEAGUE_ID: &str = "00";

/// Default season and season type when none is given on the command line
pub const DEFAULT_SEASON: &str = "2022-23";
pub const DEFAULT_SEASON_TYPE: &str = "Playoffs";

/// Result set names returned by the stats endpoints
pub mod result_sets {
    pub const LEAGUE_GAME_FINDER: &str = "LeagueGameFinderResults";
    pub const LEAGUE_GAME_LOG: &str = "LeagueGameLog";
    pub const PLAY_BY_PLAY: &str = "PlayByPlay";
    pub const PLAYER_STATS: &str = "PlayerStats";
}

/// Request headers the stats host expects from a browser
pub mod headers {
    pub const USER_AGENT: &str =
        "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";
    pub const REFERER: &str = "https://www.nba.com/";
    pub const ORIGIN: &str = "https://www.nba.com";
    pub const ACCEPT: &str = "application/json, text/plain, */*";
}

/// Output file names, one per spreadsheet
pub mod output_files {
    pub const VALUE_STOCKS: &str = "stocks.csv";
    pub const PLAYER_STATS: &str = "player_stats.csv";
    pub const MERGED: &str = "stocks_merged.csv";
    pub const PLAY_FLOW: &str = "play_flow.csv";
    pub const ANNOTATED: &str = "play_by_play_annotated.csv";
    pub const QUICK_STOCKS: &str = "quick_stocks.csv";
}

/// Environment variable names
pub mod env_vars {
    /// Environment variable for API domain override
    pub const API_DOMAIN: &str = "VALUE_STOCKS_API_DOMAIN";

    /// Environment variable for log file path override
    pub const LOG_FILE: &str = "VALUE_STOCKS_LOG_FILE";

    /// Environment variable for HTTP timeout override in seconds
    pub const HTTP_TIMEOUT: &str = "VALUE_STOCKS_HTTP_TIMEOUT";
}

/// Retry configuration
pub mod retry {
    /// Maximum number of retry attempts for API calls
    pub const MAX_ATTEMPTS: u32 = 3;

    /// Base delay for exponential backoff (milliseconds)
    pub const BASE_DELAY_MS: u64 = 250;
}

/// Name of the log file written by the binary
pub const LOG_FILE_NAME: &str = "value_stocks.log";
