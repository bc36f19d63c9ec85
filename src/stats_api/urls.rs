//! URL building utilities for the stats endpoints

use crate::constants::LEAGUE_ID;

/// Builds the season game finder URL (`LeagueGameFinderResults`).
///
/// # Example
/// ```
/// use value_stocks::stats_api::build_league_game_finder_url;
///
/// let url = build_league_game_finder_url("https://stats.example.com", "2022-23", "Playoffs");
/// assert_eq!(
///     url,
///     "https://stats.example.com/leaguegamefinder?LeagueID=00&PlayerOrTeam=T&SeasonNullable=2022-23&SeasonTypeNullable=Playoffs"
/// );
/// ```
pub fn build_league_game_finder_url(api_domain: &str, season: &str, season_type: &str) -> String {
    format!(
        "{api_domain}/leaguegamefinder?LeagueID={LEAGUE_ID}&PlayerOrTeam=T&SeasonNullable={season}&SeasonTypeNullable={}",
        encode_query_value(season_type)
    )
}

/// Builds the season game log URL (`LeagueGameLog`).
///
/// # Example
/// ```
/// use value_stocks::stats_api::build_league_game_log_url;
///
/// let url = build_league_game_log_url("https://stats.example.com", "2022-23", "Regular Season");
/// assert_eq!(
///     url,
///     "https://stats.example.com/leaguegamelog?Counter=0&Direction=ASC&LeagueID=00&PlayerOrTeam=T&Season=2022-23&SeasonType=Regular+Season&Sorter=DATE"
/// );
/// ```
pub fn build_league_game_log_url(api_domain: &str, season: &str, season_type: &str) -> String {
    format!(
        "{api_domain}/leaguegamelog?Counter=0&Direction=ASC&LeagueID={LEAGUE_ID}&PlayerOrTeam=T&Season={season}&SeasonType={}&Sorter=DATE",
        encode_query_value(season_type)
    )
}

/// Builds the play-by-play URL for one game, covering every period.
///
/// # Example
/// ```
/// use value_stocks::stats_api::build_play_by_play_url;
///
/// let url = build_play_by_play_url("https://stats.example.com", "0042200401");
/// assert_eq!(
///     url,
///     "https://stats.example.com/playbyplayv2?EndPeriod=0&GameID=0042200401&StartPeriod=0"
/// );
/// ```
pub fn build_play_by_play_url(api_domain: &str, game_id: &str) -> String {
    format!("{api_domain}/playbyplayv2?EndPeriod=0&GameID={game_id}&StartPeriod=0")
}

/// Builds the traditional box score URL for one game.
///
/// # Example
/// ```
/// use value_stocks::stats_api::build_box_score_url;
///
/// let url = build_box_score_url("https://stats.example.com", "0042200401");
/// assert_eq!(
///     url,
///     "https://stats.example.com/boxscoretraditionalv2?EndPeriod=0&EndRange=0&GameID=0042200401&RangeType=0&StartPeriod=0&StartRange=0"
/// );
/// ```
pub fn build_box_score_url(api_domain: &str, game_id: &str) -> String {
    format!(
        "{api_domain}/boxscoretraditionalv2?EndPeriod=0&EndRange=0&GameID={game_id}&RangeType=0&StartPeriod=0&StartRange=0"
    )
}

// Season types contain spaces ("Regular Season", "Pre Season")
fn encode_query_value(value: &str) -> String {
    value.trim().replace(' ', "+")
}
