use crate::config::Config;
use crate::constants::result_sets;
use crate::error::AppError;
use reqwest::Client;
use std::collections::HashSet;
use tracing::{info, instrument, warn};

use super::fetch_utils::fetch;
use super::models::{GameDetails, GameListingRow, PlayByPlayRow, PlayerStatsRow, StatsResponse};
use super::urls::{
    build_box_score_url, build_league_game_finder_url, build_league_game_log_url,
    build_play_by_play_url,
};

/// Fetches one result set from `url` and decodes its rows.
async fn fetch_result_set<T: serde::de::DeserializeOwned>(
    client: &Client,
    url: &str,
    name: &str,
) -> Result<Vec<T>, AppError> {
    let response = fetch::<StatsResponse>(client, url).await?;
    response.result_set(name, url)?.rows()
}

/// Collapses team-game rows into one entry per game, keeping first-seen order.
fn unique_games(rows: &[GameListingRow]) -> Vec<GameDetails> {
    let mut seen = HashSet::new();
    rows.iter()
        .filter(|row| seen.insert(row.game_id.as_str()))
        .map(GameDetails::from)
        .collect()
}

/// Lists the games of a season through the game finder endpoint.
///
/// The finder returns one row per team; the result holds each game once with
/// the matchup of its first row.
#[instrument(skip(client, config))]
pub async fn fetch_season_games(
    client: &Client,
    config: &Config,
    season: &str,
    season_type: &str,
) -> Result<Vec<GameDetails>, AppError> {
    info!("Fetching all games for season {season} and type {season_type}");
    let url = build_league_game_finder_url(&config.api_domain, season, season_type);
    let rows: Vec<GameListingRow> =
        fetch_result_set(client, &url, result_sets::LEAGUE_GAME_FINDER).await?;

    let games = unique_games(&rows);
    if games.is_empty() {
        warn!("Game finder returned no games for {season} {season_type}");
        return Err(AppError::api_season_not_found(season, season_type));
    }

    info!("Found {} games from {} team rows", games.len(), rows.len());
    Ok(games)
}

/// Lists the unique game ids of a season through the game log endpoint.
#[instrument(skip(client, config))]
pub async fn fetch_season_game_ids(
    client: &Client,
    config: &Config,
    season: &str,
    season_type: &str,
) -> Result<Vec<String>, AppError> {
    info!("Fetching game log for season {season} and type {season_type}");
    let url = build_league_game_log_url(&config.api_domain, season, season_type);
    let rows: Vec<GameListingRow> =
        fetch_result_set(client, &url, result_sets::LEAGUE_GAME_LOG).await?;

    let game_ids: Vec<String> = unique_games(&rows)
        .into_iter()
        .map(|game| game.game_id)
        .collect();
    if game_ids.is_empty() {
        warn!("Game log returned no games for {season} {season_type}");
        return Err(AppError::api_season_not_found(season, season_type));
    }

    info!("Found {} unique games", game_ids.len());
    Ok(game_ids)
}

/// A 404 or an empty body for a per-game endpoint means the game id is unknown.
fn game_not_found_or(error: AppError, game_id: &str) -> AppError {
    if error.is_not_found() {
        AppError::api_game_not_found(game_id)
    } else {
        error
    }
}

/// Fetches every play of one game, in logged order.
#[instrument(skip(client, config))]
pub async fn fetch_play_by_play(
    client: &Client,
    config: &Config,
    game_id: &str,
) -> Result<Vec<PlayByPlayRow>, AppError> {
    let url = build_play_by_play_url(&config.api_domain, game_id);
    let plays: Vec<PlayByPlayRow> = fetch_result_set(client, &url, result_sets::PLAY_BY_PLAY)
        .await
        .map_err(|e| game_not_found_or(e, game_id))?;

    if plays.is_empty() {
        return Err(AppError::api_game_not_found(game_id));
    }

    info!("Fetched {} plays for game {game_id}", plays.len());
    Ok(plays)
}

/// Fetches the traditional box score player lines of one game.
#[instrument(skip(client, config))]
pub async fn fetch_box_score(
    client: &Client,
    config: &Config,
    game_id: &str,
) -> Result<Vec<PlayerStatsRow>, AppError> {
    let url = build_box_score_url(&config.api_domain, game_id);
    let players: Vec<PlayerStatsRow> = fetch_result_set(client, &url, result_sets::PLAYER_STATS)
        .await
        .map_err(|e| game_not_found_or(e, game_id))?;

    info!("Fetched {} box score lines for game {game_id}", players.len());
    Ok(players)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats_api::http_client::create_test_http_client;
    use crate::stats_api::models::ResultSet;
    use crate::testing_utils::PlayBuilder;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path, query_param},
    };

    fn create_mock_config(api_domain: String) -> Config {
        Config {
            api_domain,
            ..Config::default()
        }
    }

    fn listing_row(game_id: &str, matchup: &str, team: &str) -> GameListingRow {
        GameListingRow {
            game_id: game_id.to_string(),
            matchup: Some(matchup.to_string()),
            team_abbreviation: Some(team.to_string()),
            game_date: Some("2023-06-01".to_string()),
        }
    }

    fn response_with<T: serde::Serialize>(name: &str, rows: &[T]) -> StatsResponse {
        StatsResponse {
            result_sets: vec![ResultSet::from_rows(name, rows).unwrap()],
        }
    }

    #[test]
    fn test_unique_games_keeps_first_seen_order() {
        let rows = vec![
            listing_row("0042200405", "DEN vs. MIA", "DEN"),
            listing_row("0042200405", "MIA @ DEN", "MIA"),
            listing_row("0042200404", "MIA vs. DEN", "MIA"),
            listing_row("0042200404", "DEN @ MIA", "DEN"),
        ];
        let games = unique_games(&rows);

        assert_eq!(games.len(), 2);
        assert_eq!(games[0].game_id, "0042200405");
        assert_eq!(games[0].matchup, "DEN vs. MIA");
        assert_eq!(games[1].game_id, "0042200404");
    }

    #[tokio::test]
    async fn test_fetch_season_games_success() {
        let mock_server = MockServer::start().await;
        let response = response_with(
            result_sets::LEAGUE_GAME_FINDER,
            &[
                listing_row("0042200405", "DEN vs. MIA", "DEN"),
                listing_row("0042200405", "MIA @ DEN", "MIA"),
            ],
        );

        Mock::given(method("GET"))
            .and(path("/leaguegamefinder"))
            .and(query_param("SeasonNullable", "2022-23"))
            .and(query_param("SeasonTypeNullable", "Playoffs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&response))
            .mount(&mock_server)
            .await;

        let config = create_mock_config(mock_server.uri());
        let client = create_test_http_client();
        let games = fetch_season_games(&client, &config, "2022-23", "Playoffs")
            .await
            .unwrap();

        assert_eq!(
            games,
            vec![GameDetails {
                game_id: "0042200405".to_string(),
                matchup: "DEN vs. MIA".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_fetch_season_games_empty_season() {
        let mock_server = MockServer::start().await;
        let response =
            response_with::<GameListingRow>(result_sets::LEAGUE_GAME_FINDER, &[]);

        Mock::given(method("GET"))
            .and(path("/leaguegamefinder"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&response))
            .mount(&mock_server)
            .await;

        let config = create_mock_config(mock_server.uri());
        let client = create_test_http_client();
        let result = fetch_season_games(&client, &config, "1890-91", "Playoffs").await;

        assert!(matches!(result, Err(AppError::ApiSeasonNotFound { .. })));
    }

    #[tokio::test]
    async fn test_fetch_season_game_ids_dedups() {
        let mock_server = MockServer::start().await;
        let response = response_with(
            result_sets::LEAGUE_GAME_LOG,
            &[
                listing_row("0042200401", "DEN vs. MIA", "DEN"),
                listing_row("0042200401", "MIA @ DEN", "MIA"),
                listing_row("0042200402", "DEN vs. MIA", "DEN"),
                listing_row("0042200402", "MIA @ DEN", "MIA"),
            ],
        );

        Mock::given(method("GET"))
            .and(path("/leaguegamelog"))
            .and(query_param("Season", "2022-23"))
            .and(query_param("SeasonType", "Playoffs"))
            .and(query_param("LeagueID", "00"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&response))
            .mount(&mock_server)
            .await;

        let config = create_mock_config(mock_server.uri());
        let client = create_test_http_client();
        let ids = fetch_season_game_ids(&client, &config, "2022-23", "Playoffs")
            .await
            .unwrap();

        assert_eq!(ids, vec!["0042200401", "0042200402"]);
    }

    #[tokio::test]
    async fn test_fetch_play_by_play_success() {
        let mock_server = MockServer::start().await;
        let plays = vec![
            PlayBuilder::new(12, "12:00").build(),
            PlayBuilder::new(1, "11:40")
                .home("Jokic 2' Driving Layup (2 PTS)")
                .score("0 - 2")
                .build(),
        ];
        let response = response_with(result_sets::PLAY_BY_PLAY, &plays);

        Mock::given(method("GET"))
            .and(path("/playbyplayv2"))
            .and(query_param("GameID", "0042200401"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&response))
            .mount(&mock_server)
            .await;

        let config = create_mock_config(mock_server.uri());
        let client = create_test_http_client();
        let fetched = fetch_play_by_play(&client, &config, "0042200401")
            .await
            .unwrap();

        assert_eq!(fetched, plays);
    }

    #[tokio::test]
    async fn test_fetch_play_by_play_not_found() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/playbyplayv2"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let config = create_mock_config(mock_server.uri());
        let client = create_test_http_client();
        let result = fetch_play_by_play(&client, &config, "0049999999").await;

        match result {
            Err(AppError::ApiGameNotFound { game_id }) => assert_eq!(game_id, "0049999999"),
            other => panic!("expected game not found, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_box_score_success() {
        let mock_server = MockServer::start().await;
        let lines = vec![PlayerStatsRow {
            game_id: "0042200401".to_string(),
            team_abbreviation: "DEN".to_string(),
            player_id: 203999,
            player_name: "Nikola Jokic".to_string(),
            minutes: Some("40:12".to_string()),
            steals: Some(2.0),
            blocks: Some(1.0),
            points: Some(27.0),
        }];
        let response = response_with(result_sets::PLAYER_STATS, &lines);

        Mock::given(method("GET"))
            .and(path("/boxscoretraditionalv2"))
            .and(query_param("GameID", "0042200401"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&response))
            .mount(&mock_server)
            .await;

        let config = create_mock_config(mock_server.uri());
        let client = create_test_http_client();
        let fetched = fetch_box_score(&client, &config, "0042200401")
            .await
            .unwrap();

        assert_eq!(fetched, lines);
    }

    #[tokio::test]
    async fn test_fetch_box_score_empty_body_is_game_not_found() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/boxscoretraditionalv2"))
            .respond_with(ResponseTemplate::new(200).set_body_string(""))
            .mount(&mock_server)
            .await;

        let config = create_mock_config(mock_server.uri());
        let client = create_test_http_client();
        let result = fetch_box_score(&client, &config, "0042200499").await;

        match result {
            Err(AppError::ApiGameNotFound { game_id }) => assert_eq!(game_id, "0042200499"),
            other => panic!("expected game not found, got {other:?}"),
        }
    }
}
