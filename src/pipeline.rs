//! Report runs: resolve the games, fetch each one in turn, analyse, and
//! hand the rows back for writing.
//!
//! Games are processed sequentially. The first failing game aborts the run
//! and nothing is written.

use crate::analysis::{
    AnnotatedPlay, MergedPlayerStats, PlayFlow, PlayFlowTally, PlayerSeasonStats,
    PlayerStatsTally, QuickStockSummary, ValueStockTally, ValueStockTotals, annotate_plays,
    find_quick_stocks, find_value_stocks, merge_player_stats,
};
use crate::config::Config;
use crate::constants::output_files;
use crate::error::AppError;
use crate::report::{write_report, write_table};
use crate::stats_api::models::GameDetails;
use crate::stats_api::{
    fetch_box_score, fetch_play_by_play, fetch_season_game_ids, fetch_season_games,
};
use reqwest::Client;
use std::path::{Path, PathBuf};
use tracing::info;

/// Which games a report covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSelection {
    pub season: String,
    pub season_type: String,
    /// Explicit game ids; when empty the season listing is fetched instead.
    pub game_ids: Vec<String>,
}

impl GameSelection {
    pub fn season(season: impl Into<String>, season_type: impl Into<String>) -> Self {
        GameSelection {
            season: season.into(),
            season_type: season_type.into(),
            game_ids: Vec::new(),
        }
    }

    pub fn with_game_ids(mut self, game_ids: Vec<String>) -> Self {
        self.game_ids = game_ids;
        self
    }

    /// Game ids from the game log endpoint unless given explicitly.
    async fn resolve_game_ids(
        &self,
        client: &Client,
        config: &Config,
    ) -> Result<Vec<String>, AppError> {
        if !self.game_ids.is_empty() {
            return Ok(self.game_ids.clone());
        }
        fetch_season_game_ids(client, config, &self.season, &self.season_type).await
    }

    /// Games with matchups from the game finder endpoint unless given explicitly.
    async fn resolve_games(
        &self,
        client: &Client,
        config: &Config,
    ) -> Result<Vec<GameDetails>, AppError> {
        if !self.game_ids.is_empty() {
            return Ok(self
                .game_ids
                .iter()
                .map(|id| GameDetails {
                    game_id: id.clone(),
                    matchup: String::new(),
                })
                .collect());
        }
        fetch_season_games(client, config, &self.season, &self.season_type).await
    }
}

/// The three spreadsheets of the value stock report.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueStocksOutput {
    pub stocks: Vec<ValueStockTotals>,
    pub player_stats: Vec<PlayerSeasonStats>,
    pub merged: Vec<MergedPlayerStats>,
}

impl ValueStocksOutput {
    pub fn write_to(&self, output_dir: &Path) -> Result<Vec<PathBuf>, AppError> {
        let stocks = output_dir.join(output_files::VALUE_STOCKS);
        let player_stats = output_dir.join(output_files::PLAYER_STATS);
        let merged = output_dir.join(output_files::MERGED);

        write_report(&stocks, &self.stocks)?;
        write_report(&player_stats, &self.player_stats)?;
        write_report(&merged, &self.merged)?;

        Ok(vec![stocks, player_stats, merged])
    }
}

/// Value stocks per player, box score stock totals, and the two merged.
pub async fn run_value_stocks(
    client: &Client,
    config: &Config,
    selection: &GameSelection,
    max_delta_seconds: i64,
) -> Result<ValueStocksOutput, AppError> {
    let game_ids = selection.resolve_game_ids(client, config).await?;
    let mut value_stocks = ValueStockTally::new();
    let mut player_stats = PlayerStatsTally::new(&selection.season, &selection.season_type);

    for (index, game_id) in game_ids.iter().enumerate() {
        info!("Processing game {}/{}: {game_id}", index + 1, game_ids.len());

        let plays = fetch_play_by_play(client, config, game_id).await?;
        let events = find_value_stocks(&plays, max_delta_seconds)?;
        info!("Game {game_id}: {} value stocks", events.len());
        value_stocks.add_game(&events);

        let lines = fetch_box_score(client, config, game_id).await?;
        player_stats.add_game(&lines);
    }

    let stocks = value_stocks.totals();
    let player_stats = player_stats.totals();
    let merged = merge_player_stats(&player_stats, &stocks);
    Ok(ValueStocksOutput {
        stocks,
        player_stats,
        merged,
    })
}

/// Per-player counts of `flow` across the selected games.
pub async fn run_play_flow(
    client: &Client,
    config: &Config,
    selection: &GameSelection,
    flow: PlayFlow,
    max_delta_seconds: i64,
) -> Result<PlayFlowTally, AppError> {
    let games = selection.resolve_games(client, config).await?;
    let mut tally = PlayFlowTally::new(flow, max_delta_seconds);

    for (index, game) in games.iter().enumerate() {
        info!(
            "Processing game {}/{}: {} {}",
            index + 1,
            games.len(),
            game.game_id,
            game.matchup
        );
        let plays = fetch_play_by_play(client, config, &game.game_id).await?;
        tally.add_game(&plays)?;
    }

    Ok(tally)
}

pub fn write_play_flow(tally: &PlayFlowTally, output_dir: &Path) -> Result<PathBuf, AppError> {
    let path = output_dir.join(output_files::PLAY_FLOW);
    write_table(&path, &tally.to_table())?;
    Ok(path)
}

/// Every play of the selected games, annotated, in game order.
pub async fn run_annotate(
    client: &Client,
    config: &Config,
    selection: &GameSelection,
) -> Result<Vec<AnnotatedPlay>, AppError> {
    let game_ids = selection.resolve_game_ids(client, config).await?;
    let mut annotated = Vec::new();

    for (index, game_id) in game_ids.iter().enumerate() {
        info!("Annotating game {}/{}: {game_id}", index + 1, game_ids.len());
        let plays = fetch_play_by_play(client, config, game_id).await?;
        annotated.extend(annotate_plays(&plays)?);
    }

    Ok(annotated)
}

/// One summary row per selected game.
pub async fn run_quick_stocks(
    client: &Client,
    config: &Config,
    selection: &GameSelection,
    max_delta_seconds: i64,
) -> Result<Vec<QuickStockSummary>, AppError> {
    let games = selection.resolve_games(client, config).await?;
    let mut summaries = Vec::with_capacity(games.len());

    for game in &games {
        let plays = fetch_play_by_play(client, config, &game.game_id).await?;
        let stocks = find_quick_stocks(&plays, max_delta_seconds)?;
        info!("Game {}: {} quick stocks", game.game_id, stocks.len());
        summaries.push(QuickStockSummary::from_game(&game.game_id, &stocks));
    }

    Ok(summaries)
}
