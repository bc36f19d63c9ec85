//! Season stock totals from box scores, and their merge with value stocks.

use super::value_stocks::ValueStockTotals;
use crate::report::ReportRow;
use crate::stats_api::models::PlayerStatsRow;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct PlayerKey {
    player_id: i64,
    player_name: String,
    team: String,
}

/// One row of `player_stats.csv`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerSeasonStats {
    #[serde(rename = "PLAYER_ID")]
    pub player_id: i64,
    #[serde(rename = "PLAYER_NAME")]
    pub player_name: String,
    #[serde(rename = "TEAM_ABBREVIATION")]
    pub team: String,
    #[serde(rename = "SEASON")]
    pub season: String,
    #[serde(rename = "SEASON_TYPE")]
    pub season_type: String,
    #[serde(rename = "GAMES_PLAYED")]
    pub games_played: u32,
    #[serde(rename = "STOCKS")]
    pub stocks: u32,
}

impl ReportRow for PlayerSeasonStats {
    const HEADERS: &'static [&'static str] = &[
        "PLAYER_ID",
        "PLAYER_NAME",
        "TEAM_ABBREVIATION",
        "SEASON",
        "SEASON_TYPE",
        "GAMES_PLAYED",
        "STOCKS",
    ];
}

/// Accumulates box score lines of one season and season type.
#[derive(Debug)]
pub struct PlayerStatsTally {
    season: String,
    season_type: String,
    by_player: BTreeMap<PlayerKey, (u32, u32)>,
}

impl PlayerStatsTally {
    pub fn new(season: impl Into<String>, season_type: impl Into<String>) -> Self {
        PlayerStatsTally {
            season: season.into(),
            season_type: season_type.into(),
            by_player: BTreeMap::new(),
        }
    }

    /// Adds one game's lines. Players without minutes are skipped.
    pub fn add_game(&mut self, lines: &[PlayerStatsRow]) {
        let mut skipped = 0;
        for line in lines {
            if !line.played() {
                skipped += 1;
                continue;
            }
            let key = PlayerKey {
                player_id: line.player_id,
                player_name: line.player_name.clone(),
                team: line.team_abbreviation.clone(),
            };
            let entry = self.by_player.entry(key).or_default();
            entry.0 += 1;
            entry.1 += line.stocks();
        }
        debug!("Skipped {skipped} box score lines without minutes");
    }

    pub fn totals(&self) -> Vec<PlayerSeasonStats> {
        self.by_player
            .iter()
            .map(|(key, (games, stocks))| PlayerSeasonStats {
                player_id: key.player_id,
                player_name: key.player_name.clone(),
                team: key.team.clone(),
                season: self.season.clone(),
                season_type: self.season_type.clone(),
                games_played: *games,
                stocks: *stocks,
            })
            .collect()
    }
}

/// One row of `stocks_merged.csv`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergedPlayerStats {
    #[serde(rename = "PLAYER_ID")]
    pub player_id: i64,
    #[serde(rename = "PLAYER_NAME")]
    pub player_name: String,
    #[serde(rename = "TEAM_ABBREVIATION")]
    pub team: String,
    #[serde(rename = "SEASON")]
    pub season: String,
    #[serde(rename = "SEASON_TYPE")]
    pub season_type: String,
    #[serde(rename = "GAMES_PLAYED")]
    pub games_played: u32,
    #[serde(rename = "STOCKS")]
    pub stocks: u32,
    #[serde(rename = "VALUE_STOCK")]
    pub value_stocks: u32,
    #[serde(rename = "POINTS_OFF_STOCK")]
    pub points_off_stocks: u32,
    #[serde(rename = "VALUE_STOCK_RATE")]
    pub value_stock_rate: f64,
    #[serde(rename = "PTS_PER_STOCK")]
    pub pts_per_stock: f64,
    #[serde(rename = "PTS_PER_VALUE_STOCK")]
    pub pts_per_value_stock: f64,
    #[serde(rename = "STOCK_PTS_PER_GAME")]
    pub stock_pts_per_game: f64,
}

impl ReportRow for MergedPlayerStats {
    const HEADERS: &'static [&'static str] = &[
        "PLAYER_ID",
        "PLAYER_NAME",
        "TEAM_ABBREVIATION",
        "SEASON",
        "SEASON_TYPE",
        "GAMES_PLAYED",
        "STOCKS",
        "VALUE_STOCK",
        "POINTS_OFF_STOCK",
        "VALUE_STOCK_RATE",
        "PTS_PER_STOCK",
        "PTS_PER_VALUE_STOCK",
        "STOCK_PTS_PER_GAME",
    ];
}

fn ratio(numerator: u32, denominator: u32) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        f64::from(numerator) / f64::from(denominator)
    }
}

/// Left joins value stock totals onto season stats by player id and team.
///
/// Players without value stocks get zeros. Value stock rows whose player never
/// shows up in the box scores are dropped.
pub fn merge_player_stats(
    stats: &[PlayerSeasonStats],
    value_stocks: &[ValueStockTotals],
) -> Vec<MergedPlayerStats> {
    let mut by_player: HashMap<(i64, &str), (u32, u32)> = HashMap::new();
    for totals in value_stocks {
        let entry = by_player
            .entry((totals.player_id, totals.team.as_str()))
            .or_default();
        entry.0 += totals.value_stocks;
        entry.1 += totals.points_off_stocks;
    }

    let merged: Vec<MergedPlayerStats> = stats
        .iter()
        .map(|row| {
            let (value_stocks, points) = by_player
                .get(&(row.player_id, row.team.as_str()))
                .copied()
                .unwrap_or_default();
            MergedPlayerStats {
                player_id: row.player_id,
                player_name: row.player_name.clone(),
                team: row.team.clone(),
                season: row.season.clone(),
                season_type: row.season_type.clone(),
                games_played: row.games_played,
                stocks: row.stocks,
                value_stocks,
                points_off_stocks: points,
                value_stock_rate: ratio(value_stocks, row.stocks),
                pts_per_stock: ratio(points, row.stocks),
                pts_per_value_stock: ratio(points, value_stocks),
                stock_pts_per_game: ratio(points, row.games_played),
            }
        })
        .collect();

    info!(
        "Merged {} player rows with {} value stock rows",
        merged.len(),
        value_stocks.len()
    );
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing_utils::{PropertyTesting, TestDataBuilder};

    fn value_stock(player_id: i64, team: &str, count: u32, points: u32) -> ValueStockTotals {
        ValueStockTotals {
            player_id,
            player_name: format!("Player {player_id}"),
            team: team.to_string(),
            value_stocks: count,
            points_off_stocks: points,
        }
    }

    #[test]
    fn test_tally_counts_games_and_stocks() {
        let mut tally = PlayerStatsTally::new("2022-23", "Playoffs");
        tally.add_game(&[
            TestDataBuilder::create_box_line("g1", 203999, "Nikola Jokic", "DEN", 2, 1),
            TestDataBuilder::create_dnp_line("g1", 1629008, "Michael Porter Jr.", "DEN"),
        ]);
        tally.add_game(&[TestDataBuilder::create_box_line(
            "g2",
            203999,
            "Nikola Jokic",
            "DEN",
            0,
            2,
        )]);

        let totals = tally.totals();
        assert_eq!(
            totals,
            vec![PlayerSeasonStats {
                player_id: 203999,
                player_name: "Nikola Jokic".to_string(),
                team: "DEN".to_string(),
                season: "2022-23".to_string(),
                season_type: "Playoffs".to_string(),
                games_played: 2,
                stocks: 5,
            }]
        );
    }

    #[test]
    fn test_traded_player_keeps_rows_per_team() {
        let mut tally = PlayerStatsTally::new("2022-23", "Regular Season");
        tally.add_game(&[TestDataBuilder::create_box_line("g1", 7, "Kevin Durant", "BKN", 1, 1)]);
        tally.add_game(&[TestDataBuilder::create_box_line("g2", 7, "Kevin Durant", "PHX", 0, 1)]);

        let totals = tally.totals();
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].team, "BKN");
        assert_eq!(totals[1].team, "PHX");
    }

    #[test]
    fn test_merge_fills_missing_with_zero() {
        let mut tally = PlayerStatsTally::new("2022-23", "Playoffs");
        tally.add_game(&[
            TestDataBuilder::create_box_line("g1", 1, "One", "DEN", 3, 1),
            TestDataBuilder::create_box_line("g1", 2, "Two", "DEN", 0, 0),
        ]);
        let merged = merge_player_stats(&tally.totals(), &[value_stock(1, "DEN", 2, 5)]);

        assert_eq!(merged.len(), 2);
        let one = &merged[0];
        assert_eq!(one.value_stocks, 2);
        assert_eq!(one.points_off_stocks, 5);
        assert_eq!(one.value_stock_rate, 0.5);
        assert_eq!(one.pts_per_stock, 1.25);
        assert_eq!(one.pts_per_value_stock, 2.5);
        assert_eq!(one.stock_pts_per_game, 5.0);

        let two = &merged[1];
        assert_eq!(two.value_stocks, 0);
        assert_eq!(two.value_stock_rate, 0.0);
        assert_eq!(two.pts_per_stock, 0.0);
        assert_eq!(two.pts_per_value_stock, 0.0);

        for row in &merged {
            assert!(PropertyTesting::validate_merged_row(row).is_ok());
        }
    }

    #[test]
    fn test_merge_drops_unmatched_value_stocks() {
        let mut tally = PlayerStatsTally::new("2022-23", "Playoffs");
        tally.add_game(&[TestDataBuilder::create_box_line("g1", 1, "One", "DEN", 1, 0)]);
        let merged = merge_player_stats(
            &tally.totals(),
            &[value_stock(1, "MIA", 1, 2), value_stock(99, "DEN", 1, 3)],
        );

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].value_stocks, 0);
    }

    #[test]
    fn test_report_headers() {
        crate::report::assert_headers_match(&PlayerSeasonStats {
            player_id: 1628389,
            player_name: "Bam Adebayo".to_string(),
            team: "MIA".to_string(),
            season: "2022-23".to_string(),
            season_type: "Playoffs".to_string(),
            games_played: 5,
            stocks: 9,
        });
        crate::report::assert_headers_match(&MergedPlayerStats {
            player_id: 1628389,
            player_name: "Bam Adebayo".to_string(),
            team: "MIA".to_string(),
            season: "2022-23".to_string(),
            season_type: "Playoffs".to_string(),
            games_played: 5,
            stocks: 9,
            value_stocks: 3,
            points_off_stocks: 7,
            value_stock_rate: 0.5,
            pts_per_stock: 0.5,
            pts_per_value_stock: 2.5,
            stock_pts_per_game: 1.5,
        });
    }
}
