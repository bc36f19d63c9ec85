//! Value stocks: steals and blocks converted into points within a short clock window.
//!
//! A game's rows are reduced to the plays that matter for the chain (stocks,
//! buckets and stoppages). A stock directly followed by a bucket of the same
//! side, soon enough on the clock, is a value stock for the stealer or blocker.

use super::clock::{elapsed_between, is_within_window};
use super::events::{EventKind, Side, StockCredit};
use crate::error::AppError;
use crate::report::ReportRow;
use crate::stats_api::models::PlayByPlayRow;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info, instrument};

/// Running score after a play, split from the `AWAY - HOME` string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub away: u32,
    pub home: u32,
}

impl Score {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let (away, home) = raw
            .split_once('-')
            .ok_or_else(|| AppError::score_parse(raw))?;
        let away = away.trim().parse().map_err(|_| AppError::score_parse(raw))?;
        let home = home.trim().parse().map_err(|_| AppError::score_parse(raw))?;
        Ok(Score { away, home })
    }

    pub fn points(&self, side: Side) -> u32 {
        match side {
            Side::Home => self.home,
            Side::Away => self.away,
        }
    }
}

/// Score after every row, carrying the last known score over rows without one.
pub fn forward_fill_scores(plays: &[PlayByPlayRow]) -> Result<Vec<Score>, AppError> {
    let mut current = Score::default();
    plays
        .iter()
        .map(|play| {
            if let Some(raw) = play.score_text() {
                current = Score::parse(raw)?;
            }
            Ok(current)
        })
        .collect()
}

fn is_chain_play(play: &PlayByPlayRow) -> bool {
    play.home_stock()
        || play.away_stock()
        || play.home_bucket()
        || play.away_bucket()
        || play.kind().is_stoppage()
}

/// One stock that led to points.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueStockEvent {
    pub game_id: String,
    pub side: Side,
    pub credit: StockCredit,
    pub stock_clock: String,
    pub score_clock: String,
    pub elapsed_seconds: i64,
    pub points: u32,
}

/// Finds the value stocks of one game. Rows must be in logged order.
#[instrument(skip(plays), fields(game_id = plays.first().map(|p| p.game_id.as_str())))]
pub fn find_value_stocks(
    plays: &[PlayByPlayRow],
    max_delta_seconds: i64,
) -> Result<Vec<ValueStockEvent>, AppError> {
    let scores = forward_fill_scores(plays)?;
    let chain: Vec<usize> = (0..plays.len())
        .filter(|&i| is_chain_play(&plays[i]))
        .collect();
    debug!("Kept {} of {} plays for stock chains", chain.len(), plays.len());

    let mut events = Vec::new();
    for pos in 1..chain.len() {
        let prev = &plays[chain[pos - 1]];
        let current = &plays[chain[pos]];

        for side in [Side::Home, Side::Away] {
            if !(prev.is_stock(side) && current.is_bucket(side)) {
                continue;
            }

            let stock_clock = prev.clock()?;
            let score_clock = current.clock()?;
            if !is_within_window(&stock_clock, &score_clock, max_delta_seconds) {
                continue;
            }

            let Some(credit) = prev.stock_credit() else {
                debug!(
                    "Stock at {} in game {} has no credited player, skipping",
                    prev.pc_time_string, prev.game_id
                );
                continue;
            };

            let mut points = scores[chain[pos]]
                .points(side)
                .saturating_sub(scores[chain[pos - 1]].points(side));

            // The rest of the trip to the line counts towards the same stock
            if current.kind() == EventKind::FreeThrow {
                let mut next = pos + 1;
                while next < chain.len() {
                    let follow = &plays[chain[next]];
                    if follow.kind() != EventKind::FreeThrow
                        || follow.pc_time_string != current.pc_time_string
                    {
                        break;
                    }
                    points += scores[chain[next]]
                        .points(side)
                        .saturating_sub(scores[chain[next - 1]].points(side));
                    next += 1;
                }
            }

            events.push(ValueStockEvent {
                game_id: current.game_id.clone(),
                side,
                credit,
                stock_clock: prev.pc_time_string.clone(),
                score_clock: current.pc_time_string.clone(),
                elapsed_seconds: elapsed_between(&stock_clock, &score_clock)
                    .num_seconds(),
                points,
            });
        }
    }

    Ok(events)
}

/// Per-player value stock figures, one row of `stocks.csv`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueStockTotals {
    #[serde(rename = "ATTRIBUTED_PLAYER_ID")]
    pub player_id: i64,
    #[serde(rename = "ATTRIBUTED_PLAYER")]
    pub player_name: String,
    #[serde(rename = "ATTRIBUTED_TEAM")]
    pub team: String,
    #[serde(rename = "VALUE_STOCK")]
    pub value_stocks: u32,
    #[serde(rename = "POINTS_OFF_STOCK")]
    pub points_off_stocks: u32,
}

impl ReportRow for ValueStockTotals {
    const HEADERS: &'static [&'static str] = &[
        "ATTRIBUTED_PLAYER_ID",
        "ATTRIBUTED_PLAYER",
        "ATTRIBUTED_TEAM",
        "VALUE_STOCK",
        "POINTS_OFF_STOCK",
    ];
}

/// Accumulates value stocks across games, grouped by credited player.
#[derive(Debug, Default)]
pub struct ValueStockTally {
    by_player: BTreeMap<StockCredit, (u32, u32)>,
    games: usize,
}

impl ValueStockTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_game(&mut self, events: &[ValueStockEvent]) {
        self.games += 1;
        for event in events {
            let entry = self.by_player.entry(event.credit.clone()).or_default();
            entry.0 += 1;
            entry.1 += event.points;
        }
    }

    pub fn games(&self) -> usize {
        self.games
    }

    /// Totals ordered by player id.
    pub fn totals(&self) -> Vec<ValueStockTotals> {
        let totals: Vec<ValueStockTotals> = self
            .by_player
            .iter()
            .map(|(credit, (count, points))| ValueStockTotals {
                player_id: credit.player_id,
                player_name: credit.player_name.clone(),
                team: credit.team.clone(),
                value_stocks: *count,
                points_off_stocks: *points,
            })
            .collect();
        info!(
            "Aggregated value stocks for {} players over {} games",
            totals.len(),
            self.games
        );
        totals
    }
}

/// Convenience for a single batch of events.
pub fn aggregate_value_stocks(events: &[ValueStockEvent]) -> Vec<ValueStockTotals> {
    let mut tally = ValueStockTally::new();
    tally.add_game(events);
    tally.totals()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing_utils::{PlayBuilder, TestDataBuilder};

    fn jokic() -> (i64, &'static str, &'static str) {
        (203999, "Nikola Jokic", "DEN")
    }

    #[test]
    fn test_score_parse() {
        assert_eq!(Score::parse("10 - 12").unwrap(), Score { away: 10, home: 12 });
        assert_eq!(Score::parse("0-2").unwrap(), Score { away: 0, home: 2 });
        assert!(matches!(Score::parse("TIE"), Err(AppError::ScoreParse(_))));
    }

    #[test]
    fn test_forward_fill_starts_at_zero() {
        let plays = vec![
            PlayBuilder::new(12, "12:00").build(),
            PlayBuilder::new(1, "11:30").home("x").score("0 - 2").build(),
            PlayBuilder::new(2, "11:10").visitor("MISS").build(),
        ];
        let scores = forward_fill_scores(&plays).unwrap();
        assert_eq!(scores[0], Score::default());
        assert_eq!(scores[1], Score { away: 0, home: 2 });
        assert_eq!(scores[2], Score { away: 0, home: 2 });
    }

    #[test]
    fn test_blank_score_free_throw_is_not_a_bucket() {
        let plays = vec![
            PlayBuilder::new(1, "3:00").home("x").score("4 - 6").build(),
            PlayBuilder::new(3, "2:50")
                .visitor("MISS Butler Free Throw 1 of 2")
                .score(" ")
                .build(),
        ];
        let scores = forward_fill_scores(&plays).unwrap();
        assert_eq!(scores[1], Score { away: 4, home: 6 });
        assert_eq!(plays[1].away_bucket(), scores[1] != scores[0]);
    }

    #[test]
    fn test_steal_then_layup_is_value_stock() {
        let plays = TestDataBuilder::create_steal_and_score_game("0042200401");
        let events = find_value_stocks(&plays, 7).unwrap();

        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.side, Side::Home);
        assert_eq!(event.credit.player_id, 203999);
        assert_eq!(event.points, 2);
        assert_eq!(event.elapsed_seconds, 4);
        assert_eq!(event.stock_clock, "11:20");
    }

    #[test]
    fn test_bucket_outside_window_is_ignored() {
        let plays = TestDataBuilder::create_steal_and_score_game("0042200401");
        assert!(find_value_stocks(&plays, 3).unwrap().is_empty());
    }

    #[test]
    fn test_bucket_by_other_side_is_ignored() {
        let (id, name, team) = jokic();
        let plays = vec![
            PlayBuilder::new(5, "5:00")
                .home("Jokic STEAL (1 STL)")
                .player2(id, name, team)
                .build(),
            PlayBuilder::new(1, "4:58")
                .visitor("Butler 2' Layup (2 PTS)")
                .score("2 - 0")
                .build(),
        ];
        assert!(find_value_stocks(&plays, 7).unwrap().is_empty());
    }

    #[test]
    fn test_timeout_breaks_chain() {
        let (id, name, team) = jokic();
        let plays = vec![
            PlayBuilder::new(5, "5:00")
                .home("Jokic STEAL (1 STL)")
                .player2(id, name, team)
                .build(),
            PlayBuilder::new(9, "5:00").visitor("Heat Timeout: Regular").build(),
            PlayBuilder::new(1, "4:58")
                .home("Murray 2' Layup (2 PTS)")
                .score("0 - 2")
                .build(),
        ];
        assert!(find_value_stocks(&plays, 7).unwrap().is_empty());
    }

    #[test]
    fn test_non_chain_rows_do_not_break_chain() {
        let (id, name, team) = jokic();
        let plays = vec![
            PlayBuilder::new(5, "5:00")
                .home("Jokic STEAL (1 STL)")
                .player2(id, name, team)
                .build(),
            PlayBuilder::new(6, "4:59").visitor("Butler S.FOUL (P1.T1)").build(),
            PlayBuilder::new(1, "4:55")
                .home("Porter Jr. 25' 3PT Jump Shot (3 PTS)")
                .score("0 - 3")
                .build(),
        ];
        let events = find_value_stocks(&plays, 7).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].points, 3);
    }

    #[test]
    fn test_free_throw_trip_is_summed() {
        let plays = vec![
            PlayBuilder::new(2, "3:30")
                .home("MISS Murray 3' Layup")
                .visitor("Adebayo BLOCK (1 BLK)")
                .score("10 - 10")
                .player3(1628389, "Bam Adebayo", "MIA")
                .build(),
            PlayBuilder::new(3, "3:25")
                .visitor("Butler Free Throw 1 of 2 (11 PTS)")
                .score("11 - 10")
                .build(),
            PlayBuilder::new(3, "3:25")
                .visitor("Butler Free Throw 2 of 2 (12 PTS)")
                .score("12 - 10")
                .build(),
        ];
        let events = find_value_stocks(&plays, 7).unwrap();

        // Only the first free throw follows the block directly
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].side, Side::Away);
        assert_eq!(events[0].credit.player_id, 1628389);
        assert_eq!(events[0].points, 2);
    }

    #[test]
    fn test_missed_second_free_throw_counts_one() {
        let (id, name, team) = jokic();
        let plays = vec![
            PlayBuilder::new(5, "3:30")
                .home("Jokic STEAL (1 STL)")
                .player2(id, name, team)
                .score("10 - 10")
                .build(),
            PlayBuilder::new(3, "3:26")
                .home("Murray Free Throw 1 of 2 (11 PTS)")
                .score("10 - 11")
                .build(),
            PlayBuilder::new(3, "3:26")
                .home("MISS Murray Free Throw 2 of 2")
                .build(),
        ];
        let events = find_value_stocks(&plays, 7).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].points, 1);
    }

    #[test]
    fn test_stock_without_credit_is_skipped() {
        let plays = vec![
            PlayBuilder::new(5, "5:00").home("Team STEAL").build(),
            PlayBuilder::new(1, "4:58")
                .home("Murray 2' Layup (2 PTS)")
                .score("0 - 2")
                .build(),
        ];
        assert!(find_value_stocks(&plays, 7).unwrap().is_empty());
    }

    #[test]
    fn test_period_boundary_is_not_a_window() {
        let (id, name, team) = jokic();
        let plays = vec![
            PlayBuilder::new(5, "0:02")
                .home("Jokic STEAL (1 STL)")
                .player2(id, name, team)
                .build(),
            PlayBuilder::new(1, "11:58")
                .period(2)
                .home("Murray 2' Layup (2 PTS)")
                .score("0 - 2")
                .build(),
        ];
        assert!(find_value_stocks(&plays, 7).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_clock_is_an_error() {
        let (id, name, team) = jokic();
        let plays = vec![
            PlayBuilder::new(5, "five")
                .home("Jokic STEAL (1 STL)")
                .player2(id, name, team)
                .build(),
            PlayBuilder::new(1, "4:58")
                .home("Murray 2' Layup (2 PTS)")
                .score("0 - 2")
                .build(),
        ];
        assert!(matches!(
            find_value_stocks(&plays, 7),
            Err(AppError::GameClockParse(_))
        ));
    }

    #[test]
    fn test_tally_groups_across_games() {
        let mut tally = ValueStockTally::new();
        for game_id in ["0042200401", "0042200402"] {
            let plays = TestDataBuilder::create_steal_and_score_game(game_id);
            tally.add_game(&find_value_stocks(&plays, 7).unwrap());
        }

        let totals = tally.totals();
        assert_eq!(tally.games(), 2);
        assert_eq!(
            totals,
            vec![ValueStockTotals {
                player_id: 203999,
                player_name: "Nikola Jokic".to_string(),
                team: "DEN".to_string(),
                value_stocks: 2,
                points_off_stocks: 4,
            }]
        );
    }

    #[test]
    fn test_aggregate_orders_by_player_id() {
        let event = |player_id: i64, points: u32| ValueStockEvent {
            game_id: "g".to_string(),
            side: Side::Home,
            credit: StockCredit {
                player_id,
                player_name: format!("P{player_id}"),
                team: "DEN".to_string(),
            },
            stock_clock: "1:00".to_string(),
            score_clock: "0:58".to_string(),
            elapsed_seconds: 2,
            points,
        };
        let totals = aggregate_value_stocks(&[event(9, 2), event(3, 3), event(9, 1)]);

        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].player_id, 3);
        assert_eq!(totals[1].value_stocks, 2);
        assert_eq!(totals[1].points_off_stocks, 3);
    }

    #[test]
    fn test_totals_headers() {
        crate::report::assert_headers_match(&ValueStockTotals {
            player_id: 203999,
            player_name: "Nikola Jokic".to_string(),
            team: "DEN".to_string(),
            value_stocks: 2,
            points_off_stocks: 5,
        });
    }
}
