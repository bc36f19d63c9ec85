//! Quick per-game count of stocks with an immediate follow-up play.

use super::clock::is_within_window;
use crate::error::AppError;
use crate::report::ReportRow;
use crate::stats_api::models::PlayByPlayRow;
use serde::Serialize;

/// A stock whose next logged play came within the clock window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickStock {
    pub game_id: String,
    pub player_id: i64,
    pub clock: String,
}

pub fn find_quick_stocks(
    plays: &[PlayByPlayRow],
    max_delta_seconds: i64,
) -> Result<Vec<QuickStock>, AppError> {
    let mut found = Vec::new();
    for pair in plays.windows(2) {
        let (play, next) = (&pair[0], &pair[1]);
        if !play.is_stock_play() {
            continue;
        }
        if !is_within_window(&play.clock()?, &next.clock()?, max_delta_seconds) {
            continue;
        }
        let player_id = if play.player2_id != 0 {
            play.player2_id
        } else {
            play.player3_id
        };
        found.push(QuickStock {
            game_id: play.game_id.clone(),
            player_id,
            clock: play.pc_time_string.clone(),
        });
    }
    Ok(found)
}

/// One row of `quick_stocks.csv`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuickStockSummary {
    #[serde(rename = "GAME_ID")]
    pub game_id: String,
    #[serde(rename = "QUICK_STOCKS")]
    pub quick_stocks: usize,
    /// Distinct credited player ids, `;` separated, in first-seen order
    #[serde(rename = "PLAYER_IDS")]
    pub player_ids: String,
}

impl ReportRow for QuickStockSummary {
    const HEADERS: &'static [&'static str] = &["GAME_ID", "QUICK_STOCKS", "PLAYER_IDS"];
}

impl QuickStockSummary {
    pub fn from_game(game_id: &str, stocks: &[QuickStock]) -> Self {
        let mut ids: Vec<i64> = Vec::new();
        for stock in stocks {
            if stock.player_id != 0 && !ids.contains(&stock.player_id) {
                ids.push(stock.player_id);
            }
        }
        QuickStockSummary {
            game_id: game_id.to_string(),
            quick_stocks: stocks.len(),
            player_ids: ids
                .iter()
                .map(i64::to_string)
                .collect::<Vec<_>>()
                .join(";"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing_utils::{PlayBuilder, TestDataBuilder};

    #[test]
    fn test_quick_stocks_in_fixture_game() {
        let plays = TestDataBuilder::create_steal_and_score_game("0042200401");
        let stocks = find_quick_stocks(&plays, 7).unwrap();

        // The steal (4s to the layup) and the block (2s to the rebound)
        assert_eq!(stocks.len(), 2);
        assert_eq!(stocks[0].player_id, 203999);
        assert_eq!(stocks[1].player_id, 1628389);

        let summary = QuickStockSummary::from_game("0042200401", &stocks);
        assert_eq!(summary.quick_stocks, 2);
        assert_eq!(summary.player_ids, "203999;1628389");
    }

    #[test]
    fn test_slow_follow_up_is_not_quick() {
        let plays = vec![
            PlayBuilder::new(5, "5:00")
                .visitor("Butler STEAL (1 STL)")
                .player2(202710, "Jimmy Butler", "MIA")
                .build(),
            PlayBuilder::new(1, "4:40").visitor("Butler Dunk (2 PTS)").build(),
        ];
        assert!(find_quick_stocks(&plays, 7).unwrap().is_empty());

        let summary = QuickStockSummary::from_game("g", &[]);
        assert_eq!(summary.quick_stocks, 0);
        assert_eq!(summary.player_ids, "");
    }

    #[test]
    fn test_last_row_stock_has_no_follow_up() {
        let plays = vec![
            PlayBuilder::new(5, "0:01")
                .visitor("Butler STEAL (1 STL)")
                .player2(202710, "Jimmy Butler", "MIA")
                .build(),
        ];
        assert!(find_quick_stocks(&plays, 7).unwrap().is_empty());
    }

    #[test]
    fn test_summary_headers() {
        crate::report::assert_headers_match(&QuickStockSummary {
            game_id: "0042200401".to_string(),
            quick_stocks: 2,
            player_ids: "203999;1628389".to_string(),
        });
    }
}
