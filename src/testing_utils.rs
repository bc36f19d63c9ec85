use crate::analysis::player_stats::MergedPlayerStats;
use crate::analysis::value_stocks::ValueStockTotals;
use crate::stats_api::models::{GameListingRow, PlayByPlayRow, PlayerStatsRow};

/// Game id used by builders unless overridden
pub const TEST_GAME_ID: &str = "0042200401";

/// Builder for play-by-play rows in tests
#[derive(Debug, Clone)]
pub struct PlayBuilder {
    row: PlayByPlayRow,
}

impl PlayBuilder {
    /// Starts a play of the given event type at the given clock reading
    pub fn new(event_type: i64, clock: &str) -> Self {
        PlayBuilder {
            row: PlayByPlayRow {
                game_id: TEST_GAME_ID.to_string(),
                event_msg_type: event_type,
                period: 1,
                pc_time_string: clock.to_string(),
                ..PlayByPlayRow::default()
            },
        }
    }

    pub fn game(mut self, game_id: &str) -> Self {
        self.row.game_id = game_id.to_string();
        self
    }

    pub fn event_num(mut self, event_num: i64) -> Self {
        self.row.event_num = event_num;
        self
    }

    pub fn period(mut self, period: i64) -> Self {
        self.row.period = period;
        self
    }

    pub fn home(mut self, description: &str) -> Self {
        self.row.home_description = Some(description.to_string());
        self
    }

    pub fn visitor(mut self, description: &str) -> Self {
        self.row.visitor_description = Some(description.to_string());
        self
    }

    pub fn neutral(mut self, description: &str) -> Self {
        self.row.neutral_description = Some(description.to_string());
        self
    }

    /// Score after the play, formatted `AWAY - HOME`
    pub fn score(mut self, score: &str) -> Self {
        self.row.score = Some(score.to_string());
        self
    }

    pub fn player1(mut self, id: i64, name: &str, team: &str) -> Self {
        self.row.player1_id = id;
        self.row.player1_name = Some(name.to_string());
        self.row.player1_team_abbreviation = Some(team.to_string());
        self
    }

    pub fn player2(mut self, id: i64, name: &str, team: &str) -> Self {
        self.row.player2_id = id;
        self.row.player2_name = Some(name.to_string());
        self.row.player2_team_abbreviation = Some(team.to_string());
        self
    }

    pub fn player3(mut self, id: i64, name: &str, team: &str) -> Self {
        self.row.player3_id = id;
        self.row.player3_name = Some(name.to_string());
        self.row.player3_team_abbreviation = Some(team.to_string());
        self
    }

    pub fn build(self) -> PlayByPlayRow {
        self.row
    }
}

/// Test utilities for creating mock box scores and listings
pub struct TestDataBuilder;

impl TestDataBuilder {
    /// Creates a box score line for a player who played
    pub fn create_box_line(
        game_id: &str,
        player_id: i64,
        name: &str,
        team: &str,
        steals: u32,
        blocks: u32,
    ) -> PlayerStatsRow {
        PlayerStatsRow {
            game_id: game_id.to_string(),
            team_abbreviation: team.to_string(),
            player_id,
            player_name: name.to_string(),
            minutes: Some("32:10".to_string()),
            steals: Some(f64::from(steals)),
            blocks: Some(f64::from(blocks)),
            points: Some(12.0),
        }
    }

    /// Creates a box score line for a player who did not play
    pub fn create_dnp_line(game_id: &str, player_id: i64, name: &str, team: &str) -> PlayerStatsRow {
        PlayerStatsRow {
            game_id: game_id.to_string(),
            team_abbreviation: team.to_string(),
            player_id,
            player_name: name.to_string(),
            minutes: None,
            steals: None,
            blocks: None,
            points: None,
        }
    }

    /// Creates the two team rows a season listing returns for one game
    pub fn create_listing_rows(game_id: &str, home: &str, away: &str) -> Vec<GameListingRow> {
        vec![
            GameListingRow {
                game_id: game_id.to_string(),
                matchup: Some(format!("{home} vs. {away}")),
                team_abbreviation: Some(home.to_string()),
                game_date: Some("2023-06-01".to_string()),
            },
            GameListingRow {
                game_id: game_id.to_string(),
                matchup: Some(format!("{away} @ {home}")),
                team_abbreviation: Some(away.to_string()),
                game_date: Some("2023-06-01".to_string()),
            },
        ]
    }

    /// A short possession sequence: a home steal converted into a layup four
    /// seconds later, then an away block that leads nowhere.
    pub fn create_steal_and_score_game(game_id: &str) -> Vec<PlayByPlayRow> {
        vec![
            PlayBuilder::new(12, "12:00").game(game_id).event_num(1).build(),
            PlayBuilder::new(1, "11:40")
                .game(game_id)
                .event_num(2)
                .visitor("Butler 15' Jump Shot (2 PTS)")
                .score("2 - 0")
                .player1(202710, "Jimmy Butler", "MIA")
                .build(),
            PlayBuilder::new(5, "11:20")
                .game(game_id)
                .event_num(3)
                .home("Jokic STEAL (1 STL)")
                .visitor("Adebayo Bad Pass Turnover (P1.T1)")
                .player1(1628389, "Bam Adebayo", "MIA")
                .player2(203999, "Nikola Jokic", "DEN")
                .build(),
            PlayBuilder::new(1, "11:16")
                .game(game_id)
                .event_num(4)
                .home("Murray 2' Layup (2 PTS) (Jokic 1 AST)")
                .score("2 - 2")
                .player1(1627750, "Jamal Murray", "DEN")
                .build(),
            PlayBuilder::new(2, "10:50")
                .game(game_id)
                .event_num(5)
                .home("MISS Murray 3' Layup")
                .visitor("Adebayo BLOCK (1 BLK)")
                .player1(1627750, "Jamal Murray", "DEN")
                .player3(1628389, "Bam Adebayo", "MIA")
                .build(),
            PlayBuilder::new(4, "10:48")
                .game(game_id)
                .event_num(6)
                .visitor("Adebayo REBOUND (Off:0 Def:1)")
                .player1(1628389, "Bam Adebayo", "MIA")
                .build(),
            PlayBuilder::new(13, "0:00").game(game_id).event_num(7).build(),
        ]
    }
}

/// Property-based testing utilities
pub struct PropertyTesting;

impl PropertyTesting {
    /// Validates the internal consistency of one value stock total
    pub fn validate_value_stock_totals(totals: &ValueStockTotals) -> Result<(), String> {
        if totals.value_stocks == 0 {
            return Err(format!(
                "Player {} listed without any value stocks",
                totals.player_id
            ));
        }
        if totals.points_off_stocks < totals.value_stocks {
            return Err(format!(
                "Player {} has fewer points ({}) than value stocks ({})",
                totals.player_id, totals.points_off_stocks, totals.value_stocks
            ));
        }
        if totals.points_off_stocks > totals.value_stocks * 4 {
            return Err(format!(
                "Player {} averages more than four points per value stock",
                totals.player_id
            ));
        }
        Ok(())
    }

    /// Validates that a merged row never reports more value stocks than stocks
    pub fn validate_merged_row(row: &MergedPlayerStats) -> Result<(), String> {
        if row.value_stocks > row.stocks {
            return Err(format!(
                "Player {} has {} value stocks but only {} stocks",
                row.player_id, row.value_stocks, row.stocks
            ));
        }
        if !(0.0..=1.0).contains(&row.value_stock_rate) {
            return Err(format!(
                "Player {} value stock rate {} outside [0, 1]",
                row.player_id, row.value_stock_rate
            ));
        }
        for (name, value) in [
            ("PTS_PER_STOCK", row.pts_per_stock),
            ("PTS_PER_VALUE_STOCK", row.pts_per_value_stock),
            ("STOCK_PTS_PER_GAME", row.stock_pts_per_game),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("Player {} has invalid {name}: {value}", row.player_id));
            }
        }
        Ok(())
    }
}
