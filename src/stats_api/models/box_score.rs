use serde::{Deserialize, Serialize};

/// One player's line from the traditional box score (`PlayerStats` result set).
///
/// Counting stats are `None` for players who did not play, and arrive as floats
/// on some seasons, hence `f64`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerStatsRow {
    #[serde(rename = "GAME_ID")]
    pub game_id: String,
    #[serde(rename = "TEAM_ABBREVIATION")]
    pub team_abbreviation: String,
    #[serde(rename = "PLAYER_ID")]
    pub player_id: i64,
    #[serde(rename = "PLAYER_NAME")]
    pub player_name: String,
    #[serde(rename = "MIN", default)]
    pub minutes: Option<String>,
    #[serde(rename = "STL", default)]
    pub steals: Option<f64>,
    #[serde(rename = "BLK", default)]
    pub blocks: Option<f64>,
    #[serde(rename = "PTS", default)]
    pub points: Option<f64>,
}

impl PlayerStatsRow {
    /// Whether the player logged minutes in this game.
    pub fn played(&self) -> bool {
        self.minutes.is_some()
    }

    /// Steals plus blocks.
    pub fn stocks(&self) -> u32 {
        let steals = self.steals.unwrap_or(0.0).max(0.0);
        let blocks = self.blocks.unwrap_or(0.0).max(0.0);
        (steals + blocks).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stocks_sum_steals_and_blocks() {
        let row = PlayerStatsRow {
            minutes: Some("36:12".to_string()),
            steals: Some(2.0),
            blocks: Some(1.0),
            ..Default::default()
        };
        assert!(row.played());
        assert_eq!(row.stocks(), 3);
    }

    #[test]
    fn test_did_not_play() {
        let row = PlayerStatsRow::default();
        assert!(!row.played());
        assert_eq!(row.stocks(), 0);
    }
}
