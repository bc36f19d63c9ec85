use serde::{Deserialize, Serialize};

/// A team-game row of the season listings (`LeagueGameFinderResults` and
/// `LeagueGameLog`). Every game appears once per team.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameListingRow {
    #[serde(rename = "GAME_ID")]
    pub game_id: String,
    #[serde(rename = "MATCHUP", default)]
    pub matchup: Option<String>,
    #[serde(rename = "TEAM_ABBREVIATION", default)]
    pub team_abbreviation: Option<String>,
    #[serde(rename = "GAME_DATE", default)]
    pub game_date: Option<String>,
}

/// A single game of the season, identified once regardless of how many team rows it had.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameDetails {
    pub game_id: String,
    pub matchup: String,
}

impl From<&GameListingRow> for GameDetails {
    fn from(row: &GameListingRow) -> Self {
        GameDetails {
            game_id: row.game_id.clone(),
            matchup: row.matchup.clone().unwrap_or_default(),
        }
    }
}
