use super::result_set::null_as_default;
use serde::{Deserialize, Serialize};

/// One logged event of a game, as returned by the `PlayByPlay` result set.
///
/// Player ids are `0` when a participant slot is unused.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayByPlayRow {
    #[serde(rename = "GAME_ID")]
    pub game_id: String,
    #[serde(rename = "EVENTNUM", default, deserialize_with = "null_as_default")]
    pub event_num: i64,
    #[serde(rename = "EVENTMSGTYPE")]
    pub event_msg_type: i64,
    #[serde(rename = "EVENTMSGACTIONTYPE", default, deserialize_with = "null_as_default")]
    pub event_msg_action_type: i64,
    #[serde(rename = "PERIOD", default, deserialize_with = "null_as_default")]
    pub period: i64,
    #[serde(rename = "PCTIMESTRING")]
    pub pc_time_string: String,
    #[serde(rename = "HOMEDESCRIPTION", default)]
    pub home_description: Option<String>,
    #[serde(rename = "NEUTRALDESCRIPTION", default)]
    pub neutral_description: Option<String>,
    #[serde(rename = "VISITORDESCRIPTION", default)]
    pub visitor_description: Option<String>,
    #[serde(rename = "SCORE", default)]
    pub score: Option<String>,
    #[serde(rename = "PLAYER1_ID", default, deserialize_with = "null_as_default")]
    pub player1_id: i64,
    #[serde(rename = "PLAYER1_NAME", default)]
    pub player1_name: Option<String>,
    #[serde(rename = "PLAYER1_TEAM_ABBREVIATION", default)]
    pub player1_team_abbreviation: Option<String>,
    #[serde(rename = "PLAYER2_ID", default, deserialize_with = "null_as_default")]
    pub player2_id: i64,
    #[serde(rename = "PLAYER2_NAME", default)]
    pub player2_name: Option<String>,
    #[serde(rename = "PLAYER2_TEAM_ABBREVIATION", default)]
    pub player2_team_abbreviation: Option<String>,
    #[serde(rename = "PLAYER3_ID", default, deserialize_with = "null_as_default")]
    pub player3_id: i64,
    #[serde(rename = "PLAYER3_NAME", default)]
    pub player3_name: Option<String>,
    #[serde(rename = "PLAYER3_TEAM_ABBREVIATION", default)]
    pub player3_team_abbreviation: Option<String>,
}
