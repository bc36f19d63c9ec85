//! Labels every play of a game with its team, play type, the next play and
//! the credited player, for manual inspection of possession sequences.

use super::clock::{GameClock, elapsed_between};
use super::events::{EventKind, describes_stock};
use crate::error::AppError;
use crate::report::ReportRow;
use crate::stats_api::models::PlayByPlayRow;
use serde::Serialize;

/// Team whose play a row describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TeamSide {
    Home,
    Away,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlayLabel {
    #[serde(rename = "STEAL")]
    Steal,
    #[serde(rename = "BLOCK")]
    Block,
    #[serde(rename = "FG_MISSED")]
    FieldGoalMissed,
    #[serde(rename = "FG_MADE")]
    FieldGoalMade,
    #[serde(rename = "OFFENSIVE REBOUND")]
    OffensiveRebound,
    #[serde(rename = "DEFENSIVE REBOUND")]
    DefensiveRebound,
    #[serde(rename = "OTHER")]
    Other,
}

fn contains_upper(text: Option<&str>, needle: &str) -> bool {
    text.is_some_and(|t| t.to_ascii_uppercase().contains(needle))
}

/// A stock is logged against the side that lost the ball, so a stock in one
/// description makes the row the other team's play.
pub fn team_side(play: &PlayByPlayRow) -> TeamSide {
    match (play.home_text(), play.visitor_text()) {
        (Some(home), Some(visitor)) => {
            if describes_stock(visitor) {
                TeamSide::Home
            } else if describes_stock(home) {
                TeamSide::Away
            } else {
                TeamSide::Unknown
            }
        }
        (Some(_), None) => TeamSide::Home,
        (None, Some(_)) => TeamSide::Away,
        (None, None) => TeamSide::Unknown,
    }
}

fn label(play: &PlayByPlayRow, team: TeamSide, previous_team: Option<TeamSide>) -> PlayLabel {
    let texts = [play.home_text(), play.visitor_text()];
    if texts.iter().any(|t| contains_upper(*t, "STEAL")) {
        return PlayLabel::Steal;
    }
    if texts.iter().any(|t| contains_upper(*t, "BLOCK")) {
        return PlayLabel::Block;
    }
    match play.kind() {
        EventKind::FieldGoalMissed => PlayLabel::FieldGoalMissed,
        EventKind::FieldGoalMade => PlayLabel::FieldGoalMade,
        EventKind::Rebound if previous_team == Some(team) => PlayLabel::OffensiveRebound,
        EventKind::Rebound => PlayLabel::DefensiveRebound,
        _ => PlayLabel::Other,
    }
}

/// One row of `play_by_play_annotated.csv`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotatedPlay {
    #[serde(rename = "GAME_ID")]
    pub game_id: String,
    #[serde(rename = "EVENTNUM")]
    pub event_num: i64,
    #[serde(rename = "EVENTMSGTYPE")]
    pub event_msg_type: i64,
    #[serde(rename = "PERIOD")]
    pub period: i64,
    #[serde(rename = "PCTIMESTRING")]
    pub pc_time_string: String,
    #[serde(rename = "HOMEDESCRIPTION")]
    pub home_description: Option<String>,
    #[serde(rename = "VISITORDESCRIPTION")]
    pub visitor_description: Option<String>,
    #[serde(rename = "SCORE")]
    pub score: Option<String>,
    #[serde(rename = "TEAM")]
    pub team: TeamSide,
    #[serde(rename = "CURRENT_PLAY")]
    pub current_play: PlayLabel,
    #[serde(rename = "NEXT_PLAY")]
    pub next_play: Option<PlayLabel>,
    #[serde(rename = "MINUTES")]
    pub minutes: i64,
    #[serde(rename = "SECONDS")]
    pub seconds: i64,
    #[serde(rename = "TIME_DIFF")]
    pub time_diff: Option<i64>,
    #[serde(rename = "ATTRIBUTED_PLAYER")]
    pub attributed_player: Option<String>,
}

impl ReportRow for AnnotatedPlay {
    const HEADERS: &'static [&'static str] = &[
        "GAME_ID",
        "EVENTNUM",
        "EVENTMSGTYPE",
        "PERIOD",
        "PCTIMESTRING",
        "HOMEDESCRIPTION",
        "VISITORDESCRIPTION",
        "SCORE",
        "TEAM",
        "CURRENT_PLAY",
        "NEXT_PLAY",
        "MINUTES",
        "SECONDS",
        "TIME_DIFF",
        "ATTRIBUTED_PLAYER",
    ];
}

/// Annotates one game's rows, in logged order.
pub fn annotate_plays(plays: &[PlayByPlayRow]) -> Result<Vec<AnnotatedPlay>, AppError> {
    let clocks = plays
        .iter()
        .map(PlayByPlayRow::clock)
        .collect::<Result<Vec<GameClock>, _>>()?;

    let mut previous_team = None;
    let mut annotated: Vec<AnnotatedPlay> = Vec::with_capacity(plays.len());
    for (index, play) in plays.iter().enumerate() {
        let team = team_side(play);
        let current_play = label(play, team, previous_team);
        previous_team = Some(team);

        let attributed_player = match current_play {
            PlayLabel::Steal => play.player2_name.clone(),
            PlayLabel::Block => play.player3_name.clone(),
            _ => play.player1_name.clone(),
        };
        let time_diff = index
            .checked_sub(1)
            .map(|prev| elapsed_between(&clocks[prev], &clocks[index]).num_seconds());

        if let Some(last) = annotated.last_mut() {
            last.next_play = Some(current_play);
        }

        annotated.push(AnnotatedPlay {
            game_id: play.game_id.clone(),
            event_num: play.event_num,
            event_msg_type: play.event_msg_type,
            period: play.period,
            pc_time_string: play.pc_time_string.clone(),
            home_description: play.home_description.clone(),
            visitor_description: play.visitor_description.clone(),
            score: play.score.clone(),
            team,
            current_play,
            next_play: None,
            minutes: clocks[index].minutes(),
            seconds: clocks[index].seconds(),
            time_diff,
            attributed_player,
        });
    }

    Ok(annotated)
}
