//! Event type codes and per-row classification helpers for play-by-play data.

use super::clock::GameClock;
use crate::error::AppError;
use crate::stats_api::models::PlayByPlayRow;
use serde::Serialize;
use std::fmt;

/// `EVENTMSGTYPE` codes of the play-by-play feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventKind {
    FieldGoalMade,
    FieldGoalMissed,
    FreeThrow,
    Rebound,
    Turnover,
    Foul,
    Violation,
    Substitution,
    Timeout,
    JumpBall,
    Ejection,
    PeriodStart,
    PeriodEnd,
    Other(i64),
}

impl EventKind {
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => EventKind::FieldGoalMade,
            2 => EventKind::FieldGoalMissed,
            3 => EventKind::FreeThrow,
            4 => EventKind::Rebound,
            5 => EventKind::Turnover,
            6 => EventKind::Foul,
            7 => EventKind::Violation,
            8 => EventKind::Substitution,
            9 => EventKind::Timeout,
            10 => EventKind::JumpBall,
            11 => EventKind::Ejection,
            12 => EventKind::PeriodStart,
            13 => EventKind::PeriodEnd,
            other => EventKind::Other(other),
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            EventKind::FieldGoalMade => 1,
            EventKind::FieldGoalMissed => 2,
            EventKind::FreeThrow => 3,
            EventKind::Rebound => 4,
            EventKind::Turnover => 5,
            EventKind::Foul => 6,
            EventKind::Violation => 7,
            EventKind::Substitution => 8,
            EventKind::Timeout => 9,
            EventKind::JumpBall => 10,
            EventKind::Ejection => 11,
            EventKind::PeriodStart => 12,
            EventKind::PeriodEnd => 13,
            EventKind::Other(code) => *code,
        }
    }

    /// Column label used in spreadsheets.
    pub fn label(&self) -> String {
        match self {
            EventKind::FieldGoalMade => "FG_MADE".to_string(),
            EventKind::FieldGoalMissed => "FG_MISSED".to_string(),
            EventKind::FreeThrow => "FREE_THROW".to_string(),
            EventKind::Rebound => "REBOUND".to_string(),
            EventKind::Turnover => "TURNOVER".to_string(),
            EventKind::Foul => "FOUL".to_string(),
            EventKind::Violation => "VIOLATION".to_string(),
            EventKind::Substitution => "SUBSTITUTION".to_string(),
            EventKind::Timeout => "TIMEOUT".to_string(),
            EventKind::JumpBall => "JUMP_BALL".to_string(),
            EventKind::Ejection => "EJECTION".to_string(),
            EventKind::PeriodStart => "PERIOD_START".to_string(),
            EventKind::PeriodEnd => "PERIOD_END".to_string(),
            EventKind::Other(code) => format!("EVENT_{code}"),
        }
    }

    /// Timeouts and period markers separate sequences of play.
    pub fn is_stoppage(&self) -> bool {
        matches!(
            self,
            EventKind::Timeout | EventKind::PeriodStart | EventKind::PeriodEnd
        )
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Which team's description column a play was logged in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Home,
    Away,
}

/// Case-insensitive check for a steal or block in a play description.
pub fn describes_stock(text: &str) -> bool {
    let upper = text.to_ascii_uppercase();
    upper.contains("BLOCK") || upper.contains("STEAL")
}

/// The player credited with a steal or block.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StockCredit {
    pub player_id: i64,
    pub player_name: String,
    pub team: String,
}

fn present(text: &Option<String>) -> Option<&str> {
    text.as_deref().filter(|t| !t.trim().is_empty())
}

impl PlayByPlayRow {
    pub fn kind(&self) -> EventKind {
        EventKind::from_code(self.event_msg_type)
    }

    pub fn clock(&self) -> Result<GameClock, AppError> {
        GameClock::parse(&self.pc_time_string)
    }

    pub fn home_text(&self) -> Option<&str> {
        present(&self.home_description)
    }

    pub fn visitor_text(&self) -> Option<&str> {
        present(&self.visitor_description)
    }

    /// The logged score, if the row carries a non-blank one.
    pub fn score_text(&self) -> Option<&str> {
        present(&self.score)
    }

    pub fn description(&self, side: Side) -> Option<&str> {
        match side {
            Side::Home => self.home_text(),
            Side::Away => self.visitor_text(),
        }
    }

    /// A steal or block is logged in this side's description.
    pub fn is_stock(&self, side: Side) -> bool {
        self.description(side).is_some_and(describes_stock)
    }

    pub fn home_stock(&self) -> bool {
        self.is_stock(Side::Home)
    }

    pub fn away_stock(&self) -> bool {
        self.is_stock(Side::Away)
    }

    /// Either description mentions a steal or block.
    pub fn is_stock_play(&self) -> bool {
        self.home_stock() || self.away_stock()
    }

    /// This side scored: a made field goal, or a free throw that changed the score.
    pub fn is_bucket(&self, side: Side) -> bool {
        if self.description(side).is_none() {
            return false;
        }
        match self.kind() {
            EventKind::FieldGoalMade => true,
            EventKind::FreeThrow => self.score_text().is_some(),
            _ => false,
        }
    }

    pub fn home_bucket(&self) -> bool {
        self.is_bucket(Side::Home)
    }

    pub fn away_bucket(&self) -> bool {
        self.is_bucket(Side::Away)
    }

    /// Stealer (player 2) or, failing that, blocker (player 3).
    pub fn stock_credit(&self) -> Option<StockCredit> {
        let (player_id, name, team) = if self.player2_id != 0 {
            (
                self.player2_id,
                &self.player2_name,
                &self.player2_team_abbreviation,
            )
        } else if self.player3_id != 0 {
            (
                self.player3_id,
                &self.player3_name,
                &self.player3_team_abbreviation,
            )
        } else {
            return None;
        };

        Some(StockCredit {
            player_id,
            player_name: name.clone()?,
            team: team.clone().unwrap_or_default(),
        })
    }
}
