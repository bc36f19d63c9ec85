//! Period clock arithmetic.
//!
//! Play-by-play rows carry the time left in the period as `M:SS`. The clock
//! counts down, so the time elapsed between two plays is the earlier reading
//! minus the later one.

use crate::error::AppError;
use chrono::TimeDelta;
use std::fmt;
use std::str::FromStr;

/// Time remaining in the period, as shown on the game clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GameClock {
    remaining: TimeDelta,
}

impl GameClock {
    /// Parses an `M:SS` clock reading such as `11:42` or `0:07`.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let trimmed = raw.trim();
        let (minutes, seconds) = trimmed
            .split_once(':')
            .ok_or_else(|| AppError::game_clock_parse(raw))?;

        let minutes: i64 = minutes
            .parse()
            .map_err(|_| AppError::game_clock_parse(raw))?;
        let seconds: i64 = seconds
            .parse()
            .map_err(|_| AppError::game_clock_parse(raw))?;

        if minutes < 0 || !(0..60).contains(&seconds) {
            return Err(AppError::game_clock_parse(raw));
        }

        let remaining = minutes
            .checked_mul(60)
            .and_then(|m| m.checked_add(seconds))
            .and_then(TimeDelta::try_seconds)
            .ok_or_else(|| AppError::game_clock_parse(raw))?;

        Ok(GameClock { remaining })
    }

    pub fn remaining(&self) -> TimeDelta {
        self.remaining
    }

    pub fn minutes(&self) -> i64 {
        self.remaining.num_minutes()
    }

    pub fn seconds(&self) -> i64 {
        self.remaining.num_seconds() % 60
    }
}

impl FromStr for GameClock {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GameClock::parse(s)
    }
}

impl fmt::Display for GameClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.minutes(), self.seconds())
    }
}

/// Game time elapsed from `earlier` to `later`. Negative when `later` belongs to a
/// new period (the clock was reset upwards).
pub fn elapsed_between(earlier: &GameClock, later: &GameClock) -> TimeDelta {
    earlier.remaining - later.remaining
}

/// Whether `later` happened no more than `max_seconds` of game time after `earlier`,
/// within the same period.
pub fn is_within_window(earlier: &GameClock, later: &GameClock, max_seconds: i64) -> bool {
    let elapsed = elapsed_between(earlier, later);
    // A bound past TimeDelta's range admits every forward gap
    elapsed >= TimeDelta::zero()
        && TimeDelta::try_seconds(max_seconds).is_none_or(|max| elapsed <= max)
}
