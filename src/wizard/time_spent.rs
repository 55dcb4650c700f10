//! Time Spent
//!
//! Parses work-log durations such as `1w 2d 3h 4m`. Units must appear in
//! descending order (weeks, days, hours, minutes), at most once each, and
//! never with a zero value.

use std::{fmt, str::FromStr, sync::LazyLock};

use regex::Regex;
use thiserror::Error;

static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+)([wdhm])").unwrap_or_else(|e| panic!("invalid time token regex: {e}"))
});

/// Minimum raw input length accepted by the prompt.
pub const MIN_TIME_INPUT_LENGTH: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TimeUnit {
    Weeks,
    Days,
    Hours,
    Minutes,
}

impl TimeUnit {
    fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "w" => Some(TimeUnit::Weeks),
            "d" => Some(TimeUnit::Days),
            "h" => Some(TimeUnit::Hours),
            "m" => Some(TimeUnit::Minutes),
            _ => None,
        }
    }

    const fn suffix(self) -> char {
        match self {
            TimeUnit::Weeks => 'w',
            TimeUnit::Days => 'd',
            TimeUnit::Hours => 'h',
            TimeUnit::Minutes => 'm',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeSpentError {
    #[error("The time must have at least {MIN_TIME_INPUT_LENGTH} characters")]
    TooShort,

    #[error("The time must contain at least one unit (w, d, h, m)")]
    NoUnits,

    #[error("The time must not contain zero values")]
    ZeroValue,

    #[error("The time value '{0}' is too large")]
    Overflow(String),

    #[error("The time must not contain duplicate units")]
    DuplicateUnit,

    #[error("The time must be in descending order of units")]
    WrongOrder,
}

/// A validated duration, e.g. `1d 4h`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSpent {
    tokens: Vec<(u32, TimeUnit)>,
}

impl TimeSpent {
    #[cfg(test)]
    fn tokens(&self) -> &[(u32, TimeUnit)] {
        &self.tokens
    }
}

impl FromStr for TimeSpent {
    type Err = TimeSpentError;

    /// Extracts the `<number><unit>` tokens from `input` and validates them.
    /// Anything between tokens (spaces, commas) is ignored.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        if input.chars().count() < MIN_TIME_INPUT_LENGTH {
            return Err(TimeSpentError::TooShort);
        }

        let mut tokens: Vec<(u32, TimeUnit)> = Vec::new();

        for captures in TOKEN.captures_iter(input) {
            let digits = &captures[1];
            let value: u32 = digits
                .parse()
                .map_err(|_| TimeSpentError::Overflow(digits.to_string()))?;
            let Some(unit) = TimeUnit::from_suffix(&captures[2]) else {
                continue;
            };

            if value == 0 {
                return Err(TimeSpentError::ZeroValue);
            }

            if tokens.iter().any(|(_, seen)| *seen == unit) {
                return Err(TimeSpentError::DuplicateUnit);
            }

            if tokens.last().is_some_and(|(_, previous)| unit <= *previous) {
                return Err(TimeSpentError::WrongOrder);
            }

            tokens.push((value, unit));
        }

        if tokens.is_empty() {
            return Err(TimeSpentError::NoUnits);
        }

        Ok(TimeSpent { tokens })
    }
}

impl fmt::Display for TimeSpent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self
            .tokens
            .iter()
            .map(|(value, unit)| format!("{value}{}", unit.suffix()))
            .collect::<Vec<_>>()
            .join(" ");

        f.write_str(&text)
    }
}
