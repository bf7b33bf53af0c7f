//! Summary statistics computed when a session reaches its results screen.

use super::Session;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResultError {
    #[error("no cards were shown, percentages are undefined")]
    DivisionUndefined,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionResult {
    pub cards_shown: usize,
    pub known: usize,
    pub unknown: usize,
    pub known_pct: Option<f64>,
    pub unknown_pct: Option<f64>,
    /// Seconds on the stopwatch, present only if it was started.
    pub duration: Option<f64>,
}

impl SessionResult {
    pub fn new(cards_shown: usize, known: usize, unknown: usize, duration: Option<f64>) -> Self {
        let (known_pct, unknown_pct) = match percentage(known, cards_shown) {
            Ok(known_pct) => (
                Some(known_pct),
                percentage(unknown, cards_shown).ok(),
            ),
            Err(_) => (None, None),
        };
        Self {
            cards_shown,
            known,
            unknown,
            known_pct,
            unknown_pct,
            duration,
        }
    }

    /// Returns `(known_pct, unknown_pct)`.
    pub fn percentages(&self) -> Result<(f64, f64), ResultError> {
        match (self.known_pct, self.unknown_pct) {
            (Some(known), Some(unknown)) => Ok((known, unknown)),
            _ => Err(ResultError::DivisionUndefined),
        }
    }
}

fn percentage(part: usize, whole: usize) -> Result<f64, ResultError> {
    if whole == 0 {
        return Err(ResultError::DivisionUndefined);
    }
    Ok(part as f64 / whole as f64 * 100.0)
}

/// Builds the result snapshot for the current state of a session.
pub fn summarize(session: &Session) -> SessionResult {
    SessionResult::new(
        session.position(),
        session.known_count(),
        session.unknown_count(),
        session
            .stopwatch()
            .sample()
            .map(|elapsed| elapsed.as_secs_f64()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentages() {
        let result = SessionResult::new(3, 2, 1, None);
        let (known, unknown) = result.percentages().unwrap();

        assert!((known - 66.666).abs() < 0.01);
        assert!((unknown - 33.333).abs() < 0.01);
        assert_eq!(result.duration, None);
    }

    #[test]
    fn test_zero_cards_is_undefined() {
        let result = SessionResult::new(0, 0, 0, None);

        assert_eq!(result.known_pct, None);
        assert_eq!(result.unknown_pct, None);
        assert_eq!(result.percentages(), Err(ResultError::DivisionUndefined));
    }

    #[test]
    fn test_unmarked_cards_lower_both_percentages() {
        // Cards passed with a step-forward still count as shown.
        let result = SessionResult::new(4, 1, 1, Some(12.5));
        let (known, unknown) = result.percentages().unwrap();

        assert_eq!(known, 25.0);
        assert_eq!(unknown, 25.0);
        assert_eq!(result.duration, Some(12.5));
    }
}
