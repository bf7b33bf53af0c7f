//! Wall-clock stopwatch for a session.
//!
//! Runs from the first explicit start until the session reaches its results,
//! where it is frozen. Every operation has an `_at` form taking the current
//! instant so callers (and tests) control the clock.

use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum StopwatchState {
    #[default]
    Idle,
    Running {
        started_at: Instant,
    },
    Frozen {
        started_at: Instant,
        stopped_at: Instant,
    },
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Stopwatch {
    state: StopwatchState,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self) {
        self.start_at(Instant::now());
    }

    /// Records the start instant. A running or frozen stopwatch is left as is.
    pub fn start_at(&mut self, now: Instant) {
        if let StopwatchState::Idle = self.state {
            self.state = StopwatchState::Running { started_at: now };
        }
    }

    pub fn stop(&mut self) {
        self.stop_at(Instant::now());
    }

    pub fn stop_at(&mut self, now: Instant) {
        if let StopwatchState::Running { started_at } = self.state {
            self.state = StopwatchState::Frozen {
                started_at,
                stopped_at: now.max(started_at),
            };
        }
    }

    pub fn sample(&self) -> Option<Duration> {
        self.sample_at(Instant::now())
    }

    /// Elapsed time while running, the frozen value once stopped,
    /// `None` if the stopwatch was never started.
    pub fn sample_at(&self, now: Instant) -> Option<Duration> {
        match self.state {
            StopwatchState::Idle => None,
            StopwatchState::Running { started_at } => Some(now.saturating_duration_since(started_at)),
            StopwatchState::Frozen {
                started_at,
                stopped_at,
            } => Some(stopped_at.duration_since(started_at)),
        }
    }

    pub fn reset(&mut self) {
        self.state = StopwatchState::Idle;
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, StopwatchState::Running { .. })
    }

    pub fn was_started(&self) -> bool {
        !matches!(self.state, StopwatchState::Idle)
    }
}

/// Formats a duration as `mm:ss.t`, the way the stopwatch label shows it.
pub fn format_elapsed(elapsed: Duration) -> String {
    let tenths = elapsed.as_millis() / 100;
    let minutes = tenths / 600;
    let seconds = (tenths / 10) % 60;
    format!("{:02}:{:02}.{}", minutes, seconds, tenths % 10)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_sample_is_none() {
        let watch = Stopwatch::new();
        assert_eq!(watch.sample_at(Instant::now()), None);
        assert!(!watch.was_started());
    }

    #[test]
    fn test_running_sample_grows() {
        let t0 = Instant::now();
        let mut watch = Stopwatch::new();
        watch.start_at(t0);

        assert!(watch.is_running());
        assert_eq!(
            watch.sample_at(t0 + Duration::from_secs(3)),
            Some(Duration::from_secs(3))
        );
    }

    #[test]
    fn test_start_is_idempotent() {
        let t0 = Instant::now();
        let mut watch = Stopwatch::new();
        watch.start_at(t0);
        watch.start_at(t0 + Duration::from_secs(5));

        assert_eq!(
            watch.sample_at(t0 + Duration::from_secs(10)),
            Some(Duration::from_secs(10))
        );
    }

    #[test]
    fn test_stop_freezes() {
        let t0 = Instant::now();
        let mut watch = Stopwatch::new();
        watch.start_at(t0);
        watch.stop_at(t0 + Duration::from_secs(4));

        assert!(!watch.is_running());
        assert!(watch.was_started());
        assert_eq!(
            watch.sample_at(t0 + Duration::from_secs(100)),
            Some(Duration::from_secs(4))
        );

        // A frozen stopwatch does not restart.
        watch.start_at(t0 + Duration::from_secs(200));
        assert_eq!(
            watch.sample_at(t0 + Duration::from_secs(300)),
            Some(Duration::from_secs(4))
        );
    }

    #[test]
    fn test_stop_without_start_does_nothing() {
        let mut watch = Stopwatch::new();
        watch.stop_at(Instant::now());
        assert!(!watch.was_started());
    }

    #[test]
    fn test_reset() {
        let t0 = Instant::now();
        let mut watch = Stopwatch::new();
        watch.start_at(t0);
        watch.reset();

        assert_eq!(watch.sample_at(t0), None);
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::from_millis(0)), "00:00.0");
        assert_eq!(format_elapsed(Duration::from_millis(65_432)), "01:05.4");
        assert_eq!(format_elapsed(Duration::from_secs(600)), "10:00.0");
    }
}
