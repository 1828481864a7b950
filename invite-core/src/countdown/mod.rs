//! Time remaining until the event starts.
//!
//! Every sample is derived from the absolute difference between the target and
//! the clock, never by decrementing the previous value. Clock jumps, suspended
//! hosts and missed ticks are corrected on the next sample.

mod ticker;

pub use ticker::{Countdown, Tick};

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::clock::TimeSource;
use crate::event::Event;

const SECONDS_PER_DAY: u64 = 86_400;
const SECONDS_PER_HOUR: u64 = 3_600;
const SECONDS_PER_MINUTE: u64 = 60;

/// Decomposed time until the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RemainingDuration {
    pub days: u64,
    /// 0-23
    pub hours: u8,
    /// 0-59
    pub minutes: u8,
    /// 0-59
    pub seconds: u8,
    /// The target instant has been reached. All components are zero.
    pub reached: bool,
}

impl RemainingDuration {
    /// Terminal value once the target has passed.
    pub const REACHED: RemainingDuration = RemainingDuration {
        days: 0,
        hours: 0,
        minutes: 0,
        seconds: 0,
        reached: true,
    };

    /// Split a number of whole seconds into days, hours, minutes and seconds.
    pub fn from_seconds(total: u64) -> Self {
        RemainingDuration {
            days: total / SECONDS_PER_DAY,
            hours: ((total / SECONDS_PER_HOUR) % 24) as u8,
            minutes: ((total / SECONDS_PER_MINUTE) % 60) as u8,
            seconds: (total % 60) as u8,
            reached: false,
        }
    }

    /// Remaining time from `now` to `target`, floored to whole seconds.
    pub fn between(now: DateTime<Utc>, target: DateTime<Utc>) -> Self {
        if now >= target {
            return Self::REACHED;
        }

        // Positive here, so truncation is a floor.
        let delta = (target - now).num_seconds();
        Self::from_seconds(u64::try_from(delta).unwrap_or(0))
    }

    pub fn total_seconds(&self) -> u64 {
        self.days * SECONDS_PER_DAY
            + u64::from(self.hours) * SECONDS_PER_HOUR
            + u64::from(self.minutes) * SECONDS_PER_MINUTE
            + u64::from(self.seconds)
    }
}

impl fmt::Display for RemainingDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}d {:02}h {:02}m {:02}s",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

/// Samples the remaining time to a fixed target.
#[derive(Clone)]
pub struct CountdownEngine {
    target: DateTime<Utc>,
    clock: Arc<dyn TimeSource>,
}

impl CountdownEngine {
    pub fn new(target: DateTime<Utc>, clock: Arc<dyn TimeSource>) -> Self {
        CountdownEngine { target, clock }
    }

    /// Count down to the start of `event`.
    pub fn for_event(event: &Event, clock: Arc<dyn TimeSource>) -> Self {
        Self::new(event.start_utc(), clock)
    }

    pub fn target(&self) -> DateTime<Utc> {
        self.target
    }

    pub fn sample(&self) -> RemainingDuration {
        RemainingDuration::between(self.clock.now(), self.target)
    }
}

impl fmt::Debug for CountdownEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CountdownEngine")
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use chrono::Duration;

    fn at(rfc3339: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(rfc3339).unwrap().with_timezone(&Utc)
    }

    fn engine_at(now: &str) -> (CountdownEngine, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(at(now)));
        let engine = CountdownEngine::new(at("2026-02-21T17:00:00-03:00"), clock.clone());
        (engine, clock)
    }

    #[test]
    fn test_one_day_before_start() {
        let (engine, _) = engine_at("2026-02-20T17:00:00-03:00");

        assert_eq!(
            engine.sample(),
            RemainingDuration {
                days: 1,
                hours: 0,
                minutes: 0,
                seconds: 0,
                reached: false,
            }
        );
    }

    #[test]
    fn test_offset_is_respected_across_zones() {
        // 19:59:59 UTC is one second before 17:00 at -03:00
        let (engine, _) = engine_at("2026-02-21T19:59:59Z");

        let remaining = engine.sample();
        assert_eq!(remaining.total_seconds(), 1);
        assert!(!remaining.reached);
    }

    #[test]
    fn test_sub_second_remainder_is_floored() {
        let (engine, clock) = engine_at("2026-02-21T16:59:58-03:00");
        clock.advance(Duration::milliseconds(500));

        let remaining = engine.sample();
        assert_eq!(remaining.seconds, 1);
        assert!(!remaining.reached);
    }

    #[test]
    fn test_reached_is_terminal() {
        let (engine, clock) = engine_at("2026-02-21T16:59:59-03:00");
        assert!(!engine.sample().reached);

        clock.advance(Duration::seconds(1));
        assert_eq!(engine.sample(), RemainingDuration::REACHED);

        for step in [1, 59, 3_600, 86_400 * 400] {
            clock.advance(Duration::seconds(step));
            assert_eq!(engine.sample(), RemainingDuration::REACHED);
        }
    }

    #[test]
    fn test_clock_jump_backwards_recomputes_from_scratch() {
        let (engine, clock) = engine_at("2026-02-21T17:00:00-03:00");
        assert!(engine.sample().reached);

        clock.set(at("2026-02-21T16:00:00-03:00"));
        let remaining = engine.sample();
        assert!(!remaining.reached);
        assert_eq!(remaining.hours, 1);
        assert_eq!(remaining.total_seconds(), 3_600);
    }

    #[test]
    fn test_never_negative_over_a_sweep() {
        let (engine, clock) = engine_at("2026-02-19T00:00:00-03:00");
        let mut previous = engine.sample().total_seconds();

        // Steps of 7h 13m 17s walk across the target and well past it.
        for _ in 0..20 {
            clock.advance(Duration::seconds(7 * 3_600 + 13 * 60 + 17));
            let remaining = engine.sample();
            assert!(remaining.total_seconds() <= previous);
            if remaining.reached {
                assert_eq!(remaining.total_seconds(), 0);
            }
            previous = remaining.total_seconds();
        }
        assert!(engine.sample().reached);
    }

    #[test]
    fn test_decomposition_recombines() {
        for total in [0, 1, 59, 60, 3_599, 3_600, 86_399, 86_400, 90_061, 31_622_399] {
            let r = RemainingDuration::from_seconds(total);
            assert_eq!(
                r.days * 86_400
                    + u64::from(r.hours) * 3_600
                    + u64::from(r.minutes) * 60
                    + u64::from(r.seconds),
                total
            );
            assert!(r.hours < 24);
            assert!(r.minutes < 60);
            assert!(r.seconds < 60);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(
            RemainingDuration::from_seconds(90_061).to_string(),
            "1d 01h 01m 01s"
        );
        assert_eq!(RemainingDuration::REACHED.to_string(), "0d 00h 00m 00s");
    }

    #[test]
    fn test_for_event_targets_start() {
        let event = crate::event::tests::make_test_event();
        let clock = Arc::new(ManualClock::new(at("2026-02-21T12:00:00-03:00")));

        let engine = CountdownEngine::for_event(&event, clock);
        assert_eq!(engine.target(), at("2026-02-21T20:00:00Z"));
        assert_eq!(engine.sample().hours, 5);
    }
}
