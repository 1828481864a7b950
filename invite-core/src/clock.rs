//! Sources of "now".

use chrono::{DateTime, Utc};

#[cfg(test)]
pub(crate) use manual::ManualClock;

/// Provides the current instant. Assumed always available.
pub trait TimeSource: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock of the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
