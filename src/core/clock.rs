//! Time source abstraction
//!
//! Age validation and token expiry both depend on "now". Components take the
//! clock as an injected trait object so tests can pin the instant instead of
//! racing the wall clock.

use chrono::{DateTime, Utc};

/// Supplies the current instant
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time in UTC
#[derive(Debug, Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at a fixed instant
#[derive(Debug, Clone)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
