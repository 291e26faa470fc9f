//! Layer 0: Time primitives
//!
//! WallClock for log-entry timestamps and report creation times.
//! Not an ordering primitive: persistence is last-write-wins.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Wall clock in milliseconds since the Unix epoch.
///
/// Copy is fine - it's a measurement, not causality.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WallClock(pub u64);

impl WallClock {
    pub fn now() -> Self {
        use std::time::{SystemTime, UNIX_EPOCH};
        let ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;
        Self(ms)
    }

    /// RFC 3339 rendering, the form log entries and reports carry.
    pub fn to_rfc3339(self) -> String {
        OffsetDateTime::from_unix_timestamp_nanos(i128::from(self.0) * 1_000_000)
            .ok()
            .and_then(|dt| dt.format(&Rfc3339).ok())
            .unwrap_or_else(|| "1970-01-01T00:00:00Z".to_string())
    }
}

/// Clock seam so engines can be driven deterministically in tests.
pub trait Clock {
    fn now(&self) -> WallClock;
}

/// System wall clock - the default for every engine.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> WallClock {
        WallClock::now()
    }
}

/// Fixed clock for tests.
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub WallClock);

impl Clock for FixedClock {
    fn now(&self) -> WallClock {
        self.0
    }
}
