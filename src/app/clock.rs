//! Clock injection.
//!
//! Day keys depend on device-local time, so "now" and the UTC offset are
//! injected rather than read from a global inside the aggregation path.

use chrono::{DateTime, FixedOffset, Local};

/// Source of the current instant, carrying its own UTC offset.
pub trait Clock: Send + Sync {
    /// The current instant in the device's offset.
    fn now(&self) -> DateTime<FixedOffset>;

    /// The current instant as epoch ms.
    fn now_ms(&self) -> i64 {
        self.now().timestamp_millis()
    }
}

/// Clock backed by the device's local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}
