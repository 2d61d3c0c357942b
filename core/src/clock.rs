// hamper/src/clock.rs

//! Time source seam. Expiry is pull-based (evaluated on every read), so the
//! only thing the store needs from the environment is "now". `ManualClock`
//! makes the absolute-expiry behavior testable without sleeping.

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;

pub trait Clock: Send + Sync {
  fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
pub struct SystemClock;

impl Clock for SystemClock {
  fn now(&self) -> DateTime<Utc> {
    Utc::now()
  }
}

/// A settable clock for tests and examples.
pub struct ManualClock {
  now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
  pub fn new(start: DateTime<Utc>) -> Self {
    ManualClock { now: Mutex::new(start) }
  }

  pub fn set(&self, to: DateTime<Utc>) {
    *self.now.lock() = to;
  }

  pub fn advance(&self, by: Duration) {
    let mut now = self.now.lock();
    *now = *now + by;
  }
}

impl Clock for ManualClock {
  fn now(&self) -> DateTime<Utc> {
    *self.now.lock()
  }
}
