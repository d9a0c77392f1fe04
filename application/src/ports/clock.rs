//! Clock port
//!
//! Use cases read the current time through this port so archive, close and
//! comment timestamps can be pinned in tests.

use chrono::{DateTime, Utc};

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
