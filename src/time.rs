//! Temporal values.
//!
//! Two families are encoded differently:
//!
//! - **Temporal** values (dates, times, timestamps, durations) are written as
//!   their standard ISO-8601 text, quoted. chrono's own `Serialize` impls
//!   already do this; [`iso8601`] covers types that only offer `Display`.
//! - **Legacy dates** are written as the epoch-millisecond count in a quoted
//!   string, e.g. `"0"` for the epoch. Use [`EpochMillis`] directly or annotate
//!   a `SystemTime`/`DateTime` field with [`epoch_millis`].
//!
//! ```rust
//! use serde::Serialize;
//! use serde_graphjson::{time::EpochMillis, to_string};
//! use std::time::SystemTime;
//!
//! #[derive(Serialize)]
//! struct Event {
//!     created: EpochMillis,
//!     #[serde(with = "serde_graphjson::time::epoch_millis")]
//!     updated: SystemTime,
//! }
//!
//! let event = Event {
//!     created: EpochMillis::new(1_500),
//!     updated: SystemTime::UNIX_EPOCH,
//! };
//! assert_eq!(to_string(&event).unwrap(), r#"{"created":"1500","updated":"0"}"#);
//! ```

use chrono::{DateTime, NaiveDateTime, TimeZone};
use serde::{Serialize, Serializer};
use std::time::{SystemTime, UNIX_EPOCH};

/// Anything that can report a point in time as milliseconds since the Unix
/// epoch.
pub trait AsEpochMillis {
    fn epoch_millis(&self) -> i64;
}

impl AsEpochMillis for SystemTime {
    fn epoch_millis(&self) -> i64 {
        match self.duration_since(UNIX_EPOCH) {
            Ok(after) => i64::try_from(after.as_millis()).unwrap_or(i64::MAX),
            Err(err) => {
                // floor toward negative infinity
                let before = err.duration();
                let partial = u128::from(before.subsec_nanos() % 1_000_000 != 0);
                i64::try_from(before.as_millis() + partial)
                    .map(|ms| -ms)
                    .unwrap_or(i64::MIN)
            }
        }
    }
}

impl<Tz: TimeZone> AsEpochMillis for DateTime<Tz> {
    fn epoch_millis(&self) -> i64 {
        self.timestamp_millis()
    }
}

/// Naive date-times are taken to be in UTC.
impl AsEpochMillis for NaiveDateTime {
    fn epoch_millis(&self) -> i64 {
        self.and_utc().timestamp_millis()
    }
}

/// A legacy date value: milliseconds since the Unix epoch, encoded as a
/// quoted decimal string.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EpochMillis(i64);

impl EpochMillis {
    #[must_use]
    pub const fn new(millis: i64) -> Self {
        EpochMillis(millis)
    }

    #[must_use]
    pub fn now() -> Self {
        SystemTime::now().into()
    }

    #[must_use]
    pub const fn as_millis(self) -> i64 {
        self.0
    }
}

impl AsEpochMillis for EpochMillis {
    fn epoch_millis(&self) -> i64 {
        self.0
    }
}

impl From<SystemTime> for EpochMillis {
    fn from(time: SystemTime) -> Self {
        EpochMillis(time.epoch_millis())
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for EpochMillis {
    fn from(time: DateTime<Tz>) -> Self {
        EpochMillis(time.epoch_millis())
    }
}

impl Serialize for EpochMillis {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&self.0)
    }
}

/// `#[serde(serialize_with)]`/`#[serde(with)]` helper writing any
/// [`AsEpochMillis`] value as a legacy date.
pub mod epoch_millis {
    use super::AsEpochMillis;
    use serde::Serializer;

    pub fn serialize<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: AsEpochMillis + ?Sized,
        S: Serializer,
    {
        serializer.collect_str(&value.epoch_millis())
    }
}

/// `#[serde(serialize_with)]`/`#[serde(with)]` helper writing a temporal
/// value through its `Display` impl, e.g. `chrono::Duration` (`PT90S`).
pub mod iso8601 {
    use serde::Serializer;
    use std::fmt::Display;

    pub fn serialize<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Display + ?Sized,
        S: Serializer,
    {
        serializer.collect_str(value)
    }
}
