//! Service-minute time handling.
//!
//! Timetables for overnight service use extended-hour notation: a train
//! that leaves at 00:42 after a late-evening start is written "24:42" so
//! that it sorts after "23:59" of the same service night. This module
//! represents times as integer minutes on that extended axis. Parsing
//! shifts early-morning clock hours (below the wrap threshold) forward by
//! 24 hours, so every comparison in the engine is plain integer ordering.

use std::cmp::Ordering;
use std::fmt;

/// Clock hours strictly below this are treated as belonging to the
/// previous service day and shifted by +24h when parsed.
pub const DEFAULT_WRAP_THRESHOLD_HOUR: u32 = 4;

/// Largest hour accepted in extended notation ("29:59").
const MAX_EXTENDED_HOUR: u32 = 29;

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// How a service minute is rendered back to text.
///
/// A single policy is configured once and used for all presentation;
/// comparisons never depend on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeDisplay {
    /// Wrap back to a 0-23 clock ("00:42").
    Clock,
    /// Preserve extended hours ("24:42"), keeping the late-night feel.
    #[default]
    Diary,
}

/// A minute on the extended service-day axis.
///
/// Values run from 00:00 (0) up to 29:59 (1799), plus the
/// [`ServiceMinute::UNREACHABLE`] sentinel for unparseable timetable rows.
///
/// # Examples
///
/// ```
/// use lastleg_server::domain::{ServiceMinute, TimeDisplay, DEFAULT_WRAP_THRESHOLD_HOUR};
///
/// let t = ServiceMinute::parse("24:42", DEFAULT_WRAP_THRESHOLD_HOUR).unwrap();
/// assert_eq!(t.minutes(), 24 * 60 + 42);
/// assert_eq!(t.format(TimeDisplay::Diary), "24:42");
/// assert_eq!(t.format(TimeDisplay::Clock), "00:42");
///
/// // "00:42" means the same post-midnight minute
/// let wrapped = ServiceMinute::parse("00:42", DEFAULT_WRAP_THRESHOLD_HOUR).unwrap();
/// assert_eq!(wrapped, t);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ServiceMinute(u32);

impl ServiceMinute {
    /// Sentinel for a time that could not be parsed. Orders after every
    /// real service minute, so a bad row can never win a relaxation.
    pub const UNREACHABLE: ServiceMinute = ServiceMinute(u32::MAX);

    /// Construct from a raw minute count on the extended axis.
    pub fn from_minutes(minutes: u32) -> Self {
        Self(minutes)
    }

    /// Parse "HH:MM" or "HH:MM:SS".
    ///
    /// Hours 0-29 are accepted. Hours below `wrap_threshold_hour` are
    /// shifted by +24 so a post-midnight time stays ordered after the
    /// late evening that precedes it.
    pub fn parse(s: &str, wrap_threshold_hour: u32) -> Result<Self, TimeError> {
        let mut parts = s.split(':');

        let hour: u32 = parts
            .next()
            .and_then(|p| p.trim().parse().ok())
            .ok_or_else(|| TimeError::new("missing or non-numeric hour"))?;
        let minute: u32 = parts
            .next()
            .and_then(|p| p.trim().parse().ok())
            .ok_or_else(|| TimeError::new("missing or non-numeric minute"))?;

        // Optional seconds field; validated but otherwise ignored.
        if let Some(sec) = parts.next() {
            let sec: u32 = sec
                .trim()
                .parse()
                .map_err(|_| TimeError::new("non-numeric seconds"))?;
            if sec > 59 {
                return Err(TimeError::new("seconds must be 0-59"));
            }
        }
        if parts.next().is_some() {
            return Err(TimeError::new("too many fields"));
        }

        if hour > MAX_EXTENDED_HOUR {
            return Err(TimeError::new("hour must be 0-29"));
        }
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }

        let hour = if hour < wrap_threshold_hour {
            hour + 24
        } else {
            hour
        };

        Ok(Self(hour * 60 + minute))
    }

    /// Parse a timetable field, degrading to [`Self::UNREACHABLE`] on
    /// malformed input. One bad row must not abort index construction
    /// or an in-progress search.
    pub fn parse_lenient(s: &str, wrap_threshold_hour: u32) -> Self {
        Self::parse(s, wrap_threshold_hour).unwrap_or(Self::UNREACHABLE)
    }

    /// Raw minutes on the extended axis.
    pub fn minutes(&self) -> u32 {
        self.0
    }

    /// Hour on the extended axis (may exceed 23).
    pub fn hour(&self) -> u32 {
        self.0 / 60
    }

    /// True for the unparseable-row sentinel.
    pub fn is_unreachable(&self) -> bool {
        *self == Self::UNREACHABLE
    }

    /// Render according to the configured display policy.
    pub fn format(&self, display: TimeDisplay) -> String {
        if self.is_unreachable() {
            return "--:--".to_string();
        }
        let hour = match display {
            TimeDisplay::Clock => self.hour() % 24,
            TimeDisplay::Diary => self.hour(),
        };
        format!("{:02}:{:02}", hour, self.0 % 60)
    }
}

impl fmt::Debug for ServiceMinute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unreachable() {
            write!(f, "ServiceMinute(unreachable)")
        } else {
            write!(f, "ServiceMinute({})", self.format(TimeDisplay::Diary))
        }
    }
}

impl PartialOrd<u32> for ServiceMinute {
    fn partial_cmp(&self, other: &u32) -> Option<Ordering> {
        self.0.partial_cmp(other)
    }
}

impl PartialEq<u32> for ServiceMinute {
    fn eq(&self, other: &u32) -> bool {
        self.0 == *other
    }
}
