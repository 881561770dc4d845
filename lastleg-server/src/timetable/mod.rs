//! Timetable data: raw entries, the precomputed index, and loading.

mod index;
mod loader;

use std::fmt;
use std::sync::Arc;

use crate::domain::{ServiceMinute, StopId};

pub use index::{IndexError, TimetableIndex};
pub use loader::{LoadError, LoadedData, demo_network, load_from_dir};

/// Identifier of one scheduled run (e.g. `"Toyoko_Last_Kikuna"`).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TripId(Arc<str>);

impl TripId {
    pub fn new(s: &str) -> Self {
        Self(Arc::from(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for TripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TripId({})", self.as_str())
    }
}

impl fmt::Display for TripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the timetable: a trip calling at a stop.
///
/// Within a trip, `sequence` strictly increases along the run and
/// uniquely orders its stops. Unparseable times carry the
/// [`ServiceMinute::UNREACHABLE`] sentinel rather than failing the row.
#[derive(Debug, Clone, PartialEq)]
pub struct TimetableEntry {
    pub trip: TripId,
    pub stop: StopId,
    pub arrival: ServiceMinute,
    pub departure: ServiceMinute,
    pub sequence: u32,
}
