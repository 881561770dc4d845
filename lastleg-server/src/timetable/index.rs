//! Precomputed timetable index.
//!
//! Built once from the raw entry table at startup, read-only thereafter.
//! Concurrent searches share it behind an `Arc` with no locking.

use std::collections::HashMap;

use super::{TimetableEntry, TripId};
use crate::domain::StopId;

/// Error from index construction.
///
/// Only structurally invalid input fails construction; individual bad
/// time strings degrade to the unreachable sentinel upstream.
#[derive(Debug, Clone, thiserror::Error)]
pub enum IndexError {
    /// Two entries in the same trip claim the same sequence index.
    #[error("trip {trip} has duplicate stop sequence {sequence}")]
    DuplicateSequence { trip: TripId, sequence: u32 },
}

/// Departures grouped by station and stop sequences grouped by trip.
/// [`TimetableIndex::build`] is the only way to construct one.
#[derive(Debug)]
pub struct TimetableIndex {
    /// Entries departing from each station, in no particular order.
    station_departures: HashMap<StopId, Vec<TimetableEntry>>,

    /// Entries of each trip, sorted by sequence.
    trip_stops: HashMap<TripId, Vec<TimetableEntry>>,
}

impl TimetableIndex {
    /// Build the index from raw timetable rows.
    ///
    /// This is the only place the structure is mutated.
    pub fn build(entries: Vec<TimetableEntry>) -> Result<Self, IndexError> {
        let mut station_departures: HashMap<StopId, Vec<TimetableEntry>> = HashMap::new();
        let mut trip_stops: HashMap<TripId, Vec<TimetableEntry>> = HashMap::new();

        for entry in entries {
            station_departures
                .entry(entry.stop.clone())
                .or_default()
                .push(entry.clone());
            trip_stops.entry(entry.trip.clone()).or_default().push(entry);
        }

        for (trip, stops) in &mut trip_stops {
            stops.sort_by_key(|e| e.sequence);
            for pair in stops.windows(2) {
                if pair[0].sequence == pair[1].sequence {
                    return Err(IndexError::DuplicateSequence {
                        trip: trip.clone(),
                        sequence: pair[0].sequence,
                    });
                }
            }
        }

        Ok(Self {
            station_departures,
            trip_stops,
        })
    }

    /// Departures originating at `stop`. Empty for unknown stations.
    pub fn departures_from(&self, stop: &StopId) -> &[TimetableEntry] {
        self.station_departures
            .get(stop)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Stops of `trip` strictly after sequence index `after`, in order.
    pub fn stops_after(&self, trip: &TripId, after: u32) -> &[TimetableEntry] {
        match self.trip_stops.get(trip) {
            None => &[],
            Some(stops) => {
                let from = stops.partition_point(|e| e.sequence <= after);
                &stops[from..]
            }
        }
    }

    /// All stops of `trip` in sequence order.
    pub fn trip(&self, trip: &TripId) -> &[TimetableEntry] {
        self.trip_stops.get(trip).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of distinct trips.
    pub fn trip_count(&self) -> usize {
        self.trip_stops.len()
    }

    /// Number of stations with at least one departure.
    pub fn station_count(&self) -> usize {
        self.station_departures.len()
    }
}
