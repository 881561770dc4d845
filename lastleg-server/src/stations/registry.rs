//! Station lookup by id or display name.

use std::collections::HashMap;

use crate::domain::{Station, StopId};

/// Honorific suffix riders append to station names ("渋谷駅" for 渋谷).
const DEFAULT_NAME_SUFFIX: &str = "駅";

/// Immutable id and name lookup over the loaded station table.
///
/// Built once at startup; shared read-only across requests.
#[derive(Debug)]
pub struct StationRegistry {
    by_id: HashMap<StopId, Station>,
    by_name: HashMap<String, StopId>,
    name_suffix: String,
}

impl StationRegistry {
    /// Build a registry from the loaded station rows.
    ///
    /// When two rows share a display name, the first one wins for name
    /// resolution; both stay reachable by id.
    pub fn new(stations: Vec<Station>) -> Self {
        Self::with_name_suffix(stations, DEFAULT_NAME_SUFFIX)
    }

    /// Build a registry with a custom strippable display suffix.
    pub fn with_name_suffix(stations: Vec<Station>, name_suffix: &str) -> Self {
        let mut by_id = HashMap::with_capacity(stations.len());
        let mut by_name = HashMap::with_capacity(stations.len());

        for station in stations {
            by_name
                .entry(station.name.clone())
                .or_insert_with(|| station.id.clone());
            by_id.insert(station.id.clone(), station);
        }

        Self {
            by_id,
            by_name,
            name_suffix: name_suffix.to_string(),
        }
    }

    /// Look up a station by its stable id.
    pub fn get(&self, id: &StopId) -> Option<&Station> {
        self.by_id.get(id)
    }

    /// Resolve user input to a station: exact id first, then exact
    /// display name, then the name with the configured suffix stripped.
    pub fn resolve(&self, input: &str) -> Option<&Station> {
        if let Ok(id) = StopId::parse(input) {
            if let Some(station) = self.by_id.get(&id) {
                return Some(station);
            }
        }

        if let Some(id) = self.by_name.get(input) {
            return self.by_id.get(id);
        }

        if let Some(stripped) = input.strip_suffix(&self.name_suffix) {
            if let Some(id) = self.by_name.get(stripped) {
                return self.by_id.get(id);
            }
        }

        None
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
