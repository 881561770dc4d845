//! Application state for the web layer.

use std::sync::Arc;

use crate::fare::FareSchedule;
use crate::planner::SearchConfig;
use crate::stations::StationRegistry;
use crate::timetable::TimetableIndex;

/// Shared application state.
///
/// Everything here is built once at startup and read-only afterwards,
/// so requests share it without locking.
#[derive(Clone)]
pub struct AppState {
    /// Station id/name lookup.
    pub registry: Arc<StationRegistry>,

    /// Precomputed timetable index.
    pub index: Arc<TimetableIndex>,

    /// Search configuration.
    pub config: Arc<SearchConfig>,

    /// Taxi fare constants.
    pub fares: Arc<FareSchedule>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        registry: StationRegistry,
        index: TimetableIndex,
        config: SearchConfig,
        fares: FareSchedule,
    ) -> Self {
        Self {
            registry: Arc::new(registry),
            index: Arc::new(index),
            config: Arc::new(config),
            fares: Arc::new(fares),
        }
    }
}
