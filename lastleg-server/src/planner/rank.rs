//! Ranking reachable stations by taxi fare or remaining distance.

use serde::Serialize;
use tracing::debug;

use crate::domain::{Coordinate, StopId, haversine_km};
use crate::fare::FareSchedule;
use crate::stations::StationRegistry;

use super::config::{RankBy, SearchConfig};
use super::search::SearchOutcome;

/// Where the rider ultimately wants to go.
///
/// One tagged type covers both call shapes: a named station or a raw
/// coordinate (home is rarely a station).
#[derive(Debug, Clone)]
pub enum Target {
    Station(StopId),
    Coordinate(Coordinate),
}

impl Target {
    /// The coordinate to measure remaining distance against.
    /// `None` when a named station is not in the registry.
    pub fn resolve(&self, registry: &StationRegistry) -> Option<Coordinate> {
        match self {
            Target::Station(id) => registry.get(id).map(|s| s.coordinate()),
            Target::Coordinate(c) => Some(*c),
        }
    }
}

/// One ranked candidate: get off here, taxi the rest.
#[derive(Debug, Clone, Serialize)]
pub struct RankedStop {
    /// Station display name.
    pub station: String,

    /// Arrival time rendered per the configured display policy.
    pub arrival_time: String,

    /// Remaining straight-line distance to the target, 2 dp.
    pub distance_to_target_km: f64,

    /// Stations on the route, start included.
    pub leg_count: usize,

    /// Estimated taxi fare for the remaining distance.
    pub estimated_fare: u32,

    /// Stable id of the alighting station.
    pub stop_id: String,
}

/// Annotate every labeled station with distance and fare, then order
/// and truncate per the configured policy.
pub fn rank_reachable(
    outcome: &SearchOutcome,
    start: &StopId,
    target: Coordinate,
    registry: &StationRegistry,
    fares: &FareSchedule,
    config: &SearchConfig,
) -> Vec<RankedStop> {
    let mut ranked = Vec::with_capacity(outcome.labels.len());

    for (stop_id, label) in &outcome.labels {
        if !config.include_start && stop_id == start {
            continue;
        }
        let Some(station) = registry.get(stop_id) else {
            // Timetable rows can reference stops missing from the stop
            // table; they cannot be scored without a coordinate.
            debug!(stop = %stop_id, "labeled stop missing from station table, skipped");
            continue;
        };

        let distance_km = haversine_km(station.coordinate(), target);
        let fare = fares.estimate(distance_km, label.arrival);

        ranked.push(RankedStop {
            station: station.name.clone(),
            arrival_time: label.arrival.format(config.display),
            distance_to_target_km: (distance_km * 100.0).round() / 100.0,
            leg_count: label.route.len(),
            estimated_fare: fare,
            stop_id: stop_id.as_str().to_string(),
        });
    }

    match config.rank_by {
        RankBy::Fare => ranked.sort_by(|a, b| {
            a.estimated_fare
                .cmp(&b.estimated_fare)
                .then_with(|| a.distance_to_target_km.total_cmp(&b.distance_to_target_km))
                .then_with(|| a.stop_id.cmp(&b.stop_id))
        }),
        RankBy::Distance => ranked.sort_by(|a, b| {
            a.distance_to_target_km
                .total_cmp(&b.distance_to_target_km)
                .then_with(|| a.estimated_fare.cmp(&b.estimated_fare))
                .then_with(|| a.stop_id.cmp(&b.stop_id))
        }),
    }

    if let Some(limit) = config.max_results {
        ranked.truncate(limit);
    }

    ranked
}
