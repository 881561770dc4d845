//! Deterministic taxi fare estimation.
//!
//! The estimate approximates the metered fare for the final road leg
//! from a reachable station to the target. Every constant is a named,
//! tunable field: the figures below follow Tokyo special-ward metering
//! plus empirical corrections that bring the number close to dispatch
//! app quotes.

use crate::domain::ServiceMinute;

/// Tunable fare constants.
#[derive(Debug, Clone)]
pub struct FareSchedule {
    /// Straight-line to road distance correction.
    pub road_factor: f64,

    /// Flagfall fare in currency units.
    pub base_fare: u32,

    /// Distance covered by the flagfall, in metres.
    pub base_distance_m: f64,

    /// Metres per metered increment beyond the flagfall distance.
    pub increment_m: f64,

    /// Fare per metered increment.
    pub increment_fare: u32,

    /// Late-night surcharge multiplier.
    pub night_multiplier: f64,

    /// Hour (extended axis) from which the night surcharge applies.
    pub night_start_hour: u32,

    /// Clock hour before which the night surcharge still applies.
    pub night_end_hour: u32,

    /// Dispatch, signal-wait and congestion premium not captured by
    /// metered distance.
    pub market_factor: f64,
}

impl Default for FareSchedule {
    fn default() -> Self {
        Self {
            road_factor: 1.4,
            base_fare: 500,
            base_distance_m: 1096.0,
            increment_m: 255.0,
            increment_fare: 100,
            night_multiplier: 1.2,
            night_start_hour: 22,
            night_end_hour: 5,
            market_factor: 1.25,
        }
    }
}

impl FareSchedule {
    /// Whether an arrival time falls in the surcharge window
    /// [22:00, 29:59] on the extended axis, or a raw clock hour
    /// before 05:00.
    pub fn is_night(&self, arrival: ServiceMinute) -> bool {
        let hour = arrival.hour();
        hour >= self.night_start_hour || hour < self.night_end_hour
    }

    /// Estimate the fare for a straight-line distance, arriving at the
    /// given time.
    pub fn estimate(&self, straight_km: f64, arrival: ServiceMinute) -> u32 {
        self.estimate_with_night(straight_km, self.is_night(arrival))
    }

    /// Estimate with an explicit night flag.
    pub fn estimate_with_night(&self, straight_km: f64, night: bool) -> u32 {
        let road_m = straight_km * self.road_factor * 1000.0;

        let metered = if road_m <= self.base_distance_m {
            self.base_fare
        } else {
            let increments = ((road_m - self.base_distance_m) / self.increment_m).ceil() as u32;
            self.base_fare + increments * self.increment_fare
        };

        let mut fare = metered as f64;
        if night {
            fare = (fare * self.night_multiplier).floor();
        }
        fare = (fare * self.market_factor).floor();

        round_to_ten(fare as u32)
    }
}

fn round_to_ten(fare: u32) -> u32 {
    ((fare + 5) / 10) * 10
}
