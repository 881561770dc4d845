//! Domain types for the last-reachable-stop engine.
//!
//! These types represent validated schedule data. Invariants are
//! enforced at construction time, so code that receives them can trust
//! their validity.

mod geo;
mod minute;
mod station;

pub use geo::{Coordinate, haversine_km};
pub use minute::{DEFAULT_WRAP_THRESHOLD_HOUR, ServiceMinute, TimeDisplay, TimeError};
pub use station::{InvalidStopId, Station, StopId};
