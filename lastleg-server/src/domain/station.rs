//! Station identity types.

use std::fmt;
use std::sync::Arc;

use crate::domain::geo::Coordinate;

/// Error returned when constructing an invalid stop id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid stop id: {reason}")]
pub struct InvalidStopId {
    reason: &'static str,
}

/// A stable station identifier from the stop table.
///
/// Stop ids are opaque non-empty strings (e.g. `"Shibuya"` or
/// `"新宿_山手線"`). This type guarantees non-emptiness by construction
/// and is cheap to clone, since one search stores the id in many route
/// vectors.
///
/// # Examples
///
/// ```
/// use lastleg_server::domain::StopId;
///
/// let id = StopId::parse("Shibuya").unwrap();
/// assert_eq!(id.as_str(), "Shibuya");
///
/// // Empty or blank ids are rejected
/// assert!(StopId::parse("").is_err());
/// assert!(StopId::parse("   ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StopId(Arc<str>);

impl StopId {
    /// Parse a stop id from a string.
    ///
    /// The input must contain at least one non-whitespace character.
    /// Surrounding whitespace is trimmed.
    pub fn parse(s: &str) -> Result<Self, InvalidStopId> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(InvalidStopId {
                reason: "must not be empty",
            });
        }
        Ok(StopId(Arc::from(trimmed)))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopId({})", self.as_str())
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A station from the stop table: stable id, display name, position.
///
/// Immutable once loaded; the registry hands out shared references.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub id: StopId,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

impl Station {
    /// The station's position as a coordinate pair.
    pub fn coordinate(&self) -> Coordinate {
        Coordinate {
            lat: self.lat,
            lon: self.lon,
        }
    }
}
