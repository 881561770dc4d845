//! Search configuration.

use crate::domain::{DEFAULT_WRAP_THRESHOLD_HOUR, TimeDisplay};

/// Which key orders the ranked candidate list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RankBy {
    /// Cheapest estimated taxi fare first (the default).
    #[default]
    Fare,
    /// Shortest remaining distance to the target first.
    Distance,
}

/// Configuration parameters for a reachability search.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Maximum number of stations popped from the frontier before the
    /// whole search stops. Bounds runtime on dense timetables.
    pub explore_limit: usize,

    /// Service minute beyond which a label is not expanded further.
    /// 1800 = 30:00, the end of the extended service day.
    pub horizon_minute: u32,

    /// Whether the start station itself appears in results. Staying
    /// put and taking a taxi the whole way is a legitimate option.
    pub include_start: bool,

    /// Clock hours below this parse as next-day (+24h) times.
    pub wrap_threshold_hour: u32,

    /// How arrival times are rendered in results.
    pub display: TimeDisplay,

    /// Result ordering policy.
    pub rank_by: RankBy,

    /// Truncate the ranked list to this many candidates.
    pub max_results: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            explore_limit: 5000,
            horizon_minute: 1800,
            include_start: true,
            wrap_threshold_hour: DEFAULT_WRAP_THRESHOLD_HOUR,
            display: TimeDisplay::Diary,
            rank_by: RankBy::Fare,
            max_results: None,
        }
    }
}
