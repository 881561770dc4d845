//! Reachability search over the timetable index.
//!
//! Answers: starting at a station at a given service minute, which
//! stations does scheduled service still reach, and when does it get
//! there? The traversal is a breadth-first relaxation over the
//! time-expanded graph implied by trip schedules.
//!
//! A trip is marked processed the first time any station boards it and
//! is never re-scanned. This keeps runtime linear in timetable size on
//! dense networks, at the cost of not guaranteeing a strictly optimal
//! earliest arrival when a later-discovered boarding point would have
//! been better. The trade-off and the priority-queue alternative are
//! discussed in DESIGN.md.

use std::collections::{HashMap, HashSet, VecDeque};

use tracing::debug;

use crate::domain::{ServiceMinute, StopId};
use crate::timetable::{TimetableIndex, TripId};

use super::config::SearchConfig;

/// Error from request validation. All variants are detected before
/// exploration begins; a running search never fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// Start or named target station is not in the loaded data.
    #[error("station '{name}' is not in the loaded data")]
    UnknownStation { name: String },

    /// Neither a target station nor a coordinate was supplied.
    #[error("no target station or coordinate supplied")]
    MissingTarget,

    /// The query time could not be parsed.
    #[error("cannot parse time '{input}'")]
    MalformedTime { input: String },
}

/// Best-known arrival at one station during a search.
#[derive(Debug, Clone)]
pub struct Label {
    /// Earliest arrival found so far.
    pub arrival: ServiceMinute,

    /// Stations visited to get here, start first, this station last.
    pub route: Vec<StopId>,
}

/// The full label map produced by one search.
#[derive(Debug)]
pub struct SearchOutcome {
    /// Best-known arrival per reachable station, start included.
    pub labels: HashMap<StopId, Label>,

    /// Stations popped from the frontier.
    pub explored: usize,

    /// True when the explore limit cut the search short: the result is
    /// a valid lower bound on reachability, but possibly partial.
    pub truncated: bool,
}

/// Compute every station reachable from `start` at `start_time`.
///
/// Owns its label map and frontier exclusively, performs no I/O, and is
/// deterministic for identical inputs and index state. The index is
/// only read, so any number of searches may share it concurrently.
pub fn reachable_stops(
    start: &StopId,
    start_time: ServiceMinute,
    index: &TimetableIndex,
    config: &SearchConfig,
) -> SearchOutcome {
    let mut labels: HashMap<StopId, Label> = HashMap::new();
    labels.insert(
        start.clone(),
        Label {
            arrival: start_time,
            route: vec![start.clone()],
        },
    );

    let mut frontier: VecDeque<StopId> = VecDeque::from([start.clone()]);
    let mut boarded: HashSet<TripId> = HashSet::new();
    let mut explored = 0usize;
    let mut truncated = false;

    while let Some(station) = frontier.pop_front() {
        explored += 1;
        if explored > config.explore_limit {
            truncated = true;
            break;
        }

        let (arrival, route) = {
            let label = &labels[&station];
            (label.arrival, label.route.clone())
        };

        // Prune late-night expansion past the horizon.
        if arrival > config.horizon_minute {
            continue;
        }

        for departure in index.departures_from(&station) {
            // Rows with unparseable departure times cannot be boarded.
            if departure.departure.is_unreachable() {
                continue;
            }
            if departure.departure < arrival {
                continue;
            }
            // First boarding claims the whole trip.
            if !boarded.insert(departure.trip.clone()) {
                continue;
            }

            for stop in index.stops_after(&departure.trip, departure.sequence) {
                if stop.arrival.is_unreachable() {
                    continue;
                }

                let improves = match labels.get(&stop.stop) {
                    None => true,
                    // Strictly earlier wins; ties keep the first label.
                    Some(existing) => stop.arrival < existing.arrival,
                };
                if !improves {
                    continue;
                }

                let mut new_route = route.clone();
                new_route.push(stop.stop.clone());
                labels.insert(
                    stop.stop.clone(),
                    Label {
                        arrival: stop.arrival,
                        route: new_route,
                    },
                );
                frontier.push_back(stop.stop.clone());
            }
        }
    }

    debug!(
        start = %start,
        reachable = labels.len(),
        explored,
        truncated,
        "reachability search complete"
    );

    SearchOutcome {
        labels,
        explored,
        truncated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DEFAULT_WRAP_THRESHOLD_HOUR;
    use crate::timetable::{TimetableEntry, demo_network};

    fn stop(s: &str) -> StopId {
        StopId::parse(s).unwrap()
    }

    fn minute(s: &str) -> ServiceMinute {
        ServiceMinute::parse(s, DEFAULT_WRAP_THRESHOLD_HOUR).unwrap()
    }

    fn entry(trip: &str, at: &str, time: &str, seq: u32) -> TimetableEntry {
        TimetableEntry {
            trip: TripId::new(trip),
            stop: stop(at),
            arrival: minute(time),
            departure: minute(time),
            sequence: seq,
        }
    }

    fn index(entries: Vec<TimetableEntry>) -> TimetableIndex {
        TimetableIndex::build(entries).unwrap()
    }

    #[test]
    fn start_is_labeled_with_query_time() {
        let idx = index(vec![]);
        let outcome = reachable_stops(&stop("A"), minute("24:40"), &idx, &SearchConfig::default());

        assert_eq!(outcome.labels.len(), 1);
        let label = &outcome.labels[&stop("A")];
        assert_eq!(label.arrival, minute("24:40"));
        assert_eq!(label.route, vec![stop("A")]);
        assert!(!outcome.truncated);
    }

    #[test]
    fn catchable_finals_are_reached_departed_ones_are_not() {
        // Query at 24:40. T1 departs A 24:42 -> B 25:03 (catchable),
        // T2 departs A 24:55 -> C 25:10 (catchable),
        // T3 departed A 24:30 (gone).
        let idx = index(vec![
            entry("T1", "A", "24:42", 1),
            entry("T1", "B", "25:03", 2),
            entry("T2", "A", "24:55", 1),
            entry("T2", "C", "25:10", 2),
            entry("T3", "A", "24:30", 1),
            entry("T3", "D", "24:50", 2),
        ]);

        let outcome = reachable_stops(&stop("A"), minute("24:40"), &idx, &SearchConfig::default());

        assert_eq!(outcome.labels[&stop("B")].arrival, minute("25:03"));
        assert_eq!(outcome.labels[&stop("C")].arrival, minute("25:10"));
        assert!(!outcome.labels.contains_key(&stop("D")));
    }

    #[test]
    fn departure_at_exactly_query_time_is_boardable() {
        let idx = index(vec![
            entry("T1", "A", "24:40", 1),
            entry("T1", "B", "24:50", 2),
        ]);

        let outcome = reachable_stops(&stop("A"), minute("24:40"), &idx, &SearchConfig::default());
        assert!(outcome.labels.contains_key(&stop("B")));
    }

    #[test]
    fn transfers_chain_across_trips() {
        // A -> B on T1, then B -> C on T2 departing after arrival at B.
        let idx = index(vec![
            entry("T1", "A", "23:00", 1),
            entry("T1", "B", "23:20", 2),
            entry("T2", "B", "23:30", 1),
            entry("T2", "C", "23:50", 2),
        ]);

        let outcome = reachable_stops(&stop("A"), minute("22:50"), &idx, &SearchConfig::default());

        let label = &outcome.labels[&stop("C")];
        assert_eq!(label.arrival, minute("23:50"));
        assert_eq!(label.route, vec![stop("A"), stop("B"), stop("C")]);
    }

    #[test]
    fn missed_connection_is_not_taken() {
        // T2 leaves B before T1 arrives there.
        let idx = index(vec![
            entry("T1", "A", "23:00", 1),
            entry("T1", "B", "23:20", 2),
            entry("T2", "B", "23:10", 1),
            entry("T2", "C", "23:30", 2),
        ]);

        let outcome = reachable_stops(&stop("A"), minute("22:50"), &idx, &SearchConfig::default());
        assert!(!outcome.labels.contains_key(&stop("C")));
    }

    #[test]
    fn strictly_earlier_arrival_replaces_label() {
        // Two ways to C: slow via T1 direct, faster via T2 departing later.
        let idx = index(vec![
            entry("T1", "A", "23:00", 1),
            entry("T1", "C", "23:59", 2),
            entry("T2", "A", "23:10", 1),
            entry("T2", "C", "23:30", 2),
        ]);

        let outcome = reachable_stops(&stop("A"), minute("22:50"), &idx, &SearchConfig::default());
        assert_eq!(outcome.labels[&stop("C")].arrival, minute("23:30"));
    }

    #[test]
    fn equal_arrival_keeps_first_label() {
        let idx = index(vec![
            entry("T1", "A", "23:00", 1),
            entry("T1", "C", "23:30", 2),
            entry("T2", "A", "23:10", 1),
            entry("T2", "C", "23:30", 2),
        ]);

        let outcome = reachable_stops(&stop("A"), minute("22:50"), &idx, &SearchConfig::default());
        // Departures from A scan in insertion order, so T1 labels C first.
        let label = &outcome.labels[&stop("C")];
        assert_eq!(label.arrival, minute("23:30"));
        assert_eq!(label.route, vec![stop("A"), stop("C")]);
    }

    #[test]
    fn horizon_prunes_expansion_but_keeps_label() {
        let mut config = SearchConfig::default();
        config.horizon_minute = minute("25:00").minutes();

        // B is reached past the horizon; the connection from B must not run.
        let idx = index(vec![
            entry("T1", "A", "24:40", 1),
            entry("T1", "B", "25:10", 2),
            entry("T2", "B", "25:20", 1),
            entry("T2", "C", "25:40", 2),
        ]);

        let outcome = reachable_stops(&stop("A"), minute("24:30"), &idx, &config);
        assert!(outcome.labels.contains_key(&stop("B")));
        assert!(!outcome.labels.contains_key(&stop("C")));
    }

    #[test]
    fn explore_limit_terminates_and_reports_truncation() {
        // A long chain of one-stop trips, more stations than the limit.
        let mut entries = Vec::new();
        for i in 0..50u32 {
            let from = format!("S{i}");
            let to = format!("S{}", i + 1);
            let dep = format!("{:02}:{:02}", 22 + (i + 1) / 60, (i + 1) % 60);
            let arr = format!("{:02}:{:02}", 22 + (i + 2) / 60, (i + 2) % 60);
            entries.push(entry(&format!("T{i}"), &from, &dep, 1));
            entries.push(entry(&format!("T{i}"), &to, &arr, 2));
        }
        let idx = index(entries);

        let mut config = SearchConfig::default();
        config.explore_limit = 10;

        let outcome = reachable_stops(&stop("S0"), minute("22:00"), &idx, &config);
        assert!(outcome.truncated);
        assert!(!outcome.labels.is_empty());
        assert!(outcome.labels.len() < 52);

        // Enlarging the limit only adds stations, never removes any.
        config.explore_limit = 10_000;
        let full = reachable_stops(&stop("S0"), minute("22:00"), &idx, &config);
        assert!(!full.truncated);
        for (station, label) in &outcome.labels {
            let improved = &full.labels[station];
            assert!(improved.arrival <= label.arrival);
        }
        assert!(full.labels.len() >= outcome.labels.len());
    }

    #[test]
    fn sentinel_departure_rows_are_skipped() {
        let mut bad = entry("T1", "A", "23:00", 1);
        bad.departure = ServiceMinute::UNREACHABLE;
        let idx = index(vec![bad, entry("T1", "B", "23:20", 2)]);

        let outcome = reachable_stops(&stop("A"), minute("22:00"), &idx, &SearchConfig::default());
        assert!(!outcome.labels.contains_key(&stop("B")));
    }

    #[test]
    fn sentinel_arrival_stops_are_not_labeled() {
        let mut bad = entry("T1", "B", "23:20", 2);
        bad.arrival = ServiceMinute::UNREACHABLE;
        let idx = index(vec![
            entry("T1", "A", "23:00", 1),
            bad,
            entry("T1", "C", "23:40", 3),
        ]);

        let outcome = reachable_stops(&stop("A"), minute("22:00"), &idx, &SearchConfig::default());
        assert!(!outcome.labels.contains_key(&stop("B")));
        // Later stops on the trip are still served.
        assert_eq!(outcome.labels[&stop("C")].arrival, minute("23:40"));
    }

    #[test]
    fn no_reachable_station_beyond_start_is_a_valid_result() {
        let idx = index(vec![
            entry("T1", "A", "22:00", 1),
            entry("T1", "B", "22:30", 2),
        ]);

        // All service already departed.
        let outcome = reachable_stops(&stop("A"), minute("23:00"), &idx, &SearchConfig::default());
        assert_eq!(outcome.labels.len(), 1);
        assert!(outcome.labels.contains_key(&stop("A")));
    }

    #[test]
    fn shibuya_demo_scenario() {
        let data = demo_network();
        let outcome = reachable_stops(
            &stop("Shibuya"),
            minute("24:40"),
            &data.index,
            &SearchConfig::default(),
        );

        // Catchable finals
        assert_eq!(outcome.labels[&stop("Kikuna")].arrival, minute("25:03"));
        assert_eq!(outcome.labels[&stop("Saginuma")].arrival, minute("25:12"));

        // Musashi-Kosugi comes via the 24:42 Kikuna final at 24:55
        assert_eq!(
            outcome.labels[&stop("Musashi-Kosugi")].arrival,
            minute("24:55")
        );

        // The through trains left before 24:40
        assert!(!outcome.labels.contains_key(&stop("Yokohama")));
        assert!(!outcome.labels.contains_key(&stop("Nagatsuta")));

        // Stations with no service at all
        assert!(!outcome.labels.contains_key(&stop("Motomachi")));
        assert!(!outcome.labels.contains_key(&stop("Chuo-Rinkan")));
    }

    #[test]
    fn no_strictly_earlier_arrival_exists_on_demo_network() {
        // Exhaustively verify the earliest-arrival property on the demo
        // timetable: no single boardable departure improves any label.
        let data = demo_network();
        let config = SearchConfig::default();
        let outcome = reachable_stops(&stop("Shibuya"), minute("24:40"), &data.index, &config);

        for (station, label) in &outcome.labels {
            for dep in data.index.departures_from(station) {
                if dep.departure.is_unreachable() || dep.departure < label.arrival {
                    continue;
                }
                for later in data.index.stops_after(&dep.trip, dep.sequence) {
                    if let Some(existing) = outcome.labels.get(&later.stop) {
                        assert!(
                            existing.arrival <= later.arrival,
                            "label for {} improvable via {}",
                            later.stop,
                            dep.trip
                        );
                    }
                }
            }
        }
    }
}
