//! Loading stop and timetable tables.
//!
//! The data directory follows the GTFS-style layout the upstream feeds
//! produce: `stops.txt` with station rows and `stop_times.txt` with
//! timetable rows, both plain CSV. Individual unparseable time strings
//! degrade to the unreachable sentinel; structurally broken CSV is an
//! error.

use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};

use super::{IndexError, TimetableEntry, TimetableIndex, TripId};
use crate::domain::{InvalidStopId, ServiceMinute, Station, StopId};

/// Error from loading the data directory.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {file}: {source}")]
    Csv {
        file: String,
        #[source]
        source: csv::Error,
    },

    #[error("bad stop id in {file}: {source}")]
    StopId {
        file: String,
        #[source]
        source: InvalidStopId,
    },

    #[error(transparent)]
    Index(#[from] IndexError),
}

/// Stations plus the prebuilt timetable index.
#[derive(Debug)]
pub struct LoadedData {
    pub stations: Vec<Station>,
    pub index: TimetableIndex,
}

#[derive(Debug, Deserialize)]
struct StopRecord {
    stop_id: String,
    stop_name: String,
    stop_lat: f64,
    stop_lon: f64,
}

#[derive(Debug, Deserialize)]
struct StopTimeRecord {
    trip_id: String,
    stop_id: String,
    arrival_time: String,
    departure_time: String,
    stop_sequence: u32,
}

/// Load `stops.txt` and `stop_times.txt` from `dir` and build the index.
pub fn load_from_dir(dir: &Path, wrap_threshold_hour: u32) -> Result<LoadedData, LoadError> {
    let stations = load_stations(&dir.join("stops.txt"))?;
    let entries = load_entries(&dir.join("stop_times.txt"), wrap_threshold_hour)?;
    let index = TimetableIndex::build(entries)?;

    info!(
        stations = stations.len(),
        trips = index.trip_count(),
        "timetable loaded"
    );

    Ok(LoadedData { stations, index })
}

fn load_stations(path: &Path) -> Result<Vec<Station>, LoadError> {
    let file = path.display().to_string();
    let mut reader = csv::Reader::from_path(path).map_err(|source| LoadError::Csv {
        file: file.clone(),
        source,
    })?;

    let mut stations = Vec::new();
    for record in reader.deserialize() {
        let record: StopRecord = record.map_err(|source| LoadError::Csv {
            file: file.clone(),
            source,
        })?;
        let id = StopId::parse(&record.stop_id).map_err(|source| LoadError::StopId {
            file: file.clone(),
            source,
        })?;
        stations.push(Station {
            id,
            name: record.stop_name,
            lat: record.stop_lat,
            lon: record.stop_lon,
        });
    }
    Ok(stations)
}

fn load_entries(path: &Path, wrap_threshold_hour: u32) -> Result<Vec<TimetableEntry>, LoadError> {
    let file = path.display().to_string();
    let mut reader = csv::Reader::from_path(path).map_err(|source| LoadError::Csv {
        file: file.clone(),
        source,
    })?;

    let mut entries = Vec::new();
    let mut bad_times = 0usize;
    for record in reader.deserialize() {
        let record: StopTimeRecord = record.map_err(|source| LoadError::Csv {
            file: file.clone(),
            source,
        })?;
        let stop = StopId::parse(&record.stop_id).map_err(|source| LoadError::StopId {
            file: file.clone(),
            source,
        })?;

        let arrival = ServiceMinute::parse_lenient(&record.arrival_time, wrap_threshold_hour);
        let departure = ServiceMinute::parse_lenient(&record.departure_time, wrap_threshold_hour);
        if arrival.is_unreachable() || departure.is_unreachable() {
            bad_times += 1;
        }

        entries.push(TimetableEntry {
            trip: TripId::new(&record.trip_id),
            stop,
            arrival,
            departure,
            sequence: record.stop_sequence,
        });
    }

    if bad_times > 0 {
        warn!(rows = bad_times, "timetable rows with unparseable times kept as unreachable");
    }

    Ok(entries)
}

/// The built-in late-night Shibuya network.
///
/// A small timetable of last services out of Shibuya on two lines,
/// used by tests and as a fallback when no data directory is
/// configured. The scenario assumes a query around 24:40: the through
/// services to Yokohama and Nagatsuta have already left, while
/// shorter-running finals are still catchable.
pub fn demo_network() -> LoadedData {
    let stations = [
        ("Shibuya", "渋谷", 35.6580, 139.7016),
        ("Nakameguro", "中目黒", 35.6442, 139.6989),
        ("Jiyugaoka", "自由が丘", 35.6072, 139.6687),
        ("Musashi-Kosugi", "武蔵小杉", 35.5768, 139.6596),
        ("Hiyoshi", "日吉", 35.5544, 139.6469),
        ("Kikuna", "菊名", 35.5097, 139.6304),
        ("Yokohama", "横浜", 35.4657, 139.6223),
        ("Motomachi", "元町・中華街", 35.4429, 139.6498),
        ("Sangen-Jaya", "三軒茶屋", 35.6433, 139.6702),
        ("Futako-Tamagawa", "二子玉川", 35.6116, 139.6265),
        ("Mizonokuchi", "溝の口", 35.5999, 139.6105),
        ("Saginuma", "鷺沼", 35.5794, 139.5731),
        ("Nagatsuta", "長津田", 35.5317, 139.4950),
        ("Chuo-Rinkan", "中央林間", 35.5074, 139.4443),
    ]
    .into_iter()
    .map(|(id, name, lat, lon)| Station {
        id: StopId::parse(id).unwrap(),
        name: name.to_string(),
        lat,
        lon,
    })
    .collect();

    let mut entries = Vec::new();

    // Through service to Yokohama, already departed by 24:40
    add_trip(
        &mut entries,
        "Toyoko_Last_Yokohama",
        &["Shibuya", "Nakameguro", "Jiyugaoka", "Musashi-Kosugi", "Kikuna", "Yokohama"],
        "24:20",
        &[3, 5, 5, 8, 6],
    );

    // Short-run final to Kikuna, departs 24:42
    add_trip(
        &mut entries,
        "Toyoko_Last_Kikuna",
        &["Shibuya", "Nakameguro", "Jiyugaoka", "Musashi-Kosugi", "Kikuna"],
        "24:42",
        &[3, 5, 5, 8],
    );

    // Final to Musashi-Kosugi, departs 24:55
    add_trip(
        &mut entries,
        "Toyoko_Last_Kosugi",
        &["Shibuya", "Nakameguro", "Jiyugaoka", "Musashi-Kosugi"],
        "24:55",
        &[3, 5, 5],
    );

    // Den-en-toshi line: through service already gone, depot final catchable
    add_trip(
        &mut entries,
        "Denentoshi_Last_Nagatsuta",
        &["Shibuya", "Sangen-Jaya", "Futako-Tamagawa", "Mizonokuchi", "Saginuma", "Nagatsuta"],
        "24:15",
        &[5, 10, 5, 7, 10],
    );
    add_trip(
        &mut entries,
        "Denentoshi_Last_Saginuma",
        &["Shibuya", "Sangen-Jaya", "Futako-Tamagawa", "Mizonokuchi", "Saginuma"],
        "24:45",
        &[5, 10, 5, 7],
    );

    let index = TimetableIndex::build(entries).expect("demo network is structurally valid");

    LoadedData { stations, index }
}

/// Append a trip calling at `stops`, starting at `start` with the given
/// leg running times. Arrival and departure are the same minute, as in
/// the upstream feeds.
fn add_trip(
    entries: &mut Vec<TimetableEntry>,
    trip_id: &str,
    stops: &[&str],
    start: &str,
    leg_minutes: &[u32],
) {
    let start = ServiceMinute::parse(start, crate::domain::DEFAULT_WRAP_THRESHOLD_HOUR)
        .expect("demo trip start time is valid");
    let mut minute = start.minutes();

    for (i, stop) in stops.iter().enumerate() {
        let time = ServiceMinute::from_minutes(minute);
        entries.push(TimetableEntry {
            trip: TripId::new(trip_id),
            stop: StopId::parse(stop).unwrap(),
            arrival: time,
            departure: time,
            sequence: (i + 1) as u32,
        });
        if let Some(leg) = leg_minutes.get(i) {
            minute += leg;
        }
    }
}
