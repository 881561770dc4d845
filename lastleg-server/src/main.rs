use std::net::SocketAddr;
use std::path::PathBuf;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use lastleg_server::fare::FareSchedule;
use lastleg_server::planner::SearchConfig;
use lastleg_server::stations::StationRegistry;
use lastleg_server::timetable::{LoadedData, demo_network, load_from_dir};
use lastleg_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = SearchConfig::default();

    // Load the stop and timetable tables, falling back to the built-in
    // demo network when no data directory is configured.
    let data = match std::env::var("LASTLEG_DATA_DIR") {
        Ok(dir) => match load_from_dir(&PathBuf::from(&dir), config.wrap_threshold_hour) {
            Ok(data) => data,
            Err(e) => {
                eprintln!("Failed to load timetable from {dir}: {e}");
                std::process::exit(1);
            }
        },
        Err(_) => {
            warn!("LASTLEG_DATA_DIR not set, serving the built-in demo network");
            demo_network()
        }
    };

    let LoadedData { stations, index } = data;
    info!(
        stations = stations.len(),
        trips = index.trip_count(),
        "index ready"
    );

    let registry = StationRegistry::new(stations);
    let state = AppState::new(registry, index, config, FareSchedule::default());
    let app = create_router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], 8000));
    info!("listening on http://{addr}");
    info!("endpoints: GET /health, POST /search");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind listen address");
    axum::serve(listener, app).await.expect("server error");
}
