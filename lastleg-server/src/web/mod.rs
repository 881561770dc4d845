//! Web layer: HTTP endpoints over the reachability planner.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::create_router;
pub use state::AppState;
