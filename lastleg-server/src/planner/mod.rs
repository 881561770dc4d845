//! The reachability planner.
//!
//! Answers the late-night question: from here, right now, which
//! stations can scheduled service still reach — and for each, how far
//! and how expensive is the taxi for the rest of the way?

mod config;
mod rank;
mod search;

pub use config::{RankBy, SearchConfig};
pub use rank::{RankedStop, Target, rank_reachable};
pub use search::{Label, SearchError, SearchOutcome, reachable_stops};
