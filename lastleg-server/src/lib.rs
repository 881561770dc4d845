//! Last-reachable-stop server.
//!
//! Answers the question of a rider who has missed (or fears missing)
//! the last connecting train: "from here, right now — possibly past
//! midnight — which stations can scheduled service still reach, and
//! what would the taxi for the rest of the way cost?"

pub mod domain;
pub mod fare;
pub mod feasibility;
pub mod planner;
pub mod stations;
pub mod timetable;
pub mod web;
