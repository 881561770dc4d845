//! Station registry: resolving rider input to station records.

mod registry;

pub use registry::StationRegistry;
