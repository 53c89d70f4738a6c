//! Persistence for the flight registry.

mod csv;
mod error;

pub use csv::{FlightStore, StoreConfig};
pub use error::StoreError;
