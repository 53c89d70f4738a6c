//! Web layer for the flight booking system.
//!
//! Provides HTTP endpoints for searching flights, booking and
//! canceling tickets, editing passengers and viewing ticket status.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::create_router;
pub use state::AppState;
