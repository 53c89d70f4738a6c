//! Domain types for the flight booking system.
//!
//! This module contains the booking engine and its supporting types.
//! Flights own their passenger lists; everything above this layer only
//! addresses flights and passengers by identity.

mod error;
mod flight;
mod flight_id;
mod passenger;
mod ticket;

pub use error::DomainError;
pub use flight::{
    BookOutcome, Cancellation, Flight, FlightKey, MAX_SEATS, SeatCountPolicy,
};
pub use flight_id::{FlightId, InvalidFlightId};
pub use passenger::{MAX_TICKETS_PER_PASSENGER, Passenger};
pub use ticket::{Ticket, TicketStatus};
