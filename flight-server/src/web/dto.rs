//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{BookOutcome, Flight, FlightId, MAX_SEATS, Passenger};

/// Request to list flights over a date range.
#[derive(Debug, Deserialize)]
pub struct SearchFlightsRequest {
    /// Start of the range, yyyy-mm-dd (inclusive)
    pub start: String,

    /// End of the range, yyyy-mm-dd (inclusive)
    pub end: String,
}

/// One flight in a search result.
#[derive(Debug, Serialize)]
pub struct FlightSummary {
    /// Display id, e.g. "Flight-0-2026-03-01"
    pub id: String,

    /// Total seats on the flight
    pub max_seats: usize,

    /// Seats currently confirmed
    pub confirmed_seats: usize,

    /// Seats currently free
    pub empty_seats: usize,

    /// Whether any seat is free
    pub has_vacancy: bool,

    /// Passengers waiting for a seat
    pub waitlist_count: usize,
}

/// All flights on one day of a searched range.
#[derive(Debug, Serialize)]
pub struct DaySchedule {
    /// The day, yyyy-mm-dd
    pub date: String,

    /// Flights departing that day (may be empty)
    pub flights: Vec<FlightSummary>,
}

/// Response for a date-range search.
#[derive(Debug, Serialize)]
pub struct SearchFlightsResponse {
    /// One entry per day in the range, in order
    pub days: Vec<DaySchedule>,
}

/// Request to book a seat.
#[derive(Debug, Deserialize)]
pub struct BookTicketRequest {
    /// Flight display id
    pub flight_id: String,

    /// Passenger name
    pub name: String,

    /// Passenger passport number
    pub passport_number: String,
}

/// Response to a booking attempt.
#[derive(Debug, Serialize)]
pub struct BookTicketResponse {
    /// Flight display id
    pub flight_id: String,

    /// "confirmed", "waitlisted", "already_confirmed" or
    /// "already_waitlisted"
    pub outcome: String,

    /// True when the booking was a duplicate and nothing changed
    pub rejected: bool,
}

/// Request to cancel a confirmed seat.
#[derive(Debug, Deserialize)]
pub struct CancelTicketRequest {
    /// Flight display id
    pub flight_id: String,

    /// Passport number of the confirmed passenger
    pub passport_number: String,
}

/// Response to a successful cancellation.
#[derive(Debug, Serialize)]
pub struct CancelTicketResponse {
    /// Flight display id
    pub flight_id: String,

    /// Name of the passenger whose seat was canceled
    pub canceled: String,

    /// Name of the waitlisted passenger promoted into the freed seat
    pub promoted: Option<String>,
}

/// Request to edit a passenger record.
///
/// Absent or empty fields are left unchanged.
#[derive(Debug, Deserialize)]
pub struct EditPassengerRequest {
    /// New display name
    pub name: Option<String>,

    /// New passport number
    pub passport_number: Option<String>,
}

/// A passenger as displayed to callers.
#[derive(Debug, Serialize)]
pub struct PassengerView {
    /// Display name
    pub name: String,

    /// Passport number
    pub passport_number: String,
}

/// One ticket in a status listing.
#[derive(Debug, Serialize)]
pub struct TicketView {
    /// Display id of the ticketed flight
    pub flight_id: String,

    /// "confirmed" or "waiting list"
    pub status: String,
}

/// Response for a ticket-status lookup.
#[derive(Debug, Serialize)]
pub struct TicketStatusResponse {
    /// The passenger record that matched the passport number
    pub passenger: PassengerView,

    /// Tickets held by that record
    pub tickets: Vec<TicketView>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl FlightSummary {
    /// Create from a flight and its derived display id.
    pub fn from_flight(id: FlightId, flight: &Flight) -> Self {
        Self {
            id: id.to_string(),
            max_seats: MAX_SEATS,
            confirmed_seats: flight.confirmed_seats(),
            empty_seats: flight.empty_seats(),
            has_vacancy: flight.has_vacancy(),
            waitlist_count: flight.waitlist_len(),
        }
    }
}

impl BookTicketResponse {
    /// Create from a booking outcome.
    pub fn from_outcome(id: &FlightId, outcome: BookOutcome) -> Self {
        let label = match outcome {
            BookOutcome::Confirmed => "confirmed",
            BookOutcome::Waitlisted => "waitlisted",
            BookOutcome::AlreadyConfirmed => "already_confirmed",
            BookOutcome::AlreadyWaitlisted => "already_waitlisted",
        };
        Self {
            flight_id: id.to_string(),
            outcome: label.to_string(),
            rejected: outcome.is_rejected(),
        }
    }
}

impl PassengerView {
    /// Create from a passenger record.
    pub fn from_passenger(passenger: &Passenger) -> Self {
        Self {
            name: passenger.name().to_string(),
            passport_number: passenger.passport().to_string(),
        }
    }
}
