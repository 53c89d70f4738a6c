//! Tickets and their status.

use std::fmt;

use super::flight::FlightKey;

/// Where a ticket holder currently stands on the flight.
///
/// There is no "canceled" status: cancellation removes the passenger
/// from the flight's lists, and their ticket keeps whatever status it
/// last held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketStatus {
    /// Holds one of the flight's seats.
    Confirmed,
    /// Queued for the next freed seat.
    Waitlisted,
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TicketStatus::Confirmed => f.write_str("confirmed"),
            TicketStatus::Waitlisted => f.write_str("waiting list"),
        }
    }
}

/// A passenger's link to one flight.
///
/// The flight is referenced by its stable key, not by display id, so
/// the ticket stays valid however the flight is addressed externally.
/// The status field is rewritten whenever the owning flight's confirmed
/// or waitlist composition changes; it always reflects current flight
/// state, not booking-time state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    flight: FlightKey,
    status: TicketStatus,
}

impl Ticket {
    /// Create a ticket for a flight with an initial status.
    pub fn new(flight: FlightKey, status: TicketStatus) -> Self {
        Self { flight, status }
    }

    /// The flight this ticket is for.
    pub fn flight(&self) -> FlightKey {
        self.flight
    }

    /// Current status.
    pub fn status(&self) -> TicketStatus {
        self.status
    }

    /// Overwrite the status.
    pub(crate) fn set_status(&mut self, status: TicketStatus) {
        self.status = status;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_display() {
        assert_eq!(TicketStatus::Confirmed.to_string(), "confirmed");
        assert_eq!(TicketStatus::Waitlisted.to_string(), "waiting list");
    }

    #[test]
    fn status_can_be_rewritten() {
        let mut ticket = Ticket::new(FlightKey(7), TicketStatus::Waitlisted);
        assert_eq!(ticket.status(), TicketStatus::Waitlisted);

        ticket.set_status(TicketStatus::Confirmed);
        assert_eq!(ticket.status(), TicketStatus::Confirmed);
        assert_eq!(ticket.flight(), FlightKey(7));
    }
}
