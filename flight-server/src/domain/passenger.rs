//! Passenger records.

use std::fmt;

use tracing::warn;

use super::flight::{FlightKey, MAX_SEATS};
use super::ticket::{Ticket, TicketStatus};

/// How many tickets one passenger record may hold.
///
/// This cap is tied to a flight's seat capacity rather than any
/// deliberate per-passenger policy; the constant exists so the tie is
/// visible instead of baked into capacity logic.
pub const MAX_TICKETS_PER_PASSENGER: usize = MAX_SEATS;

/// A passenger and the tickets they hold.
///
/// Each record belongs to exactly one flight list (confirmed or
/// waitlist). The passport number is the identity key used for lookups
/// and duplicate detection, but it is mutable and no uniqueness is
/// enforced across records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Passenger {
    passport: String,
    name: String,
    tickets: Vec<Ticket>,
}

impl Passenger {
    /// Create a passenger with no tickets.
    pub fn new(passport: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            passport: passport.into(),
            name: name.into(),
            tickets: Vec::new(),
        }
    }

    /// Passport number (identity key).
    pub fn passport(&self) -> &str {
        &self.passport
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Tickets held by this passenger.
    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    /// Add a ticket, rejecting it beyond [`MAX_TICKETS_PER_PASSENGER`].
    ///
    /// Returns `false` (and logs) if the cap is reached; the ticket is
    /// dropped.
    pub fn add_ticket(&mut self, ticket: Ticket) -> bool {
        if self.tickets.len() >= MAX_TICKETS_PER_PASSENGER {
            warn!(
                passenger = %self.name,
                passport = %self.passport,
                "exceeded the maximum number of tickets"
            );
            return false;
        }
        self.tickets.push(ticket);
        true
    }

    /// Rewrite the status of every ticket this passenger holds for the
    /// given flight.
    pub(crate) fn retag_tickets(&mut self, flight: FlightKey, status: TicketStatus) {
        for ticket in &mut self.tickets {
            if ticket.flight() == flight {
                ticket.set_status(status);
            }
        }
    }

    /// Partial update of name and passport number.
    ///
    /// An absent or empty value leaves the corresponding field
    /// unchanged. No uniqueness check is made against other passengers'
    /// passport numbers; collisions are allowed silently.
    pub fn edit_details(&mut self, new_name: Option<&str>, new_passport: Option<&str>) {
        if let Some(name) = new_name
            && !name.is_empty()
        {
            self.name = name.to_string();
        }
        if let Some(passport) = new_passport
            && !passport.is_empty()
        {
            self.passport = passport.to_string();
        }
    }
}

impl fmt::Display for Passenger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.passport)
    }
}
