//! The seat allocation and waitlist promotion engine.
//!
//! A flight owns its confirmed list and its FIFO waitlist, and all
//! state transitions between "confirmed" and "waiting list" happen
//! here. Persisting the result is the caller's job.

use std::collections::VecDeque;

use tracing::{info, warn};

use super::error::DomainError;
use super::passenger::Passenger;
use super::ticket::{Ticket, TicketStatus};

/// Seat capacity of every flight in the network.
pub const MAX_SEATS: usize = 5;

/// Stable internal identity for a flight.
///
/// Assigned once by the registry when the flight is created and never
/// reused. Tickets reference flights by key; the positional display id
/// is derived separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FlightKey(pub u64);

/// What to do when a seat count is set outside `[0, MAX_SEATS]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatCountPolicy {
    /// Clamp into range and log a warning.
    Clamp,
    /// Fail with [`DomainError::SeatCountOutOfRange`].
    Reject,
}

/// Outcome of a booking attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookOutcome {
    /// A seat was available; the ticket is confirmed.
    Confirmed,
    /// The flight was full; the passenger joined the waitlist tail.
    Waitlisted,
    /// Rejected: this passport already holds a confirmed seat.
    AlreadyConfirmed,
    /// Rejected: this passport is already on the waitlist.
    AlreadyWaitlisted,
}

impl BookOutcome {
    /// Whether the booking changed any state.
    pub fn is_rejected(self) -> bool {
        matches!(
            self,
            BookOutcome::AlreadyConfirmed | BookOutcome::AlreadyWaitlisted
        )
    }
}

/// Result of a successful cancellation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cancellation {
    /// The passenger removed from the confirmed list. Their tickets
    /// keep the status they last held; no "canceled" status exists.
    pub passenger: Passenger,
    /// Name of the waitlist passenger promoted into the freed seat,
    /// if the waitlist was non-empty.
    pub promoted: Option<String>,
}

/// A fixed-capacity flight: confirmed seats plus a FIFO waitlist.
///
/// Invariants, restored after every mutation:
/// `confirmed_seats + empty_seats == MAX_SEATS` and
/// `confirmed.len() == confirmed_seats <= MAX_SEATS`.
/// The waitlist is unbounded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flight {
    key: FlightKey,
    confirmed: Vec<Passenger>,
    waitlist: VecDeque<Passenger>,
    confirmed_seats: usize,
    empty_seats: usize,
}

impl Flight {
    /// Create an empty flight with all seats free.
    pub fn new(key: FlightKey) -> Self {
        Self {
            key,
            confirmed: Vec::new(),
            waitlist: VecDeque::new(),
            confirmed_seats: 0,
            empty_seats: MAX_SEATS,
        }
    }

    /// The stable internal identity.
    pub fn key(&self) -> FlightKey {
        self.key
    }

    /// Whether every seat is taken.
    pub fn is_full(&self) -> bool {
        self.confirmed.len() >= MAX_SEATS
    }

    /// Vacancy status, derived: true iff a seat is free.
    pub fn has_vacancy(&self) -> bool {
        !self.is_full()
    }

    /// Number of confirmed seats.
    pub fn confirmed_seats(&self) -> usize {
        self.confirmed_seats
    }

    /// Number of free seats.
    pub fn empty_seats(&self) -> usize {
        self.empty_seats
    }

    /// Passengers holding confirmed seats, in booking order.
    pub fn confirmed_passengers(&self) -> &[Passenger] {
        &self.confirmed
    }

    /// Waitlisted passengers, head (longest waiting) first.
    pub fn waitlist_passengers(&self) -> impl Iterator<Item = &Passenger> {
        self.waitlist.iter()
    }

    /// Waitlist length.
    pub fn waitlist_len(&self) -> usize {
        self.waitlist.len()
    }

    /// Mutable access to the first passenger record (confirmed list
    /// first, then waitlist) holding this passport.
    pub(crate) fn passenger_mut(&mut self, passport: &str) -> Option<&mut Passenger> {
        if let Some(p) = self
            .confirmed
            .iter_mut()
            .find(|p| p.passport() == passport)
        {
            return Some(p);
        }
        self.waitlist
            .iter_mut()
            .find(|p| p.passport() == passport)
    }

    /// Book a seat for a passenger.
    ///
    /// A passport already present in the confirmed list or the waitlist
    /// is rejected with a log line and no state change. Otherwise a
    /// ticket is created: confirmed if a seat is free, waitlisted at the
    /// queue tail if not.
    pub fn book(&mut self, name: &str, passport: &str) -> BookOutcome {
        if self.confirmed.iter().any(|p| p.passport() == passport) {
            info!(passenger = %name, %passport, "passenger has already booked this flight");
            return BookOutcome::AlreadyConfirmed;
        }
        if self.waitlist.iter().any(|p| p.passport() == passport) {
            info!(passenger = %name, %passport, "passenger is already on the waiting list");
            return BookOutcome::AlreadyWaitlisted;
        }

        let mut passenger = Passenger::new(passport, name);
        if !self.is_full() {
            passenger.add_ticket(Ticket::new(self.key, TicketStatus::Confirmed));
            self.seat_passenger(passenger);
            info!(passenger = %name, "ticket confirmed");
            BookOutcome::Confirmed
        } else {
            passenger.add_ticket(Ticket::new(self.key, TicketStatus::Waitlisted));
            self.waitlist.push_back(passenger);
            info!(passenger = %name, "flight is fully booked, added to the waiting list");
            BookOutcome::Waitlisted
        }
    }

    /// Cancel a confirmed seat.
    ///
    /// Returns `None` (no state change) if the passport holds no
    /// confirmed seat. Otherwise the passenger is removed, the head of
    /// the waitlist (if any) is promoted into the freed seat, and the
    /// status of every ticket held by every passenger still on this
    /// flight is rewritten to match their current list membership.
    pub fn cancel(&mut self, passport: &str) -> Option<Cancellation> {
        let pos = self.confirmed.iter().position(|p| p.passport() == passport);
        let Some(pos) = pos else {
            info!(%passport, "passenger not found in the confirmed list");
            return None;
        };

        let passenger = self.confirmed.remove(pos);
        self.confirmed_seats = self.confirmed_seats.saturating_sub(1);
        self.empty_seats += 1;
        info!(passenger = %passenger.name(), "ticket canceled");

        let promoted = self.waitlist.pop_front().map(|next| {
            let name = next.name().to_string();
            info!(passenger = %name, "moved from waiting list to confirmed");
            self.seat_passenger(next);
            name
        });

        self.resync_ticket_statuses();

        Some(Cancellation {
            passenger,
            promoted,
        })
    }

    /// Drain the waitlist into any free seats, FIFO.
    ///
    /// Run once per flight at load time to reconcile persisted
    /// confirmed/waitlist contents against capacity.
    pub fn process_waitlist(&mut self) {
        while !self.is_full()
            && let Some(next) = self.waitlist.pop_front()
        {
            self.seat_passenger(next);
        }
    }

    /// Set the confirmed seat count; the empty count becomes
    /// `MAX_SEATS - n`.
    pub fn set_confirmed_seats(&mut self, n: i64, policy: SeatCountPolicy) -> Result<(), DomainError> {
        let n = Self::validate_count(n, "confirmed", policy)?;
        self.confirmed_seats = n;
        self.empty_seats = MAX_SEATS - n;
        Ok(())
    }

    /// Set the empty seat count; the confirmed count becomes
    /// `MAX_SEATS - n`.
    pub fn set_empty_seats(&mut self, n: i64, policy: SeatCountPolicy) -> Result<(), DomainError> {
        let n = Self::validate_count(n, "empty", policy)?;
        self.empty_seats = n;
        self.confirmed_seats = MAX_SEATS - n;
        Ok(())
    }

    fn validate_count(
        n: i64,
        field: &'static str,
        policy: SeatCountPolicy,
    ) -> Result<usize, DomainError> {
        if (0..=MAX_SEATS as i64).contains(&n) {
            return Ok(n as usize);
        }
        match policy {
            SeatCountPolicy::Clamp => {
                warn!(field, value = n, "seat count out of range, clamping");
                Ok(n.clamp(0, MAX_SEATS as i64) as usize)
            }
            SeatCountPolicy::Reject => Err(DomainError::SeatCountOutOfRange { field, value: n }),
        }
    }

    /// Append a persisted passenger to the confirmed list without
    /// touching the seat counters (they are restored separately).
    pub fn restore_confirmed(&mut self, passenger: Passenger) {
        self.confirmed.push(passenger);
    }

    /// Append a persisted passenger to the waitlist tail without
    /// touching the seat counters.
    pub fn restore_waitlisted(&mut self, passenger: Passenger) {
        self.waitlist.push_back(passenger);
    }

    /// Force the seat counters to agree with the actual confirmed list.
    ///
    /// Persisted counts can disagree with the persisted passenger
    /// lists; the lists win. Confirmed passengers beyond capacity are
    /// demoted, in order, to the head of the waitlist.
    pub fn reconcile_counts(&mut self) {
        if self.confirmed.len() > MAX_SEATS {
            warn!(
                listed = self.confirmed.len(),
                "confirmed list exceeds capacity, demoting overflow to waitlist head"
            );
            for passenger in self.confirmed.drain(MAX_SEATS..).rev() {
                self.waitlist.push_front(passenger);
            }
        }
        if self.confirmed.len() != self.confirmed_seats {
            warn!(
                counted = self.confirmed_seats,
                listed = self.confirmed.len(),
                "seat counters disagree with confirmed list, trusting the list"
            );
            self.confirmed_seats = self.confirmed.len();
            self.empty_seats = MAX_SEATS - self.confirmed_seats;
        }
    }

    /// Issue one ticket per listed passenger, tagged by current list
    /// membership. Used at load time after [`Self::process_waitlist`].
    pub fn issue_restored_tickets(&mut self) {
        for passenger in &mut self.confirmed {
            passenger.add_ticket(Ticket::new(self.key, TicketStatus::Confirmed));
        }
        for passenger in &mut self.waitlist {
            passenger.add_ticket(Ticket::new(self.key, TicketStatus::Waitlisted));
        }
    }

    /// Seat a passenger: append to the confirmed list and move one seat
    /// from empty to confirmed.
    fn seat_passenger(&mut self, passenger: Passenger) {
        self.confirmed.push(passenger);
        self.confirmed_seats += 1;
        self.empty_seats = self.empty_seats.saturating_sub(1);
    }

    /// Rewrite the status of every ticket belonging to every passenger
    /// currently on this flight to match their list membership. This is
    /// a full resync, not an incremental update; it is what keeps
    /// ticket status consistent with seat occupancy after cancellation.
    fn resync_ticket_statuses(&mut self) {
        let key = self.key;
        for passenger in &mut self.confirmed {
            passenger.retag_tickets(key, TicketStatus::Confirmed);
        }
        for passenger in &mut self.waitlist {
            passenger.retag_tickets(key, TicketStatus::Waitlisted);
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// A random booking or cancellation against a small passport pool.
    #[derive(Debug, Clone)]
    enum Op {
        Book(u8),
        Cancel(u8),
    }

    fn ops() -> impl Strategy<Value = Vec<Op>> {
        proptest::collection::vec(
            prop_oneof![
                (0u8..12).prop_map(Op::Book),
                (0u8..12).prop_map(Op::Cancel),
            ],
            0..60,
        )
    }

    proptest! {
        /// Seat-count invariants survive any operation sequence.
        #[test]
        fn invariants_hold_under_any_op_sequence(ops in ops()) {
            let mut f = Flight::new(FlightKey(1));
            for op in ops {
                match op {
                    Op::Book(n) => {
                        f.book(&format!("Passenger {n}"), &format!("P{n}"));
                    }
                    Op::Cancel(n) => {
                        f.cancel(&format!("P{n}"));
                    }
                }
                prop_assert_eq!(f.confirmed_seats() + f.empty_seats(), MAX_SEATS);
                prop_assert_eq!(f.confirmed_passengers().len(), f.confirmed_seats());
                prop_assert!(f.confirmed_seats() <= MAX_SEATS);
            }
        }

        /// After any operation sequence, no passport holds a place in
        /// more than one list.
        #[test]
        fn no_passport_appears_twice(ops in ops()) {
            let mut f = Flight::new(FlightKey(1));
            for op in ops {
                match op {
                    Op::Book(n) => {
                        f.book(&format!("Passenger {n}"), &format!("P{n}"));
                    }
                    Op::Cancel(n) => {
                        f.cancel(&format!("P{n}"));
                    }
                }
                let mut seen = std::collections::HashSet::new();
                for p in f.confirmed_passengers() {
                    prop_assert!(seen.insert(p.passport().to_string()));
                }
                for p in f.waitlist_passengers() {
                    prop_assert!(seen.insert(p.passport().to_string()));
                }
            }
        }
    }
}
