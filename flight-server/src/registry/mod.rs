//! The flight registry: every flight in the network, indexed by date.
//!
//! The registry owns all flights and mediates every lookup and
//! mutation. It holds no global state; callers create one at load time,
//! operate on it, and persist it through the store.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::domain::{
    BookOutcome, Cancellation, Flight, FlightId, FlightKey, Passenger,
};

/// Errors from registry lookups.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// No flight exists at the given date/index position.
    #[error("flight {id} not found")]
    FlightNotFound {
        /// The id that failed to resolve.
        id: FlightId,
    },

    /// No passenger on any flight holds this passport number.
    #[error("no passenger found with passport number {passport}")]
    PassengerNotFound {
        /// The passport number searched for.
        passport: String,
    },

    /// The passport holds no confirmed seat on the given flight.
    #[error("passenger {passport} is not in the confirmed list of flight {id}")]
    NotConfirmed {
        /// The id of the flight.
        id: FlightId,
        /// The passport number searched for.
        passport: String,
    },
}

/// All flights, organized by departure date.
///
/// Dates iterate chronologically (the map is ordered), so passenger
/// lookup across flights is deterministic: earliest date first, flights
/// in list order, confirmed list before waitlist.
#[derive(Debug, Clone, Default)]
pub struct FlightRegistry {
    flights_by_date: BTreeMap<NaiveDate, Vec<Flight>>,
    next_key: u64,
}

impl FlightRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of flights across all dates.
    pub fn flight_count(&self) -> usize {
        self.flights_by_date.values().map(Vec::len).sum()
    }

    /// Allocate the next stable flight key.
    pub fn allocate_key(&mut self) -> FlightKey {
        let key = FlightKey(self.next_key);
        self.next_key += 1;
        key
    }

    /// Create an empty flight on the given date, returning its key.
    pub fn add_flight(&mut self, date: NaiveDate) -> FlightKey {
        let key = self.allocate_key();
        self.insert_flight(date, Flight::new(key));
        key
    }

    /// Append an already-built flight (used by the store loader).
    pub fn insert_flight(&mut self, date: NaiveDate, flight: Flight) {
        self.flights_by_date.entry(date).or_default().push(flight);
    }

    /// Flights departing on a date, in list order.
    pub fn flights_on(&self, date: NaiveDate) -> &[Flight] {
        self.flights_by_date
            .get(&date)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Resolve a positional flight id.
    pub fn resolve(&self, id: &FlightId) -> Result<&Flight, RegistryError> {
        self.flights_by_date
            .get(&id.date)
            .and_then(|flights| flights.get(id.index))
            .ok_or(RegistryError::FlightNotFound { id: *id })
    }

    /// Resolve a positional flight id for mutation.
    pub fn resolve_mut(&mut self, id: &FlightId) -> Result<&mut Flight, RegistryError> {
        self.flights_by_date
            .get_mut(&id.date)
            .and_then(|flights| flights.get_mut(id.index))
            .ok_or(RegistryError::FlightNotFound { id: *id })
    }

    /// The display id for a flight key, derived from its current
    /// position. `None` if the key is unknown.
    pub fn display_id(&self, key: FlightKey) -> Option<FlightId> {
        for (date, flights) in &self.flights_by_date {
            if let Some(index) = flights.iter().position(|f| f.key() == key) {
                return Some(FlightId::new(index, *date));
            }
        }
        None
    }

    /// Find the first passenger record holding this passport number.
    ///
    /// Scan order is deterministic: dates chronologically, flights in
    /// list order, each flight's confirmed list before its waitlist.
    pub fn find_by_passport(&self, passport: &str) -> Option<&Passenger> {
        self.flights_by_date.values().flatten().find_map(|flight| {
            flight
                .confirmed_passengers()
                .iter()
                .find(|p| p.passport() == passport)
                .or_else(|| flight.waitlist_passengers().find(|p| p.passport() == passport))
        })
    }

    fn find_by_passport_mut(&mut self, passport: &str) -> Option<&mut Passenger> {
        // Same scan order as find_by_passport.
        self.flights_by_date
            .values_mut()
            .flatten()
            .find_map(|flight| flight.passenger_mut(passport))
    }

    /// Book a seat on the flight addressed by `id`.
    pub fn book(
        &mut self,
        id: &FlightId,
        name: &str,
        passport: &str,
    ) -> Result<BookOutcome, RegistryError> {
        let flight = self.resolve_mut(id)?;
        Ok(flight.book(name, passport))
    }

    /// Cancel a confirmed seat on the flight addressed by `id`.
    pub fn cancel(&mut self, id: &FlightId, passport: &str) -> Result<Cancellation, RegistryError> {
        let flight = self.resolve_mut(id)?;
        flight.cancel(passport).ok_or(RegistryError::NotConfirmed {
            id: *id,
            passport: passport.to_string(),
        })
    }

    /// Partial update of the first-found passenger record.
    pub fn edit_passenger(
        &mut self,
        passport: &str,
        new_name: Option<&str>,
        new_passport: Option<&str>,
    ) -> Result<(), RegistryError> {
        let passenger =
            self.find_by_passport_mut(passport)
                .ok_or_else(|| RegistryError::PassengerNotFound {
                    passport: passport.to_string(),
                })?;
        passenger.edit_details(new_name, new_passport);
        Ok(())
    }

    /// Day-by-day listing of every date in the inclusive range.
    ///
    /// Dates with no flights yield an empty slice. The iterator is
    /// finite, restartable, and has no side effects.
    pub fn search(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> impl Iterator<Item = (NaiveDate, &[Flight])> {
        start
            .iter_days()
            .take_while(move |d| *d <= end)
            .map(move |d| (d, self.flights_on(d)))
    }

    /// Every flight with its date and position, in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, usize, &Flight)> {
        self.flights_by_date.iter().flat_map(|(date, flights)| {
            flights
                .iter()
                .enumerate()
                .map(move |(index, flight)| (*date, index, flight))
        })
    }
}
