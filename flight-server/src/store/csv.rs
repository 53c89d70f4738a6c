//! Flat-file persistence for the flight registry.
//!
//! The backing store is a comma-separated file with one header line and
//! one line per flight. Load is best-effort: a corrupt line is logged
//! and skipped, never aborting the whole load. Save is a full rewrite
//! of the file from in-memory state.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::{error, warn};

use crate::domain::{Flight, FlightId, MAX_SEATS, Passenger, SeatCountPolicy};
use crate::registry::FlightRegistry;

use super::error::StoreError;

/// Header line of the flights file.
const HEADER: &str = "Flight ID,Date,Status,Confirmed Passengers,\
                      Waitlisted Passengers,Confirmed Seats,Empty Seats,Waitlist Count";

/// Configuration for the flights file store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Path to the flights file.
    pub path: PathBuf,
}

impl StoreConfig {
    /// Create a config pointing at the given flights file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new("flights.csv")
    }
}

/// The flights file store.
#[derive(Debug, Clone)]
pub struct FlightStore {
    config: StoreConfig,
}

/// One successfully parsed data line, before assembly into a flight.
struct ParsedRecord {
    date: NaiveDate,
    confirmed_seats: i64,
    empty_seats: i64,
    confirmed: Vec<Passenger>,
    waitlist: Vec<Passenger>,
}

impl FlightStore {
    /// Create a store with the given config.
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    /// Path to the flights file.
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// Load a registry from the flights file.
    ///
    /// Fails only if the file itself cannot be read. Each line is
    /// validated independently; bad lines are logged and skipped, and
    /// every loaded flight has its waitlist drained into any free seats
    /// before tickets are issued.
    pub fn load(&self) -> Result<FlightRegistry, StoreError> {
        let contents = std::fs::read_to_string(&self.config.path).map_err(|source| {
            StoreError::Read {
                path: self.config.path.clone(),
                source,
            }
        })?;

        let mut registry = FlightRegistry::new();

        // First line is the header.
        for line in contents.lines().skip(1) {
            let Some(record) = parse_line(line) else {
                continue;
            };

            let mut flight = Flight::new(registry.allocate_key());
            // Out-of-range confirmed counts clamp, out-of-range empty
            // counts reject the whole line.
            let seated = flight
                .set_confirmed_seats(record.confirmed_seats, SeatCountPolicy::Clamp)
                .and_then(|()| flight.set_empty_seats(record.empty_seats, SeatCountPolicy::Reject));
            if let Err(err) = seated {
                error!(%err, line, "invalid seat values, skipping flight");
                continue;
            }

            for passenger in record.confirmed {
                flight.restore_confirmed(passenger);
            }
            for passenger in record.waitlist {
                flight.restore_waitlisted(passenger);
            }
            flight.reconcile_counts();
            flight.process_waitlist();
            flight.issue_restored_tickets();

            registry.insert_flight(record.date, flight);
        }

        Ok(registry)
    }

    /// Rewrite the flights file from the registry's current state.
    pub fn save(&self, registry: &FlightRegistry) -> Result<(), StoreError> {
        let mut out = String::from(HEADER);
        out.push('\n');

        for (date, index, flight) in registry.iter() {
            let id = FlightId::new(index, date);
            let status = if flight.has_vacancy() { "Available" } else { "Full" };
            let confirmed = passenger_cell(flight.confirmed_passengers().iter());
            let waitlisted = passenger_cell(flight.waitlist_passengers());

            out.push_str(&format!(
                "{id},{date},{status},{confirmed},{waitlisted},{c},{e},{w}\n",
                date = date.format("%Y-%m-%d"),
                c = flight.confirmed_seats(),
                e = flight.empty_seats(),
                w = flight.waitlist_len(),
            ));
        }

        std::fs::write(&self.config.path, out).map_err(|source| StoreError::Write {
            path: self.config.path.clone(),
            source,
        })
    }
}

/// Parse one data line, or `None` (with a log) if it is unusable.
fn parse_line(line: &str) -> Option<ParsedRecord> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() < 8 {
        error!(line, "flights file format error: insufficient fields");
        return None;
    }

    let label = fields[0];
    let date = match NaiveDate::parse_from_str(fields[1].trim(), "%Y-%m-%d") {
        Ok(date) => date,
        Err(_) => {
            error!(flight = label, value = fields[1], "invalid date format in flights file");
            return None;
        }
    };

    // Non-numeric seat counts reset both counters.
    let (mut confirmed_seats, mut empty_seats) =
        match (fields[5].trim().parse::<i64>(), fields[6].trim().parse::<i64>()) {
            (Ok(c), Ok(e)) => (c, e),
            _ => {
                warn!(flight = label, "failed to parse seat numbers, resetting");
                (0, MAX_SEATS as i64)
            }
        };

    // checked_add: corrupt counts can be large enough to overflow, and
    // an overflowing sum is just another inconsistency to recover from.
    if confirmed_seats.checked_add(empty_seats) != Some(MAX_SEATS as i64) || empty_seats < 0 {
        warn!(
            flight = label,
            confirmed_seats, empty_seats, "seat data inconsistency detected"
        );
        confirmed_seats = confirmed_seats.min(MAX_SEATS as i64);
        empty_seats = MAX_SEATS as i64 - confirmed_seats;
    }

    Some(ParsedRecord {
        date,
        confirmed_seats,
        empty_seats,
        confirmed: parse_passenger_list(fields[3]),
        waitlist: parse_passenger_list(fields[4]),
    })
}

/// Parse a `;`-separated list of `Name(Passport)` entries.
///
/// Malformed entries within the cell are skipped silently.
fn parse_passenger_list(cell: &str) -> Vec<Passenger> {
    cell.split(';')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .filter_map(|entry| {
            let open = entry.find('(')?;
            let close = entry.find(')')?;
            if open == 0 || close <= open {
                return None;
            }
            let name = entry[..open].trim();
            let passport = entry[open + 1..close].trim();
            Some(Passenger::new(passport, name))
        })
        .collect()
}

/// Render a passenger list as a `;`-separated cell.
fn passenger_cell<'a>(passengers: impl Iterator<Item = &'a Passenger>) -> String {
    passengers
        .map(Passenger::to_string)
        .collect::<Vec<_>>()
        .join(";")
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use tempfile::tempdir;

    /// Per-flight shape: how many confirmed seats to book and how many
    /// waitlist entries to add behind them.
    fn network() -> impl Strategy<Value = Vec<(u32, usize, usize)>> {
        proptest::collection::vec((0u32..400, 0usize..=MAX_SEATS, 0usize..4), 0..8)
    }

    proptest! {
        /// Save-then-load reproduces seat counts, list order, and
        /// ticket statuses for every flight.
        #[test]
        fn round_trip(network in network()) {
            let mut registry = FlightRegistry::new();
            let base = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();

            for (i, (day, confirmed, waitlisted)) in network.iter().enumerate() {
                let date = base + chrono::Days::new(u64::from(*day));
                let key = registry.add_flight(date);
                let id = registry.display_id(key).unwrap();
                for j in 0..*confirmed {
                    registry.book(&id, &format!("C{i}x{j}"), &format!("C{i}x{j}")).unwrap();
                }
                if *confirmed == MAX_SEATS {
                    for j in 0..*waitlisted {
                        registry.book(&id, &format!("W{i}x{j}"), &format!("W{i}x{j}")).unwrap();
                    }
                }
            }

            let dir = tempdir().unwrap();
            let store = FlightStore::new(StoreConfig::new(dir.path().join("flights.csv")));
            store.save(&registry).unwrap();
            let loaded = store.load().unwrap();

            prop_assert_eq!(loaded.flight_count(), registry.flight_count());
            for ((d1, i1, before), (d2, i2, after)) in registry.iter().zip(loaded.iter()) {
                prop_assert_eq!(d1, d2);
                prop_assert_eq!(i1, i2);
                prop_assert_eq!(before.confirmed_seats(), after.confirmed_seats());
                prop_assert_eq!(before.empty_seats(), after.empty_seats());
                prop_assert_eq!(before.waitlist_len(), after.waitlist_len());

                let confirmed_before: Vec<&str> =
                    before.confirmed_passengers().iter().map(|p| p.passport()).collect();
                let confirmed_after: Vec<&str> =
                    after.confirmed_passengers().iter().map(|p| p.passport()).collect();
                prop_assert_eq!(confirmed_before, confirmed_after);

                let waitlist_before: Vec<&str> =
                    before.waitlist_passengers().map(|p| p.passport()).collect();
                let waitlist_after: Vec<&str> =
                    after.waitlist_passengers().map(|p| p.passport()).collect();
                prop_assert_eq!(waitlist_before, waitlist_after);

                for (pb, pa) in before
                    .confirmed_passengers()
                    .iter()
                    .zip(after.confirmed_passengers())
                {
                    prop_assert_eq!(pb.tickets()[0].status(), pa.tickets()[0].status());
                }
                for (pb, pa) in before.waitlist_passengers().zip(after.waitlist_passengers()) {
                    prop_assert_eq!(pb.tickets()[0].status(), pa.tickets()[0].status());
                }
            }
        }
    }
}
