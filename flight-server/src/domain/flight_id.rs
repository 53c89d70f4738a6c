//! Display identity for flights.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

/// Error returned when parsing an invalid flight id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid flight id: {reason}")]
pub struct InvalidFlightId {
    reason: &'static str,
}

/// A flight's external identity: `Flight-<index>-<yyyy>-<mm>-<dd>`.
///
/// The index addresses a position within that date's flight list, so
/// this is a positional, not content-addressed, identity. Flights carry
/// a stable [`FlightKey`](super::FlightKey) internally; a `FlightId` is
/// derived from registry position whenever one is displayed.
///
/// # Examples
///
/// ```
/// use flight_server::domain::FlightId;
///
/// let id: FlightId = "Flight-2-2026-08-23".parse().unwrap();
/// assert_eq!(id.index, 2);
/// assert_eq!(id.to_string(), "Flight-2-2026-08-23");
///
/// assert!("Flight-2-2026-08".parse::<FlightId>().is_err());
/// assert!("Plane-2-2026-08-23".parse::<FlightId>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlightId {
    /// Position within the date's flight list.
    pub index: usize,
    /// Departure date.
    pub date: NaiveDate,
}

impl FlightId {
    /// Create a flight id from its parts.
    pub fn new(index: usize, date: NaiveDate) -> Self {
        Self { index, date }
    }
}

impl FromStr for FlightId {
    type Err = InvalidFlightId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('-').collect();
        if parts.len() != 5 {
            return Err(InvalidFlightId {
                reason: "expected Flight-<index>-<yyyy>-<mm>-<dd>",
            });
        }
        if parts[0] != "Flight" {
            return Err(InvalidFlightId {
                reason: "must start with \"Flight-\"",
            });
        }
        let index: usize = parts[1].parse().map_err(|_| InvalidFlightId {
            reason: "index is not a number",
        })?;
        let date_str = format!("{}-{}-{}", parts[2], parts[3], parts[4]);
        let date =
            NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|_| InvalidFlightId {
                reason: "date is not a valid yyyy-mm-dd date",
            })?;

        Ok(Self { index, date })
    }
}

impl fmt::Display for FlightId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Flight-{}-{}", self.index, self.date.format("%Y-%m-%d"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parse_valid_id() {
        let id: FlightId = "Flight-0-2026-01-05".parse().unwrap();
        assert_eq!(id.index, 0);
        assert_eq!(id.date, date(2026, 1, 5));
    }

    #[test]
    fn reject_wrong_prefix() {
        assert!("Plane-0-2026-01-05".parse::<FlightId>().is_err());
        assert!("flight-0-2026-01-05".parse::<FlightId>().is_err());
    }

    #[test]
    fn reject_wrong_shape() {
        assert!("".parse::<FlightId>().is_err());
        assert!("Flight-0".parse::<FlightId>().is_err());
        assert!("Flight-0-2026-01".parse::<FlightId>().is_err());
        assert!("Flight-0-2026-01-05-extra".parse::<FlightId>().is_err());
    }

    #[test]
    fn reject_bad_index() {
        assert!("Flight-x-2026-01-05".parse::<FlightId>().is_err());
        assert!("Flight--1-2026-01-05".parse::<FlightId>().is_err());
    }

    #[test]
    fn reject_bad_date() {
        assert!("Flight-0-2026-13-05".parse::<FlightId>().is_err());
        assert!("Flight-0-2026-02-30".parse::<FlightId>().is_err());
        assert!("Flight-0-yyyy-mm-dd".parse::<FlightId>().is_err());
    }

    #[test]
    fn display_round_trip() {
        let id = FlightId::new(3, date(2026, 8, 23));
        assert_eq!(id.to_string(), "Flight-3-2026-08-23");
        assert_eq!("Flight-3-2026-08-23".parse::<FlightId>().unwrap(), id);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for arbitrary valid flight ids.
    fn valid_flight_id() -> impl Strategy<Value = FlightId> {
        (0usize..10_000, 0u32..=3_000).prop_map(|(index, day_offset)| {
            let base = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
            FlightId::new(index, base + chrono::Days::new(u64::from(day_offset)))
        })
    }

    proptest! {
        /// Format then parse returns the original id.
        #[test]
        fn round_trip(id in valid_flight_id()) {
            let parsed: FlightId = id.to_string().parse().unwrap();
            prop_assert_eq!(parsed, id);
        }

        /// Arbitrary junk never panics the parser.
        #[test]
        fn junk_never_panics(s in ".{0,40}") {
            let _ = s.parse::<FlightId>();
        }
    }
}
