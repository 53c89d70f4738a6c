//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
};
use chrono::NaiveDate;
use tracing::error;

use crate::domain::FlightId;
use crate::registry::{FlightRegistry, RegistryError};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/flights/search", get(search_flights))
        .route("/bookings", post(book_ticket))
        .route("/cancellations", post(cancel_ticket))
        .route("/passengers/:passport", patch(edit_passenger))
        .route("/tickets/:passport", get(ticket_status))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// List every flight on every day of an inclusive date range.
async fn search_flights(
    State(state): State<AppState>,
    Query(req): Query<SearchFlightsRequest>,
) -> Result<Json<SearchFlightsResponse>, AppError> {
    let start = parse_date(&req.start)?;
    let end = parse_date(&req.end)?;

    let registry = state.registry.read().await;
    let days = registry
        .search(start, end)
        .map(|(date, flights)| DaySchedule {
            date: date.format("%Y-%m-%d").to_string(),
            flights: flights
                .iter()
                .enumerate()
                .map(|(index, flight)| {
                    FlightSummary::from_flight(FlightId::new(index, date), flight)
                })
                .collect(),
        })
        .collect();

    Ok(Json(SearchFlightsResponse { days }))
}

/// Book a seat (or a waitlist place) on a flight.
async fn book_ticket(
    State(state): State<AppState>,
    Json(req): Json<BookTicketRequest>,
) -> Result<Json<BookTicketResponse>, AppError> {
    let id = parse_flight_id(&req.flight_id)?;

    let mut registry = state.registry.write().await;
    let outcome = registry.book(&id, &req.name, &req.passport_number)?;
    persist(&state, &registry);

    // Duplicate bookings are rejected silently, not errors: the
    // response says so, but the status is still 200.
    Ok(Json(BookTicketResponse::from_outcome(&id, outcome)))
}

/// Cancel a confirmed seat, promoting the head of the waitlist.
async fn cancel_ticket(
    State(state): State<AppState>,
    Json(req): Json<CancelTicketRequest>,
) -> Result<Json<CancelTicketResponse>, AppError> {
    let id = parse_flight_id(&req.flight_id)?;

    let mut registry = state.registry.write().await;
    let cancellation = registry.cancel(&id, &req.passport_number)?;
    persist(&state, &registry);

    Ok(Json(CancelTicketResponse {
        flight_id: id.to_string(),
        canceled: cancellation.passenger.name().to_string(),
        promoted: cancellation.promoted,
    }))
}

/// Partial update of the first passenger record matching a passport.
async fn edit_passenger(
    State(state): State<AppState>,
    Path(passport): Path<String>,
    Json(req): Json<EditPassengerRequest>,
) -> Result<Json<PassengerView>, AppError> {
    let mut registry = state.registry.write().await;
    registry.edit_passenger(&passport, req.name.as_deref(), req.passport_number.as_deref())?;
    persist(&state, &registry);

    // The record may now be filed under a new passport number.
    let effective = match req.passport_number.as_deref() {
        Some(new) if !new.is_empty() => new,
        _ => passport.as_str(),
    };
    let passenger = registry
        .find_by_passport(effective)
        .ok_or_else(|| AppError::NotFound {
            message: format!("passenger {effective} not found"),
        })?;

    Ok(Json(PassengerView::from_passenger(passenger)))
}

/// Show the status of every ticket held under a passport number.
async fn ticket_status(
    State(state): State<AppState>,
    Path(passport): Path<String>,
) -> Result<Json<TicketStatusResponse>, AppError> {
    let registry = state.registry.read().await;
    let passenger = registry
        .find_by_passport(&passport)
        .ok_or_else(|| AppError::NotFound {
            message: format!("passenger {passport} not found"),
        })?;

    let tickets = passenger
        .tickets()
        .iter()
        .map(|ticket| TicketView {
            flight_id: registry
                .display_id(ticket.flight())
                .map(|id| id.to_string())
                .unwrap_or_default(),
            status: ticket.status().to_string(),
        })
        .collect();

    Ok(Json(TicketStatusResponse {
        passenger: PassengerView::from_passenger(passenger),
        tickets,
    }))
}

/// Rewrite the backing store from current state.
///
/// A failed save is logged and the request still succeeds; there is no
/// transactional guarantee between the mutation and the write.
fn persist(state: &AppState, registry: &FlightRegistry) {
    if let Err(err) = state.store.save(registry) {
        error!(%err, "failed to save flights file");
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| AppError::BadRequest {
        message: format!("invalid date: {s}"),
    })
}

fn parse_flight_id(s: &str) -> Result<FlightId, AppError> {
    s.parse().map_err(|_| AppError::BadRequest {
        message: format!("invalid flight id: {s}"),
    })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<RegistryError> for AppError {
    fn from(e: RegistryError) -> Self {
        match e {
            RegistryError::FlightNotFound { .. }
            | RegistryError::PassengerNotFound { .. }
            | RegistryError::NotConfirmed { .. } => AppError::NotFound {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message.clone()),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message.clone()),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message.clone()),
        };

        error!(%status, %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn registry_errors_map_to_not_found() {
        let id = FlightId::new(0, NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());

        let err: AppError = RegistryError::FlightNotFound { id }.into();
        assert!(matches!(err, AppError::NotFound { .. }));

        let err: AppError = RegistryError::PassengerNotFound {
            passport: "A100".into(),
        }
        .into();
        assert!(matches!(err, AppError::NotFound { .. }));

        let err: AppError = RegistryError::NotConfirmed {
            id,
            passport: "A100".into(),
        }
        .into();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[test]
    fn date_parsing() {
        assert!(parse_date("2026-03-01").is_ok());
        assert!(parse_date("01/03/2026").is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn flight_id_parsing() {
        assert!(parse_flight_id("Flight-0-2026-03-01").is_ok());
        assert!(parse_flight_id("Flight-0").is_err());
    }
}
