use std::net::SocketAddr;

use flight_server::registry::FlightRegistry;
use flight_server::store::{FlightStore, StoreConfig};
use flight_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // Where the flight data lives
    let path = std::env::var("FLIGHTS_CSV").unwrap_or_else(|_| "flights.csv".to_string());
    let store = FlightStore::new(StoreConfig::new(&path));

    // Load is best-effort; an unreadable file starts an empty network
    let registry = store.load().unwrap_or_else(|e| {
        eprintln!("Warning: {e}. Starting with an empty flight registry.");
        FlightRegistry::new()
    });
    println!("Loaded {} flights from {path}", registry.flight_count());

    let state = AppState::new(registry, store);
    let app = create_router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    println!("Flight Booking System listening on http://{addr}");
    println!();
    println!("API Endpoints:");
    println!("  GET   /health               - Health check");
    println!("  GET   /flights/search       - List flights in a date range");
    println!("  POST  /bookings             - Book a ticket");
    println!("  POST  /cancellations        - Cancel a ticket");
    println!("  PATCH /passengers/:passport - Edit passenger details");
    println!("  GET   /tickets/:passport    - View ticket status");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
