//! Domain error types.
//!
//! These errors represent validation failures in the booking domain.
//! They are distinct from store/IO errors.

/// Domain-level errors for seat-count validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// A seat count was outside `[0, MAX_SEATS]` and the strict policy
    /// was in effect.
    #[error("invalid {field} seats value: {value}")]
    SeatCountOutOfRange {
        /// Which counter was being set ("confirmed" or "empty").
        field: &'static str,
        /// The rejected value.
        value: i64,
    },
}
