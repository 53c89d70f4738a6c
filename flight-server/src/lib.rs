//! Flight seat booking and waitlist server.
//!
//! Manages seat booking and FIFO waitlisting for a fixed-capacity
//! flight network, persisting state to a flat comma-separated file.

pub mod domain;
pub mod registry;
pub mod store;
pub mod web;
