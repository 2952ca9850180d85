//! tally server library entry.
//!
//! Wires the counter store, health monitor, metrics registry and vote service
//! behind an axum router. Consumed by the binary (`main.rs`) and by
//! integration tests.

pub mod api;
pub mod app_state;
pub mod config;
pub mod error;
pub mod health;
pub mod obs;
pub mod ops;
pub mod router;
pub mod service;
pub mod store;
