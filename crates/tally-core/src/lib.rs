//! tally core: transport-agnostic domain types and the shared error surface.
//!
//! This crate defines the entity naming rules, the counter/health value types
//! and the error taxonomy shared by the server, its store backends and tests.
//! It intentionally carries no runtime or storage dependencies.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths surface as `TallyError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod entity;
pub mod error;
pub mod model;

/// Shared result type.
pub use error::{ClientCode, Result, TallyError};
pub use entity::{Entity, EntityRegistry, MAX_ENTITY_LEN};
pub use model::{HealthStatus, VoteCounter};
