//! # solo-core
//!
//! Per-type singleton tracking for solo.
//!
//! A type opts in by implementing [`Singleton`] (usually through
//! [`define_singleton!`]).  Registering a value with [`Instance::new`] fills
//! the type's process-wide slot; dropping the returned guard empties it.  In
//! between, [`Singleton::get_instance`] and [`Singleton::try_get_instance`]
//! reach the live object from anywhere in the program.
//!
//! Contract violations (a second live instance, a strict lookup with nothing
//! registered) are programmer errors.  They are checked in every build
//! profile and reported through the [`Error`] enum.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Error type and the `ensure!` macro.
pub mod errors;

/// Design patterns: slot, instance guard, singleton capability.
pub mod patterns;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use errors::{Error, Result};
pub use patterns::instance::Instance;
pub use patterns::singleton::Singleton;
pub use patterns::slot::{SingletonSlot, SlotState};
