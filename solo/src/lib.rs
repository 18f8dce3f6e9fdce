//! # solo
//!
//! Turn any type into a globally discoverable single-instance object.
//!
//! This crate is a **façade** over `solo-core`.  Application code should
//! depend on this crate rather than on `solo-core` directly.
//!
//! ## Quick start
//!
//! ```rust
//! use solo::{define_singleton, Singleton};
//!
//! #[derive(Default)]
//! struct Widget { clicks: u32 }
//! define_singleton!(Widget);
//!
//! fn clicks() -> Option<u32> {
//!     Widget::with_instance(|w| w.clicks)
//! }
//!
//! {
//!     let w = Widget { clicks: 3 }.install();
//!     assert!(std::ptr::eq(&*Widget::get_instance(), &*w));
//!     assert_eq!(clicks(), Some(3));
//! }
//! assert_eq!(clicks(), None);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Errors, slots, guards, and the singleton capability.
pub use solo_core as core;

pub use solo_core::{define_singleton, ensure};
pub use solo_core::{Error, Instance, Result, Singleton, SingletonSlot, SlotState};
