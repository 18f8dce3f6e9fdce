//! Patterns sub-module: slot, instance guard, singleton capability.

pub mod instance;
pub mod singleton;
pub mod slot;
