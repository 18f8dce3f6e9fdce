//! Per-type singleton slot.
//!
//! A [`SingletonSlot<T>`] is the single process-wide storage location that
//! records which instance of `T` is currently live.  It holds a `Weak<T>`, so
//! it never allocates, frees, or extends the lifetime of the object it
//! tracks.  An empty `Weak` is the empty state.
//!
//! Only [`Instance`][crate::patterns::instance::Instance] writes a slot; the
//! rest of the world can only look at it.

use std::any::type_name;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use crate::ensure;
use crate::errors::{Error, Result};

/// Observable state of a [`SingletonSlot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotState {
    /// No instance is registered.
    Empty,
    /// An instance is registered and alive.
    Occupied,
}

/// Storage for the currently registered instance of `T`, or nothing.
///
/// Register/release and lookups serialise on an internal `Mutex`, so the
/// uniqueness check and the store are a single atomic step.
pub struct SingletonSlot<T> {
    instance: Mutex<Weak<T>>,
}

impl<T> SingletonSlot<T> {
    /// Create an empty slot.  Usable in a `static` initialiser.
    pub const fn new() -> Self {
        Self {
            instance: Mutex::new(Weak::new()),
        }
    }

    // Every critical section leaves the slot consistent, so a poisoned lock
    // still guards valid state.
    fn lock(&self) -> MutexGuard<'_, Weak<T>> {
        self.instance.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Return the registered instance, or `None` if the slot is empty.
    pub fn get(&self) -> Option<Arc<T>> {
        self.lock().upgrade()
    }

    /// Return `true` if an instance is registered.
    pub fn is_occupied(&self) -> bool {
        self.lock().strong_count() > 0
    }

    /// Return the current [`SlotState`].
    pub fn state(&self) -> SlotState {
        if self.is_occupied() {
            SlotState::Occupied
        } else {
            SlotState::Empty
        }
    }

    /// Record `instance` as the live one.
    ///
    /// Fails with [`Error::DuplicateInstance`] if an instance is already
    /// registered; the slot is left untouched in that case.
    pub(crate) fn register(&self, instance: &Arc<T>) -> Result<()> {
        let mut slot = self.lock();
        ensure!(
            slot.strong_count() == 0,
            Error::DuplicateInstance(type_name::<T>())
        );
        *slot = Arc::downgrade(instance);
        // Loggers may look up singletons themselves; never log under the lock.
        drop(slot);
        log::debug!("registered singleton `{}`", type_name::<T>());
        Ok(())
    }

    /// Clear the slot, which must currently hold `instance`.
    ///
    /// Fails with [`Error::UnregisteredRelease`] if the slot is empty or holds
    /// a different object.
    pub(crate) fn release(&self, instance: &Arc<T>) -> Result<()> {
        let mut slot = self.lock();
        ensure!(
            slot.strong_count() > 0 && std::ptr::eq(slot.as_ptr(), Arc::as_ptr(instance)),
            Error::UnregisteredRelease(type_name::<T>())
        );
        *slot = Weak::new();
        drop(slot);
        log::debug!("released singleton `{}`", type_name::<T>());
        Ok(())
    }
}

#[cfg(test)]
impl<T> SingletonSlot<T> {
    /// Empty the slot without going through a guard.
    pub(crate) fn clear_for_test(&self) {
        *self.lock() = Weak::new();
    }
}

impl<T> Default for SingletonSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for SingletonSlot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SingletonSlot<{}>({:?})", type_name::<T>(), self.state())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let slot: SingletonSlot<u32> = SingletonSlot::new();
        assert_eq!(slot.state(), SlotState::Empty);
        assert!(slot.get().is_none());
    }

    #[test]
    fn register_then_release() {
        let slot = SingletonSlot::new();
        let value = Arc::new(7_u32);
        slot.register(&value).unwrap();
        assert_eq!(slot.state(), SlotState::Occupied);
        assert!(Arc::ptr_eq(&slot.get().unwrap(), &value));

        slot.release(&value).unwrap();
        assert_eq!(slot.state(), SlotState::Empty);
        assert!(slot.get().is_none());
    }

    #[test]
    fn duplicate_is_rejected_without_overwrite() {
        let slot = SingletonSlot::new();
        let first = Arc::new(1_u32);
        let second = Arc::new(2_u32);
        slot.register(&first).unwrap();
        assert_eq!(
            slot.register(&second),
            Err(Error::DuplicateInstance(type_name::<u32>()))
        );
        assert!(Arc::ptr_eq(&slot.get().unwrap(), &first));
    }

    #[test]
    fn release_checks_identity() {
        let slot = SingletonSlot::new();
        let registered = Arc::new(1_u32);
        let stranger = Arc::new(1_u32);
        assert_eq!(
            slot.release(&registered),
            Err(Error::UnregisteredRelease(type_name::<u32>()))
        );

        slot.register(&registered).unwrap();
        assert_eq!(
            slot.release(&stranger),
            Err(Error::UnregisteredRelease(type_name::<u32>()))
        );
        assert_eq!(slot.state(), SlotState::Occupied);
    }

    #[test]
    fn dead_weak_reads_as_empty() {
        let slot = SingletonSlot::new();
        {
            let value = Arc::new(3_u32);
            slot.register(&value).unwrap();
        }
        // The guard normally clears the slot first; the slot itself must still
        // never hand out a dead object.
        assert_eq!(slot.state(), SlotState::Empty);
        assert!(slot.get().is_none());
    }

    #[test]
    fn debug_shows_state() {
        let slot: SingletonSlot<u32> = SingletonSlot::default();
        assert_eq!(format!("{slot:?}"), "SingletonSlot<u32>(Empty)");
    }
}
