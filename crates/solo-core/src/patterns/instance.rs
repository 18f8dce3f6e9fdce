//! Registration guard for singleton types.
//!
//! An [`Instance<T>`] owns the live `T` and keeps it registered in
//! `T`'s [`SingletonSlot`][crate::patterns::slot::SingletonSlot] for exactly as
//! long as the guard exists.  Creating the guard is the on-construct hook;
//! dropping it is the on-destruct hook.
//!
//! The guard is handed the fully typed `Arc<T>`, so the slot always refers to
//! the complete object no matter which other traits `T` implements or which
//! components it embeds.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use crate::errors::Result;
use crate::patterns::singleton::Singleton;

/// Keeps one instance of `T` registered while it is alive.
///
/// Where the guard itself lives (a local, a field of an owner, a `Box`)
/// decides the registration lifetime.
///
/// Only values passed through a guard are registered.  To make every
/// construction register, keep the singleton's fields private and give it a
/// constructor that returns `Instance<Self>`:
///
/// ```
/// use solo_core::{define_singleton, Instance, Singleton};
///
/// pub struct Mixer { channels: usize }
/// define_singleton!(Mixer);
///
/// impl Mixer {
///     pub fn new(channels: usize) -> Instance<Self> {
///         Instance::new(Mixer { channels })
///     }
/// }
///
/// let mixer = Mixer::new(8);
/// assert_eq!(Mixer::get_instance().channels, mixer.channels);
/// ```
pub struct Instance<T: Singleton> {
    value: Arc<T>,
}

impl<T: Singleton> Instance<T> {
    /// Register `value` as the single instance of `T`.
    ///
    /// # Panics
    /// With [`Error::DuplicateInstance`][crate::errors::Error::DuplicateInstance]
    /// if another instance of `T` is still registered.
    #[track_caller]
    pub fn new(value: T) -> Self {
        Self::from_arc(Arc::new(value))
    }

    /// Register an already shared `value` as the single instance of `T`.
    ///
    /// # Panics
    /// Same as [`Instance::new`].
    #[track_caller]
    pub fn from_arc(value: Arc<T>) -> Self {
        match Self::try_from_arc(value) {
            Ok(instance) => instance,
            Err(err) => err.raise(),
        }
    }

    /// Like [`Instance::new`], but returns the violation instead of panicking.
    pub fn try_new(value: T) -> Result<Self> {
        Self::try_from_arc(Arc::new(value))
    }

    /// Like [`Instance::from_arc`], but returns the violation instead of
    /// panicking.  On failure `value` is dropped and the slot is untouched.
    pub fn try_from_arc(value: Arc<T>) -> Result<Self> {
        T::slot().register(&value)?;
        Ok(Self { value })
    }

    /// The registered object as a shared pointer.
    ///
    /// Useful to upcast into `Arc<dyn Trait>` for one of the other traits the
    /// singleton implements.
    pub fn as_arc(&self) -> &Arc<T> {
        &self.value
    }
}

impl<T: Singleton> Deref for Instance<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T: Singleton> Drop for Instance<T> {
    fn drop(&mut self) {
        // The slot is cleared before `value` drops, so it never dangles.
        if let Err(err) = T::slot().release(&self.value) {
            if std::thread::panicking() {
                log::error!("singleton contract violated while unwinding: {err}");
            } else {
                err.raise();
            }
        }
    }
}

impl<T: Singleton + fmt::Debug> fmt::Debug for Instance<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Instance").field(&*self.value).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::define_singleton;
    use crate::errors::Error;
    use crate::patterns::slot::SlotState;
    use std::any::type_name;

    #[derive(Debug, PartialEq)]
    struct Counter(u32);
    define_singleton!(Counter);

    #[derive(Debug)]
    struct Fallible;
    define_singleton!(Fallible);

    struct Shared(&'static str);
    define_singleton!(Shared);

    struct Tracked;
    define_singleton!(Tracked);

    struct Cleared;
    struct Unwound;
    define_singleton!(Cleared, Unwound);

    #[test]
    fn guard_controls_registration() {
        assert_eq!(Counter::slot().state(), SlotState::Empty);
        {
            let counter = Instance::new(Counter(5));
            assert_eq!(counter.0, 5);
            assert_eq!(Counter::slot().state(), SlotState::Occupied);
            assert_eq!(format!("{counter:?}"), "Instance(Counter(5))");
        }
        assert_eq!(Counter::slot().state(), SlotState::Empty);
    }

    #[test]
    fn try_new_reports_duplicate() {
        let _first = Instance::try_new(Fallible).unwrap();
        let second = Instance::try_new(Fallible);
        assert_eq!(
            second.unwrap_err(),
            Error::DuplicateInstance(type_name::<Fallible>())
        );
        // The failed attempt must not disturb the registered instance.
        assert!(Fallible::is_registered());
    }

    #[test]
    fn from_arc_keeps_identity() {
        let shared = Arc::new(Shared("config"));
        let instance = Instance::from_arc(Arc::clone(&shared));
        assert!(Arc::ptr_eq(instance.as_arc(), &shared));
        assert!(Arc::ptr_eq(&Shared::get_instance(), &shared));
        assert_eq!(Shared::get_instance().0, "config");

        drop(instance);
        // Our own clone survives, but the registration is gone.
        assert_eq!(shared.0, "config");
        assert!(Shared::try_get_instance().is_none());
    }

    #[test]
    fn failed_try_from_arc_leaves_slot_alone() {
        let first = Instance::new(Tracked);
        let rejected = Arc::new(Tracked);
        assert!(Instance::try_from_arc(Arc::clone(&rejected)).is_err());
        assert!(Arc::ptr_eq(&Tracked::get_instance(), first.as_arc()));
        assert_eq!(Arc::strong_count(&rejected), 1);
    }

    #[test]
    #[should_panic(expected = "release of unregistered instance")]
    fn dropping_unregistered_guard_panics() {
        let guard = Instance::new(Cleared);
        Cleared::slot().clear_for_test();
        drop(guard);
    }

    #[test]
    fn unregistered_drop_while_unwinding_does_not_double_panic() {
        let result = std::panic::catch_unwind(|| {
            let _guard = Instance::new(Unwound);
            Unwound::slot().clear_for_test();
            panic!("original failure");
        });
        let payload = result.unwrap_err();
        assert_eq!(payload.downcast_ref::<&str>(), Some(&"original failure"));
        assert!(!Unwound::is_registered());
    }
}
