//! Singleton capability.
//!
//! Any concrete type becomes a globally discoverable single-instance object
//! by implementing [`Singleton`], which ties it to its own
//! [`SingletonSlot`].  The slot is filled while an
//! [`Instance`] guard for the type is alive and is empty otherwise.
//!
//! Registration is opt-in per value: a plain `T` can exist without ever being
//! registered.  Singleton types should keep their fields private and expose a
//! constructor that returns `Instance<Self>`, so that every construction
//! registers.
//!
//! Rust has no generic statics, so each type's slot is a private `static`
//! declared by [`define_singleton!`][crate::define_singleton].
//!
//! ```
//! use solo_core::define_singleton;
//! use solo_core::patterns::singleton::Singleton;
//!
//! struct TextureManager { textures: Vec<String> }
//! define_singleton!(TextureManager);
//!
//! assert!(TextureManager::try_get_instance().is_none());
//! {
//!     let _manager = TextureManager { textures: vec!["stone1".into()] }.install();
//!     assert_eq!(TextureManager::get_instance().textures[0], "stone1");
//! }
//! assert!(TextureManager::try_get_instance().is_none());
//! ```

use std::any::type_name;
use std::sync::Arc;

use crate::errors::{Error, Result};
pub use crate::patterns::instance::Instance;
pub use crate::patterns::slot::{SingletonSlot, SlotState};

/// A type with at most one registered instance at a time.
///
/// Slots are process-wide and shared by all threads, hence the `Send + Sync`
/// bound.
pub trait Singleton: Sized + Send + Sync + 'static {
    /// The slot tracking the registered instance of `Self`.
    fn slot() -> &'static SingletonSlot<Self>;

    /// Return the registered instance.
    ///
    /// # Panics
    /// With [`Error::UninitializedAccess`] if no instance is registered.
    #[track_caller]
    fn get_instance() -> Arc<Self> {
        match Self::instance() {
            Ok(instance) => instance,
            Err(err) => err.raise(),
        }
    }

    /// Return the registered instance, or `None` if there is none.
    fn try_get_instance() -> Option<Arc<Self>> {
        Self::slot().get()
    }

    /// Return the registered instance, or [`Error::UninitializedAccess`].
    fn instance() -> Result<Arc<Self>> {
        Self::try_get_instance().ok_or(Error::UninitializedAccess(type_name::<Self>()))
    }

    /// Return `true` if an instance is registered.
    fn is_registered() -> bool {
        Self::slot().is_occupied()
    }

    /// Run `f` against the registered instance, if any.
    fn with_instance<F, R>(f: F) -> Option<R>
    where
        F: FnOnce(&Self) -> R,
    {
        Self::try_get_instance().map(|instance| f(instance.as_ref()))
    }

    /// Register `self` as the single instance; see [`Instance::new`].
    #[track_caller]
    fn install(self) -> Instance<Self> {
        Instance::new(self)
    }
}

/// Implement [`Singleton`] for one or more concrete types.
///
/// Each type gets its own private `static` slot, so the slots of different
/// types never interact.  Generic type parameters are not supported; list
/// each concrete instantiation instead (`define_singleton!(Pool<u8>)`).
///
/// # Example
/// ```
/// use solo_core::define_singleton;
/// use solo_core::patterns::singleton::{Instance, Singleton};
///
/// struct Registry { data: Vec<String> }
/// struct Clock;
/// define_singleton!(Registry, Clock);
///
/// let registry = Instance::new(Registry { data: Vec::new() });
/// assert!(Registry::get_instance().data.is_empty());
/// assert!(!Clock::is_registered());
/// drop(registry);
/// assert!(!Registry::is_registered());
/// ```
#[macro_export]
macro_rules! define_singleton {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::patterns::singleton::Singleton for $ty {
                fn slot() -> &'static $crate::patterns::slot::SingletonSlot<Self> {
                    static SLOT: $crate::patterns::slot::SingletonSlot<$ty> =
                        $crate::patterns::slot::SingletonSlot::new();
                    &SLOT
                }
            }
        )+
    };
}
