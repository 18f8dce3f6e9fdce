//! Error types for solo.
//!
//! Every variant of [`Error`] is a contract violation by the programmer rather
//! than a runtime condition to recover from.  The strict API surfaces them as
//! a panic through [`Error::raise`]; the `try_*` API hands them back as a
//! plain `Result` so that callers can propagate them with `?`.

use thiserror::Error;

/// The error type used throughout solo.
///
/// Each variant carries the [`std::any::type_name`] of the singleton type the
/// failed check belongs to.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A second instance was registered while one is still live.
    #[error("duplicate instance of `{0}`: an instance is already registered")]
    DuplicateInstance(&'static str),

    /// The strict accessor was called while no instance is registered.
    #[error("uninitialized access to `{0}`: no instance is registered")]
    UninitializedAccess(&'static str),

    /// An instance was released that is not the registered one.
    #[error("release of unregistered instance of `{0}`")]
    UnregisteredRelease(&'static str),
}

impl Error {
    /// Name of the singleton type the failed check belongs to.
    pub fn type_name(&self) -> &'static str {
        match *self {
            Self::DuplicateInstance(name)
            | Self::UninitializedAccess(name)
            | Self::UnregisteredRelease(name) => name,
        }
    }

    /// Report the violation and panic with its message.
    ///
    /// These checks are compiled into every build profile.
    #[track_caller]
    pub fn raise(self) -> ! {
        log::error!("singleton contract violated: {self}");
        panic!("{self}")
    }
}

/// Shorthand `Result` type used throughout solo.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Return `Err($err)` from the enclosing function unless `$cond` holds.
///
/// # Example
/// ```
/// use solo_core::{ensure, errors::Error};
/// fn occupied(flag: bool) -> solo_core::errors::Result<()> {
///     ensure!(flag, Error::UninitializedAccess("Widget"));
///     Ok(())
/// }
/// assert!(occupied(true).is_ok());
/// assert_eq!(occupied(false), Err(Error::UninitializedAccess("Widget")));
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr) => {
        if !$cond {
            return Err($err);
        }
    };
}
