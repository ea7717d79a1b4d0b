//! [`Database`]-related implementations.

#[cfg(test)]
pub(crate) mod mock;
#[cfg(feature = "postgres")]
pub mod postgres;

use derive_more::{Display, Error as StdError, From};

#[cfg(feature = "postgres")]
pub use self::postgres::Postgres;

/// Database operation.
pub use common::Handler as Database;

/// [`Database`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    #[cfg(feature = "postgres")]
    /// [`Postgres`] error.
    Postgres(postgres::Error),

    /// Violation of the named exclusion constraint, raised by the
    /// [`mock::Mock`] database.
    #[cfg(test)]
    #[display("exclusion constraint `{_0}` violated")]
    #[from(ignore)]
    ExclusionViolation(#[error(not(source))] &'static str),
}

impl Error {
    /// Checks if the error is an exclusion violation of the specified
    /// constraint.
    #[must_use]
    pub fn is_exclusion_violation(&self, constraint: Option<&str>) -> bool {
        match self {
            #[cfg(feature = "postgres")]
            Self::Postgres(e) => e.is_exclusion_violation(constraint),
            #[cfg(test)]
            Self::ExclusionViolation(name) => {
                constraint.is_none_or(|c| c == *name)
            }
            #[cfg(not(any(feature = "postgres", test)))]
            _ => {
                let _ = constraint;
                match *self {}
            }
        }
    }
}
