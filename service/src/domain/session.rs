//! [`Session`] definitions.

use derive_more::From;

use crate::domain::{agent, renter};
#[cfg(doc)]
use crate::domain::{Booking, Property};

/// Authenticated actor of an operation.
///
/// Issued by the identity collaborator and passed explicitly into every
/// role-checked operation; the core trusts it for authorization decisions
/// (e.g. who may cancel a [`Booking`]).
#[derive(Clone, Copy, Debug, Eq, From, PartialEq)]
pub enum Session {
    /// A renter acting on their own [`Booking`]s.
    Renter(renter::Id),

    /// An agent acting on their own [`Property`]s.
    Agent(agent::Id),
}
