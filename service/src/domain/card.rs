//! Funding source definitions.
//!
//! Card records are owned by the billing collaborator; the core only checks
//! that a selected card belongs to the booking renter and reads the masked
//! number for display.

use derive_more::{Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// ID of a stored card.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Masked number of a stored card (e.g. `**** **** **** 4242`).
///
/// The full card number is never stored nor read by the core.
#[derive(Clone, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct MaskedNumber(String);

impl MaskedNumber {
    /// Creates a new [`MaskedNumber`] from the given `number`.
    #[must_use]
    pub fn new(number: impl Into<String>) -> Self {
        Self(number.into())
    }
}
