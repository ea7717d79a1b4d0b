//! [`School`] definitions.

use derive_more::{Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::property;
#[cfg(doc)]
use crate::domain::Property;

/// Nearby-school reference record.
#[derive(Clone, Debug)]
pub struct School {
    /// ID of this [`School`].
    pub id: Id,

    /// [`Name`] of this [`School`].
    pub name: Name,
}

/// Association of a [`School`] with a [`Property`] it is near to.
#[derive(Clone, Copy, Debug)]
pub struct Link {
    /// ID of the [`Property`].
    pub property_id: property::Id,

    /// ID of the [`School`].
    pub school_id: Id,

    /// [`Distance`] between the two, if known.
    pub distance: Option<Distance>,
}

/// ID of a [`School`].
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

/// Name of a [`School`].
#[derive(Clone, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Name(String);

impl Name {
    /// Creates a new [`Name`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`Name`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 512
    }
}

impl FromStr for Name {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Name`")
    }
}

/// Distance between a [`Property`] and a [`School`], in unit-agnostic terms.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Distance(Decimal);

impl Distance {
    /// Creates a new [`Distance`] if the given `distance` is non-negative.
    #[must_use]
    pub fn new(distance: Decimal) -> Option<Self> {
        (!distance.is_sign_negative()).then_some(Self(distance))
    }
}
