//! [`Apartment`] subtype definitions.

use derive_more::Display;
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};

#[cfg(doc)]
use crate::domain::Property;

/// Apartment attributes of a [`Property`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Apartment {
    /// Floor the apartment is on.
    pub floor: Floor,

    /// [`BuildingType`] of the building the apartment is in.
    pub building_type: BuildingType,
}

/// Floor of an [`Apartment`].
pub type Floor = u16;

/// Type of the building an [`Apartment`] is in.
#[derive(Clone, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct BuildingType(String);

impl BuildingType {
    /// Creates a new [`BuildingType`] if the given `ty` is valid.
    #[must_use]
    pub fn new(ty: impl Into<String>) -> Option<Self> {
        let ty = ty.into();
        Self::check(&ty).then_some(Self(ty))
    }

    /// Checks whether the given `ty` is a valid [`BuildingType`].
    fn check(ty: impl AsRef<str>) -> bool {
        let ty = ty.as_ref();
        ty.trim() == ty && !ty.is_empty() && ty.len() <= 256
    }
}
