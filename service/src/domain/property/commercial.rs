//! [`CommercialBuilding`] subtype definitions.

use derive_more::Display;
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};

use super::house::SquareFootage;
#[cfg(doc)]
use crate::domain::Property;

/// Commercial building attributes of a [`Property`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CommercialBuilding {
    /// Square footage of the building.
    pub square_footage: SquareFootage,

    /// [`BusinessType`] permitted in the building.
    pub business_type: BusinessType,
}

/// Type of business permitted in a [`CommercialBuilding`].
#[derive(Clone, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct BusinessType(String);

impl BusinessType {
    /// Creates a new [`BusinessType`] if the given `ty` is valid.
    #[must_use]
    pub fn new(ty: impl Into<String>) -> Option<Self> {
        let ty = ty.into();
        Self::check(&ty).then_some(Self(ty))
    }

    /// Checks whether the given `ty` is a valid [`BusinessType`].
    fn check(ty: impl AsRef<str>) -> bool {
        let ty = ty.as_ref();
        ty.trim() == ty && !ty.is_empty() && ty.len() <= 256
    }
}
