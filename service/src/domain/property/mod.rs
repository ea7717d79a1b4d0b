//! [`Property`] definitions.

pub mod apartment;
pub mod commercial;
pub mod house;

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, DateTimeOf, Price};
use derive_more::{Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{agent, location};
#[cfg(doc)]
use crate::domain::{Booking, Location};

pub use self::{
    apartment::Apartment, commercial::CommercialBuilding, house::House,
};

/// Rentable (or sellable) property listed in the catalog.
#[derive(Clone, Debug)]
pub struct Property {
    /// ID of this [`Property`].
    pub id: Id,

    /// Subtype-specific [`Details`] of this [`Property`].
    ///
    /// Exactly one subtype record exists per [`Property`], matching its
    /// [`Kind`].
    pub details: Details,

    /// ID of the [`Location`] this [`Property`] is situated at.
    ///
    /// The [`Location`] outlives this [`Property`]: deleting the latter never
    /// removes the former.
    pub location_id: location::Id,

    /// ID of the agent owning this [`Property`].
    pub agent_id: agent::Id,

    /// Free-text [`Description`] of this [`Property`].
    pub description: Description,

    /// Per-day [`Price`] of this [`Property`].
    pub price: Price,

    /// Base availability [`Status`] of this [`Property`].
    ///
    /// A coarse listed/unlisted switch, not a per-day calendar: flipped to
    /// [`Status::Inactive`] on [`Booking`] confirmation and back to
    /// [`Status::Active`] on cancellation. Booking-driven transitions always
    /// win over concurrent manual edits.
    pub status: Status,

    /// [`Listing`] type of this [`Property`].
    pub listing: Listing,

    /// Optional [`CrimeRate`] annotation of this [`Property`]'s area.
    pub crime_rate: Option<CrimeRate>,

    /// [`DateTime`] when this [`Property`] was created.
    pub created_at: CreationDateTime,
}

impl Property {
    /// Returns [`Kind`] of this [`Property`].
    #[must_use]
    pub fn kind(&self) -> Kind {
        self.details.kind()
    }
}

/// Subtype-specific attributes of a [`Property`].
///
/// Dispatched via pattern matching: every physical form carries its own
/// attribute set.
#[derive(Clone, Debug, From)]
pub enum Details {
    #[doc(hidden)]
    House(House),
    #[doc(hidden)]
    Apartment(Apartment),
    #[doc(hidden)]
    CommercialBuilding(CommercialBuilding),
    /// A plot of land without extra attributes.
    Land,
    /// A vacation home without extra attributes.
    VacationHome,
}

impl Details {
    /// Returns [`Kind`] of these [`Details`].
    #[must_use]
    pub fn kind(&self) -> Kind {
        match self {
            Self::House(_) => Kind::House,
            Self::Apartment(_) => Kind::Apartment,
            Self::CommercialBuilding(_) => Kind::CommercialBuilding,
            Self::Land => Kind::Land,
            Self::VacationHome => Kind::VacationHome,
        }
    }

    /// Returns the number of rooms of these [`Details`].
    ///
    /// [`None`] is returned for subtypes without a room count.
    #[must_use]
    pub fn num_rooms(&self) -> Option<house::NumRooms> {
        match self {
            Self::House(h) => Some(h.num_rooms),
            Self::Apartment(_)
            | Self::CommercialBuilding(_)
            | Self::Land
            | Self::VacationHome => None,
        }
    }
}

/// ID of a [`Property`].
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

define_kind! {
    #[doc = "Kind of a [`Property`]."]
    enum Kind {
        #[doc = "A standalone house."]
        House = 1,

        #[doc = "An apartment in a building."]
        Apartment = 2,

        #[doc = "A commercial building."]
        CommercialBuilding = 3,

        #[doc = "A plot of land."]
        Land = 4,

        #[doc = "A vacation home."]
        VacationHome = 5,
    }
}

define_kind! {
    #[doc = "Base availability status of a [`Property`]."]
    enum Status {
        #[doc = "The [`Property`] is listed and bookable."]
        Active = 1,

        #[doc = "The [`Property`] is unlisted."]
        Inactive = 2,
    }
}

define_kind! {
    #[doc = "Listing type of a [`Property`]."]
    enum Listing {
        #[doc = "The [`Property`] is offered for rent."]
        Rent = 1,

        #[doc = "The [`Property`] is offered for sale."]
        Sale = 2,
    }
}

/// Free-text description of a [`Property`].
#[derive(Clone, Debug, Display, Eq, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Description(String);

impl Description {
    /// Creates a new [`Description`] if the given `description` is valid.
    #[must_use]
    pub fn new(description: impl Into<String>) -> Option<Self> {
        let description = description.into();
        Self::check(&description).then_some(Self(description))
    }

    /// Checks whether the given `description` is a valid [`Description`].
    fn check(description: impl AsRef<str>) -> bool {
        let description = description.as_ref();
        description.trim() == description
            && !description.is_empty()
            && description.len() <= 2048
    }
}

impl FromStr for Description {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Description`")
    }
}

/// Crime rate annotation of a [`Property`]'s area.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct CrimeRate(Decimal);

impl CrimeRate {
    /// Creates a new [`CrimeRate`] if the given `rate` is non-negative.
    #[must_use]
    pub fn new(rate: Decimal) -> Option<Self> {
        (!rate.is_sign_negative()).then_some(Self(rate))
    }

    /// Returns the rate of this [`CrimeRate`].
    #[must_use]
    pub fn rate(self) -> Decimal {
        self.0
    }
}

/// [`DateTime`] when a [`Property`] was created.
pub type CreationDateTime = DateTimeOf<(Property, unit::Creation)>;
