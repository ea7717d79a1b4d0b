//! [`Property`]-related read definitions.

use derive_more::Deref;

#[cfg(doc)]
use crate::domain::{Booking, Property};

/// Indicator whether any [`Booking`] references a [`Property`].
#[derive(Clone, Copy, Debug, Deref, Eq, Hash, PartialEq)]
pub struct HasBookings(pub bool);

impl PartialEq<bool> for HasBookings {
    fn eq(&self, other: &bool) -> bool {
        self.0 == *other
    }
}

pub mod search {
    //! [`Property`] search definitions.

    use common::{Date, Price};

    use crate::domain::{location, property};
    #[cfg(doc)]
    use crate::domain::{Booking, Location, Property};

    /// Search criteria over the [`Property`] catalog.
    ///
    /// Every field is independently optional; an unset field doesn't
    /// restrict the result.
    #[derive(Clone, Debug, Default)]
    pub struct Criteria {
        /// [`location::City`] to search in.
        pub city: Option<location::City>,

        /// [`location::State`] to search in.
        pub state: Option<location::State>,

        /// [`property::Kind`] to search for.
        pub kind: Option<property::Kind>,

        /// [`property::Listing`] type to search for.
        pub listing: Option<property::Listing>,

        /// Minimum per-day [`Price`].
        pub min_price: Option<Price>,

        /// Maximum per-day [`Price`].
        pub max_price: Option<Price>,

        /// Minimum number of bedrooms.
        ///
        /// Resolved via the subtype's room-count attribute; subtypes without
        /// one are excluded from the result.
        pub min_rooms: Option<property::house::NumRooms>,

        /// Desired single [`Date`] of availability.
        ///
        /// Excludes any [`Property`] with a [`Booking`] whose inclusive range
        /// contains this date.
        pub available_on: Option<Date>,

        /// [`SortBy`] key ordering the result.
        pub sort: SortBy,
    }

    /// Sort key of a [`Property`] search.
    ///
    /// No secondary tie-break: ties retain the underlying storage order.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
    pub enum SortBy {
        /// Underlying storage order.
        #[default]
        Unsorted,

        /// Per-day [`Price`] ascending.
        ///
        /// [`Price`]: common::Price
        PriceAscending,

        /// Bedroom count ascending.
        RoomsAscending,
    }

    /// Single [`Property`] candidate matched by a search.
    #[derive(Clone, Debug)]
    pub struct Candidate {
        /// ID of the matched [`Property`].
        pub id: property::Id,

        /// [`property::Kind`] of the matched [`Property`].
        pub kind: property::Kind,

        /// [`property::Listing`] type of the matched [`Property`].
        pub listing: property::Listing,

        /// Per-day [`Price`] of the matched [`Property`].
        pub price: Price,

        /// [`property::Description`] of the matched [`Property`].
        pub description: property::Description,

        /// [`location::City`] of the matched [`Property`].
        pub city: location::City,

        /// [`location::State`] of the matched [`Property`], if any.
        pub state: Option<location::State>,

        /// Room count of the matched [`Property`], if its subtype has one.
        pub num_rooms: Option<property::house::NumRooms>,
    }
}
