//! [`Booking`]-related read definitions.

use derive_more::Deref;
use rust_decimal::Decimal;

use crate::domain::{booking, card, location, property, renter};
#[cfg(doc)]
use crate::domain::{Booking, Property};

/// Indicator whether a date range conflicts with any existing [`Booking`] of
/// a [`Property`].
#[derive(Clone, Copy, Debug, Deref, Eq, Hash, PartialEq)]
pub struct Conflict(pub bool);

impl PartialEq<bool> for Conflict {
    fn eq(&self, other: &bool) -> bool {
        self.0 == *other
    }
}

/// Price quote for booking a [`Property`] over a date range.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Quote {
    /// Number of days the range spans.
    pub days: u32,

    /// Total cost: the [`Property`]'s per-day price times [`days`].
    ///
    /// [`days`]: Quote::days
    pub total_cost: Decimal,
}

/// [`Booking`] list entry for a renter's own bookings.
#[derive(Clone, Debug)]
pub struct RenterEntry {
    /// ID of the [`Booking`].
    pub id: booking::Id,

    /// ID of the booked [`Property`].
    pub property_id: property::Id,

    /// [`Period`] the [`Booking`] spans.
    ///
    /// [`Period`]: booking::Period
    pub period: booking::Period,

    /// Total cost of the [`Booking`].
    pub total_cost: Decimal,

    /// Street of the booked [`Property`]'s location.
    pub street: location::Street,

    /// City of the booked [`Property`]'s location.
    pub city: location::City,

    /// Country of the booked [`Property`]'s location.
    pub country: location::Country,

    /// Masked number of the card paying for the [`Booking`].
    pub masked_number: card::MaskedNumber,
}

/// [`Booking`] list entry for an agent's own properties.
#[derive(Clone, Debug)]
pub struct AgentEntry {
    /// ID of the [`Booking`].
    pub id: booking::Id,

    /// ID of the booked [`Property`].
    pub property_id: property::Id,

    /// ID of the renter holding the [`Booking`].
    pub renter_id: renter::Id,

    /// [`Period`] the [`Booking`] spans.
    ///
    /// [`Period`]: booking::Period
    pub period: booking::Period,

    /// Total cost of the [`Booking`].
    pub total_cost: Decimal,

    /// Street of the booked [`Property`]'s location.
    pub street: location::Street,

    /// City of the booked [`Property`]'s location.
    pub city: location::City,
}
