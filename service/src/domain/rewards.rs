//! Rewards membership definitions.

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf};
use derive_more::{Display, From, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use rust_decimal::prelude::ToPrimitive as _;
use rust_decimal::Decimal;

use crate::domain::renter;
#[cfg(doc)]
use crate::domain::Booking;

/// Rewards membership of a renter.
///
/// At most one per renter; leaving the program discards the balance.
#[derive(Clone, Copy, Debug)]
pub struct Member {
    /// ID of the enrolled renter.
    pub renter_id: renter::Id,

    /// Current [`Points`] balance of this [`Member`].
    pub points: Points,

    /// [`DateTime`] when the renter joined the program.
    pub joined_at: EnrollmentDateTime,
}

/// Point balance of a rewards [`Member`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Display,
    Eq,
    From,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Points(i64);

impl Points {
    /// Derives [`Points`] from a [`Booking`]'s total cost by truncating it to
    /// an integer.
    ///
    /// Negative amounts yield zero.
    #[must_use]
    pub fn truncated_from(amount: Decimal) -> Self {
        Self(amount.trunc().to_i64().unwrap_or(0).max(0))
    }
}

/// Crediting of [`Points`] to a rewards [`Member`].
///
/// A no-op for renters without a membership.
#[derive(Clone, Copy, Debug)]
pub struct Credit {
    /// ID of the renter to credit.
    pub renter_id: renter::Id,

    /// [`Points`] to add to the balance.
    pub points: Points,
}

/// [`DateTime`] when a renter joined the rewards program.
pub type EnrollmentDateTime = DateTimeOf<(Member, unit::Enrollment)>;

#[cfg(test)]
mod spec {
    use rust_decimal::Decimal;

    use super::Points;

    fn decimal(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn truncates_fractional_cost() {
        assert_eq!(Points::truncated_from(decimal("250.99")), Points::from(250));
        assert_eq!(Points::truncated_from(decimal("400")), Points::from(400));
        assert_eq!(Points::truncated_from(decimal("0.75")), Points::from(0));
        assert_eq!(Points::truncated_from(decimal("-3.5")), Points::from(0));
    }
}
