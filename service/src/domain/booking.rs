//! [`Booking`] definitions.

use common::{unit, Date, DateTimeOf};
#[cfg(doc)]
use common::{DateTime, Price};
use derive_more::{Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{agent, card, property, renter};
#[cfg(doc)]
use crate::domain::Property;

/// Date-ranged reservation of a [`Property`].
///
/// Never mutated in place: date changes are modeled as cancellation followed
/// by a new confirmation.
#[derive(Clone, Debug)]
pub struct Booking {
    /// ID of this [`Booking`].
    pub id: Id,

    /// ID of the booked [`Property`].
    pub property_id: property::Id,

    /// ID of the renter holding this [`Booking`].
    pub renter_id: renter::Id,

    /// ID of the card selected to pay for this [`Booking`].
    pub card_id: card::Id,

    /// ID of the agent owning the [`Property`], denormalized at confirmation
    /// time.
    pub agent_id: Option<agent::Id>,

    /// [`Period`] this [`Booking`] spans.
    pub period: Period,

    /// Total cost of this [`Booking`]: the [`Property`]'s per-day [`Price`]
    /// times the number of days in the [`Period`].
    pub total_cost: Decimal,

    /// [`DateTime`] when this [`Booking`] was created.
    pub created_at: CreationDateTime,
}

/// ID of a [`Booking`].
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

/// Date range of a [`Booking`], guaranteed non-empty (`end > start`).
///
/// Both ends are treated as inclusive when testing for conflicts: a checkout
/// date equal to another [`Booking`]'s check-in date is considered
/// conflicting, even though no night is shared.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Period {
    /// First day of the range.
    start: Date,

    /// Last day of the range.
    end: Date,
}

impl Period {
    /// Creates a new [`Period`] if `end` is strictly after `start`.
    #[must_use]
    pub fn new(start: Date, end: Date) -> Option<Self> {
        (end > start).then_some(Self { start, end })
    }

    /// Returns the start [`Date`] of this [`Period`].
    #[must_use]
    pub fn start(&self) -> Date {
        self.start
    }

    /// Returns the end [`Date`] of this [`Period`].
    #[must_use]
    pub fn end(&self) -> Date {
        self.end
    }

    /// Returns the number of days this [`Period`] spans.
    #[expect(clippy::missing_panics_doc, reason = "infallible")]
    #[must_use]
    pub fn days(&self) -> u32 {
        u32::try_from(self.start.days_until(self.end))
            .expect("positive by construction")
    }

    /// Checks whether this [`Period`] conflicts with the `other` one under
    /// the inclusive-on-both-ends semantics.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        !(self.end < other.start || self.start > other.end)
    }

    /// Checks whether the given `date` falls within this [`Period`],
    /// inclusive on both ends.
    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }
}

/// [`DateTime`] when a [`Booking`] was created.
pub type CreationDateTime = DateTimeOf<(Booking, unit::Creation)>;

#[cfg(test)]
mod spec {
    use common::Date;

    use super::Period;

    fn date(s: &str) -> Date {
        s.parse().unwrap()
    }

    fn period(start: &str, end: &str) -> Period {
        Period::new(date(start), date(end)).unwrap()
    }

    #[test]
    fn rejects_empty_range() {
        assert!(Period::new(date("2024-01-05"), date("2024-01-05")).is_none());
        assert!(Period::new(date("2024-01-05"), date("2024-01-01")).is_none());
        assert!(Period::new(date("2024-01-01"), date("2024-01-02")).is_some());
    }

    #[test]
    fn days() {
        assert_eq!(period("2024-01-01", "2024-01-05").days(), 4);
        assert_eq!(period("2024-01-01", "2024-01-02").days(), 1);
        assert_eq!(period("2024-02-28", "2024-03-01").days(), 2);
    }

    #[test]
    fn overlaps() {
        let base = period("2024-01-10", "2024-01-20");

        assert!(base.overlaps(&period("2024-01-12", "2024-01-18")));
        assert!(base.overlaps(&period("2024-01-05", "2024-01-12")));
        assert!(base.overlaps(&period("2024-01-18", "2024-01-25")));
        assert!(base.overlaps(&period("2024-01-01", "2024-01-31")));

        assert!(!base.overlaps(&period("2024-01-01", "2024-01-09")));
        assert!(!base.overlaps(&period("2024-01-21", "2024-01-31")));
    }

    #[test]
    fn overlaps_is_inclusive_on_both_ends() {
        let base = period("2024-01-10", "2024-01-20");

        // A checkout equal to another check-in still conflicts.
        assert!(base.overlaps(&period("2024-01-01", "2024-01-10")));
        assert!(base.overlaps(&period("2024-01-20", "2024-01-31")));
    }

    #[test]
    fn contains() {
        let base = period("2024-01-10", "2024-01-20");

        assert!(base.contains(date("2024-01-10")));
        assert!(base.contains(date("2024-01-15")));
        assert!(base.contains(date("2024-01-20")));
        assert!(!base.contains(date("2024-01-09")));
        assert!(!base.contains(date("2024-01-21")));
    }
}
