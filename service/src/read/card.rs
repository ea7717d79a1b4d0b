//! Funding-source read definitions.

use derive_more::Deref;

#[cfg(doc)]
use crate::domain::card;

/// Indicator whether a [`card::Id`] belongs to a given renter.
#[derive(Clone, Copy, Debug, Deref, Eq, Hash, PartialEq)]
pub struct Ownership(pub bool);

impl PartialEq<bool> for Ownership {
    fn eq(&self, other: &bool) -> bool {
        self.0 == *other
    }
}
