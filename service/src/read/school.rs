//! [`School`]-related read definitions.

use crate::domain::school;
#[cfg(doc)]
use crate::domain::{Property, School};

/// [`School`] near a [`Property`], with the distance between the two.
#[derive(Clone, Debug)]
pub struct Nearby {
    /// ID of the [`School`].
    pub id: school::Id,

    /// [`school::Name`] of the [`School`].
    pub name: school::Name,

    /// [`school::Distance`] to the [`Property`], if known.
    pub distance: Option<school::Distance>,
}
