//! [`Query`] collection related to the rewards program.

use common::operations::By;

use crate::domain::{renter, rewards};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries the rewards membership of a renter, if any.
pub type Membership =
    DatabaseQuery<By<Option<rewards::Member>, renter::Id>>;
