//! [`Query`] collection related to [`School`]s.

use common::operations::By;

use crate::{domain::property, read};
#[cfg(doc)]
use crate::{domain::School, Query};

use super::DatabaseQuery;

/// Queries the [`School`]s near a [`Property`].
pub type Nearby =
    DatabaseQuery<By<Vec<read::school::Nearby>, property::Id>>;
