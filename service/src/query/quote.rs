//! [`Query`] computing a price quote for booking a [`Property`].

use common::operations::{By, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{booking, property, Property},
    infra::{database, Database},
    read,
    Service,
};

use super::Query;

/// [`Query`] computing a price [`read::booking::Quote`] for booking a
/// [`Property`] over a [`booking::Period`].
///
/// Doesn't reserve anything: the returned total is recomputed at
/// confirmation time.
#[derive(Clone, Copy, Debug)]
pub struct Quote {
    /// ID of the [`Property`] to quote.
    pub property_id: property::Id,

    /// [`booking::Period`] to quote for.
    pub period: booking::Period,
}

impl<Db> Query<Quote> for Service<Db>
where
    Db: Database<
        Select<By<Option<Property>, property::Id>>,
        Ok = Option<Property>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = read::booking::Quote;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, query: Quote) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let Quote {
            property_id,
            period,
        } = query;

        let property = self
            .database()
            .execute(Select(By::<Option<Property>, _>::new(property_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::PropertyNotExists(property_id))
            .map_err(tracerr::wrap!())?;

        let days = period.days();
        Ok(read::booking::Quote {
            days,
            total_cost: property.price.total_for(days),
        })
    }
}

/// Error of [`Quote`] [`Query`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Property`] with the provided ID does not exist.
    #[display("`Property(id: {_0})` does not exist")]
    PropertyNotExists(#[error(not(source))] property::Id),
}

#[cfg(test)]
mod spec {
    use crate::{command::fixture, domain::property, Query as _};

    use super::{ExecutionError as E, Quote};

    #[tokio::test]
    async fn computes_total_from_days_and_price() {
        let service = fixture::service();
        let property = fixture::house(&service, "62.7475").await;

        let quote = service
            .execute(Quote {
                property_id: property.id,
                period: fixture::period("2024-01-01", "2024-01-05"),
            })
            .await
            .unwrap();

        assert_eq!(quote.days, 4);
        assert_eq!(quote.total_cost, "250.99".parse().unwrap());
    }

    #[tokio::test]
    async fn fails_on_unknown_property() {
        let service = fixture::service();

        let err = service
            .execute(Quote {
                property_id: property::Id::new(),
                period: fixture::period("2024-01-01", "2024-01-05"),
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), E::PropertyNotExists(_)));
    }
}
