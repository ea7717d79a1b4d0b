//! [`Command`] for modifying an existing [`Property`].

use common::{
    operations::{By, Commit, Lock, Select, Transact, Transacted, Update},
    Price,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{property, Property},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for modifying an existing [`Property`].
///
/// Unset fields are left unchanged. Subtype attributes are immutable.
#[derive(Clone, Debug)]
pub struct ModifyProperty {
    /// ID of the [`Property`] to modify.
    pub property_id: property::Id,

    /// New [`property::Description`] of the [`Property`].
    pub description: Option<property::Description>,

    /// New per-day [`Price`] of the [`Property`].
    pub price: Option<Price>,

    /// New [`property::Status`] of the [`Property`].
    ///
    /// A booking confirmed concurrently wins over this edit: the status is
    /// applied inside the same transaction that holds the [`Property`] row
    /// lock.
    pub status: Option<property::Status>,

    /// New [`property::Listing`] type of the [`Property`].
    pub listing: Option<property::Listing>,

    /// New [`property::CrimeRate`] annotation of the [`Property`].
    pub crime_rate: Option<property::CrimeRate>,
}

impl<Db> Command<ModifyProperty> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Property>, property::Id>>,
            Ok = Option<Property>,
            Err = Traced<database::Error>,
        > + Database<
            Lock<By<Property, property::Id>>,
            Err = Traced<database::Error>,
        > + Database<Update<Property>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Property;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: ModifyProperty,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let ModifyProperty {
            property_id,
            description,
            price,
            status,
            listing,
            crime_rate,
        } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent actions upon the same `Property`.
        tx.execute(Lock(By::new(property_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let mut property = tx
            .execute(Select(By::<Option<Property>, _>::new(property_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::PropertyNotExists(property_id))
            .map_err(tracerr::wrap!())?;

        if let Some(description) = description {
            property.description = description;
        }
        if let Some(price) = price {
            property.price = price;
        }
        if let Some(status) = status {
            property.status = status;
        }
        if let Some(listing) = listing {
            property.listing = listing;
        }
        if let Some(crime_rate) = crime_rate {
            property.crime_rate = Some(crime_rate);
        }

        tx.execute(Update(property.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(property)
    }
}

/// Error of [`ModifyProperty`] [`Command`] execution.
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
