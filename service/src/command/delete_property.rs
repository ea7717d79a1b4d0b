//! [`Command`] for delisting a [`Property`] from the catalog.

use common::operations::{By, Commit, Delete, Lock, Select, Transact, Transacted};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{property, Property},
    infra::{database, Database},
    read,
    Service,
};

use super::Command;

/// [`Command`] for delisting a [`Property`] from the catalog.
///
/// Refused while any [`Booking`] references the [`Property`]. The referenced
/// [`Location`] is kept.
///
/// [`Booking`]: crate::domain::Booking
/// [`Location`]: crate::domain::Location
#[derive(Clone, Copy, Debug)]
pub struct DeleteProperty {
    /// ID of the [`Property`] to delete.
    pub property_id: property::Id,
}

impl<Db> Command<DeleteProperty> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Property>, property::Id>>,
            Ok = Option<Property>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<read::property::HasBookings, property::Id>>,
            Ok = read::property::HasBookings,
            Err = Traced<database::Error>,
        > + Database<
            Lock<By<Property, property::Id>>,
            Err = Traced<database::Error>,
        > + Database<
            Delete<By<Property, property::Id>>,
            Err = Traced<database::Error>,
        > + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: DeleteProperty,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeleteProperty { property_id } = cmd;

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

        tx.execute(Select(By::<Option<Property>, _>::new(property_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::PropertyNotExists(property_id))
            .map_err(tracerr::wrap!())
            .map(drop)?;

        let has_bookings = tx
            .execute(Select(
                By::<read::property::HasBookings, _>::new(property_id),
            ))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if has_bookings == true {
            return Err(tracerr::new!(E::HasBookings(property_id)));
        }

        tx.execute(Delete(By::<Property, _>::new(property_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)
    }
}

/// Error of [`DeleteProperty`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Property`] with the provided ID does not exist.
    #[display("`Property(id: {_0})` does not exist")]
    PropertyNotExists(#[error(not(source))] property::Id),

    /// [`Property`] is still referenced by bookings.
    #[display("`Property(id: {_0})` is still referenced by bookings")]
    HasBookings(#[error(not(source))] property::Id),
}

#[cfg(test)]
mod spec {
    use crate::{
        command::{fixture, ConfirmBooking},
        domain::{card, property, renter},
        query, Command as _,
    };

    use super::{DeleteProperty, ExecutionError as E};

    #[tokio::test]
    async fn delists_property_keeping_location() {
        let service = fixture::service();
        let location = fixture::location(&service).await;
        let property =
            fixture::house_at(&service, location.id, "100", 3).await;

        service
            .execute(DeleteProperty {
                property_id: property.id,
            })
            .await
            .unwrap();

        assert!(service
            .execute(query::property::ById::by(property.id))
            .await
            .unwrap()
            .is_none());
        assert!(service
            .execute(query::location::ById::by(location.id))
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn fails_on_unknown_property() {
        let service = fixture::service();

        let err = service
            .execute(DeleteProperty {
                property_id: property::Id::new(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), E::PropertyNotExists(_)));
    }

    #[tokio::test]
    async fn refuses_while_booked() {
        let service = fixture::service();
        let property = fixture::house(&service, "100").await;
        let renter_id = renter::Id::new();
        let card_id = card::Id::new();
        service.database().seed_card(
            card_id,
            renter_id,
            card::MaskedNumber::new("**** **** **** 4242"),
        );
        service
            .execute(ConfirmBooking {
                property_id: property.id,
                renter_id,
                card_id,
                period: fixture::period("2024-01-01", "2024-01-05"),
            })
            .await
            .unwrap();

        let err = service
            .execute(DeleteProperty {
                property_id: property.id,
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), E::HasBookings(_)));
    }
}
