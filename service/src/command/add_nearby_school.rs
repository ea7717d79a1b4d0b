//! [`Command`] for attaching a nearby [`School`] to a [`Property`].

use common::operations::{By, Commit, Insert, Select, Transact, Transacted};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{property, school, Property, School},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for attaching a nearby [`School`] to a [`Property`].
#[derive(Clone, Debug)]
pub struct AddNearbySchool {
    /// ID of the [`Property`] the [`School`] is near to.
    pub property_id: property::Id,

    /// [`school::Name`] of the [`School`].
    pub name: school::Name,

    /// [`school::Distance`] between the two, if known.
    pub distance: Option<school::Distance>,
}

impl<Db> Command<AddNearbySchool> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>
        + Database<
            Select<By<Option<Property>, property::Id>>,
            Ok = Option<Property>,
            Err = Traced<database::Error>,
        >,
    Transacted<Db>: Database<Insert<School>, Err = Traced<database::Error>>
        + Database<Insert<school::Link>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = School;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: AddNearbySchool,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let AddNearbySchool {
            property_id,
            name,
            distance,
        } = cmd;

        self.database()
            .execute(Select(By::<Option<Property>, _>::new(property_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::PropertyNotExists(property_id))
            .map_err(tracerr::wrap!())
            .map(drop)?;

        let school = School {
            id: school::Id::new(),
            name,
        };

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Insert(school.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Insert(school::Link {
            property_id,
            school_id: school.id,
            distance,
        }))
        .await
        .map_err(tracerr::map_from_and_wrap!(=> E))
        .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(school)
    }
}

/// Error of [`AddNearbySchool`] [`Command`] execution.
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
