//! [`Command`] for listing a new [`Property`] in the catalog.

use common::{
    operations::{By, Commit, Insert, Select, Transact, Transacted},
    DateTime, Price,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{agent, location, property, Location, Property},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for listing a new [`Property`] in the catalog.
#[derive(Clone, Debug)]
pub struct CreateProperty {
    /// Subtype-specific [`property::Details`] of a new [`Property`].
    pub details: property::Details,

    /// ID of the [`Location`] the new [`Property`] is situated at.
    pub location_id: location::Id,

    /// ID of the agent owning the new [`Property`].
    pub agent_id: agent::Id,

    /// [`property::Description`] of a new [`Property`].
    pub description: property::Description,

    /// Per-day [`Price`] of a new [`Property`].
    pub price: Price,

    /// [`property::Listing`] type of a new [`Property`].
    pub listing: property::Listing,

    /// Optional [`property::CrimeRate`] annotation of a new [`Property`].
    pub crime_rate: Option<property::CrimeRate>,
}

impl<Db> Command<CreateProperty> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>
        + Database<
            Select<By<Option<Location>, location::Id>>,
            Ok = Option<Location>,
            Err = Traced<database::Error>,
        >,
    Transacted<Db>: Database<Insert<Property>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Property;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateProperty,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateProperty {
            details,
            location_id,
            agent_id,
            description,
            price,
            listing,
            crime_rate,
        } = cmd;

        self.database()
            .execute(Select(By::<Option<Location>, _>::new(location_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::LocationNotExists(location_id))
            .map_err(tracerr::wrap!())
            .map(drop)?;

        let property = Property {
            id: property::Id::new(),
            details,
            location_id,
            agent_id,
            description,
            price,
            status: property::Status::Active,
            listing,
            crime_rate,
            created_at: DateTime::now().coerce(),
        };

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Insert(property.clone()))
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

/// Error of [`CreateProperty`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Location`] with the provided ID does not exist.
    #[display("`Location(id: {_0})` does not exist")]
    LocationNotExists(#[error(not(source))] location::Id),
}
