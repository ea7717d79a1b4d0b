//! [`Command`] for creating a new [`Location`].

use common::{operations::Insert, DateTime};
use tracerr::Traced;

use crate::{
    domain::{location, Location},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Location`].
#[derive(Clone, Debug)]
pub struct CreateLocation {
    /// [`location::Street`] of a new [`Location`].
    pub street: location::Street,

    /// [`location::City`] of a new [`Location`].
    pub city: location::City,

    /// [`location::State`] of a new [`Location`], if any.
    pub state: Option<location::State>,

    /// [`location::ZipCode`] of a new [`Location`], if any.
    pub zip_code: Option<location::ZipCode>,

    /// [`location::Country`] of a new [`Location`].
    pub country: location::Country,
}

impl<Db> Command<CreateLocation> for Service<Db>
where
    Db: Database<Insert<Location>, Err = Traced<database::Error>>,
{
    type Ok = Location;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateLocation,
    ) -> Result<Self::Ok, Self::Err> {
        let CreateLocation {
            street,
            city,
            state,
            zip_code,
            country,
        } = cmd;

        let location = Location {
            id: location::Id::new(),
            street,
            city,
            state,
            zip_code,
            country,
            created_at: DateTime::now().coerce(),
        };

        self.database()
            .execute(Insert(location.clone()))
            .await
            .map_err(tracerr::wrap!())
            .map(drop)?;

        Ok(location)
    }
}

/// Error of [`CreateLocation`] [`Command`] execution.
pub type ExecutionError = database::Error;

#[cfg(test)]
mod spec {
    use crate::{command::fixture, query, Command as _};

    use super::CreateLocation;

    #[tokio::test]
    async fn persists_created_location() {
        let service = fixture::service();

        let location = service
            .execute(CreateLocation {
                street: "10 Downing Street".parse().unwrap(),
                city: "London".parse().unwrap(),
                state: None,
                zip_code: Some("SW1A 2AA".parse().unwrap()),
                country: "United Kingdom".parse().unwrap(),
            })
            .await
            .unwrap();

        assert_eq!(location.city.to_string(), "London");
        assert!(location.state.is_none());

        let stored = service
            .execute(query::location::ById::by(location.id))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.id, location.id);
        assert_eq!(stored.street, location.street);
    }
}
