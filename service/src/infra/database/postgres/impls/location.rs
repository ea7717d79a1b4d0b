//! [`Location`]-related [`Database`] implementations.

use common::operations::{By, Insert, Select};
use tracerr::Traced;

use crate::{
    domain::{location, Location},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

impl<C> Database<Select<By<Option<Location>, location::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Location>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Location>, location::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: location::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, street, city, state, zip_code, country, created_at \
            FROM locations \
            WHERE id = $1::UUID \
            LIMIT 1";
        self.query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| {
                row.map(|row| Location {
                    id: row.get("id"),
                    street: row.get("street"),
                    city: row.get("city"),
                    state: row.get("state"),
                    zip_code: row.get("zip_code"),
                    country: row.get("country"),
                    created_at: row.get("created_at"),
                })
            })
    }
}

impl<C> Database<Insert<Location>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(location): Insert<Location>,
    ) -> Result<Self::Ok, Self::Err> {
        let Location {
            id,
            street,
            city,
            state,
            zip_code,
            country,
            created_at,
        } = location;

        const SQL: &str = "\
            INSERT INTO locations (\
                id, street, city, state, zip_code, country, created_at\
            ) VALUES (\
                $1::UUID, \
                $2::VARCHAR, $3::VARCHAR, $4::VARCHAR, \
                $5::VARCHAR, $6::VARCHAR, \
                $7::TIMESTAMPTZ\
            )";
        self.exec(
            SQL,
            &[&id, &street, &city, &state, &zip_code, &country, &created_at],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}
