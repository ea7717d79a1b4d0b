//! [`School`]-related [`Database`] implementations.

use common::operations::{By, Insert, Select};
use tracerr::Traced;

use crate::{
    domain::{property, school, School},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

impl<C> Database<Insert<School>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(school): Insert<School>,
    ) -> Result<Self::Ok, Self::Err> {
        let School { id, name } = school;

        const SQL: &str = "\
            INSERT INTO schools (id, name) \
            VALUES ($1::UUID, $2::VARCHAR) \
            ON CONFLICT (id) DO UPDATE \
            SET name = EXCLUDED.name";
        self.exec(SQL, &[&id, &name])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Insert<school::Link>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(link): Insert<school::Link>,
    ) -> Result<Self::Ok, Self::Err> {
        let school::Link {
            property_id,
            school_id,
            distance,
        } = link;

        // Re-linking the same pair refreshes the distance.
        const SQL: &str = "\
            INSERT INTO property_schools (property_id, school_id, distance) \
            VALUES ($1::UUID, $2::UUID, $3::NUMERIC) \
            ON CONFLICT (property_id, school_id) DO UPDATE \
            SET distance = EXCLUDED.distance";
        self.exec(SQL, &[&property_id, &school_id, &distance])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Select<By<Vec<read::school::Nearby>, property::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<read::school::Nearby>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<read::school::Nearby>, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let property_id: property::Id = by.into_inner();

        const SQL: &str = "\
            SELECT s.id, s.name, ps.distance \
            FROM property_schools AS ps \
            JOIN schools AS s ON s.id = ps.school_id \
            WHERE ps.property_id = $1::UUID \
            ORDER BY ps.distance ASC NULLS LAST";
        self.query(SQL, &[&property_id])
            .await
            .map_err(tracerr::wrap!())
            .map(|rows| {
                rows.into_iter()
                    .map(|row| read::school::Nearby {
                        id: row.get("id"),
                        name: row.get("name"),
                        distance: row.get("distance"),
                    })
                    .collect()
            })
    }
}
