//! [`Booking`]-related [`Database`] implementations.

use common::operations::{By, Delete, Insert, Select};
use tracerr::Traced;

use crate::{
    domain::{agent, booking, property, renter, Booking},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

/// Restores a [`booking::Period`] from its stored bounds.
fn period_from_sql(row: &tokio_postgres::Row) -> booking::Period {
    booking::Period::new(row.get("start_date"), row.get("end_date"))
        .expect("non-empty in storage")
}

impl<C> Database<Select<By<Option<Booking>, booking::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Booking>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Booking>, booking::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: booking::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, property_id, renter_id, card_id, agent_id, \
                   start_date, end_date, total_cost, created_at \
            FROM bookings \
            WHERE id = $1::UUID \
            LIMIT 1";
        self.query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| {
                row.map(|row| Booking {
                    id: row.get("id"),
                    property_id: row.get("property_id"),
                    renter_id: row.get("renter_id"),
                    card_id: row.get("card_id"),
                    agent_id: row.get("agent_id"),
                    period: period_from_sql(&row),
                    total_cost: row.get("total_cost"),
                    created_at: row.get("created_at"),
                })
            })
    }
}

impl<C> Database<Insert<Booking>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(booking): Insert<Booking>,
    ) -> Result<Self::Ok, Self::Err> {
        let Booking {
            id,
            property_id,
            renter_id,
            card_id,
            agent_id,
            period,
            total_cost,
            created_at,
        } = booking;

        let start_date = period.start();
        let end_date = period.end();

        const SQL: &str = "\
            INSERT INTO bookings (\
                id, property_id, renter_id, card_id, agent_id, \
                start_date, end_date, total_cost, created_at\
            ) VALUES (\
                $1::UUID, $2::UUID, $3::UUID, $4::UUID, $5::UUID, \
                $6::DATE, $7::DATE, $8::NUMERIC, $9::TIMESTAMPTZ\
            )";
        self.exec(
            SQL,
            &[
                &id,
                &property_id,
                &renter_id,
                &card_id,
                &agent_id,
                &start_date,
                &end_date,
                &total_cost,
                &created_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Delete<By<Booking, booking::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Booking, booking::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: booking::Id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM bookings \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C>
    Database<
        Select<By<read::booking::Conflict, (property::Id, booking::Period)>>,
    > for Postgres<C>
where
    C: Connection,
{
    type Ok = read::booking::Conflict;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<read::booking::Conflict, (property::Id, booking::Period)>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let (property_id, period) = by.into_inner();

        let start_date = period.start();
        let end_date = period.end();

        // Both range ends are inclusive when testing for conflicts.
        const SQL: &str = "\
            SELECT id \
            FROM bookings \
            WHERE property_id = $1::UUID \
              AND NOT (end_date < $2::DATE OR start_date > $3::DATE) \
            LIMIT 1";
        self.query_opt(SQL, &[&property_id, &start_date, &end_date])
            .await
            .map_err(tracerr::wrap!())
            .map(|r| read::booking::Conflict(r.is_some()))
    }
}

impl<C> Database<Select<By<Vec<read::booking::RenterEntry>, renter::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<read::booking::RenterEntry>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<read::booking::RenterEntry>, renter::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let renter_id: renter::Id = by.into_inner();

        const SQL: &str = "\
            SELECT b.id, b.property_id, b.start_date, b.end_date, \
                   b.total_cost, \
                   l.street, l.city, l.country, \
                   c.masked_number \
            FROM bookings AS b \
            JOIN properties AS p ON p.id = b.property_id \
            JOIN locations AS l ON l.id = p.location_id \
            JOIN cards AS c ON c.id = b.card_id \
            WHERE b.renter_id = $1::UUID \
            ORDER BY b.start_date ASC";
        self.query(SQL, &[&renter_id])
            .await
            .map_err(tracerr::wrap!())
            .map(|rows| {
                rows.into_iter()
                    .map(|row| read::booking::RenterEntry {
                        id: row.get("id"),
                        property_id: row.get("property_id"),
                        period: period_from_sql(&row),
                        total_cost: row.get("total_cost"),
                        street: row.get("street"),
                        city: row.get("city"),
                        country: row.get("country"),
                        masked_number: row.get("masked_number"),
                    })
                    .collect()
            })
    }
}

impl<C> Database<Select<By<Vec<read::booking::AgentEntry>, agent::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<read::booking::AgentEntry>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<read::booking::AgentEntry>, agent::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let agent_id: agent::Id = by.into_inner();

        const SQL: &str = "\
            SELECT b.id, b.property_id, b.renter_id, \
                   b.start_date, b.end_date, b.total_cost, \
                   l.street, l.city \
            FROM bookings AS b \
            JOIN properties AS p ON p.id = b.property_id \
            JOIN locations AS l ON l.id = p.location_id \
            WHERE p.agent_id = $1::UUID \
            ORDER BY b.start_date ASC";
        self.query(SQL, &[&agent_id])
            .await
            .map_err(tracerr::wrap!())
            .map(|rows| {
                rows.into_iter()
                    .map(|row| read::booking::AgentEntry {
                        id: row.get("id"),
                        property_id: row.get("property_id"),
                        renter_id: row.get("renter_id"),
                        period: period_from_sql(&row),
                        total_cost: row.get("total_cost"),
                        street: row.get("street"),
                        city: row.get("city"),
                    })
                    .collect()
            })
    }
}
