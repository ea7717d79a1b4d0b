//! Rewards-related [`Database`] implementations.

use common::operations::{By, Delete, Insert, Perform, Select};
use tracerr::Traced;

use crate::{
    domain::{renter, rewards},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

impl<C> Database<Select<By<Option<rewards::Member>, renter::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<rewards::Member>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<rewards::Member>, renter::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let renter_id: renter::Id = by.into_inner();

        const SQL: &str = "\
            SELECT renter_id, points, joined_at \
            FROM rewards_members \
            WHERE renter_id = $1::UUID \
            LIMIT 1";
        self.query_opt(SQL, &[&renter_id])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| {
                row.map(|row| rewards::Member {
                    renter_id: row.get("renter_id"),
                    points: row.get("points"),
                    joined_at: row.get("joined_at"),
                })
            })
    }
}

impl<C> Database<Insert<rewards::Member>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(member): Insert<rewards::Member>,
    ) -> Result<Self::Ok, Self::Err> {
        let rewards::Member {
            renter_id,
            points,
            joined_at,
        } = member;

        // Joining twice keeps the existing membership and its balance.
        const SQL: &str = "\
            INSERT INTO rewards_members (renter_id, points, joined_at) \
            VALUES ($1::UUID, $2::INT8, $3::TIMESTAMPTZ) \
            ON CONFLICT (renter_id) DO NOTHING";
        self.exec(SQL, &[&renter_id, &points, &joined_at])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Delete<By<rewards::Member, renter::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<rewards::Member, renter::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let renter_id: renter::Id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM rewards_members \
            WHERE renter_id = $1::UUID";
        self.exec(SQL, &[&renter_id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Perform<rewards::Credit>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Perform(credit): Perform<rewards::Credit>,
    ) -> Result<Self::Ok, Self::Err> {
        let rewards::Credit { renter_id, points } = credit;

        // No-op for renters without a membership.
        const SQL: &str = "\
            UPDATE rewards_members \
            SET points = points + $2::INT8 \
            WHERE renter_id = $1::UUID";
        self.exec(SQL, &[&renter_id, &points])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
