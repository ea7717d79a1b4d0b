//! Funding-source [`Database`] implementations.
//!
//! The `cards` table is populated by the billing collaborator; only reads
//! happen here.

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::{card, renter},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

impl<C> Database<Select<By<read::card::Ownership, (card::Id, renter::Id)>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = read::card::Ownership;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<read::card::Ownership, (card::Id, renter::Id)>>,
    ) -> Result<Self::Ok, Self::Err> {
        let (card_id, renter_id) = by.into_inner();

        const SQL: &str = "\
            SELECT id \
            FROM cards \
            WHERE id = $1::UUID \
              AND renter_id = $2::UUID \
            LIMIT 1";
        self.query_opt(SQL, &[&card_id, &renter_id])
            .await
            .map_err(tracerr::wrap!())
            .map(|r| read::card::Ownership(r.is_some()))
    }
}
