//! [`Command`] for withdrawing a renter from the rewards program.

use common::operations::{By, Delete};
use tracerr::Traced;

use crate::{
    domain::{renter, rewards},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for withdrawing a renter from the rewards program.
///
/// Idempotent: withdrawing a renter who is not enrolled is a no-op. The
/// accumulated [`rewards::Points`] balance is discarded.
#[derive(Clone, Copy, Debug)]
pub struct LeaveRewards {
    /// ID of the renter to withdraw.
    pub renter_id: renter::Id,
}

impl<Db> Command<LeaveRewards> for Service<Db>
where
    Db: Database<
        Delete<By<rewards::Member, renter::Id>>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: LeaveRewards) -> Result<Self::Ok, Self::Err> {
        let LeaveRewards { renter_id } = cmd;

        self.database()
            .execute(Delete(By::<rewards::Member, _>::new(renter_id)))
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

/// Error of [`LeaveRewards`] [`Command`] execution.
pub type ExecutionError = database::Error;
