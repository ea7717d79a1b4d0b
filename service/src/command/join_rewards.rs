//! [`Command`] for enrolling a renter into the rewards program.

use common::{operations::Insert, DateTime};
use tracerr::Traced;

use crate::{
    domain::{renter, rewards},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for enrolling a renter into the rewards program.
///
/// Idempotent: enrolling an already enrolled renter keeps the existing
/// membership and its balance.
#[derive(Clone, Copy, Debug)]
pub struct JoinRewards {
    /// ID of the renter to enroll.
    pub renter_id: renter::Id,
}

impl<Db> Command<JoinRewards> for Service<Db>
where
    Db: Database<Insert<rewards::Member>, Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: JoinRewards) -> Result<Self::Ok, Self::Err> {
        let JoinRewards { renter_id } = cmd;

        let member = rewards::Member {
            renter_id,
            points: rewards::Points::default(),
            joined_at: DateTime::now().coerce(),
        };

        self.database()
            .execute(Insert(member))
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

/// Error of [`JoinRewards`] [`Command`] execution.
pub type ExecutionError = database::Error;

#[cfg(test)]
mod spec {
    use common::operations::Perform;

    use crate::{
        command::fixture,
        domain::{renter, rewards},
        query, Command as _,
    };

    use super::JoinRewards;

    #[tokio::test]
    async fn enrolls_with_zero_balance() {
        let service = fixture::service();
        let renter_id = renter::Id::new();

        service.execute(JoinRewards { renter_id }).await.unwrap();

        let member = service
            .execute(query::rewards::Membership::by(renter_id))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(member.points, rewards::Points::default());
    }

    #[tokio::test]
    async fn enrolling_twice_keeps_balance() {
        let service = fixture::service();
        let renter_id = renter::Id::new();
        service.execute(JoinRewards { renter_id }).await.unwrap();
        service
            .database()
            .execute(Perform(rewards::Credit {
                renter_id,
                points: rewards::Points::from(100),
            }))
            .await
            .unwrap();

        service.execute(JoinRewards { renter_id }).await.unwrap();

        let member = service
            .execute(query::rewards::Membership::by(renter_id))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(member.points, rewards::Points::from(100));
    }
}
