//! [`Command`] for confirming a new [`Booking`].

use common::{
    operations::{
        By, Commit, Insert, Lock, Perform, Select, Transact, Transacted,
        Update,
    },
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{booking, card, property, renter, rewards, Booking, Property},
    infra::{database, Database},
    read,
    Service,
};

use super::Command;

/// Name of the exclusion constraint guarding against overlapping bookings of
/// the same [`Property`].
const NO_OVERLAP_CONSTRAINT: &str = "bookings_no_overlap";

/// [`Command`] for confirming a new [`Booking`].
///
/// Atomically inserts the [`Booking`], flips the [`Property`] to
/// [`property::Status::Inactive`] and credits rewards points to the renter
/// (if enrolled).
///
/// [`property::Status`] is a coarse listed/unlisted switch and doesn't gate
/// confirmation: non-overlapping [`Booking`]s may coexist on the same
/// [`Property`].
#[derive(Clone, Copy, Debug)]
pub struct ConfirmBooking {
    /// ID of the [`Property`] to book.
    pub property_id: property::Id,

    /// ID of the renter booking the [`Property`].
    pub renter_id: renter::Id,

    /// ID of the card paying for the [`Booking`].
    ///
    /// Must belong to the booking renter.
    pub card_id: card::Id,

    /// [`booking::Period`] the new [`Booking`] spans.
    pub period: booking::Period,
}

impl<Db> Command<ConfirmBooking> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>
        + Database<
            Select<By<Option<Property>, property::Id>>,
            Ok = Option<Property>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<read::card::Ownership, (card::Id, renter::Id)>>,
            Ok = read::card::Ownership,
            Err = Traced<database::Error>,
        >,
    Transacted<Db>: Database<
            Select<
                By<read::booking::Conflict, (property::Id, booking::Period)>,
            >,
            Ok = read::booking::Conflict,
            Err = Traced<database::Error>,
        > + Database<
            Lock<By<Property, property::Id>>,
            Err = Traced<database::Error>,
        > + Database<Insert<Booking>, Err = Traced<database::Error>>
        + Database<Update<Property>, Err = Traced<database::Error>>
        + Database<Perform<rewards::Credit>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Booking;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: ConfirmBooking,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let ConfirmBooking {
            property_id,
            renter_id,
            card_id,
            period,
        } = cmd;

        let mut property = self
            .database()
            .execute(Select(By::<Option<Property>, _>::new(property_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::PropertyNotExists(property_id))
            .map_err(tracerr::wrap!())?;

        let ownership = self
            .database()
            .execute(Select(By::<read::card::Ownership, _>::new((
                card_id, renter_id,
            ))))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if ownership == false {
            return Err(tracerr::new!(E::NotCardOwner(card_id)));
        }

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent actions upon the same `Property`.
        tx.execute(Lock(By::new(property_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let conflict = tx
            .execute(Select(By::<read::booking::Conflict, _>::new((
                property_id,
                period,
            ))))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if conflict == true {
            return Err(tracerr::new!(E::AlreadyBooked(property_id)));
        }

        let booking = Booking {
            id: booking::Id::new(),
            property_id,
            renter_id,
            card_id,
            agent_id: Some(property.agent_id),
            period,
            total_cost: property.price.total_for(period.days()),
            created_at: DateTime::now().coerce(),
        };
        tx.execute(Insert(booking.clone()))
            .await
            .map_err(|e| {
                // Lost race with another transaction inserting an overlapping
                // `Booking`.
                if e.as_ref()
                    .is_exclusion_violation(Some(NO_OVERLAP_CONSTRAINT))
                {
                    log::warn!(
                        %property_id,
                        "overlapping `Booking` rejected by the database",
                    );
                    tracerr::new!(E::AlreadyBooked(property_id))
                } else {
                    (tracerr::map_from_and_wrap!(=> E))(e)
                }
            })
            .map(drop)?;

        property.status = property::Status::Inactive;
        tx.execute(Update(property))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        tx.execute(Perform(rewards::Credit {
            renter_id,
            points: rewards::Points::truncated_from(booking.total_cost),
        }))
        .await
        .map_err(tracerr::map_from_and_wrap!(=> E))
        .map(drop)?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(booking)
    }
}

/// Error of [`ConfirmBooking`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Property`] with the provided ID does not exist.
    #[display("`Property(id: {_0})` does not exist")]
    PropertyNotExists(#[error(not(source))] property::Id),

    /// Card with the provided ID doesn't belong to the booking renter.
    #[display("Card(id: {_0}) doesn't belong to the booking renter")]
    NotCardOwner(#[error(not(source))] card::Id),

    /// [`Property`] already has a [`Booking`] conflicting with the requested
    /// [`booking::Period`].
    #[display("`Property(id: {_0})` is already booked for these dates")]
    AlreadyBooked(#[error(not(source))] property::Id),
}
