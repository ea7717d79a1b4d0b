//! [`Command`] definition.

pub mod add_nearby_school;
pub mod cancel_booking;
pub mod confirm_booking;
pub mod create_location;
pub mod create_property;
pub mod delete_property;
pub mod join_rewards;
pub mod leave_rewards;
pub mod modify_property;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    add_nearby_school::AddNearbySchool, cancel_booking::CancelBooking,
    confirm_booking::ConfirmBooking, create_location::CreateLocation,
    create_property::CreateProperty, delete_property::DeleteProperty,
    join_rewards::JoinRewards, leave_rewards::LeaveRewards,
    modify_property::ModifyProperty,
};

#[cfg(test)]
pub(crate) mod fixture {
    //! Fixtures shared by [`Command`] and [`Query`] specs.
    //!
    //! [`Command`]: super::Command
    //! [`Query`]: crate::Query

    use common::{Date, Price};

    use crate::{
        domain::{agent, booking, property, Location, Property},
        infra::database::mock::Mock,
        Command as _, Service,
    };

    use super::{CreateLocation, CreateProperty};

    /// Creates a [`Service`] backed by an empty [`Mock`] database.
    pub(crate) fn service() -> Service<Mock> {
        Service::new(Mock::default())
    }

    pub(crate) fn date(s: &str) -> Date {
        s.parse().unwrap()
    }

    pub(crate) fn period(start: &str, end: &str) -> booking::Period {
        booking::Period::new(date(start), date(end)).unwrap()
    }

    pub(crate) fn price(s: &str) -> Price {
        Price::new(s.parse().unwrap()).unwrap()
    }

    /// Creates a new [`Location`] in the given [`Service`].
    pub(crate) async fn location(service: &Service<Mock>) -> Location {
        location_in(service, "Springfield", Some("IL")).await
    }

    /// Creates a new [`Location`] in the given city and state.
    pub(crate) async fn location_in(
        service: &Service<Mock>,
        city: &str,
        state: Option<&str>,
    ) -> Location {
        service
            .execute(CreateLocation {
                street: "742 Evergreen Terrace".parse().unwrap(),
                city: city.parse().unwrap(),
                state: state.map(|s| s.parse().unwrap()),
                zip_code: Some("62704".parse().unwrap()),
                country: "USA".parse().unwrap(),
            })
            .await
            .unwrap()
    }

    /// Creates an active 3-room house [`Property`] with the given per-day
    /// price.
    pub(crate) async fn house(
        service: &Service<Mock>,
        per_day: &str,
    ) -> Property {
        let location = location(service).await;
        house_at(service, location.id, per_day, 3).await
    }

    /// Creates an active house [`Property`] at the given [`Location`].
    pub(crate) async fn house_at(
        service: &Service<Mock>,
        location_id: crate::domain::location::Id,
        per_day: &str,
        num_rooms: u16,
    ) -> Property {
        service
            .execute(CreateProperty {
                details: property::Details::House(property::House {
                    num_rooms: property::house::NumRooms::new(num_rooms)
                        .unwrap(),
                    square_footage: property::house::SquareFootage::new(1200)
                        .unwrap(),
                }),
                location_id,
                agent_id: agent::Id::new(),
                description: "Cozy house".parse().unwrap(),
                price: price(per_day),
                listing: property::Listing::Rent,
                crime_rate: None,
            })
            .await
            .unwrap()
    }
}
