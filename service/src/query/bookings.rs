//! [`Query`] collection related to the multiple [`Booking`]s.

use common::operations::By;

use crate::{
    domain::{agent, renter},
    read,
};
#[cfg(doc)]
use crate::{domain::Booking, Query};

use super::DatabaseQuery;

/// Queries the list of [`Booking`]s held by a renter.
pub type ForRenter =
    DatabaseQuery<By<Vec<read::booking::RenterEntry>, renter::Id>>;

/// Queries the list of [`Booking`]s of an agent's properties.
pub type ForAgent =
    DatabaseQuery<By<Vec<read::booking::AgentEntry>, agent::Id>>;

#[cfg(test)]
mod spec {
    use crate::{
        command::{fixture, ConfirmBooking},
        domain::{card, renter},
        Command as _,
    };

    use super::{ForAgent, ForRenter};

    #[tokio::test]
    async fn lists_bookings_with_location_and_card() {
        let service = fixture::service();
        let property = fixture::house(&service, "100").await;
        let renter_id = renter::Id::new();
        let card_id = card::Id::new();
        let masked = card::MaskedNumber::new("**** **** **** 4242");
        service.database().seed_card(card_id, renter_id, masked.clone());
        let booking = service
            .execute(ConfirmBooking {
                property_id: property.id,
                renter_id,
                card_id,
                period: fixture::period("2024-01-01", "2024-01-05"),
            })
            .await
            .unwrap();

        let for_renter =
            service.execute(ForRenter::by(renter_id)).await.unwrap();
        assert_eq!(for_renter.len(), 1);
        assert_eq!(for_renter[0].id, booking.id);
        assert_eq!(for_renter[0].city.to_string(), "Springfield");
        assert_eq!(for_renter[0].masked_number, masked);

        let for_agent = service
            .execute(ForAgent::by(property.agent_id))
            .await
            .unwrap();
        assert_eq!(for_agent.len(), 1);
        assert_eq!(for_agent[0].renter_id, renter_id);

        assert!(service
            .execute(ForRenter::by(renter::Id::new()))
            .await
            .unwrap()
            .is_empty());
    }
}
