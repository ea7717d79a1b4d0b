//! [`Query`] collection related to the multiple [`Property`]s.

use common::operations::By;

use crate::read;
#[cfg(doc)]
use crate::{domain::Property, Query};

use super::DatabaseQuery;

/// Queries [`Property`] candidates matching the provided search criteria.
pub type Search = DatabaseQuery<
    By<Vec<read::property::search::Candidate>, read::property::search::Criteria>,
>;

#[cfg(test)]
mod spec {
    use crate::{
        command::{fixture, ConfirmBooking, ModifyProperty},
        domain::{card, property, renter},
        read::property::search::{Criteria, SortBy},
        Command as _,
    };

    use super::Search;

    #[tokio::test]
    async fn filters_by_city_ignoring_case() {
        let service = fixture::service();
        let springfield =
            fixture::location_in(&service, "Springfield", Some("IL")).await;
        let shelbyville =
            fixture::location_in(&service, "Shelbyville", Some("IL")).await;
        let wanted =
            fixture::house_at(&service, springfield.id, "100", 3).await;
        fixture::house_at(&service, shelbyville.id, "100", 3).await;

        let found = service
            .execute(Search::by(Criteria {
                city: Some("SPRINGFIELD".parse().unwrap()),
                ..Criteria::default()
            }))
            .await
            .unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, wanted.id);
    }

    #[tokio::test]
    async fn filters_by_state_ignoring_case() {
        let service = fixture::service();
        let illinois =
            fixture::location_in(&service, "Springfield", Some("IL")).await;
        let oregon =
            fixture::location_in(&service, "Portland", Some("OR")).await;
        let wanted = fixture::house_at(&service, illinois.id, "100", 3).await;
        fixture::house_at(&service, oregon.id, "100", 3).await;

        let found = service
            .execute(Search::by(Criteria {
                state: Some("il".parse().unwrap()),
                ..Criteria::default()
            }))
            .await
            .unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, wanted.id);
    }

    #[tokio::test]
    async fn excludes_unlisted_properties() {
        let service = fixture::service();
        let property = fixture::house(&service, "100").await;
        service
            .execute(ModifyProperty {
                property_id: property.id,
                description: None,
                price: None,
                status: Some(property::Status::Inactive),
                listing: None,
                crime_rate: None,
            })
            .await
            .unwrap();

        let found = service
            .execute(Search::by(Criteria::default()))
            .await
            .unwrap();

        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn filters_by_price_range_and_rooms() {
        let service = fixture::service();
        let location = fixture::location(&service).await;
        let cheap = fixture::house_at(&service, location.id, "80", 2).await;
        let mid = fixture::house_at(&service, location.id, "120", 4).await;
        fixture::house_at(&service, location.id, "300", 6).await;

        let found = service
            .execute(Search::by(Criteria {
                max_price: Some(fixture::price("150")),
                sort: SortBy::PriceAscending,
                ..Criteria::default()
            }))
            .await
            .unwrap();
        assert_eq!(
            found.iter().map(|c| c.id).collect::<Vec<_>>(),
            [cheap.id, mid.id],
        );

        let found = service
            .execute(Search::by(Criteria {
                min_rooms: property::house::NumRooms::new(4),
                max_price: Some(fixture::price("150")),
                ..Criteria::default()
            }))
            .await
            .unwrap();
        assert_eq!(
            found.iter().map(|c| c.id).collect::<Vec<_>>(),
            [mid.id],
        );
    }

    #[tokio::test]
    async fn availability_excludes_booked_dates() {
        let service = fixture::service();
        let property = fixture::house(&service, "100").await;
        let renter_id = renter::Id::new();
        let card_id = card::Id::new();
        service.database().seed_card(
            card_id,
            renter_id,
            card::MaskedNumber::new("**** **** **** 4242"),
        );
        service
            .execute(ConfirmBooking {
                property_id: property.id,
                renter_id,
                card_id,
                period: fixture::period("2024-01-10", "2024-01-20"),
            })
            .await
            .unwrap();
        // Relist so that only the date filter decides.
        service
            .execute(ModifyProperty {
                property_id: property.id,
                description: None,
                price: None,
                status: Some(property::Status::Active),
                listing: None,
                crime_rate: None,
            })
            .await
            .unwrap();

        let found = service
            .execute(Search::by(Criteria {
                available_on: Some(fixture::date("2024-01-15")),
                ..Criteria::default()
            }))
            .await
            .unwrap();
        assert!(found.is_empty());

        let found = service
            .execute(Search::by(Criteria {
                available_on: Some(fixture::date("2024-02-15")),
                ..Criteria::default()
            }))
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
    }
}
