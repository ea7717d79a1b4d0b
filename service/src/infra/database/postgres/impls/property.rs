//! [`Property`]-related [`Database`] implementations.

use common::operations::{By, Delete, Insert, Lock, Select, Update};
use itertools::Itertools as _;
use postgres_types::ToSql;
use tracerr::Traced;

use crate::{
    domain::{
        property::{self, house, Apartment, CommercialBuilding, House},
        Property,
    },
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

/// Restores a [`house::NumRooms`] from its stored `INT4` representation.
fn num_rooms_from_sql(num: i32) -> house::NumRooms {
    house::NumRooms::new(
        u16::try_from(num).expect("`num_rooms` overflow"),
    )
    .expect("positive in storage")
}

/// Restores a [`house::SquareFootage`] from its stored `INT4` representation.
fn square_footage_from_sql(sqft: i32) -> house::SquareFootage {
    house::SquareFootage::new(
        u32::try_from(sqft).expect("`square_footage` overflow"),
    )
    .expect("positive in storage")
}

impl<C> Database<Select<By<Option<Property>, property::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Property>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Property>, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: property::Id = by.into_inner();

        const SQL: &str = "\
            SELECT p.id, p.kind, p.location_id, p.agent_id, \
                   p.description, p.price, p.status, p.listing, \
                   p.crime_rate, p.created_at, \
                   h.num_rooms, h.square_footage AS house_square_footage, \
                   a.floor, a.building_type, \
                   cb.square_footage AS commercial_square_footage, \
                   cb.business_type \
            FROM properties AS p \
            LEFT JOIN houses AS h ON h.property_id = p.id \
            LEFT JOIN apartments AS a ON a.property_id = p.id \
            LEFT JOIN commercial_buildings AS cb ON cb.property_id = p.id \
            WHERE p.id = $1::UUID \
            LIMIT 1";
        self.query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| {
                row.map(|row| {
                    let details = match row.get("kind") {
                        property::Kind::House => House {
                            num_rooms: num_rooms_from_sql(
                                row.get("num_rooms"),
                            ),
                            square_footage: square_footage_from_sql(
                                row.get("house_square_footage"),
                            ),
                        }
                        .into(),
                        property::Kind::Apartment => Apartment {
                            floor: u16::try_from(row.get::<_, i32>("floor"))
                                .expect("`floor` overflow"),
                            building_type: row.get("building_type"),
                        }
                        .into(),
                        property::Kind::CommercialBuilding => {
                            CommercialBuilding {
                                square_footage: square_footage_from_sql(
                                    row.get("commercial_square_footage"),
                                ),
                                business_type: row.get("business_type"),
                            }
                            .into()
                        }
                        property::Kind::Land => property::Details::Land,
                        property::Kind::VacationHome => {
                            property::Details::VacationHome
                        }
                    };
                    Property {
                        id: row.get("id"),
                        details,
                        location_id: row.get("location_id"),
                        agent_id: row.get("agent_id"),
                        description: row.get("description"),
                        price: row.get("price"),
                        status: row.get("status"),
                        listing: row.get("listing"),
                        crime_rate: row.get("crime_rate"),
                        created_at: row.get("created_at"),
                    }
                })
            })
    }
}

impl<C> Database<Insert<Property>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(property): Insert<Property>,
    ) -> Result<Self::Ok, Self::Err> {
        let kind = property.kind();
        let Property {
            id,
            details,
            location_id,
            agent_id,
            description,
            price,
            status,
            listing,
            crime_rate,
            created_at,
        } = property;

        const SQL: &str = "\
            INSERT INTO properties (\
                id, kind, location_id, agent_id, \
                description, price, status, listing, \
                crime_rate, created_at\
            ) VALUES (\
                $1::UUID, $2::INT2, $3::UUID, $4::UUID, \
                $5::VARCHAR, $6::NUMERIC, $7::INT2, $8::INT2, \
                $9::NUMERIC, $10::TIMESTAMPTZ\
            )";
        self.exec(
            SQL,
            &[
                &id,
                &kind,
                &location_id,
                &agent_id,
                &description,
                &price,
                &status,
                &listing,
                &crime_rate,
                &created_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)?;

        match details {
            property::Details::House(h) => {
                let num_rooms = i32::from(h.num_rooms.get());
                let square_footage = i32::try_from(h.square_footage.get())
                    .expect("`square_footage` overflow");

                const SQL: &str = "\
                    INSERT INTO houses (\
                        property_id, num_rooms, square_footage\
                    ) VALUES ($1::UUID, $2::INT4, $3::INT4)";
                self.exec(SQL, &[&id, &num_rooms, &square_footage])
                    .await
                    .map_err(tracerr::wrap!())
                    .map(drop)
            }
            property::Details::Apartment(a) => {
                let floor = i32::from(a.floor);

                const SQL: &str = "\
                    INSERT INTO apartments (\
                        property_id, floor, building_type\
                    ) VALUES ($1::UUID, $2::INT4, $3::VARCHAR)";
                self.exec(SQL, &[&id, &floor, &a.building_type])
                    .await
                    .map_err(tracerr::wrap!())
                    .map(drop)
            }
            property::Details::CommercialBuilding(cb) => {
                let square_footage = i32::try_from(cb.square_footage.get())
                    .expect("`square_footage` overflow");

                const SQL: &str = "\
                    INSERT INTO commercial_buildings (\
                        property_id, square_footage, business_type\
                    ) VALUES ($1::UUID, $2::INT4, $3::VARCHAR)";
                self.exec(SQL, &[&id, &square_footage, &cb.business_type])
                    .await
                    .map_err(tracerr::wrap!())
                    .map(drop)
            }
            property::Details::Land => {
                const SQL: &str = "\
                    INSERT INTO lands (property_id) VALUES ($1::UUID)";
                self.exec(SQL, &[&id])
                    .await
                    .map_err(tracerr::wrap!())
                    .map(drop)
            }
            property::Details::VacationHome => {
                const SQL: &str = "\
                    INSERT INTO vacation_homes (property_id) \
                    VALUES ($1::UUID)";
                self.exec(SQL, &[&id])
                    .await
                    .map_err(tracerr::wrap!())
                    .map(drop)
            }
        }
    }
}

impl<C> Database<Update<Property>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(property): Update<Property>,
    ) -> Result<Self::Ok, Self::Err> {
        // Subtype attributes are immutable, so only the base row is updated.
        let Property {
            id,
            details: _,
            location_id,
            agent_id,
            description,
            price,
            status,
            listing,
            crime_rate,
            created_at: _,
        } = property;

        const SQL: &str = "\
            UPDATE properties \
            SET location_id = $2::UUID, \
                agent_id = $3::UUID, \
                description = $4::VARCHAR, \
                price = $5::NUMERIC, \
                status = $6::INT2, \
                listing = $7::INT2, \
                crime_rate = $8::NUMERIC \
            WHERE id = $1::UUID";
        self.exec(
            SQL,
            &[
                &id,
                &location_id,
                &agent_id,
                &description,
                &price,
                &status,
                &listing,
                &crime_rate,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Delete<By<Property, property::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Property, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: property::Id = by.into_inner();

        // Subtype and school link rows are removed via `ON DELETE CASCADE`.
        const SQL: &str = "\
            DELETE FROM properties \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Lock<By<Property, property::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<Property, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: property::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id \
            FROM properties \
            WHERE id = $1::UUID \
            FOR UPDATE";
        self.query(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Select<By<read::property::HasBookings, property::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = read::property::HasBookings;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<read::property::HasBookings, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let property_id: property::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id \
            FROM bookings \
            WHERE property_id = $1::UUID \
            LIMIT 1";
        self.query_opt(SQL, &[&property_id])
            .await
            .map_err(tracerr::wrap!())
            .map(|r| read::property::HasBookings(r.is_some()))
    }
}

impl<C>
    Database<
        Select<
            By<
                Vec<read::property::search::Candidate>,
                read::property::search::Criteria,
            >,
        >,
    > for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<read::property::search::Candidate>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<
                Vec<read::property::search::Candidate>,
                read::property::search::Criteria,
            >,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let read::property::search::Criteria {
            city,
            state,
            kind,
            listing,
            min_price,
            max_price,
            min_rooms,
            available_on,
            sort,
        } = by.into_inner();

        let status = property::Status::Active;
        let min_rooms = min_rooms.map(|n| i32::from(n.get()));

        let mut ps: Vec<&(dyn ToSql + Sync)> = vec![&status];

        let city_idx = city.as_ref().map(|c| {
            ps.push(c);
            ps.len()
        });
        let state_idx = state.as_ref().map(|s| {
            ps.push(s);
            ps.len()
        });
        let kind_idx = kind.as_ref().map(|k| {
            ps.push(k);
            ps.len()
        });
        let listing_idx = listing.as_ref().map(|l| {
            ps.push(l);
            ps.len()
        });
        let min_price_idx = min_price.as_ref().map(|p| {
            ps.push(p);
            ps.len()
        });
        let max_price_idx = max_price.as_ref().map(|p| {
            ps.push(p);
            ps.len()
        });
        let min_rooms_idx = min_rooms.as_ref().map(|n| {
            ps.push(n);
            ps.len()
        });
        let available_on_idx = available_on.as_ref().map(|d| {
            ps.push(d);
            ps.len()
        });

        let sql = format!(
            "SELECT p.id, p.kind, p.listing, p.price, p.description, \
                    l.city, l.state, h.num_rooms \
             FROM properties AS p \
             JOIN locations AS l ON l.id = p.location_id \
             LEFT JOIN houses AS h ON h.property_id = p.id \
             WHERE p.status = $1::INT2 \
                   {city} \
                   {state} \
                   {kind} \
                   {listing} \
                   {min_price} \
                   {max_price} \
                   {min_rooms} \
                   {available_on} \
             {ordering}",
            city = city_idx.into_iter().format_with("", |idx, f| {
                f(&format_args!("AND LOWER(l.city) = LOWER(${idx}::VARCHAR) "))
            }),
            state = state_idx.into_iter().format_with("", |idx, f| {
                f(&format_args!(
                    "AND LOWER(l.state) = LOWER(${idx}::VARCHAR) "
                ))
            }),
            kind = kind_idx.into_iter().format_with("", |idx, f| {
                f(&format_args!("AND p.kind = ${idx}::INT2 "))
            }),
            listing = listing_idx.into_iter().format_with("", |idx, f| {
                f(&format_args!("AND p.listing = ${idx}::INT2 "))
            }),
            min_price = min_price_idx.into_iter().format_with("", |idx, f| {
                f(&format_args!("AND p.price >= ${idx}::NUMERIC "))
            }),
            max_price = max_price_idx.into_iter().format_with("", |idx, f| {
                f(&format_args!("AND p.price <= ${idx}::NUMERIC "))
            }),
            min_rooms = min_rooms_idx.into_iter().format_with("", |idx, f| {
                f(&format_args!("AND h.num_rooms >= ${idx}::INT4 "))
            }),
            available_on =
                available_on_idx.into_iter().format_with("", |idx, f| {
                    f(&format_args!(
                        "AND NOT EXISTS (\
                            SELECT 1 FROM bookings AS b \
                            WHERE b.property_id = p.id \
                              AND ${idx}::DATE \
                                  BETWEEN b.start_date AND b.end_date) "
                    ))
                }),
            ordering = match sort {
                read::property::search::SortBy::Unsorted => "",
                read::property::search::SortBy::PriceAscending => {
                    "ORDER BY p.price ASC"
                }
                read::property::search::SortBy::RoomsAscending => {
                    "ORDER BY h.num_rooms ASC NULLS LAST"
                }
            },
        );
        self.query(&sql, ps.as_slice())
            .await
            .map_err(tracerr::wrap!())
            .map(|rows| {
                rows.into_iter()
                    .map(|row| read::property::search::Candidate {
                        id: row.get("id"),
                        kind: row.get("kind"),
                        listing: row.get("listing"),
                        price: row.get("price"),
                        description: row.get("description"),
                        city: row.get("city"),
                        state: row.get("state"),
                        num_rooms: row
                            .get::<_, Option<i32>>("num_rooms")
                            .map(num_rooms_from_sql),
                    })
                    .collect()
            })
    }
}
