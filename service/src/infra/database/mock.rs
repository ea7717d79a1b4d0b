//! In-memory [`Database`] for tests.

use std::sync::{Arc, Mutex};

use common::operations::{
    By, Commit, Delete, Insert, Lock, Perform, Select, Transact, Update,
};
use tracerr::Traced;

use crate::{
    domain::{
        agent, booking, card, location, property, renter, rewards, school,
        Booking, Location, Property, School,
    },
    read,
};

use super::{Database, Error};

/// In-memory [`Database`] backed by plain collections.
///
/// Transactions and locks are no-ops: every operation is applied
/// immediately, and fails only when a failure is injected explicitly.
#[derive(Clone, Debug, Default)]
pub(crate) struct Mock(Arc<Mutex<State>>);

/// State of a [`Mock`] database.
#[derive(Debug, Default)]
struct State {
    locations: Vec<Location>,
    properties: Vec<Property>,
    bookings: Vec<Booking>,
    cards: Vec<(card::Id, renter::Id, card::MaskedNumber)>,
    members: Vec<rewards::Member>,
    schools: Vec<School>,
    school_links: Vec<school::Link>,
    lost_booking_race: bool,
}

impl Mock {
    /// Runs the provided function over the locked [`State`].
    fn with<R>(&self, f: impl FnOnce(&mut State) -> R) -> R {
        f(&mut self.0.lock().expect("`Mock` lock poisoned"))
    }

    /// Seeds a card owned by the provided renter.
    pub(crate) fn seed_card(
        &self,
        id: card::Id,
        renter_id: renter::Id,
        masked_number: card::MaskedNumber,
    ) {
        self.with(|s| s.cards.push((id, renter_id, masked_number)));
    }

    /// Makes the next [`Insert`] of a [`Booking`] fail with an exclusion
    /// violation, as if a concurrent transaction inserted an overlapping
    /// [`Booking`] first.
    pub(crate) fn lose_booking_insert_race(&self) {
        self.with(|s| s.lost_booking_race = true);
    }
}

impl Database<Transact> for Mock {
    type Ok = Self;
    type Err = Traced<Error>;

    async fn execute(&self, _: Transact) -> Result<Self::Ok, Self::Err> {
        Ok(self.clone())
    }
}

impl Database<Commit> for Mock {
    type Ok = ();
    type Err = Traced<Error>;

    async fn execute(&self, _: Commit) -> Result<Self::Ok, Self::Err> {
        Ok(())
    }
}

impl Database<Lock<By<Property, property::Id>>> for Mock {
    type Ok = ();
    type Err = Traced<Error>;

    async fn execute(
        &self,
        _: Lock<By<Property, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(())
    }
}

impl Database<Insert<Location>> for Mock {
    type Ok = ();
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Insert(location): Insert<Location>,
    ) -> Result<Self::Ok, Self::Err> {
        self.with(|s| s.locations.push(location));
        Ok(())
    }
}

impl Database<Select<By<Option<Location>, location::Id>>> for Mock {
    type Ok = Option<Location>;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Location>, location::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self.with(|s| s.locations.iter().find(|l| l.id == id).cloned()))
    }
}

impl Database<Insert<Property>> for Mock {
    type Ok = ();
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Insert(property): Insert<Property>,
    ) -> Result<Self::Ok, Self::Err> {
        self.with(|s| s.properties.push(property));
        Ok(())
    }
}

impl Database<Update<Property>> for Mock {
    type Ok = ();
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Update(property): Update<Property>,
    ) -> Result<Self::Ok, Self::Err> {
        self.with(|s| {
            if let Some(p) =
                s.properties.iter_mut().find(|p| p.id == property.id)
            {
                *p = property;
            }
        });
        Ok(())
    }
}

impl Database<Delete<By<Property, property::Id>>> for Mock {
    type Ok = ();
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Property, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.with(|s| {
            s.properties.retain(|p| p.id != id);
            s.school_links.retain(|l| l.property_id != id);
        });
        Ok(())
    }
}

impl Database<Select<By<Option<Property>, property::Id>>> for Mock {
    type Ok = Option<Property>;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Property>, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self.with(|s| s.properties.iter().find(|p| p.id == id).cloned()))
    }
}

impl Database<Select<By<read::property::HasBookings, property::Id>>>
    for Mock
{
    type Ok = read::property::HasBookings;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Select(by): Select<By<read::property::HasBookings, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(read::property::HasBookings(self.with(|s| {
            s.bookings.iter().any(|b| b.property_id == id)
        })))
    }
}

impl
    Database<
        Select<
            By<
                Vec<read::property::search::Candidate>,
                read::property::search::Criteria,
            >,
        >,
    > for Mock
{
    type Ok = Vec<read::property::search::Candidate>;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<
                Vec<read::property::search::Candidate>,
                read::property::search::Criteria,
            >,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        use read::property::search::{Candidate, Criteria, SortBy};

        let Criteria {
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

        let mut candidates = self.with(|s| {
            s.properties
                .iter()
                .filter(|p| p.status == property::Status::Active)
                .filter_map(|p| {
                    let l = s.locations.iter().find(|l| l.id == p.location_id)?;
                    Some(Candidate {
                        id: p.id,
                        kind: p.kind(),
                        listing: p.listing,
                        price: p.price,
                        description: p.description.clone(),
                        city: l.city.clone(),
                        state: l.state.clone(),
                        num_rooms: p.details.num_rooms(),
                    })
                })
                .filter(|c| {
                    city.as_ref().is_none_or(|city| {
                        AsRef::<str>::as_ref(&c.city)
                            .eq_ignore_ascii_case(city.as_ref())
                    })
                })
                .filter(|c| {
                    state.as_ref().is_none_or(|state| {
                        c.state.as_ref().is_some_and(|s| {
                            AsRef::<str>::as_ref(s)
                                .eq_ignore_ascii_case(state.as_ref())
                        })
                    })
                })
                .filter(|c| kind.is_none_or(|k| c.kind == k))
                .filter(|c| listing.is_none_or(|l| c.listing == l))
                .filter(|c| min_price.is_none_or(|p| c.price >= p))
                .filter(|c| max_price.is_none_or(|p| c.price <= p))
                .filter(|c| {
                    min_rooms
                        .is_none_or(|n| c.num_rooms.is_some_and(|r| r >= n))
                })
                .filter(|c| {
                    available_on.is_none_or(|date| {
                        !s.bookings.iter().any(|b| {
                            b.property_id == c.id && b.period.contains(date)
                        })
                    })
                })
                .collect::<Vec<_>>()
        });

        match sort {
            SortBy::Unsorted => {}
            SortBy::PriceAscending => {
                candidates.sort_by_key(|c| c.price);
            }
            SortBy::RoomsAscending => {
                candidates.sort_by_key(|c| (c.num_rooms.is_none(), c.num_rooms));
            }
        }

        Ok(candidates)
    }
}

impl Database<Insert<Booking>> for Mock {
    type Ok = ();
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Insert(booking): Insert<Booking>,
    ) -> Result<Self::Ok, Self::Err> {
        self.with(|s| {
            if s.lost_booking_race {
                s.lost_booking_race = false;
                return Err(tracerr::new!(Error::ExclusionViolation(
                    "bookings_no_overlap",
                )));
            }
            s.bookings.push(booking);
            Ok(())
        })
    }
}

impl Database<Delete<By<Booking, booking::Id>>> for Mock {
    type Ok = ();
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Booking, booking::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.with(|s| s.bookings.retain(|b| b.id != id));
        Ok(())
    }
}

impl Database<Select<By<Option<Booking>, booking::Id>>> for Mock {
    type Ok = Option<Booking>;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Booking>, booking::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self.with(|s| s.bookings.iter().find(|b| b.id == id).cloned()))
    }
}

impl
    Database<
        Select<By<read::booking::Conflict, (property::Id, booking::Period)>>,
    > for Mock
{
    type Ok = read::booking::Conflict;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<read::booking::Conflict, (property::Id, booking::Period)>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let (property_id, period) = by.into_inner();
        Ok(read::booking::Conflict(self.with(|s| {
            s.bookings.iter().any(|b| {
                b.property_id == property_id && b.period.overlaps(&period)
            })
        })))
    }
}

impl Database<Select<By<Vec<read::booking::RenterEntry>, renter::Id>>>
    for Mock
{
    type Ok = Vec<read::booking::RenterEntry>;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<read::booking::RenterEntry>, renter::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let renter_id = by.into_inner();
        Ok(self.with(|s| {
            s.bookings
                .iter()
                .filter(|b| b.renter_id == renter_id)
                .filter_map(|b| {
                    let p =
                        s.properties.iter().find(|p| p.id == b.property_id)?;
                    let l =
                        s.locations.iter().find(|l| l.id == p.location_id)?;
                    let (.., masked_number) =
                        s.cards.iter().find(|(id, ..)| *id == b.card_id)?;
                    Some(read::booking::RenterEntry {
                        id: b.id,
                        property_id: b.property_id,
                        period: b.period,
                        total_cost: b.total_cost,
                        street: l.street.clone(),
                        city: l.city.clone(),
                        country: l.country.clone(),
                        masked_number: masked_number.clone(),
                    })
                })
                .collect()
        }))
    }
}

impl Database<Select<By<Vec<read::booking::AgentEntry>, agent::Id>>>
    for Mock
{
    type Ok = Vec<read::booking::AgentEntry>;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<read::booking::AgentEntry>, agent::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let agent_id = by.into_inner();
        Ok(self.with(|s| {
            s.bookings
                .iter()
                .filter_map(|b| {
                    let p = s
                        .properties
                        .iter()
                        .find(|p| p.id == b.property_id)
                        .filter(|p| p.agent_id == agent_id)?;
                    let l =
                        s.locations.iter().find(|l| l.id == p.location_id)?;
                    Some(read::booking::AgentEntry {
                        id: b.id,
                        property_id: b.property_id,
                        renter_id: b.renter_id,
                        period: b.period,
                        total_cost: b.total_cost,
                        street: l.street.clone(),
                        city: l.city.clone(),
                    })
                })
                .collect()
        }))
    }
}

impl Database<Select<By<read::card::Ownership, (card::Id, renter::Id)>>>
    for Mock
{
    type Ok = read::card::Ownership;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Select(by): Select<By<read::card::Ownership, (card::Id, renter::Id)>>,
    ) -> Result<Self::Ok, Self::Err> {
        let (card_id, renter_id) = by.into_inner();
        Ok(read::card::Ownership(self.with(|s| {
            s.cards
                .iter()
                .any(|(id, owner, ..)| *id == card_id && *owner == renter_id)
        })))
    }
}

impl Database<Insert<rewards::Member>> for Mock {
    type Ok = ();
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Insert(member): Insert<rewards::Member>,
    ) -> Result<Self::Ok, Self::Err> {
        self.with(|s| {
            if !s.members.iter().any(|m| m.renter_id == member.renter_id) {
                s.members.push(member);
            }
        });
        Ok(())
    }
}

impl Database<Delete<By<rewards::Member, renter::Id>>> for Mock {
    type Ok = ();
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<rewards::Member, renter::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let renter_id = by.into_inner();
        self.with(|s| s.members.retain(|m| m.renter_id != renter_id));
        Ok(())
    }
}

impl Database<Select<By<Option<rewards::Member>, renter::Id>>> for Mock {
    type Ok = Option<rewards::Member>;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<rewards::Member>, renter::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let renter_id = by.into_inner();
        Ok(self.with(|s| {
            s.members.iter().find(|m| m.renter_id == renter_id).copied()
        }))
    }
}

impl Database<Perform<rewards::Credit>> for Mock {
    type Ok = ();
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Perform(credit): Perform<rewards::Credit>,
    ) -> Result<Self::Ok, Self::Err> {
        self.with(|s| {
            if let Some(m) =
                s.members.iter_mut().find(|m| m.renter_id == credit.renter_id)
            {
                m.points = rewards::Points::from(
                    i64::from(m.points) + i64::from(credit.points),
                );
            }
        });
        Ok(())
    }
}

impl Database<Insert<School>> for Mock {
    type Ok = ();
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Insert(school): Insert<School>,
    ) -> Result<Self::Ok, Self::Err> {
        self.with(|s| {
            if let Some(existing) =
                s.schools.iter_mut().find(|e| e.id == school.id)
            {
                *existing = school;
            } else {
                s.schools.push(school);
            }
        });
        Ok(())
    }
}

impl Database<Insert<school::Link>> for Mock {
    type Ok = ();
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Insert(link): Insert<school::Link>,
    ) -> Result<Self::Ok, Self::Err> {
        self.with(|s| {
            if let Some(existing) = s.school_links.iter_mut().find(|e| {
                e.property_id == link.property_id
                    && e.school_id == link.school_id
            }) {
                *existing = link;
            } else {
                s.school_links.push(link);
            }
        });
        Ok(())
    }
}

impl Database<Select<By<Vec<read::school::Nearby>, property::Id>>> for Mock {
    type Ok = Vec<read::school::Nearby>;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<read::school::Nearby>, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let property_id = by.into_inner();
        Ok(self.with(|s| {
            s.school_links
                .iter()
                .filter(|l| l.property_id == property_id)
                .filter_map(|l| {
                    let school =
                        s.schools.iter().find(|e| e.id == l.school_id)?;
                    Some(read::school::Nearby {
                        id: school.id,
                        name: school.name.clone(),
                        distance: l.distance,
                    })
                })
                .collect()
        }))
    }
}
