//! Domain definitions.

pub mod agent;
pub mod booking;
pub mod card;
pub mod location;
pub mod property;
pub mod renter;
pub mod rewards;
pub mod school;
pub mod session;

pub use self::{
    booking::Booking, location::Location, property::Property, school::School,
    session::Session,
};
