//! Read entities definitions.

pub mod booking;
pub mod card;
pub mod property;
pub mod school;
