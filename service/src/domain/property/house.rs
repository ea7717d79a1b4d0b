//! [`House`] subtype definitions.

#[cfg(doc)]
use crate::domain::Property;

/// Standalone house attributes of a [`Property`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct House {
    /// Number of rooms in the house.
    pub num_rooms: NumRooms,

    /// Square footage of the house.
    pub square_footage: SquareFootage,
}

/// Number of rooms in a [`House`].
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct NumRooms(u16);

impl NumRooms {
    /// Creates a new [`NumRooms`] if the given `num` is positive.
    #[must_use]
    pub fn new(num: u16) -> Option<Self> {
        (num > 0).then_some(Self(num))
    }

    /// Returns the number of rooms as a [`u16`].
    #[must_use]
    pub fn get(self) -> u16 {
        self.0
    }
}

/// Square footage of a [`Property`] subtype.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct SquareFootage(u32);

impl SquareFootage {
    /// Creates a new [`SquareFootage`] if the given `sqft` is positive.
    #[must_use]
    pub fn new(sqft: u32) -> Option<Self> {
        (sqft > 0).then_some(Self(sqft))
    }

    /// Returns the square footage as a [`u32`].
    #[must_use]
    pub fn get(self) -> u32 {
        self.0
    }
}
