//! [`Price`]-related definitions.

#[cfg(feature = "postgres")]
use std::error::Error as StdError;
use std::{fmt, str::FromStr};

#[cfg(feature = "postgres")]
use postgres_types::{
    accepts, private::BytesMut, to_sql_checked, FromSql, IsNull, ToSql, Type,
};
use rust_decimal::Decimal;

/// Price of an entity in a currency-agnostic decimal unit.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub struct Price(Decimal);

impl Price {
    /// Creates a new [`Price`] if the given `amount` is positive.
    ///
    /// Zero is not a valid [`Price`].
    #[must_use]
    pub fn new(amount: Decimal) -> Option<Self> {
        (amount > Decimal::ZERO).then_some(Self(amount))
    }

    /// Returns the amount of this [`Price`].
    #[must_use]
    pub fn amount(self) -> Decimal {
        self.0
    }

    /// Returns the total amount for the provided number of `days`, treating
    /// this [`Price`] as a per-day rate.
    #[must_use]
    pub fn total_for(self, days: u32) -> Decimal {
        self.0 * Decimal::from(days)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Price {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount = Decimal::from_str(s).map_err(|_| "invalid amount")?;
        Self::new(amount).ok_or("`Price` must be positive")
    }
}

#[cfg(feature = "postgres")]
impl FromSql<'_> for Price {
    accepts!(NUMERIC);

    fn from_sql(
        ty: &Type,
        raw: &[u8],
    ) -> Result<Self, Box<dyn StdError + Sync + Send>> {
        let amount = Decimal::from_sql(ty, raw)?;
        Self::new(amount).ok_or_else(|| "non-positive `Price`".into())
    }
}

#[cfg(feature = "postgres")]
impl ToSql for Price {
    accepts!(NUMERIC);
    to_sql_checked!();

    fn to_sql(
        &self,
        ty: &Type,
        w: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn StdError + Sync + Send>> {
        self.0.to_sql(ty, w)
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use rust_decimal::Decimal;

    use super::Price;

    fn decimal(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn from_str() {
        assert_eq!(
            Price::from_str("123.45").unwrap().amount(),
            decimal("123.45"),
        );

        assert!(Price::from_str("0").is_err());
        assert!(Price::from_str("-5").is_err());
        assert!(Price::from_str("free").is_err());
    }

    #[test]
    fn total_for() {
        let price = Price::new(decimal("100")).unwrap();
        assert_eq!(price.total_for(4), decimal("400"));

        let price = Price::new(decimal("62.7475")).unwrap();
        assert_eq!(price.total_for(4), decimal("250.99"));
    }
}
