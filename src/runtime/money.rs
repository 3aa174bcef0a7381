//! Currency amounts stored as `BIGINT` minor units.
//!
//! The `money` type handler maps a `BIGINT` column to [`Money`]. Values are written as
//! their minor-unit amount and read back in [`DEFAULT_CURRENCY`].

use diesel::backend::Backend;
use diesel::deserialize::{self, FromSql, FromSqlRow};
use diesel::expression::AsExpression;
use diesel::serialize::{self, Output, ToSql};
use diesel::sql_types::BigInt;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Currency assumed for amounts read from the database.
pub const DEFAULT_CURRENCY: &str = "TWD";

/// ISO-4217 codes with their number of decimal places.
const KNOWN_CURRENCIES: &[(&str, u8)] = &[
    ("AUD", 2),
    ("CAD", 2),
    ("CHF", 2),
    ("CNY", 2),
    ("EUR", 2),
    ("GBP", 2),
    ("HKD", 2),
    ("JPY", 0),
    ("KRW", 0),
    ("SGD", 2),
    ("TWD", 2),
    ("USD", 2),
];

#[derive(Debug, Clone, PartialEq)]
pub enum MoneyError {
    UnknownCurrency(String),
    InvalidScale { currency: &'static str, amount: f64 },
    NotFinite(f64),
    /// Minor-unit amount does not fit in a `BIGINT`.
    OutOfRange { currency: &'static str, amount: f64 },
}

impl fmt::Display for MoneyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyError::UnknownCurrency(code) => write!(f, "Unknown currency '{}'", code),
            MoneyError::InvalidScale { currency, amount } => {
                write!(f, "Amount {} has more decimal places than {} allows", amount, currency)
            }
            MoneyError::NotFinite(amount) => write!(f, "Amount {} is not a finite number", amount),
            MoneyError::OutOfRange { currency, amount } => {
                write!(f, "Amount {} {} is out of range", currency, amount)
            }
        }
    }
}

impl std::error::Error for MoneyError {}

/// A currency known to the runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CurrencyUnit {
    code: &'static str,
    decimal_places: u8,
}

impl CurrencyUnit {
    /// Look up a currency by its three-letter code (case-insensitive).
    pub fn of(code: &str) -> Result<Self, MoneyError> {
        let upper = code.trim().to_ascii_uppercase();
        KNOWN_CURRENCIES
            .iter()
            .find(|(known, _)| *known == upper)
            .map(|(known, decimal_places)| CurrencyUnit {
                code: known,
                decimal_places: *decimal_places,
            })
            .ok_or_else(|| MoneyError::UnknownCurrency(code.to_string()))
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    pub fn decimal_places(&self) -> u8 {
        self.decimal_places
    }

    fn minor_per_major(&self) -> i64 {
        10_i64.pow(u32::from(self.decimal_places))
    }
}

impl Default for CurrencyUnit {
    fn default() -> Self {
        CurrencyUnit {
            code: DEFAULT_CURRENCY,
            decimal_places: 2,
        }
    }
}

impl fmt::Display for CurrencyUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}

impl Serialize for CurrencyUnit {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code)
    }
}

impl<'de> Deserialize<'de> for CurrencyUnit {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        CurrencyUnit::of(&code).map_err(serde::de::Error::custom)
    }
}

/// An amount of money in a single currency, held in minor units.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, AsExpression, FromSqlRow)]
#[diesel(sql_type = BigInt)]
pub struct Money {
    currency: CurrencyUnit,
    amount_minor: i64,
}

impl Money {
    /// Build from a major-unit amount such as `100.0` or `12.5`.
    pub fn of(currency: CurrencyUnit, amount: f64) -> Result<Self, MoneyError> {
        if !amount.is_finite() {
            return Err(MoneyError::NotFinite(amount));
        }
        let scaled = amount * currency.minor_per_major() as f64;
        let rounded = scaled.round();
        if (scaled - rounded).abs() > 1e-6 {
            return Err(MoneyError::InvalidScale {
                currency: currency.code,
                amount,
            });
        }
        // i64::MAX is not representable as f64; 2^63 is the first value past it.
        let limit = 2f64.powi(63);
        if rounded < -limit || rounded >= limit {
            return Err(MoneyError::OutOfRange {
                currency: currency.code,
                amount,
            });
        }
        Ok(Money {
            currency,
            amount_minor: rounded as i64,
        })
    }

    pub fn of_minor(currency: CurrencyUnit, amount_minor: i64) -> Self {
        Money {
            currency,
            amount_minor,
        }
    }

    pub fn of_major(currency: CurrencyUnit, amount_major: i64) -> Result<Self, MoneyError> {
        let amount_minor = amount_major
            .checked_mul(currency.minor_per_major())
            .ok_or(MoneyError::OutOfRange {
                currency: currency.code,
                amount: amount_major as f64,
            })?;
        Ok(Money {
            currency,
            amount_minor,
        })
    }

    pub fn currency(&self) -> CurrencyUnit {
        self.currency
    }

    pub fn amount_minor(&self) -> i64 {
        self.amount_minor
    }

    /// Whole major units, truncated toward zero.
    pub fn amount_major(&self) -> i64 {
        self.amount_minor / self.currency.minor_per_major()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let places = usize::from(self.currency.decimal_places);
        if places == 0 {
            return write!(f, "{} {}", self.currency, self.amount_minor);
        }
        let per_major = self.currency.minor_per_major();
        let sign = if self.amount_minor < 0 { "-" } else { "" };
        let abs = self.amount_minor.unsigned_abs();
        write!(
            f,
            "{} {}{}.{:0width$}",
            self.currency,
            sign,
            abs / per_major as u64,
            abs % per_major as u64,
            width = places
        )
    }
}

impl<DB> ToSql<BigInt, DB> for Money
where
    DB: Backend,
    i64: ToSql<BigInt, DB>,
{
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, DB>) -> serialize::Result {
        self.amount_minor.to_sql(out)
    }
}

impl<DB> FromSql<BigInt, DB> for Money
where
    DB: Backend,
    i64: FromSql<BigInt, DB>,
{
    fn from_sql(bytes: DB::RawValue<'_>) -> deserialize::Result<Self> {
        let amount_minor = i64::from_sql(bytes)?;
        Ok(Money::of_minor(CurrencyUnit::default(), amount_minor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn twd() -> CurrencyUnit {
        CurrencyUnit::of("TWD").unwrap()
    }

    #[test]
    fn test_currency_lookup() {
        assert_eq!(twd().code(), "TWD");
        assert_eq!(CurrencyUnit::of("jpy").unwrap().decimal_places(), 0);
        assert_eq!(
            CurrencyUnit::of("XYZ"),
            Err(MoneyError::UnknownCurrency("XYZ".to_string()))
        );
    }

    #[test]
    fn test_of_major_amount() {
        let price = Money::of(twd(), 100.0).unwrap();
        assert_eq!(price.amount_minor(), 10_000);
        assert_eq!(price.amount_major(), 100);

        let half = Money::of(twd(), 12.5).unwrap();
        assert_eq!(half.amount_minor(), 1_250);
    }

    #[test]
    fn test_rejects_excess_scale() {
        assert!(matches!(
            Money::of(twd(), 1.234),
            Err(MoneyError::InvalidScale { .. })
        ));
        let yen = CurrencyUnit::of("JPY").unwrap();
        assert!(Money::of(yen, 0.5).is_err());
        assert!(matches!(Money::of(twd(), f64::NAN), Err(MoneyError::NotFinite(_))));
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::of_minor(twd(), 15_000).to_string(), "TWD 150.00");
        assert_eq!(Money::of_minor(twd(), -5).to_string(), "TWD -0.05");
        let yen = CurrencyUnit::of("JPY").unwrap();
        assert_eq!(Money::of_major(yen, 300).unwrap().to_string(), "JPY 300");
    }

    #[test]
    fn test_rejects_amounts_beyond_bigint() {
        assert!(matches!(
            Money::of(twd(), 1e18),
            Err(MoneyError::OutOfRange { currency: "TWD", .. })
        ));
        assert!(matches!(
            Money::of(twd(), -1e18),
            Err(MoneyError::OutOfRange { .. })
        ));
        assert!(matches!(
            Money::of_major(twd(), i64::MAX / 10),
            Err(MoneyError::OutOfRange { .. })
        ));

        let largest = Money::of_major(twd(), i64::MAX / 100).unwrap();
        assert_eq!(largest.amount_major(), i64::MAX / 100);
    }
}
