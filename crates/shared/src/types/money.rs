//! Money types with decimal precision.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts wrap `rust_decimal::Decimal` for arbitrary precision.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::lenient;

/// ISO 4217 currency codes the operator books in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Central African CFA franc (fixed-point, no minor unit).
    #[default]
    Xaf,
    /// Euro
    Eur,
    /// US Dollar
    Usd,
}

impl Currency {
    /// Number of digits after the decimal point in the currency's minor unit.
    #[must_use]
    pub const fn minor_units(self) -> u32 {
        match self {
            Self::Xaf => 0,
            Self::Eur | Self::Usd => 2,
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Xaf => write!(f, "XAF"),
            Self::Eur => write!(f, "EUR"),
            Self::Usd => write!(f, "USD"),
        }
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "XAF" | "FCFA" => Ok(Self::Xaf),
            "EUR" => Ok(Self::Eur),
            "USD" => Ok(Self::Usd),
            _ => Err(format!("Unknown currency: {s}")),
        }
    }
}

/// An amount recorded in two currencies at once.
///
/// Bookings and expenses carry a primary-currency amount alongside the
/// secondary fixed-point amount that reports are computed in.
///
/// Deserialization never fails: a `{primary, secondary}` object reads each
/// leg leniently, a bare number or numeric string is the secondary amount,
/// and anything else is zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DualAmount {
    /// Amount in the primary currency.
    pub primary: Decimal,
    /// Amount in the secondary (reporting) currency.
    pub secondary: Decimal,
}

impl<'de> Deserialize<'de> for DualAmount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let leg = |value: Option<&Value>| {
            value
                .and_then(lenient::decimal_from_value)
                .unwrap_or_default()
        };
        Ok(match Option::<Value>::deserialize(deserializer)? {
            Some(Value::Object(legs)) => {
                Self::new(leg(legs.get("primary")), leg(legs.get("secondary")))
            }
            other => Self::secondary(leg(other.as_ref())),
        })
    }
}

impl DualAmount {
    /// Creates a new dual amount.
    #[must_use]
    pub const fn new(primary: Decimal, secondary: Decimal) -> Self {
        Self { primary, secondary }
    }

    /// Creates an amount known only in the secondary currency.
    #[must_use]
    pub const fn secondary(secondary: Decimal) -> Self {
        Self {
            primary: Decimal::ZERO,
            secondary,
        }
    }
}
