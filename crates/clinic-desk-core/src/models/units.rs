//! Mass units used by the dosage calculator.
//!
//! Conversions go through a milligram base. Each unit carries a power-of-ten
//! exponent relative to mg, so sub-milligram units divide and larger units
//! multiply, keeping conversions exact for the common decimal cases.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Mass unit for a dose or a liquid concentration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum DoseUnit {
    Mcg,
    #[default]
    Mg,
    G,
}

/// Unit table: (unit, exponent of ten relative to mg).
const MG_EXPONENTS: [(DoseUnit, i32); 3] = [
    (DoseUnit::Mcg, -3),
    (DoseUnit::Mg, 0),
    (DoseUnit::G, 3),
];

/// Spellings accepted when parsing a unit from form input.
const UNIT_SPELLINGS: [(&str, DoseUnit); 11] = [
    ("mcg", DoseUnit::Mcg),
    ("µg", DoseUnit::Mcg),
    ("ug", DoseUnit::Mcg),
    ("microgram", DoseUnit::Mcg),
    ("micrograms", DoseUnit::Mcg),
    ("mg", DoseUnit::Mg),
    ("milligram", DoseUnit::Mg),
    ("milligrams", DoseUnit::Mg),
    ("g", DoseUnit::G),
    ("gram", DoseUnit::G),
    ("grams", DoseUnit::G),
];

/// Unit parse failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown dose unit: {0}")]
pub struct UnknownUnit(pub String);

impl DoseUnit {
    /// All units in the order the calculator offers them.
    pub const ALL: [DoseUnit; 3] = [DoseUnit::Mcg, DoseUnit::Mg, DoseUnit::G];

    /// Canonical symbol.
    pub fn symbol(self) -> &'static str {
        match self {
            DoseUnit::Mcg => "mcg",
            DoseUnit::Mg => "mg",
            DoseUnit::G => "g",
        }
    }

    fn mg_exponent(self) -> i32 {
        MG_EXPONENTS
            .iter()
            .find(|(unit, _)| *unit == self)
            .map(|(_, exp)| *exp)
            .unwrap_or(0)
    }

    /// Convert an amount in this unit to milligrams.
    pub fn to_mg(self, amount: f64) -> f64 {
        let exp = self.mg_exponent();
        let scale = 10f64.powi(exp.abs());
        if exp < 0 {
            amount / scale
        } else {
            amount * scale
        }
    }
}

impl fmt::Display for DoseUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for DoseUnit {
    type Err = UnknownUnit;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        UNIT_SPELLINGS
            .iter()
            .find(|(spelling, _)| *spelling == lower)
            .map(|(_, unit)| *unit)
            .ok_or_else(|| UnknownUnit(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_mg() {
        assert_eq!(DoseUnit::Mcg.to_mg(500.0), 0.5);
        assert_eq!(DoseUnit::Mg.to_mg(42.5), 42.5);
        assert_eq!(DoseUnit::G.to_mg(2.0), 2000.0);
        assert_eq!(DoseUnit::Mcg.to_mg(0.0), 0.0);
    }

    #[test]
    fn test_every_unit_has_exponent() {
        for unit in DoseUnit::ALL {
            assert!(MG_EXPONENTS.iter().any(|(u, _)| *u == unit));
        }
    }

    #[test]
    fn test_parse() {
        assert_eq!("mcg".parse::<DoseUnit>(), Ok(DoseUnit::Mcg));
        assert_eq!("µg".parse::<DoseUnit>(), Ok(DoseUnit::Mcg));
        assert_eq!(" MG ".parse::<DoseUnit>(), Ok(DoseUnit::Mg));
        assert_eq!("Grams".parse::<DoseUnit>(), Ok(DoseUnit::G));

        let err = "ml".parse::<DoseUnit>().unwrap_err();
        assert_eq!(err, UnknownUnit("ml".into()));
    }

    #[test]
    fn test_display_round_trips_symbol() {
        for unit in DoseUnit::ALL {
            assert_eq!(unit.to_string().parse::<DoseUnit>(), Ok(unit));
        }
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&DoseUnit::Mcg).unwrap();
        assert_eq!(json, "\"mcg\"");
        let unit: DoseUnit = serde_json::from_str("\"g\"").unwrap();
        assert_eq!(unit, DoseUnit::G);
    }
}
