// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Beat units: the note value that one beat represents.
//!
//! A beat unit is a fraction of a whole note. Tempo is always expressed
//! in pulses of a measure's beat unit.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Note value used as the tempo pulse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BeatUnit {
    Whole,
    Half,
    DottedHalf,
    Quarter,
    DottedQuarter,
    Eighth,
    DottedEighth,
    Sixteenth,
    DottedSixteenth,
    ThirtySecond,
    SixtyFourth,
}

impl BeatUnit {
    /// Every supported beat unit, longest first (dotted values follow their base)
    pub const ALL: [BeatUnit; 11] = [
        BeatUnit::Whole,
        BeatUnit::Half,
        BeatUnit::DottedHalf,
        BeatUnit::Quarter,
        BeatUnit::DottedQuarter,
        BeatUnit::Eighth,
        BeatUnit::DottedEighth,
        BeatUnit::Sixteenth,
        BeatUnit::DottedSixteenth,
        BeatUnit::ThirtySecond,
        BeatUnit::SixtyFourth,
    ];

    /// Numerator and denominator of the fraction of a whole note
    pub fn fraction(self) -> (u32, u32) {
        match self {
            BeatUnit::Whole => (1, 1),
            BeatUnit::Half => (1, 2),
            BeatUnit::DottedHalf => (3, 4),
            BeatUnit::Quarter => (1, 4),
            BeatUnit::DottedQuarter => (3, 8),
            BeatUnit::Eighth => (1, 8),
            BeatUnit::DottedEighth => (3, 16),
            BeatUnit::Sixteenth => (1, 16),
            BeatUnit::DottedSixteenth => (3, 32),
            BeatUnit::ThirtySecond => (1, 32),
            BeatUnit::SixtyFourth => (1, 64),
        }
    }

    /// Fraction of a whole note (0.25 for a quarter)
    pub fn value(self) -> f64 {
        let (num, den) = self.fraction();
        num as f64 / den as f64
    }

    /// Canonical display name
    pub fn name(self) -> &'static str {
        match self {
            BeatUnit::Whole => "WHOLE",
            BeatUnit::Half => "HALF",
            BeatUnit::DottedHalf => "DOTTED HALF",
            BeatUnit::Quarter => "QUARTER",
            BeatUnit::DottedQuarter => "DOTTED QUARTER",
            BeatUnit::Eighth => "EIGHTH",
            BeatUnit::DottedEighth => "DOTTED EIGHTH",
            BeatUnit::Sixteenth => "SIXTEENTH",
            BeatUnit::DottedSixteenth => "DOTTED SIXTEENTH",
            BeatUnit::ThirtySecond => "THIRTY-SECOND",
            BeatUnit::SixtyFourth => "64TH",
        }
    }

    /// Whether this is a dotted value
    pub fn is_dotted(self) -> bool {
        self.fraction().0 == 3
    }

    /// Fraction string, e.g. "1/2" for a half, "3/8" for a dotted quarter
    pub fn to_fraction_string(self) -> String {
        let (num, den) = self.fraction();
        format!("{}/{}", num, den)
    }

    /// Look up a beat unit by display name.
    ///
    /// Case-insensitive; underscores and hyphens are treated as spaces so
    /// "DOTTED_EIGHTH" and "thirty second" are accepted as well.
    pub fn from_name(name: &str) -> Result<Self> {
        let normalized = name.trim().to_uppercase().replace(['_', '-'], " ");
        match normalized.as_str() {
            "WHOLE" => Ok(BeatUnit::Whole),
            "HALF" => Ok(BeatUnit::Half),
            "DOTTED HALF" => Ok(BeatUnit::DottedHalf),
            "QUARTER" => Ok(BeatUnit::Quarter),
            "DOTTED QUARTER" => Ok(BeatUnit::DottedQuarter),
            "EIGHTH" => Ok(BeatUnit::Eighth),
            "DOTTED EIGHTH" => Ok(BeatUnit::DottedEighth),
            "SIXTEENTH" => Ok(BeatUnit::Sixteenth),
            "DOTTED SIXTEENTH" => Ok(BeatUnit::DottedSixteenth),
            "THIRTY SECOND" => Ok(BeatUnit::ThirtySecond),
            "64TH" | "SIXTY FOURTH" => Ok(BeatUnit::SixtyFourth),
            _ => Err(EngineError::validation(format!(
                "Invalid beat unit name: {:?}",
                name
            ))),
        }
    }

    /// Look up a beat unit by its fraction ("1/4", "3/8") or a bare integer ("1").
    ///
    /// Fractions are compared by value, so "2/8" resolves to a quarter.
    pub fn from_fraction_string(s: &str) -> Result<Self> {
        let invalid = || EngineError::validation(format!("Invalid beat unit string: {:?}", s));

        let trimmed = s.trim();
        let (num, den) = match trimmed.split_once('/') {
            Some((n, d)) => (
                n.trim().parse::<u32>().map_err(|_| invalid())?,
                d.trim().parse::<u32>().map_err(|_| invalid())?,
            ),
            None => (trimmed.parse::<u32>().map_err(|_| invalid())?, 1),
        };
        if den == 0 {
            return Err(invalid());
        }

        BeatUnit::ALL
            .iter()
            .copied()
            .find(|unit| {
                let (n, d) = unit.fraction();
                num as u64 * d as u64 == den as u64 * n as u64
            })
            .ok_or_else(invalid)
    }
}

impl Default for BeatUnit {
    fn default() -> Self {
        BeatUnit::Quarter
    }
}

impl fmt::Display for BeatUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for BeatUnit {
    type Err = EngineError;

    /// Accepts either a fraction string or a display name
    fn from_str(s: &str) -> Result<Self> {
        BeatUnit::from_fraction_string(s).or_else(|_| BeatUnit::from_name(s))
    }
}

impl TryFrom<String> for BeatUnit {
    type Error = EngineError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<BeatUnit> for String {
    fn from(unit: BeatUnit) -> Self {
        unit.to_fraction_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_fraction_string_round_trip() {
        for unit in BeatUnit::ALL {
            let s = unit.to_fraction_string();
            assert_eq!(BeatUnit::from_fraction_string(&s).unwrap(), unit, "{}", s);
        }
    }

    #[test]
    fn test_name_round_trip() {
        for unit in BeatUnit::ALL {
            assert_eq!(BeatUnit::from_name(unit.name()).unwrap(), unit);
        }
    }

    #[test]
    fn test_units_are_unique() {
        let names: HashSet<_> = BeatUnit::ALL.iter().map(|u| u.name()).collect();
        let fractions: HashSet<_> = BeatUnit::ALL.iter().map(|u| u.to_fraction_string()).collect();
        assert_eq!(names.len(), 11);
        assert_eq!(fractions.len(), 11);
    }

    #[test]
    fn test_values() {
        assert_eq!(BeatUnit::Quarter.value(), 0.25);
        assert_eq!(BeatUnit::DottedQuarter.value(), 0.375);
        assert_eq!(BeatUnit::SixtyFourth.value(), 1.0 / 64.0);
        assert!(BeatUnit::DottedHalf.is_dotted());
        assert!(!BeatUnit::Half.is_dotted());
    }

    #[test]
    fn test_lenient_parsing() {
        assert_eq!(BeatUnit::from_fraction_string("1").unwrap(), BeatUnit::Whole);
        assert_eq!(BeatUnit::from_fraction_string(" 2/8 ").unwrap(), BeatUnit::Quarter);
        assert_eq!(BeatUnit::from_name("dotted_eighth").unwrap(), BeatUnit::DottedEighth);
        assert_eq!(BeatUnit::from_name("THIRTY_SECOND").unwrap(), BeatUnit::ThirtySecond);
        assert_eq!("3/16".parse::<BeatUnit>().unwrap(), BeatUnit::DottedEighth);
        assert_eq!("half".parse::<BeatUnit>().unwrap(), BeatUnit::Half);
    }

    #[test]
    fn test_invalid_input() {
        let bad_inputs = [
            "",
            "1/0",
            "1/3",
            "five",
            "3/4/4",
            "-1/4",
            "18446744073709551615/4",
            "4/18446744073709551615",
        ];
        for bad in bad_inputs {
            let err = BeatUnit::from_fraction_string(bad).unwrap_err();
            assert!(matches!(err, EngineError::Validation(_)), "{:?}", bad);
        }
        assert!(matches!(
            BeatUnit::from_name("TRIPLET"),
            Err(EngineError::Validation(_))
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(BeatUnit::DottedQuarter.to_string(), "DOTTED QUARTER");
        assert_eq!(BeatUnit::default(), BeatUnit::Quarter);
    }
}
