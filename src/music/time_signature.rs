// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Time signatures (e.g., 4/4, 3/4, 6/8)

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Numerator/denominator pair; both are always positive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeSignature {
    numerator: u32,
    denominator: u32,
}

impl TimeSignature {
    /// Common time (4/4)
    pub const COMMON: Self = Self {
        numerator: 4,
        denominator: 4,
    };

    /// Create a time signature, rejecting zero in either position
    pub fn new(numerator: u32, denominator: u32) -> Result<Self> {
        if numerator == 0 || denominator == 0 {
            return Err(EngineError::validation(format!(
                "Invalid time signature {}/{}: numerator and denominator must be positive",
                numerator, denominator
            )));
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    /// Beats per measure
    pub fn numerator(&self) -> u32 {
        self.numerator
    }

    /// Note value of one beat (4 = quarter)
    pub fn denominator(&self) -> u32 {
        self.denominator
    }
}

impl Default for TimeSignature {
    fn default() -> Self {
        Self::COMMON
    }
}

impl fmt::Display for TimeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

impl FromStr for TimeSignature {
    type Err = EngineError;

    /// Parse "n/d"
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || EngineError::validation(format!("Invalid time signature string: {:?}", s));

        let (num, den) = s.trim().split_once('/').ok_or_else(invalid)?;
        let num = num.trim().parse::<u32>().map_err(|_| invalid())?;
        let den = den.trim().parse::<u32>().map_err(|_| invalid())?;
        TimeSignature::new(num, den)
    }
}

impl TryFrom<String> for TimeSignature {
    type Error = EngineError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<TimeSignature> for String {
    fn from(ts: TimeSignature) -> Self {
        ts.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let ts: TimeSignature = "6/8".parse().unwrap();
        assert_eq!(ts.numerator(), 6);
        assert_eq!(ts.denominator(), 8);
        assert_eq!(ts.to_string(), "6/8");

        let ts: TimeSignature = " 5 / 4 ".parse().unwrap();
        assert_eq!(ts, TimeSignature::new(5, 4).unwrap());
    }

    #[test]
    fn test_rejects_malformed() {
        for bad in ["", "4", "4/", "/4", "0/4", "4/0", "a/b", "-3/4", "4/4/4"] {
            assert!(
                matches!(bad.parse::<TimeSignature>(), Err(EngineError::Validation(_))),
                "{:?}",
                bad
            );
        }
    }

    #[test]
    fn test_default_is_common_time() {
        assert_eq!(TimeSignature::default().to_string(), "4/4");
    }
}
