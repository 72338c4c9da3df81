// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! A single bar of music with its own tempo, meter and pulse.

use serde::Serialize;

use super::{BeatUnit, TimeSignature};
use crate::error::{EngineError, Result};

/// One measure of the show's music
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measure {
    /// Bar number (1-based)
    number: u32,
    /// Meter of this bar
    time_signature: TimeSignature,
    /// Beats per minute, counted in `beat_unit` pulses
    tempo: f64,
    /// Note value of one tempo pulse
    beat_unit: BeatUnit,
}

impl Measure {
    /// Create a measure; tempo must be positive and finite
    pub fn new(
        number: u32,
        time_signature: TimeSignature,
        tempo: f64,
        beat_unit: BeatUnit,
    ) -> Result<Self> {
        if !tempo.is_finite() || tempo <= 0.0 {
            return Err(EngineError::validation(format!(
                "Invalid tempo {} for measure {}: must be a positive number",
                tempo, number
            )));
        }
        Ok(Self {
            number,
            time_signature,
            tempo,
            beat_unit,
        })
    }

    /// Bar number
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Time signature
    pub fn time_signature(&self) -> TimeSignature {
        self.time_signature
    }

    /// Tempo in BPM
    pub fn tempo(&self) -> f64 {
        self.tempo
    }

    /// Beat unit
    pub fn beat_unit(&self) -> BeatUnit {
        self.beat_unit
    }

    /// Number of beats (counts) in this measure
    pub fn beats(&self) -> u32 {
        self.time_signature.numerator()
    }

    /// Seconds per beat at this measure's tempo
    pub fn beat_duration_seconds(&self) -> f64 {
        60.0 / self.tempo
    }

    /// Seconds for the whole measure
    pub fn duration_seconds(&self) -> f64 {
        self.beat_duration_seconds() * self.beats() as f64
    }
}
