// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Musical value types for the show's soundtrack.
//!
//! This module provides beat units, time signatures and measures,
//! the immutable inputs to page alignment.

pub mod beat_unit;
pub mod measure;
pub mod time_signature;

pub use beat_unit::BeatUnit;
pub use measure::Measure;
pub use time_signature::TimeSignature;
