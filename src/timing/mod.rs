// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Timing module.
//!
//! This module maps page counts onto the show's measures to produce
//! wall-clock durations and timestamps.

pub mod aligner;

pub use aligner::{align_with_measures, try_align_with_measures, Alignment};
