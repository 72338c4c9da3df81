// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Error types for the sequencing and alignment engine.

use thiserror::Error;

/// Errors raised by the page sequencer and the measure aligner
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Input rejected before any work was done (negative counts, bad strings)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A page id or previous-page reference is not in the supplied collection
    #[error("Not found: {0}")]
    NotFound(String),

    /// The measures ran out before every page could be aligned
    #[error(
        "Cannot align page {page_name:?} (index {page_index}): only {beats_available} beat(s) of music remain"
    )]
    DegenerateAlignment {
        /// Index of the first page that could not be aligned
        page_index: usize,
        /// Name of that page
        page_name: String,
        /// Beats left in the measure list when the page started
        beats_available: u32,
    },
}

impl EngineError {
    /// Shorthand for a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        EngineError::Validation(message.into())
    }

    /// Shorthand for a not-found error
    pub fn not_found(message: impl Into<String>) -> Self {
        EngineError::NotFound(message.into())
    }
}

/// Result alias used throughout the engine
pub type Result<T> = std::result::Result<T, EngineError>;
