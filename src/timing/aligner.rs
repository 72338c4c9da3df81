// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Page-to-music alignment.
//!
//! Walks the pages' counts beat by beat through the measure list so that
//! tempo and meter changes inside a page are honored. Each aligned page
//! gets its duration, its timestamp from the start of the show, the
//! measures it touches and the beat it starts on.

use tracing::{debug, warn};

use crate::error::{EngineError, Result};
use crate::music::Measure;
use crate::pages::Page;

/// Position in the music: measure index and 1-based beat within it,
/// plus the beats still ahead of it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BeatCursor {
    measure: usize,
    beat: u32,
    beats_left: u64,
}

impl BeatCursor {
    fn start(measures: &[Measure]) -> Self {
        Self {
            measure: 0,
            beat: 1,
            beats_left: measures.iter().map(|m| m.beats() as u64).sum(),
        }
    }

    /// Beats left from the cursor to the end of the last measure
    fn beats_remaining(&self) -> u64 {
        self.beats_left
    }

    /// Step one beat forward, wrapping into the next measure
    fn advance(&mut self, measures: &[Measure]) {
        self.beats_left = self.beats_left.saturating_sub(1);
        self.beat += 1;
        if self.beat > measures[self.measure].beats() {
            self.measure += 1;
            self.beat = 1;
        }
    }
}

/// Result of aligning pages with measures
#[derive(Debug, Clone, PartialEq)]
pub struct Alignment {
    /// Every input page, in input order
    pub pages: Vec<Page>,
    /// Index of the first page the measures could not cover, if any.
    /// That page and every later one keep the timing fields they had.
    pub unaligned_from: Option<usize>,
    /// Beats that were left when the first unaligned page started
    beats_available: u32,
}

impl Alignment {
    /// True when every page was aligned
    pub fn is_complete(&self) -> bool {
        self.unaligned_from.is_none()
    }

    /// The pages that received timing
    pub fn aligned_pages(&self) -> &[Page] {
        let end = self.unaligned_from.unwrap_or(self.pages.len());
        &self.pages[..end]
    }

    /// Length of the aligned part of the show in seconds
    pub fn total_duration(&self) -> f64 {
        self.aligned_pages()
            .iter()
            .filter_map(|p| p.duration())
            .sum()
    }

    /// The `DegenerateAlignment` error for an incomplete alignment
    pub fn degenerate_error(&self) -> Option<EngineError> {
        self.unaligned_from
            .map(|page_index| EngineError::DegenerateAlignment {
                page_index,
                page_name: self.pages[page_index].name().to_string(),
                beats_available: self.beats_available,
            })
    }

    /// Turn an incomplete alignment into a `DegenerateAlignment` error
    pub fn into_result(self) -> Result<Vec<Page>> {
        match self.degenerate_error() {
            None => Ok(self.pages),
            Some(err) => Err(err),
        }
    }
}

/// Align pages (in sequence order) with measures (in bar order).
///
/// The first page starts on beat 1 of the first measure. A page with zero
/// counts has zero duration, covers no measures and leaves the cursor where
/// it is. Counts are whole beats and every measure holds a whole number of
/// beats, so a page always ends on a beat boundary.
///
/// When the remaining music cannot cover a page, that page and all pages
/// after it are returned with their previous timing fields and
/// `unaligned_from` points at the first of them.
pub fn align_with_measures(pages: &[Page], measures: &[Measure]) -> Alignment {
    let mut aligned = pages.to_vec();
    let mut cursor = BeatCursor::start(measures);
    let mut timestamp = 0.0;

    for (index, page) in aligned.iter_mut().enumerate() {
        let remaining = cursor.beats_remaining();
        if cursor.measure >= measures.len() || page.counts as u64 > remaining {
            warn!(
                page = %page.name,
                counts = page.counts,
                remaining,
                "Measures exhausted; {} page(s) left unaligned",
                pages.len() - index
            );
            return Alignment {
                pages: aligned,
                unaligned_from: Some(index),
                beats_available: remaining.min(u32::MAX as u64) as u32,
            };
        }

        let start_beat = cursor.beat;
        let mut duration = 0.0;
        let mut covered: Vec<usize> = Vec::new();
        for _ in 0..page.counts {
            if covered.last() != Some(&cursor.measure) {
                covered.push(cursor.measure);
            }
            duration += measures[cursor.measure].beat_duration_seconds();
            cursor.advance(measures);
        }

        page.duration = Some(duration);
        page.timestamp = Some(timestamp);
        page.measures = covered.iter().map(|&i| measures[i].clone()).collect();
        page.measure_beat_to_start_on = Some(start_beat);
        debug!(
            page = %page.name,
            duration,
            timestamp,
            start_beat,
            measures = ?page.measure_numbers(),
            "Aligned page"
        );

        timestamp += duration;
    }

    Alignment {
        pages: aligned,
        unaligned_from: None,
        beats_available: 0,
    }
}

/// Align and fail with `DegenerateAlignment` if any page is left over
pub fn try_align_with_measures(pages: &[Page], measures: &[Measure]) -> Result<Vec<Page>> {
    align_with_measures(pages, measures).into_result()
}
