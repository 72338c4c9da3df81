// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Pages and the descriptors exchanged with the persistence layer.
//!
//! A page is one choreographic formation. Its name and order are owned by
//! the sequencer; its timing fields are filled in by the aligner.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::music::Measure;

/// Stable identity of a stored page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(pub u64);

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One formation in the show
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub(crate) id: PageId,
    pub(crate) order: i64,
    pub(crate) name: String,
    pub(crate) counts: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) timestamp: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) measures: Vec<Measure>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) measure_beat_to_start_on: Option<u32>,
}

impl Page {
    /// Create a page as it was fetched from storage
    pub fn new(id: PageId, order: i64, name: impl Into<String>, counts: u32) -> Self {
        Self {
            id,
            order,
            name: name.into(),
            counts,
            notes: None,
            duration: None,
            timestamp: None,
            measures: Vec::new(),
            measure_beat_to_start_on: None,
        }
    }

    /// Builder: set notes
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn id(&self) -> PageId {
        self.id
    }

    pub fn order(&self) -> i64 {
        self.order
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn counts(&self) -> u32 {
        self.counts
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Seconds this page lasts (set by alignment)
    pub fn duration(&self) -> Option<f64> {
        self.duration
    }

    /// Seconds from the start of the show (set by alignment)
    pub fn timestamp(&self) -> Option<f64> {
        self.timestamp
    }

    /// Measures this page covers, in order (set by alignment)
    pub fn measures(&self) -> &[Measure] {
        &self.measures
    }

    /// 1-based beat of the first covered measure on which the page starts
    pub fn measure_beat_to_start_on(&self) -> Option<u32> {
        self.measure_beat_to_start_on
    }

    /// Bar numbers of the covered measures
    pub fn measure_numbers(&self) -> Vec<u32> {
        self.measures.iter().map(|m| m.number()).collect()
    }

    /// Whether the stored name marks this as a subset page ("2A", "12BC")
    pub fn is_subset(&self) -> bool {
        self.name
            .chars()
            .last()
            .map_or(false, |c| c.is_ascii_alphabetic())
    }

    /// The page that follows this one by order, if any
    pub fn next_page<'a>(&self, pages: &'a [Page]) -> Option<&'a Page> {
        pages
            .iter()
            .filter(|p| p.order > self.order)
            .min_by_key(|p| p.order)
    }

    /// The page that precedes this one by order, if any
    pub fn previous_page<'a>(&self, pages: &'a [Page]) -> Option<&'a Page> {
        pages
            .iter()
            .filter(|p| p.order < self.order)
            .max_by_key(|p| p.order)
    }
}

/// Sort pages in place by their order key
pub fn sort_pages_by_order(pages: &mut [Page]) {
    pages.sort_by_key(|p| p.order);
}

/// The page with the lowest order
pub fn first_page(pages: &[Page]) -> Option<&Page> {
    pages.iter().min_by_key(|p| p.order)
}

/// The page with the highest order
pub fn last_page(pages: &[Page]) -> Option<&Page> {
    pages.iter().max_by_key(|p| p.order)
}

/// A request to create a page
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NewPageArgs {
    /// Page to insert after (None = insert at the start)
    #[serde(default)]
    pub previous_page: Option<PageId>,
    /// Whether the page refines the preceding primary set
    #[serde(default)]
    pub is_subset: bool,
    /// Counts the page spans; negative values are rejected
    pub counts: i64,
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewPageArgs {
    /// A primary page request
    pub fn primary(counts: i64) -> Self {
        Self {
            counts,
            ..Default::default()
        }
    }

    /// A subset page request
    pub fn subset(counts: i64) -> Self {
        Self {
            counts,
            is_subset: true,
            ..Default::default()
        }
    }

    /// Builder: insert after the given page
    pub fn after(mut self, previous: PageId) -> Self {
        self.previous_page = Some(previous);
        self
    }

    /// Builder: set notes
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Fields of a page to be created in storage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPage {
    pub name: String,
    pub order: i64,
    pub counts: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Patch for a stored page; only changed fields are present
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ModifiedPage {
    pub id: PageId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counts: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ModifiedPage {
    /// An empty patch for the given page
    pub fn new(id: PageId) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    /// True when the patch would change nothing
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.order.is_none() && self.counts.is_none() && self.notes.is_none()
    }
}

/// A caller edit of a page's counts and/or notes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifiedPageArgs {
    pub id: PageId,
    #[serde(default)]
    pub counts: Option<i64>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Everything storage must apply after a mutation
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PageChanges {
    pub new_pages: Vec<NewPage>,
    pub modified_pages: Vec<ModifiedPage>,
}
