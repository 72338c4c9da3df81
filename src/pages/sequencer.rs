// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Page sequencer: renumbering, diffing, insertion and deletion.
//!
//! Every operation takes a snapshot of the stored pages and returns the
//! descriptors storage has to apply. Inputs are never modified; a failed
//! validation rejects the whole batch.

use std::collections::HashMap;

use tracing::{debug, info};

use super::naming::assign_names;
use super::page::{
    sort_pages_by_order, ModifiedPage, ModifiedPageArgs, NewPage, NewPageArgs, Page, PageChanges,
    PageId,
};
use crate::error::{EngineError, Result};

/// Check caller-supplied counts and narrow them to the stored type
fn validate_counts(counts: i64) -> Result<u32> {
    if counts < 0 {
        return Err(EngineError::validation(format!(
            "Page counts must not be negative (got {})",
            counts
        )));
    }
    u32::try_from(counts)
        .map_err(|_| EngineError::validation(format!("Page counts {} is too large", counts)))
}

/// Rename pages in sequence order from their subset flags and give them
/// contiguous orders starting at 0.
fn rename<I>(pages: Vec<Page>, subset_flags: I) -> Vec<Page>
where
    I: IntoIterator<Item = bool>,
{
    let names = assign_names(subset_flags);
    pages
        .into_iter()
        .zip(names)
        .enumerate()
        .map(|(index, (mut page, name))| {
            page.name = name;
            page.order = index as i64;
            page
        })
        .collect()
}

/// Recompute every page's name and order.
///
/// `pages` must already be in sequence order; their existing order values
/// are replaced by 0, 1, 2... Whether a page is a subset is read from its
/// current name. Renumbering a correctly named list returns it unchanged.
pub fn renumber(pages: &[Page]) -> Vec<Page> {
    rename(pages.to_vec(), pages.iter().map(Page::is_subset))
}

/// Minimal patches that turn `before`'s names and orders into `after`'s.
///
/// Pages are matched by id. Only changed fields are set, pages with nothing
/// changed are left out, and pages missing from `before` are ignored.
pub fn diff(before: &[Page], after: &[Page]) -> Vec<ModifiedPage> {
    let previous: HashMap<PageId, &Page> = before.iter().map(|p| (p.id, p)).collect();

    after
        .iter()
        .filter_map(|page| {
            let old = previous.get(&page.id)?;
            let patch = ModifiedPage {
                name: (old.name != page.name).then(|| page.name.clone()),
                order: (old.order != page.order).then_some(page.order),
                ..ModifiedPage::new(page.id)
            };
            (!patch.is_empty()).then_some(patch)
        })
        .collect()
}

/// One position in the working sequence during insertion
enum Slot {
    Existing(Page),
    Pending { request: usize, page: Page, is_subset: bool },
}

impl Slot {
    fn is_subset(&self) -> bool {
        match self {
            Slot::Existing(page) => page.is_subset(),
            Slot::Pending { is_subset, .. } => *is_subset,
        }
    }

    fn into_page(self) -> Page {
        match self {
            Slot::Existing(page) | Slot::Pending { page, .. } => page,
        }
    }
}

/// Insert new pages and renumber everything.
///
/// Each request lands immediately after its `previous_page`, or at the start
/// of the show when it has none. All requests are resolved against the same
/// snapshot; requests sharing a `previous_page` keep their request order
/// right after that page. New pages are returned in sequence order, and
/// existing pages appear in `modified_pages` only if their name or order
/// changed.
pub fn create_pages(requests: &[NewPageArgs], existing: &[Page]) -> Result<PageChanges> {
    let mut before = existing.to_vec();
    sort_pages_by_order(&mut before);

    let mut counts = Vec::with_capacity(requests.len());
    for request in requests {
        counts.push(validate_counts(request.counts)?);
        if let Some(previous) = request.previous_page {
            if !before.iter().any(|p| p.id == previous) {
                return Err(EngineError::not_found(format!(
                    "Previous page {} does not exist",
                    previous
                )));
            }
        }
    }

    let pending = |request: usize| Slot::Pending {
        request,
        page: Page {
            notes: requests[request].notes.clone(),
            ..Page::new(PageId::default(), 0, "", counts[request])
        },
        is_subset: requests[request].is_subset,
    };
    let requests_after = |previous: Option<PageId>| {
        requests
            .iter()
            .enumerate()
            .filter(move |(_, r)| r.previous_page == previous)
            .map(|(index, _)| index)
    };

    let mut slots: Vec<Slot> = requests_after(None).map(pending).collect();
    for page in &before {
        slots.push(Slot::Existing(page.clone()));
        slots.extend(requests_after(Some(page.id)).map(pending));
    }

    let flags: Vec<bool> = slots.iter().map(Slot::is_subset).collect();
    let requests_by_position: Vec<Option<usize>> = slots
        .iter()
        .map(|slot| match slot {
            Slot::Pending { request, .. } => Some(*request),
            Slot::Existing(_) => None,
        })
        .collect();
    let renamed = rename(slots.into_iter().map(Slot::into_page).collect(), flags);

    let mut new_pages = Vec::with_capacity(requests.len());
    let mut existing_after = Vec::with_capacity(before.len());
    for (page, request) in renamed.into_iter().zip(requests_by_position) {
        match request {
            Some(request) => {
                debug!(request, name = %page.name, order = page.order, "New page placed");
                new_pages.push(NewPage {
                    name: page.name,
                    order: page.order,
                    counts: page.counts,
                    notes: page.notes,
                });
            }
            None => existing_after.push(page),
        }
    }

    let modified_pages = diff(&before, &existing_after);
    info!(
        new = new_pages.len(),
        modified = modified_pages.len(),
        "Created pages"
    );
    Ok(PageChanges {
        new_pages,
        modified_pages,
    })
}

/// Remove a page and renumber the rest.
///
/// The deleted page is not part of the returned patches; storage deletes it
/// separately.
pub fn delete_page(id: PageId, existing: &[Page]) -> Result<Vec<ModifiedPage>> {
    let mut before = existing.to_vec();
    sort_pages_by_order(&mut before);

    let position = before
        .iter()
        .position(|p| p.id == id)
        .ok_or_else(|| EngineError::not_found(format!("Page {} does not exist", id)))?;

    let mut remaining = before.clone();
    let removed = remaining.remove(position);
    debug!(id = %id, name = %removed.name, "Deleting page");

    let modified = diff(&before, &renumber(&remaining));
    info!(modified = modified.len(), "Deleted page {}", removed.name);
    Ok(modified)
}

/// Apply caller edits to counts and notes.
///
/// Returns patches holding only the fields that differ from the stored
/// page; edits that change nothing are dropped. Names and orders are not
/// affected by these edits.
pub fn update_pages(edits: &[ModifiedPageArgs], existing: &[Page]) -> Result<Vec<ModifiedPage>> {
    let by_id: HashMap<PageId, &Page> = existing.iter().map(|p| (p.id, p)).collect();

    let mut patches = Vec::with_capacity(edits.len());
    for edit in edits {
        let page = by_id
            .get(&edit.id)
            .ok_or_else(|| EngineError::not_found(format!("Page {} does not exist", edit.id)))?;
        let counts = edit.counts.map(validate_counts).transpose()?;

        let patch = ModifiedPage {
            counts: counts.filter(|&c| c != page.counts),
            notes: edit
                .notes
                .clone()
                .filter(|n| page.notes.as_deref() != Some(n.as_str())),
            ..ModifiedPage::new(edit.id)
        };
        if !patch.is_empty() {
            patches.push(patch);
        }
    }

    debug!(edits = edits.len(), patches = patches.len(), "Updated pages");
    Ok(patches)
}
