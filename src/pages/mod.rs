// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Page sequencing.
//!
//! This module provides:
//! - Pages: formations with their counts, names and timing fields
//! - Naming: primary numbers and subset letter suffixes
//! - Sequencer: renumbering and minimal change sets for storage

pub mod naming;
pub mod page;
pub mod sequencer;

pub use naming::{assign_names, page_name, subset_suffix};
pub use page::{
    first_page, last_page, sort_pages_by_order, ModifiedPage, ModifiedPageArgs, NewPage,
    NewPageArgs, Page, PageChanges, PageId,
};
pub use sequencer::{create_pages, delete_page, diff, renumber, update_pages};
