// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Drill page sequencing and music-time alignment.
//!
//! - `pages`: naming, renumbering and change sets for show pages
//! - `timing`: mapping page counts onto measures
//! - `music`: beat units, time signatures and measures
//! - `config`: show files on disk and a reload watcher

pub mod config;
pub mod error;
pub mod music;
pub mod pages;
pub mod timing;

pub use error::{EngineError, Result};
pub use music::{BeatUnit, Measure, TimeSignature};
pub use pages::{
    create_pages, delete_page, diff, renumber, update_pages, ModifiedPage, ModifiedPageArgs,
    NewPage, NewPageArgs, Page, PageChanges, PageId,
};
pub use timing::{align_with_measures, try_align_with_measures, Alignment};
