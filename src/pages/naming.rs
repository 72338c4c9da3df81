// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Page naming rules.
//!
//! Primary pages are numbered "1", "2", "3"... in sequence order. Each
//! subset page takes its primary's number plus a letter suffix: "A".."Z",
//! then "AA", "AB"... so runs of any length never collide.

/// Letter suffix for the `index`-th subset page of a run (1 = "A").
///
/// Bijective base-26: 26 is "Z", 27 is "AA", 702 is "ZZ", 703 is "AAA".
/// Index 0 has no suffix.
pub fn subset_suffix(index: u32) -> String {
    let mut letters = Vec::new();
    let mut n = index;
    while n > 0 {
        n -= 1;
        letters.push(b'A' + (n % 26) as u8);
        n /= 26;
    }
    letters.iter().rev().map(|&b| b as char).collect()
}

/// Full name of a page: primary number plus optional subset suffix
pub fn page_name(primary: u32, subset_index: u32) -> String {
    format!("{}{}", primary, subset_suffix(subset_index))
}

/// Accumulator carried across the naming fold
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct NamingState {
    primary: u32,
    subset_index: u32,
    in_run: bool,
}

impl NamingState {
    /// Advance past one page and return the new state
    fn step(self, is_subset: bool) -> Self {
        if is_subset && self.in_run {
            Self {
                subset_index: self.subset_index + 1,
                ..self
            }
        } else {
            // A subset with nothing before it still opens a run.
            Self {
                primary: self.primary + 1,
                subset_index: 0,
                in_run: true,
            }
        }
    }
}

/// Names for a sequence of pages, given each page's subset flag in order
pub fn assign_names<I>(subset_flags: I) -> Vec<String>
where
    I: IntoIterator<Item = bool>,
{
    subset_flags
        .into_iter()
        .scan(NamingState::default(), |state, is_subset| {
            *state = state.step(is_subset);
            Some(page_name(state.primary, state.subset_index))
        })
        .collect()
}
