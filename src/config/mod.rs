// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Show files.
//!
//! A show file is a snapshot of what storage holds for one show: its
//! measures and its pages. YAML (`.yaml`/`.yml`) and TOML (`.toml`) are
//! both accepted.

pub mod watcher;

pub use watcher::{validate_show, ShowEvent, ShowWatcher};

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::music::{BeatUnit, Measure, TimeSignature};
use crate::pages::{sort_pages_by_order, Page, PageId};

/// Root of a show file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShowFile {
    /// Show metadata and musical defaults
    pub show: ShowConfig,
    /// Measure runs, in bar order
    #[serde(default)]
    pub measures: Vec<MeasureConfig>,
    /// Stored pages (any order; sorted on use)
    #[serde(default)]
    pub pages: Vec<PageConfig>,
}

fn is_toml(path: &Path) -> bool {
    path.extension().map_or(false, |ext| ext == "toml")
}

impl ShowFile {
    /// Load a show from a YAML or TOML file, chosen by extension
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read show file: {:?}", path))?;
        let show = if is_toml(path) {
            Self::from_toml(&contents)?
        } else {
            Self::from_yaml(&contents)?
        };
        debug!(
            path = ?path,
            measures = show.measures.len(),
            pages = show.pages.len(),
            "Loaded show file"
        );
        Ok(show)
    }

    /// Parse a show from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse YAML show file")
    }

    /// Parse a show from a TOML string
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse TOML show file")
    }

    /// Serialize to a YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize show to YAML")
    }

    /// Serialize to a TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string(self).context("Failed to serialize show to TOML")
    }

    /// Save to a YAML or TOML file, chosen by extension
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let text = if is_toml(path) {
            self.to_toml()?
        } else {
            self.to_yaml()?
        };
        fs::write(path, text).with_context(|| format!("Failed to write show file: {:?}", path))
    }

    /// Expand the measure runs into numbered measures (bar 1 first)
    pub fn measures(&self) -> Result<Vec<Measure>> {
        let mut measures = Vec::new();
        for (run, config) in self.measures.iter().enumerate() {
            let time_signature = config.time_signature.unwrap_or(self.show.time_signature);
            let tempo = config.tempo.unwrap_or(self.show.tempo);
            let beat_unit = config.beat_unit.unwrap_or(self.show.beat_unit);
            for _ in 0..config.repeat {
                let number = measures.len() as u32 + 1;
                let measure = Measure::new(number, time_signature, tempo, beat_unit)
                    .with_context(|| format!("Invalid measure run {}", run + 1))?;
                measures.push(measure);
            }
        }
        Ok(measures)
    }

    /// Stored pages in sequence order
    pub fn pages(&self) -> Vec<Page> {
        let mut pages: Vec<Page> = self.pages.iter().map(PageConfig::to_page).collect();
        sort_pages_by_order(&mut pages);
        pages
    }
}

/// Show-level settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShowConfig {
    /// Show name
    pub name: String,
    /// Tempo for measure runs that do not give one
    #[serde(default = "default_tempo")]
    pub tempo: f64,
    /// Time signature for measure runs that do not give one
    #[serde(default)]
    pub time_signature: TimeSignature,
    /// Beat unit for measure runs that do not give one
    #[serde(default)]
    pub beat_unit: BeatUnit,
}

fn default_tempo() -> f64 {
    120.0
}
fn default_repeat() -> u32 {
    1
}

impl Default for ShowConfig {
    fn default() -> Self {
        Self {
            name: "Untitled".to_string(),
            tempo: default_tempo(),
            time_signature: TimeSignature::default(),
            beat_unit: BeatUnit::default(),
        }
    }
}

/// A run of identical consecutive measures
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MeasureConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_signature: Option<TimeSignature>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tempo: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beat_unit: Option<BeatUnit>,
    /// How many measures this run expands into
    #[serde(default = "default_repeat")]
    pub repeat: u32,
}

impl Default for MeasureConfig {
    fn default() -> Self {
        Self {
            time_signature: None,
            tempo: None,
            beat_unit: None,
            repeat: default_repeat(),
        }
    }
}

/// A stored page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PageConfig {
    pub id: PageId,
    pub order: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub counts: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl PageConfig {
    fn to_page(&self) -> Page {
        let page = Page::new(self.id, self.order, self.name.clone(), self.counts);
        match &self.notes {
            Some(notes) => page.with_notes(notes.clone()),
            None => page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHOW_YAML: &str = r#"
show:
  name: "Opener"
  tempo: 132

measures:
  - time_signature: "4/4"
    repeat: 2
  - time_signature: "3/4"
    tempo: 120
  - time_signature: "5/4"
    tempo: 120
    beat_unit: "1/4"

pages:
  - id: 12
    order: 5
    name: "2"
    counts: 6
  - id: 10
    order: 0
    name: "1"
    notes: "Opening set"
"#;

    #[test]
    fn test_parse_show() {
        let show = ShowFile::from_yaml(SHOW_YAML).unwrap();
        assert_eq!(show.show.name, "Opener");
        assert_eq!(show.show.tempo, 132.0);
        assert_eq!(show.show.time_signature, TimeSignature::COMMON);
        assert_eq!(show.measures.len(), 3);
        assert_eq!(show.pages.len(), 2);
    }

    #[test]
    fn test_expand_measures() {
        let show = ShowFile::from_yaml(SHOW_YAML).unwrap();
        let measures = show.measures().unwrap();
        let numbers: Vec<u32> = measures.iter().map(|m| m.number()).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4]);
        assert_eq!(measures[0].tempo(), 132.0);
        assert_eq!(measures[2].beats(), 3);
        assert_eq!(measures[2].tempo(), 120.0);
        assert_eq!(measures[3].beat_unit(), BeatUnit::Quarter);
    }

    #[test]
    fn test_pages_sorted_by_order() {
        let show = ShowFile::from_yaml(SHOW_YAML).unwrap();
        let pages = show.pages();
        assert_eq!(pages[0].id(), PageId(10));
        assert_eq!(pages[0].counts(), 0);
        assert_eq!(pages[0].notes(), Some("Opening set"));
        assert_eq!(pages[1].name(), "2");
    }

    #[test]
    fn test_rejects_bad_values() {
        let yaml = r#"
show:
  name: "Bad"
measures:
  - time_signature: "4/0"
"#;
        assert!(ShowFile::from_yaml(yaml).is_err());

        let yaml = r#"
show:
  name: "Bad"
measures:
  - tempo: -10
"#;
        let show = ShowFile::from_yaml(yaml).unwrap();
        assert!(show.measures().is_err());

        let yaml = r#"
show:
  name: "Bad"
measures:
  - beat_unit: "18446744073709551615/4"
"#;
        assert!(ShowFile::from_yaml(yaml).is_err());

        let yaml = r#"
show:
  name: "Bad"
pages:
  - id: 1
    order: 0
    counts: -4
"#;
        assert!(ShowFile::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_toml_show() {
        let text = r#"
[show]
name = "Closer"
tempo = 96.0
time_signature = "6/8"
beat_unit = "3/8"

[[measures]]
repeat = 3

[[pages]]
id = 1
order = 0
name = "1"
counts = 0
"#;
        let show = ShowFile::from_toml(text).unwrap();
        let measures = show.measures().unwrap();
        assert_eq!(measures.len(), 3);
        assert_eq!(measures[0].time_signature().to_string(), "6/8");
        assert_eq!(measures[0].beat_unit(), BeatUnit::DottedQuarter);
        assert_eq!(show.pages().len(), 1);
    }

    #[test]
    fn test_round_trip_through_files() {
        let original = ShowFile::from_yaml(SHOW_YAML).unwrap();
        let dir = tempfile::tempdir().unwrap();

        for file in ["show.yaml", "show.toml"] {
            let path = dir.path().join(file);
            original.save(&path).unwrap();
            let loaded = ShowFile::load(&path).unwrap();
            assert_eq!(loaded.show.name, original.show.name);
            assert_eq!(loaded.measures().unwrap(), original.measures().unwrap());
            assert_eq!(loaded.pages(), original.pages());
        }
    }

    #[test]
    fn test_default_values() {
        let show = ShowFile::from_yaml("show:\n  name: \"Minimal\"\n").unwrap();
        assert_eq!(show.show.tempo, 120.0);
        assert_eq!(show.show.beat_unit, BeatUnit::Quarter);
        assert!(show.measures().unwrap().is_empty());
        assert!(show.pages().is_empty());
        assert_eq!(MeasureConfig::default().repeat, 1);
        assert_eq!(ShowConfig::default().name, "Untitled");
    }
}
