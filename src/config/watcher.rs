// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! File watcher for show files.
//!
//! Storage is the source of truth; after another process rewrites a show
//! file the watcher re-reads it so the caller can re-run alignment on a
//! fresh snapshot.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tracing::{debug, warn};

use super::ShowFile;

/// How often the debounce thread checks for settled edits
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Events emitted by the show watcher
#[derive(Debug, Clone)]
pub enum ShowEvent {
    /// Show file changed and holds a valid show
    Reloaded(Box<ShowFile>),
    /// Show file changed but could not be read or holds invalid values
    Error(String),
}

fn is_show_file(path: &Path) -> bool {
    path.extension()
        .map_or(false, |ext| ext == "yaml" || ext == "yml" || ext == "toml")
}

fn reload(path: &Path) -> ShowEvent {
    match validate_show(path) {
        Ok(show) => {
            debug!(path = ?path, "Show file reloaded");
            ShowEvent::Reloaded(Box::new(show))
        }
        Err(e) => {
            warn!(path = ?path, error = %e, "Show file failed to reload");
            ShowEvent::Error(format!("Failed to load {:?}: {:#}", path, e))
        }
    }
}

/// Collects modified show files until edits have been quiet for a while.
///
/// Editors often write a file in several steps; only the settled state is
/// worth re-reading.
#[derive(Debug)]
struct Debouncer {
    quiet_period: Duration,
    pending: Vec<PathBuf>,
    last_change: Option<Instant>,
}

impl Debouncer {
    fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            pending: Vec::new(),
            last_change: None,
        }
    }

    /// Record a notify event; only writes to show files count
    fn observe(&mut self, event: Event, at: Instant) {
        if !matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
            return;
        }
        for path in event.paths.into_iter().filter(|p| is_show_file(p)) {
            if !self.pending.contains(&path) {
                self.pending.push(path);
            }
            self.last_change = Some(at);
        }
    }

    /// Paths whose edits have settled by `now`, in the order first seen
    fn settled(&mut self, now: Instant) -> Vec<PathBuf> {
        match self.last_change {
            Some(last) if now.duration_since(last) >= self.quiet_period => {
                self.last_change = None;
                std::mem::take(&mut self.pending)
            }
            _ => Vec::new(),
        }
    }
}

/// Show file watcher with debouncing
pub struct ShowWatcher {
    _watcher: RecommendedWatcher,
    event_receiver: Receiver<ShowEvent>,
    watched_path: PathBuf,
}

impl ShowWatcher {
    /// Create a new watcher for a show file or a directory of show files
    ///
    /// # Arguments
    /// * `path` - Path to watch (file or directory)
    /// * `debounce_ms` - Quiet period in milliseconds before reloading (default: 500)
    pub fn new<P: AsRef<Path>>(path: P, debounce_ms: Option<u64>) -> Result<Self> {
        let watched_path = path.as_ref().to_path_buf();
        let mut debouncer = Debouncer::new(Duration::from_millis(debounce_ms.unwrap_or(500)));

        let (event_tx, event_rx): (Sender<ShowEvent>, Receiver<ShowEvent>) = mpsc::channel();
        let (notify_tx, notify_rx): (Sender<Event>, Receiver<Event>) = mpsc::channel();

        let mut watcher = RecommendedWatcher::new(
            move |res: std::result::Result<Event, notify::Error>| match res {
                Ok(event) => {
                    let _ = notify_tx.send(event);
                }
                Err(e) => warn!(error = %e, "File watcher error"),
            },
            Config::default(),
        )
        .map_err(|e| anyhow!("Failed to create file watcher: {}", e))?;

        let mode = if watched_path.is_dir() {
            RecursiveMode::Recursive
        } else {
            RecursiveMode::NonRecursive
        };
        watcher
            .watch(&watched_path, mode)
            .map_err(|e| anyhow!("Failed to watch path {:?}: {}", watched_path, e))?;
        debug!(path = ?watched_path, "Watching show files");

        std::thread::spawn(move || loop {
            match notify_rx.recv_timeout(POLL_INTERVAL) {
                Ok(event) => debouncer.observe(event, Instant::now()),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }
            for path in debouncer.settled(Instant::now()) {
                if event_tx.send(reload(&path)).is_err() {
                    return;
                }
            }
        });

        Ok(Self {
            _watcher: watcher,
            event_receiver: event_rx,
            watched_path,
        })
    }

    /// Try to receive the next event (non-blocking)
    pub fn try_recv(&self) -> Option<ShowEvent> {
        self.event_receiver.try_recv().ok()
    }

    /// Receive all pending events
    pub fn recv_all(&self) -> Vec<ShowEvent> {
        std::iter::from_fn(|| self.try_recv()).collect()
    }

    /// Block until the next event is received
    pub fn recv(&self) -> Option<ShowEvent> {
        self.event_receiver.recv().ok()
    }

    /// Get the path being watched
    pub fn watched_path(&self) -> &Path {
        &self.watched_path
    }
}

/// Load a show file and check that its measures are valid, without acting on it
pub fn validate_show<P: AsRef<Path>>(path: P) -> Result<ShowFile> {
    let show = ShowFile::load(path)?;
    show.measures()?;
    Ok(show)
}
