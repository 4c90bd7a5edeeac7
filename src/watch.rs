//! File watcher for continuous linting
//!
//! Watches source directories and reports debounced change events so the CLI
//! can re-lint just the files that changed.

use notify::{RecommendedWatcher, RecursiveMode};
use notify_debouncer_mini::{new_debouncer, DebouncedEvent, Debouncer};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

/// Debounce interval for change events
const DEBOUNCE: Duration = Duration::from_millis(300);

/// A batch of changed files
#[derive(Debug, Clone)]
pub struct WatchEvent {
    pub paths: Vec<PathBuf>,
}

/// Debounced file watcher filtered to the linted extensions
pub struct Watcher {
    _debouncer: Debouncer<RecommendedWatcher>,
    receiver: Receiver<Result<Vec<DebouncedEvent>, notify::Error>>,
    extensions: Vec<String>,
}

impl Watcher {
    /// Watch the given paths (files are watched via their parent directory)
    pub fn new(paths: &[PathBuf], extensions: &[String]) -> Result<Self, notify::Error> {
        let (tx, rx) = mpsc::channel();
        let mut debouncer = new_debouncer(DEBOUNCE, tx)?;

        for path in paths {
            let watch_path = if path.is_file() {
                path.parent().unwrap_or(Path::new("."))
            } else {
                path.as_path()
            };
            debouncer
                .watcher()
                .watch(watch_path, RecursiveMode::Recursive)?;
        }

        Ok(Self {
            _debouncer: debouncer,
            receiver: rx,
            extensions: extensions.to_vec(),
        })
    }

    /// Block until the next batch of relevant changes
    pub fn wait(&self) -> Option<WatchEvent> {
        match self.receiver.recv() {
            Ok(Ok(events)) => {
                let mut paths: Vec<PathBuf> = Vec::new();
                for event in events {
                    if self.matches_extension(&event.path) && !paths.contains(&event.path) {
                        paths.push(event.path);
                    }
                }
                if paths.is_empty() {
                    None
                } else {
                    Some(WatchEvent { paths })
                }
            }
            Ok(Err(_)) | Err(_) => None,
        }
    }

    fn matches_extension(&self, path: &Path) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        match path.extension() {
            Some(ext) => {
                let ext = ext.to_string_lossy().to_lowercase();
                self.extensions.iter().any(|e| e.to_lowercase() == ext)
            }
            None => false,
        }
    }
}
