/// Batch captioning coordinator
///
/// A FIFO queue of image paths with an `Idle → Running → Idle` life cycle.
/// Exactly one item is in flight at a time; the app records each item's
/// outcome in the caption cache and immediately asks for the next. Items
/// that fail to load are recorded with an error marker and skipped without
/// ever starting a generation worker.

use super::cache::CaptionCache;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

/// Cache entry recorded for an image that could not be loaded
pub const LOAD_ERROR_MARKER: &str = "[Error: Could not load this image for processing]";

const GENERATION_ERROR_PREFIX: &str = "[Generation Error: ";

/// Cache entry recorded for an image whose generation failed
pub fn generation_error_marker(message: &str) -> String {
    format!("{GENERATION_ERROR_PREFIX}{message}]")
}

/// Bracketed markers are distinguishable from normal captions
pub fn is_error_marker(text: &str) -> bool {
    text == LOAD_ERROR_MARKER
        || (text.starts_with(GENERATION_ERROR_PREFIX) && text.ends_with(']'))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BatchState {
    #[default]
    Idle,
    Running,
}

#[derive(Debug, Default)]
pub struct BatchCoordinator {
    queue: VecDeque<PathBuf>,
    in_flight: Option<PathBuf>,
    total: usize,
    processed: usize,
    state: BatchState,
}

impl BatchCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the queue and enter Running. Callers must not begin a batch
    /// while one is already running (the UI disables the button).
    pub fn begin(&mut self, paths: Vec<PathBuf>) {
        debug_assert!(self.state == BatchState::Idle);
        self.total = paths.len();
        self.processed = 0;
        self.queue = paths.into();
        self.in_flight = None;
        self.state = BatchState::Running;
    }

    /// Take the next item, strictly FIFO. `None` means the batch is done:
    /// the coordinator transitions back to Idle.
    pub fn pop_next(&mut self) -> Option<PathBuf> {
        match self.queue.pop_front() {
            Some(path) => {
                self.in_flight = Some(path.clone());
                Some(path)
            }
            None => {
                self.in_flight = None;
                self.state = BatchState::Idle;
                None
            }
        }
    }

    /// Cache the generated caption for the in-flight item
    pub fn record_success(&mut self, cache: &mut CaptionCache, caption: impl Into<String>) {
        if let Some(path) = self.in_flight.take() {
            cache.put(&path, caption);
            self.processed += 1;
        }
    }

    /// Cache the load-error marker for an item that never reached a worker
    pub fn record_load_error(&mut self, cache: &mut CaptionCache) {
        if let Some(path) = self.in_flight.take() {
            cache.put(&path, LOAD_ERROR_MARKER);
            self.processed += 1;
        }
    }

    /// Cache the generation-error marker for the in-flight item
    pub fn record_generation_error(&mut self, cache: &mut CaptionCache, message: &str) {
        if let Some(path) = self.in_flight.take() {
            cache.put(&path, generation_error_marker(message));
            self.processed += 1;
        }
    }

    /// Drop the remaining queue and return to Idle (user stop or app exit)
    pub fn abort(&mut self) {
        self.queue.clear();
        self.in_flight = None;
        self.state = BatchState::Idle;
    }

    pub fn state(&self) -> BatchState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == BatchState::Running
    }

    pub fn current(&self) -> Option<&Path> {
        self.in_flight.as_deref()
    }

    /// (items finished or skipped, batch size)
    pub fn progress(&self) -> (usize, usize) {
        (self.processed, self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn test_items_processed_in_fifo_order() {
        let mut batch = BatchCoordinator::new();
        let mut cache = CaptionCache::new();
        batch.begin(paths(&["/imgs/a.png", "/imgs/b.png"]));

        assert_eq!(batch.pop_next(), Some(PathBuf::from("/imgs/a.png")));
        batch.record_success(&mut cache, "caption a");
        assert_eq!(batch.pop_next(), Some(PathBuf::from("/imgs/b.png")));
        batch.record_success(&mut cache, "caption b");
        assert_eq!(batch.pop_next(), None);
        assert_eq!(batch.state(), BatchState::Idle);
    }

    #[test]
    fn test_load_failure_is_recorded_and_skipped() {
        let mut batch = BatchCoordinator::new();
        let mut cache = CaptionCache::new();
        let items = paths(&["/imgs/a.png", "/imgs/b.png", "/imgs/c.png"]);
        batch.begin(items.clone());

        // Item 1 succeeds, item 2 fails to load, item 3 succeeds
        batch.pop_next().unwrap();
        batch.record_success(&mut cache, "caption a");
        batch.pop_next().unwrap();
        batch.record_load_error(&mut cache);
        batch.pop_next().unwrap();
        batch.record_success(&mut cache, "caption c");

        assert_eq!(batch.pop_next(), None);
        assert_eq!(batch.state(), BatchState::Idle);
        assert_eq!(batch.progress(), (3, 3));

        // All three entries exist; the failed one holds the marker
        assert_eq!(cache.len(), 3);
        assert_eq!(cache.get(&items[0]), "caption a");
        assert_eq!(cache.get(&items[1]), LOAD_ERROR_MARKER);
        assert_eq!(cache.get(&items[2]), "caption c");
        assert!(is_error_marker(&cache.get(&items[1])));
    }

    #[test]
    fn test_generation_error_marker_is_distinguishable() {
        let mut batch = BatchCoordinator::new();
        let mut cache = CaptionCache::new();
        let items = paths(&["/imgs/a.png"]);
        batch.begin(items.clone());

        batch.pop_next().unwrap();
        batch.record_generation_error(&mut cache, "CUDA out of memory");

        let entry = cache.get(&items[0]);
        assert_eq!(entry, "[Generation Error: CUDA out of memory]");
        assert!(is_error_marker(&entry));
        assert!(!is_error_marker("A photo of [a cat] on a mat"));
        assert!(!is_error_marker(""));
    }

    #[test]
    fn test_empty_batch_completes_immediately() {
        let mut batch = BatchCoordinator::new();
        batch.begin(Vec::new());
        assert!(batch.is_running());
        assert_eq!(batch.pop_next(), None);
        assert_eq!(batch.state(), BatchState::Idle);
        assert_eq!(batch.progress(), (0, 0));
    }

    #[test]
    fn test_abort_drops_remaining_queue() {
        let mut batch = BatchCoordinator::new();
        let mut cache = CaptionCache::new();
        batch.begin(paths(&["/imgs/a.png", "/imgs/b.png"]));
        batch.pop_next().unwrap();
        batch.record_success(&mut cache, "caption a");

        batch.abort();
        assert_eq!(batch.state(), BatchState::Idle);
        assert_eq!(batch.pop_next(), None);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_progress_counts_current_position() {
        let mut batch = BatchCoordinator::new();
        let mut cache = CaptionCache::new();
        batch.begin(paths(&["/imgs/a.png", "/imgs/b.png", "/imgs/c.png"]));

        batch.pop_next().unwrap();
        assert_eq!(batch.progress(), (0, 3));
        assert_eq!(batch.current(), Some(Path::new("/imgs/a.png")));

        batch.record_success(&mut cache, "caption a");
        assert_eq!(batch.progress(), (1, 3));
        assert_eq!(batch.current(), None);
    }
}
