/// In-memory caption cache backed by sidecar text files
///
/// The cache is the source of truth for the current session: it always
/// holds the latest edited or generated text for a path. Sidecar files are
/// read lazily on first access and overwritten only on explicit save, so a
/// failed flush never loses data.

use crate::error::CaptionError;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Sidecar file path for an image: `.txt` appended to the full file name,
/// original extension included (`photo.jpg` → `photo.jpg.txt`).
pub fn sidecar_path(image_path: &Path) -> PathBuf {
    let mut name = image_path.as_os_str().to_os_string();
    name.push(".txt");
    PathBuf::from(name)
}

/// Outcome of a flush-all pass; per-entry failures do not stop the pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlushReport {
    pub saved: usize,
    pub failed: usize,
}

#[derive(Debug, Default)]
pub struct CaptionCache {
    entries: HashMap<PathBuf, String>,
}

impl CaptionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached text for the path; on a miss, tries the sidecar file and
    /// caches what it finds. Returns an empty string when neither exists.
    pub fn get(&mut self, image_path: &Path) -> String {
        if let Some(text) = self.entries.get(image_path) {
            return text.clone();
        }

        match fs::read_to_string(sidecar_path(image_path)) {
            Ok(text) => {
                self.entries.insert(image_path.to_path_buf(), text.clone());
                text
            }
            Err(_) => String::new(),
        }
    }

    /// Overwrite the in-memory entry; no disk write
    pub fn put(&mut self, image_path: &Path, text: impl Into<String>) {
        self.entries.insert(image_path.to_path_buf(), text.into());
    }

    /// Write the cached text for this path to its sidecar file,
    /// creating or overwriting it. The cache entry is untouched either way.
    pub fn flush(&self, image_path: &Path) -> Result<(), CaptionError> {
        let text = self
            .entries
            .get(image_path)
            .map(String::as_str)
            .unwrap_or("");
        let sidecar = sidecar_path(image_path);
        fs::write(&sidecar, text).map_err(|e| CaptionError::io(sidecar, e))
    }

    /// Flush every cached entry independently, continuing past failures
    pub fn flush_all(&self) -> FlushReport {
        let mut report = FlushReport { saved: 0, failed: 0 };
        for path in self.entries.keys() {
            match self.flush(path) {
                Ok(()) => report.saved += 1,
                Err(e) => {
                    eprintln!("⚠️  {}", e);
                    report.failed += 1;
                }
            }
        }
        report
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forget everything (a new batch directory starts a fresh cache)
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static TEST_DIR_SEQ: AtomicUsize = AtomicUsize::new(0);

    fn scratch_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "caption-cache-test-{}-{}",
            std::process::id(),
            TEST_DIR_SEQ.fetch_add(1, Ordering::SeqCst)
        ));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_sidecar_keeps_original_extension() {
        assert_eq!(
            sidecar_path(Path::new("/photos/cat.jpg")),
            PathBuf::from("/photos/cat.jpg.txt")
        );
        assert_eq!(
            sidecar_path(Path::new("/photos/archive.webp")),
            PathBuf::from("/photos/archive.webp.txt")
        );
    }

    #[test]
    fn test_get_without_sidecar_is_empty() {
        let dir = scratch_dir();
        let mut cache = CaptionCache::new();
        assert_eq!(cache.get(&dir.join("missing.png")), "");
        assert!(cache.is_empty());
    }

    #[test]
    fn test_put_is_memory_only_until_flush() {
        let dir = scratch_dir();
        let image = dir.join("dog.png");
        let mut cache = CaptionCache::new();
        cache.put(&image, "a dog");
        assert!(!sidecar_path(&image).exists());
        assert_eq!(cache.get(&image), "a dog");
    }

    #[test]
    fn test_flush_round_trip_survives_restart() {
        let dir = scratch_dir();
        let image = dir.join("bird.jpeg");
        let mut cache = CaptionCache::new();
        cache.put(&image, "a bird on a wire");
        cache.flush(&image).unwrap();

        // Fresh cache simulates a process restart
        let mut fresh = CaptionCache::new();
        assert_eq!(fresh.get(&image), "a bird on a wire");
    }

    #[test]
    fn test_lazy_sidecar_load_is_cached() {
        let dir = scratch_dir();
        let image = dir.join("fish.gif");
        fs::write(sidecar_path(&image), "a fish").unwrap();

        let mut cache = CaptionCache::new();
        assert_eq!(cache.get(&image), "a fish");
        assert_eq!(cache.len(), 1);

        // Edits beat stale sidecar content until the next explicit save
        cache.put(&image, "two fish");
        assert_eq!(cache.get(&image), "two fish");
        assert_eq!(fs::read_to_string(sidecar_path(&image)).unwrap(), "a fish");
    }

    #[test]
    fn test_flush_all_continues_past_failures() {
        let dir = scratch_dir();
        let good_a = dir.join("a.png");
        let good_b = dir.join("b.png");
        let bad = dir.join("no-such-subdir").join("c.png");

        let mut cache = CaptionCache::new();
        cache.put(&good_a, "alpha");
        cache.put(&good_b, "beta");
        cache.put(&bad, "gamma");

        let report = cache.flush_all();
        assert_eq!(report, FlushReport { saved: 2, failed: 1 });
        assert!(sidecar_path(&good_a).exists());
        assert!(sidecar_path(&good_b).exists());

        // Failed flush leaves the cache intact
        assert_eq!(cache.get(&bad), "gamma");
    }

    #[test]
    fn test_flush_failure_reports_io_kind() {
        let dir = scratch_dir();
        let bad = dir.join("ghost-dir").join("x.png");
        let mut cache = CaptionCache::new();
        cache.put(&bad, "text");
        let err = cache.flush(&bad).unwrap_err();
        assert!(matches!(err, CaptionError::Io { .. }));
    }
}
