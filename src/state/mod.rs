/// State management module
///
/// This module handles the application's mutable state:
/// - Caption cache and sidecar files (cache.rs)
/// - Batch generation queue and life cycle (batch.rs)
/// - Persisted settings (settings.rs)

pub mod batch;
pub mod cache;
pub mod settings;
