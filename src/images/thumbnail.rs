/// Gallery thumbnail generation
///
/// Thumbnails are scaled to a fixed height with Lanczos3 filtering and
/// returned as raw RGBA buffers; the UI wraps them in renderer handles.

use crate::error::CaptionError;
use image::imageops::FilterType;
use std::path::PathBuf;
use tokio::task;

/// Height of gallery thumbnails in pixels
pub const THUMBNAIL_HEIGHT: u32 = 100;

/// A decoded thumbnail ready for display
#[derive(Debug, Clone)]
pub struct Thumbnail {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Generate a thumbnail for an image file on a blocking task
pub async fn generate_thumbnail(path: PathBuf) -> Result<Thumbnail, CaptionError> {
    task::spawn_blocking(move || generate_thumbnail_blocking(path))
        .await
        .map_err(|e| CaptionError::Generation(format!("task join error: {e}")))?
}

fn generate_thumbnail_blocking(path: PathBuf) -> Result<Thumbnail, CaptionError> {
    let decoded = image::open(&path).map_err(|e| CaptionError::ImageLoad {
        path: path.clone(),
        message: e.to_string(),
    })?;

    // Scale to the fixed height, preserving aspect ratio
    let source_height = decoded.height().max(1);
    let width = (decoded.width() * THUMBNAIL_HEIGHT / source_height).max(1);
    let resized = decoded.resize_exact(width, THUMBNAIL_HEIGHT, FilterType::Lanczos3);

    let rgba = resized.to_rgba8();
    Ok(Thumbnail {
        path,
        width: rgba.width(),
        height: rgba.height(),
        rgba: rgba.into_raw(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static TEST_DIR_SEQ: AtomicUsize = AtomicUsize::new(0);

    fn scratch_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "caption-thumb-test-{}-{}",
            std::process::id(),
            TEST_DIR_SEQ.fetch_add(1, Ordering::SeqCst)
        ));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_png(path: &Path, width: u32, height: u32) {
        image::RgbImage::new(width, height).save(path).unwrap();
    }

    #[tokio::test]
    async fn test_thumbnail_has_fixed_height() {
        let dir = scratch_dir();
        let path = dir.join("wide.png");
        write_png(&path, 400, 200);

        let thumb = generate_thumbnail(path.clone()).await.unwrap();
        assert_eq!(thumb.path, path);
        assert_eq!(thumb.height, THUMBNAIL_HEIGHT);
        assert_eq!(thumb.width, 200);
        assert_eq!(thumb.rgba.len(), (thumb.width * thumb.height * 4) as usize);
    }

    #[tokio::test]
    async fn test_extreme_aspect_ratio_stays_valid() {
        let dir = scratch_dir();
        let path = dir.join("sliver.png");
        write_png(&path, 2, 1000);

        let thumb = generate_thumbnail(path).await.unwrap();
        assert_eq!(thumb.height, THUMBNAIL_HEIGHT);
        assert!(thumb.width >= 1);
    }

    #[tokio::test]
    async fn test_undecodable_file_fails() {
        let dir = scratch_dir();
        let path = dir.join("junk.png");
        fs::write(&path, b"junk").unwrap();
        let result = generate_thumbnail(path).await;
        assert!(matches!(result, Err(CaptionError::ImageLoad { .. })));
    }
}
