/// Image listing and decoding
///
/// Decoding runs on a blocking task so the UI thread never stalls on a
/// large file. Directory listing is non-recursive: a batch covers exactly
/// the images sitting in the chosen directory.

use crate::error::CaptionError;
use image::DynamicImage;
use std::path::{Path, PathBuf};
use tokio::task;
use walkdir::WalkDir;

/// Supported image file extensions (lowercase, without the dot)
pub const SUPPORTED_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "bmp", "webp", "gif"];

/// A decoded image together with its source path
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub path: PathBuf,
    pub image: DynamicImage,
}

/// Check a path against the supported extension list
pub fn is_supported(path: &Path) -> bool {
    match path.extension() {
        Some(extension) => {
            let ext = extension.to_string_lossy().to_lowercase();
            SUPPORTED_EXTENSIONS.contains(&ext.as_str())
        }
        None => false,
    }
}

/// List the supported images directly inside `dir`, sorted by path
pub fn list_images(dir: &Path) -> Result<Vec<PathBuf>, CaptionError> {
    if !dir.is_dir() {
        return Err(CaptionError::Io {
            path: dir.to_path_buf(),
            message: "not a directory".to_string(),
        });
    }

    let mut images: Vec<PathBuf> = WalkDir::new(dir)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .map(|e| e.path().to_path_buf())
        .filter(|p| is_supported(p))
        .collect();

    images.sort();
    Ok(images)
}

/// Decode an image file on a blocking task
pub async fn load_image(path: PathBuf) -> Result<LoadedImage, CaptionError> {
    task::spawn_blocking(move || load_image_blocking(path))
        .await
        .map_err(|e| CaptionError::Generation(format!("task join error: {e}")))?
}

fn load_image_blocking(path: PathBuf) -> Result<LoadedImage, CaptionError> {
    if !path.exists() {
        return Err(CaptionError::ImageLoad {
            path,
            message: "file not found".to_string(),
        });
    }

    let decoded = image::open(&path).map_err(|e| CaptionError::ImageLoad {
        path: path.clone(),
        message: e.to_string(),
    })?;

    Ok(LoadedImage {
        path,
        image: decoded,
    })
}
