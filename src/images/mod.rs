/// Image discovery and decoding
pub mod loader;
pub mod thumbnail;

pub use loader::{list_images, load_image, LoadedImage, SUPPORTED_EXTENSIONS};
pub use thumbnail::{generate_thumbnail, Thumbnail, THUMBNAIL_HEIGHT};
