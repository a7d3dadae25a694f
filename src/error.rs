use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unsupported image format: {}", .path.display())]
    UnsupportedImage { path: PathBuf },

    #[error("failed to load image {}: {source}", .path.display())]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to save image {}: {source}", .path.display())]
    ImageSave {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("image size must be non-zero, got {width}x{height}")]
    EmptyImage { width: u32, height: u32 },

    #[error("image of {width}x{height} pixels is too large")]
    ImageTooLarge { width: u32, height: u32 },

    #[error("expected {expected} pixels, got {actual}")]
    PixelCount { expected: usize, actual: usize },

    #[error("{positions} positions but {velocities} velocities")]
    StateLength { positions: usize, velocities: usize },

    #[error("spring {spring} references particle {particle}, only {count} particles exist")]
    SpringIndex {
        spring: usize,
        particle: usize,
        count: usize,
    },

    #[error("spring {spring} has non-positive rest length {rest}")]
    RestLength { spring: usize, rest: f32 },

    #[error("invalid {name}: {value}")]
    InvalidParameter { name: &'static str, value: f32 },
}
