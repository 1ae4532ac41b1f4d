use edgemap_image::ImageError;
use edgemap_io::error::IoError;

/// An error type for the edge detector session.
#[derive(thiserror::Error, Debug)]
pub enum EdgeError {
    /// Error when an operation needs an image but none was loaded.
    #[error("No image data available")]
    NoImageLoaded,

    /// Error when an edge plane does not match the loaded image.
    #[error("Edge plane size ({0}, {1}) does not match the image size ({2}, {3})")]
    EdgeSizeMismatch(usize, usize, usize, usize),

    /// Error from the image processing pipeline.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// Error from decoding or encoding an image file.
    #[error(transparent)]
    Io(#[from] IoError),
}
