/// An error type for the image module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// Error when channel and shape are not valid.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when the image size is not valid.
    #[error("Invalid image size ({0}, {1}) mismatch ({2}, {3})")]
    InvalidImageSize(usize, usize, usize, usize),

    /// Error when the planes of an image do not share the same size.
    #[error("Plane {0} has size ({1}, {2}) but the image is ({3}, {4})")]
    PlaneSizeMismatch(usize, usize, usize, usize, usize),

    /// Error when an image is built without planes.
    #[error("An image needs at least one channel")]
    EmptyImage,

    /// Error when the channel index is out of bounds.
    #[error("Channel index {0} is out of bounds {1}")]
    ChannelIndexOutOfBounds(usize, usize),

    /// Error when the image data cannot be cast.
    #[error("Failed to cast image data")]
    CastError,

    /// Error when the channel count cannot be reduced to a single luma plane.
    #[error("Unsupported number of channels: {0}")]
    UnsupportedChannelCount(usize),

    /// Error when the kernel data does not form a non-empty square grid.
    #[error("Kernel data length ({0}) is not a non-empty square")]
    InvalidKernelShape(usize),

    /// Error when a detector name is not recognized.
    #[error("Unknown edge detector: {0}")]
    InvalidDetector(String),

    /// Error when a gradient direction name is not recognized.
    #[error("Unknown gradient direction: {0}")]
    InvalidDirection(String),
}
