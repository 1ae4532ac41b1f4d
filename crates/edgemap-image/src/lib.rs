#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for the image module.
pub mod error;

/// image and plane representation.
pub mod image;

/// basic operations between image types.
pub mod ops;

pub use crate::error::ImageError;
pub use crate::image::{Image, ImageSize, Plane};
