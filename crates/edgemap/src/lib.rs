#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use edgemap_image as image;

#[doc(inline)]
pub use edgemap_imgproc as imgproc;

#[doc(inline)]
pub use edgemap_io as io;

/// Error types for the edge detector session.
pub mod error;

/// File based edge detection session.
pub mod detector;

pub use crate::detector::{EdgeDetector, ImageType};
pub use crate::error::EdgeError;
pub use edgemap_imgproc::edges::{detect, GradientDirection};
pub use edgemap_imgproc::filter::DetectorType;
