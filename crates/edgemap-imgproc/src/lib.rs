#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// color transformations module.
pub mod color;

/// edge detection pipeline module.
pub mod edges;

/// image filtering module.
pub mod filter;

/// operations to normalize images.
pub mod normalize;

/// module containing parallization utilities.
pub mod parallel;
