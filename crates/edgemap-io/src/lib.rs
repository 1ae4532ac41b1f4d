#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for I/O operations.
///
/// Defines [`error::IoError`] variants for file access and encoding/decoding failures.
pub mod error;

/// High-level image reading and writing functions.
///
/// See [`functional::read_image_any`] for automatic format detection.
pub mod functional;

/// PNG image encoding and decoding.
///
/// Read and write 8-bit PNG images with one to four channels.
pub mod png;
