//! Filter operations
//!
//! This module provides the gradient kernels and the convolution used by the
//! edge detectors.

/// Gradient kernels
pub mod kernels;
pub use kernels::{DetectorType, Kernel, KernelBank};

/// Dense 2d convolution
mod convolution;
pub use convolution::*;

/// Filter operations
mod ops;
pub use ops::*;
