//! First-derivative edge detection.
//!
//! [`detect`] is a pure function of the image, the detector family and the
//! gradient direction:
//!
//! ```text
//! image -> grayscale -> filter2d(kx) ------------------------> X
//!                    -> filter2d(ky) ------------------------> Y
//!                    -> magnitude(filter2d(kx), filter2d(ky)) -> MAG
//! ```
//!
//! Nothing is cached between calls.

use std::{fmt, str::FromStr};

use edgemap_image::{Image, ImageError, Plane};

use crate::{
    color::to_grayscale,
    filter::{convolve, magnitude, spatial_gradient, DetectorType, KernelBank},
};

/// The gradient component produced by the edge detector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GradientDirection {
    /// Horizontal derivative, responds to vertical edges.
    X,
    /// Vertical derivative, responds to horizontal edges.
    Y,
    /// Euclidean norm of the x and y derivatives.
    #[default]
    Magnitude,
}

impl fmt::Display for GradientDirection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            GradientDirection::X => "x",
            GradientDirection::Y => "y",
            GradientDirection::Magnitude => "mag",
        };
        write!(f, "{name}")
    }
}

impl FromStr for GradientDirection {
    type Err = ImageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "x" => Ok(GradientDirection::X),
            "y" => Ok(GradientDirection::Y),
            "mag" | "magnitude" => Ok(GradientDirection::Magnitude),
            _ => Err(ImageError::InvalidDirection(s.to_string())),
        }
    }
}

/// Compute an edge map of an image.
///
/// The image is always reduced to a luma plane first; the result has the size of
/// the image and a zero border.
///
/// # Arguments
///
/// * `image` - The input image with 1, 3 or 4 channels of samples in `[0, 255]`.
/// * `detector` - The kernel family to use.
/// * `direction` - The gradient component to return.
///
/// # Errors
///
/// Returns [`ImageError::UnsupportedChannelCount`] if the image cannot be
/// converted to grayscale. No convolution runs in that case.
///
/// # Example
///
/// ```
/// use edgemap_image::{Image, ImageSize};
/// use edgemap_imgproc::edges::{detect, GradientDirection};
/// use edgemap_imgproc::filter::DetectorType;
///
/// let image = Image::from_interleaved(
///     ImageSize { width: 4, height: 4 },
///     1,
///     vec![10.0f32; 16],
/// )
/// .unwrap();
///
/// let edges = detect(&image, DetectorType::Prewitt, GradientDirection::Magnitude).unwrap();
/// assert!(edges.as_slice().iter().all(|&v| v == 0.0));
/// ```
pub fn detect(
    image: &Image<f32>,
    detector: DetectorType,
    direction: GradientDirection,
) -> Result<Plane<f32>, ImageError> {
    let gray = to_grayscale(image)?;

    log::debug!(
        "detecting edges: detector={detector} direction={direction} size={}",
        gray.size()
    );

    let (kx, ky) = KernelBank::global().kernels_for(detector);
    let edges = match direction {
        GradientDirection::X => convolve(&gray, kx),
        GradientDirection::Y => convolve(&gray, ky),
        GradientDirection::Magnitude => {
            let (gx, gy) = spatial_gradient(&gray, detector);
            magnitude(&gx, &gy)?
        }
    };

    Ok(edges)
}
