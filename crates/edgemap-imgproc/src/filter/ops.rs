use edgemap_image::{ImageError, Plane};

use super::{convolve, DetectorType, KernelBank};
use crate::parallel;

/// Compute the gradient magnitude `sqrt(gx^2 + gy^2)` into `dst`.
///
/// # Arguments
///
/// * `gx` - The gradient along x with shape (H, W).
/// * `gy` - The gradient along y with shape (H, W).
/// * `dst` - The destination plane with shape (H, W).
///
/// # Errors
///
/// Returns [`ImageError::InvalidImageSize`] if the planes differ in size.
pub fn magnitude_into(
    gx: &Plane<f32>,
    gy: &Plane<f32>,
    dst: &mut Plane<f32>,
) -> Result<(), ImageError> {
    for other in [gy.size(), dst.size()] {
        if gx.size() != other {
            return Err(ImageError::InvalidImageSize(
                gx.cols(),
                gx.rows(),
                other.width,
                other.height,
            ));
        }
    }

    // compute the magnitude in parallel by rows
    parallel::par_iter_rows_val_two(gx, gy, dst, |&gx, &gy, dst| {
        *dst = (gx * gx + gy * gy).sqrt();
    });

    Ok(())
}

/// Compute the gradient magnitude of two planes into a new plane.
///
/// # Example
///
/// ```
/// use edgemap_image::{ImageSize, Plane};
/// use edgemap_imgproc::filter::magnitude;
///
/// let size = ImageSize { width: 1, height: 1 };
/// let gx = Plane::new(size, vec![3.0f32]).unwrap();
/// let gy = Plane::new(size, vec![-4.0f32]).unwrap();
///
/// assert_eq!(magnitude(&gx, &gy).unwrap().as_slice(), &[5.0]);
/// ```
pub fn magnitude(gx: &Plane<f32>, gy: &Plane<f32>) -> Result<Plane<f32>, ImageError> {
    let mut dst = Plane::from_size_val(gx.size(), 0.0f32);
    magnitude_into(gx, gy, &mut dst)?;
    Ok(dst)
}

/// Compute the x and y gradients of a grayscale plane with a detector's kernels.
///
/// The two convolutions are independent and run concurrently.
///
/// # Returns
///
/// The `(gx, gy)` planes, both with the size of `src`.
pub fn spatial_gradient(src: &Plane<f32>, detector: DetectorType) -> (Plane<f32>, Plane<f32>) {
    let (kx, ky) = KernelBank::global().kernels_for(detector);
    rayon::join(|| convolve(src, kx), || convolve(src, ky))
}
