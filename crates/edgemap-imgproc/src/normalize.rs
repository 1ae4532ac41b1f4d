//! Rescaling of gradient planes for display.
//!
//! Gradient magnitudes routinely exceed 255 (a Sobel response to a full step is
//! 1020), so edge maps are usually stretched into the 8-bit range before encoding.

use num_traits::Float;

use edgemap_image::{ImageError, Plane};

use crate::parallel;

/// Find the minimum and maximum values in a plane.
///
/// # Errors
///
/// Returns [`ImageError::InvalidImageSize`] if the plane is empty.
pub fn find_min_max<T>(src: &Plane<T>) -> Result<(T, T), ImageError>
where
    T: Float,
{
    let mut samples = src.as_slice().iter().copied();
    let first = samples.next().ok_or(ImageError::InvalidImageSize(
        src.cols(),
        src.rows(),
        1,
        1,
    ))?;

    Ok(samples.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
}

/// Linearly rescale a plane so that its values span `[min, max]`.
///
/// A constant plane maps to `min`.
///
/// # Arguments
///
/// * `src` - The input plane with shape (H, W).
/// * `dst` - The output plane with shape (H, W).
/// * `min` - The value the smallest sample maps to.
/// * `max` - The value the largest sample maps to.
///
/// # Example
///
/// ```
/// use edgemap_image::{ImageSize, Plane};
/// use edgemap_imgproc::normalize::normalize_min_max;
///
/// let src = Plane::new(ImageSize { width: 3, height: 1 }, vec![0.0f32, 510.0, 1020.0]).unwrap();
/// let mut dst = Plane::from_size_val(src.size(), 0.0f32);
///
/// normalize_min_max(&src, &mut dst, 0.0, 255.0).unwrap();
/// assert_eq!(dst.as_slice(), &[0.0, 127.5, 255.0]);
/// ```
pub fn normalize_min_max<T>(
    src: &Plane<T>,
    dst: &mut Plane<T>,
    min: T,
    max: T,
) -> Result<(), ImageError>
where
    T: Send + Sync + Float,
{
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    let (min_val, max_val) = find_min_max(src)?;
    let range = max_val - min_val;

    parallel::par_iter_rows_val(src, dst, |&src_val, dst_val| {
        *dst_val = if range > T::zero() {
            (src_val - min_val) * (max - min) / range + min
        } else {
            min
        };
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_min_max() -> Result<(), ImageError> {
        let plane = Plane::new([3, 2].into(), vec![4.0f32, -1.0, 9.5, 0.0, 2.0, 3.0])?;
        assert_eq!(find_min_max(&plane)?, (-1.0, 9.5));

        let empty = Plane::<f32>::from_size_val([0, 0].into(), 0.0);
        assert!(find_min_max(&empty).is_err());
        Ok(())
    }

    #[test]
    fn test_normalize_min_max() -> Result<(), ImageError> {
        let src = Plane::new([2, 2].into(), vec![0.0f32, 100.0, 200.0, 400.0])?;
        let mut dst = Plane::from_size_val(src.size(), 0.0f32);
        normalize_min_max(&src, &mut dst, 0.0, 1.0)?;
        assert_eq!(dst.as_slice(), &[0.0, 0.25, 0.5, 1.0]);
        Ok(())
    }

    #[test]
    fn test_normalize_constant_plane() -> Result<(), ImageError> {
        let src = Plane::from_size_val([3, 3].into(), 0.0f32);
        let mut dst = Plane::from_size_val(src.size(), 7.0f32);
        normalize_min_max(&src, &mut dst, 0.0, 255.0)?;
        assert!(dst.as_slice().iter().all(|&v| v == 0.0));
        Ok(())
    }
}
