use edgemap_image::{ImageError, Plane};

use super::Kernel;
use crate::parallel;

/// Cross-correlate a plane with a square kernel.
///
/// For an output pixel `(i, j)` the kernel's top-left cell is placed at
/// `(i - a, j - a)` where `a = kernel.anchor()`:
///
/// ```text
/// dst(i, j) = sum_{r, c} kernel(r, c) * src(i - a + r, j - a + c)
/// ```
///
/// Only interior pixels, `a <= i < H - a` and `a <= j < W - a`, are computed.
/// The destination is zero-filled first, so the border ring of width `a` is
/// always 0; planes too small to have an interior come back all zero.
///
/// # Arguments
///
/// * `src` - The source plane with shape (H, W).
/// * `dst` - The destination plane with shape (H, W).
/// * `kernel` - The kernel to apply.
///
/// # Errors
///
/// Returns [`ImageError::InvalidImageSize`] if `src` and `dst` differ in size.
pub fn filter2d(src: &Plane<f32>, dst: &mut Plane<f32>, kernel: &Kernel) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    correlate_zero_border(src, dst, kernel);

    Ok(())
}

// NOTE: `src` and `dst` must have the same size.
fn correlate_zero_border(src: &Plane<f32>, dst: &mut Plane<f32>, kernel: &Kernel) {
    dst.as_slice_mut().fill(0.0);

    let (rows, cols) = (src.rows(), src.cols());
    let anchor = kernel.anchor();
    if rows < 2 * anchor + 1 || cols < 2 * anchor + 1 {
        return;
    }

    let ksize = kernel.size();
    let src_data = src.as_slice();

    parallel::par_iter_rows_mut(dst, |r, dst_row| {
        if r < anchor || r >= rows - anchor {
            return;
        }
        let top = r - anchor;
        for (c, dst) in dst_row
            .iter_mut()
            .enumerate()
            .take(cols - anchor)
            .skip(anchor)
        {
            let left = c - anchor;
            let mut sum = 0.0;
            for kr in 0..ksize {
                let offset = (top + kr) * cols + left;
                let src_row = &src_data[offset..offset + ksize];
                let k_row = &kernel.as_slice()[kr * ksize..(kr + 1) * ksize];
                sum += src_row
                    .iter()
                    .zip(k_row.iter())
                    .map(|(s, k)| s * k)
                    .sum::<f32>();
            }
            *dst = sum;
        }
    });
}

/// Cross-correlate a plane with a kernel into a newly allocated plane.
///
/// See [`filter2d`] for the anchoring and border rules.
///
/// # Example
///
/// ```
/// use edgemap_image::{ImageSize, Plane};
/// use edgemap_imgproc::filter::{convolve, DetectorType};
///
/// let plane = Plane::from_size_val(ImageSize { width: 4, height: 4 }, 7.0f32);
/// let (kx, _) = DetectorType::Sobel.kernels();
///
/// let gx = convolve(&plane, &kx);
/// assert!(gx.as_slice().iter().all(|&v| v == 0.0));
/// ```
pub fn convolve(src: &Plane<f32>, kernel: &Kernel) -> Plane<f32> {
    let mut dst = Plane::from_size_val(src.size(), 0.0f32);
    correlate_zero_border(src, &mut dst, kernel);
    dst
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::DetectorType;
    use edgemap_image::ImageSize;

    fn border_is_zero(plane: &Plane<f32>) -> bool {
        let (rows, cols) = (plane.rows(), plane.cols());
        (0..rows).all(|r| {
            (0..cols).all(|c| {
                let on_border = r == 0 || c == 0 || r == rows - 1 || c == cols - 1;
                !on_border || plane.get(r, c) == Some(&0.0)
            })
        })
    }

    #[test]
    fn test_filter2d_sobel_ramp() -> Result<(), ImageError> {
        // horizontal ramp: value equals the column index
        let size = ImageSize {
            width: 5,
            height: 4,
        };
        let data = (0..size.area()).map(|i| (i % 5) as f32).collect();
        let src = Plane::new(size, data)?;

        let (kx, ky) = DetectorType::Sobel.kernels();
        let mut gx = Plane::from_size_val(size, -1.0);
        filter2d(&src, &mut gx, &kx)?;

        #[rustfmt::skip]
        let expected_x = [
            0.0, 0.0, 0.0, 0.0, 0.0,
            0.0, 8.0, 8.0, 8.0, 0.0,
            0.0, 8.0, 8.0, 8.0, 0.0,
            0.0, 0.0, 0.0, 0.0, 0.0,
        ];
        assert_eq!(gx.as_slice(), &expected_x);

        let gy = convolve(&src, &ky);
        assert!(gy.as_slice().iter().all(|&v| v == 0.0));
        Ok(())
    }

    #[test]
    fn test_filter2d_is_cross_correlation() -> Result<(), ImageError> {
        // an impulse at the center
        let mut src = Plane::from_size_val([3, 3].into(), 0.0f32);
        if let Some(v) = src.get_mut(1, 1) {
            *v = 1.0;
        }
        let kernel = Kernel::new((1..=9).map(|v| v as f32).collect())?;
        let dst = convolve(&src, &kernel);
        // only the center is interior: it sees kernel(1, 1)
        assert_eq!(dst.get(1, 1), Some(&5.0));

        let asym = Kernel::from_rows([[0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 0.0, 0.0]]);
        let ramp = Plane::new([3, 3].into(), vec![0.0, 1.0, 2.0, 0.0, 1.0, 2.0, 0.0, 1.0, 2.0])?;
        assert_eq!(convolve(&ramp, &asym).get(1, 1), Some(&2.0));
        Ok(())
    }

    #[test]
    fn test_filter2d_roberts_anchor() -> Result<(), ImageError> {
        #[rustfmt::skip]
        let src = Plane::new(
            [4, 4].into(),
            vec![
                1.0, 2.0, 3.0, 4.0,
                5.0, 6.0, 7.0, 8.0,
                9.0, 10.0, 11.0, 12.0,
                13.0, 14.0, 15.0, 16.0,
            ],
        )?;
        let (kx, ky) = DetectorType::RobertsCross.kernels();

        // kx at (i, j) = src(i-1, j-1) - src(i, j)
        let gx = convolve(&src, &kx);
        #[rustfmt::skip]
        let expected_x = [
            0.0, 0.0, 0.0, 0.0,
            0.0, -5.0, -5.0, 0.0,
            0.0, -5.0, -5.0, 0.0,
            0.0, 0.0, 0.0, 0.0,
        ];
        assert_eq!(gx.as_slice(), &expected_x);

        // ky at (i, j) = src(i-1, j) - src(i, j-1)
        let gy = convolve(&src, &ky);
        #[rustfmt::skip]
        let expected_y = [
            0.0, 0.0, 0.0, 0.0,
            0.0, -3.0, -3.0, 0.0,
            0.0, -3.0, -3.0, 0.0,
            0.0, 0.0, 0.0, 0.0,
        ];
        assert_eq!(gy.as_slice(), &expected_y);
        Ok(())
    }

    #[test]
    fn test_filter2d_borders_are_zero() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 7,
            height: 6,
        };
        let data = (0..size.area()).map(|i| ((i * 37) % 251) as f32).collect();
        let src = Plane::new(size, data)?;

        for detector in DetectorType::ALL {
            let (kx, ky) = detector.kernels();
            for kernel in [kx, ky] {
                // start from garbage to make sure the border is written
                let mut dst = Plane::from_size_val(size, f32::NAN);
                filter2d(&src, &mut dst, &kernel)?;
                assert!(border_is_zero(&dst), "{detector} left a non-zero border");
            }
        }
        Ok(())
    }

    #[test]
    fn test_filter2d_degenerate_sizes() -> Result<(), ImageError> {
        for detector in DetectorType::ALL {
            let (kx, ky) = detector.kernels();
            for (w, h) in [(1, 1), (2, 5), (5, 2), (0, 0)] {
                let data = (0..w * h).map(|i| (i * 31 % 256) as f32).collect();
                let src = Plane::new([w, h].into(), data)?;
                for kernel in [&kx, &ky] {
                    let mut dst = Plane::from_size_val(src.size(), 3.0f32);
                    filter2d(&src, &mut dst, kernel)?;
                    assert!(
                        dst.as_slice().iter().all(|&v| v == 0.0),
                        "{detector} on {w}x{h} is not all zero"
                    );
                }
            }
        }
        Ok(())
    }

    #[test]
    fn test_filter2d_size_mismatch() {
        let (kx, _) = DetectorType::Prewitt.kernels();
        let src = Plane::from_size_val([4, 4].into(), 0.0f32);
        let mut dst = Plane::from_size_val([4, 3].into(), 0.0f32);
        assert_eq!(
            filter2d(&src, &mut dst, &kx),
            Err(ImageError::InvalidImageSize(4, 4, 4, 3))
        );
    }
}
