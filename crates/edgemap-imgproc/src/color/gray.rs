use edgemap_image::{Image, ImageError, Plane};

use crate::parallel;

/// Define the RGB weights for the grayscale conversion (ITU-R BT.601).
const RW: f32 = 0.2989;
const GW: f32 = 0.5870;
const BW: f32 = 0.1140;

/// Convert an RGB image to grayscale using the formula:
///
/// Y = 0.2989 * R + 0.5870 * G + 0.1140 * B
///
/// Channels beyond the third (e.g. alpha) are ignored.
///
/// # Arguments
///
/// * `src` - The input image with at least 3 channels.
/// * `dst` - The output grayscale plane.
///
/// Precondition: the input and output must have the same size.
///
/// # Errors
///
/// Returns [`ImageError::UnsupportedChannelCount`] if `src` has fewer than 3 channels.
pub fn gray_from_rgb(src: &Image<f32>, dst: &mut Plane<f32>) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    let [r, g, b] = match src.planes() {
        [r, g, b, ..] => [r, g, b],
        _ => return Err(ImageError::UnsupportedChannelCount(src.num_channels())),
    };

    // parallelize the grayscale conversion by rows
    parallel::par_iter_rows_mut(dst, |row, dst_row| {
        let (Some(r), Some(g), Some(b)) = (r.row(row), g.row(row), b.row(row)) else {
            return;
        };
        for (col, dst) in dst_row.iter_mut().enumerate() {
            *dst = RW * r[col] + GW * g[col] + BW * b[col];
        }
    });

    Ok(())
}

/// Reduce an image to a single luma plane.
///
/// Images with 3 or more channels are converted with [`gray_from_rgb`];
/// single channel images are returned as a copy of their only plane.
///
/// # Errors
///
/// Returns [`ImageError::UnsupportedChannelCount`] for any other channel count.
///
/// # Example
///
/// ```
/// use edgemap_image::{Image, ImageSize};
/// use edgemap_imgproc::color::to_grayscale;
///
/// let image = Image::from_interleaved(
///     ImageSize { width: 1, height: 1 },
///     3,
///     vec![100.0f32, 100.0, 100.0],
/// )
/// .unwrap();
///
/// let gray = to_grayscale(&image).unwrap();
/// assert!((gray.as_slice()[0] - 100.0).abs() < 0.05);
/// ```
pub fn to_grayscale(src: &Image<f32>) -> Result<Plane<f32>, ImageError> {
    match src.num_channels() {
        1 => Ok(src.plane(0)?.clone()),
        n if n >= 3 => {
            let mut gray = Plane::from_size_val(src.size(), 0.0f32);
            gray_from_rgb(src, &mut gray)?;
            Ok(gray)
        }
        n => {
            log::error!("Unsupported number of channels: {n}");
            Err(ImageError::UnsupportedChannelCount(n))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use edgemap_image::ImageSize;

    #[test]
    fn gray_from_rgb_weights() -> Result<(), ImageError> {
        let image = Image::from_interleaved(
            ImageSize {
                width: 3,
                height: 1,
            },
            3,
            vec![
                255.0f32, 0.0, 0.0, // red
                0.0, 255.0, 0.0, // green
                0.0, 0.0, 255.0, // blue
            ],
        )?;

        let mut gray = Plane::from_size_val(image.size(), 0.0);
        gray_from_rgb(&image, &mut gray)?;

        assert_relative_eq!(gray.as_slice()[0], 0.2989 * 255.0, epsilon = 1e-3);
        assert_relative_eq!(gray.as_slice()[1], 0.5870 * 255.0, epsilon = 1e-3);
        assert_relative_eq!(gray.as_slice()[2], 0.1140 * 255.0, epsilon = 1e-3);
        Ok(())
    }

    #[test]
    fn gray_of_neutral_is_identity() -> Result<(), ImageError> {
        for v in [0.0f32, 1.0, 17.0, 128.0, 254.0, 255.0] {
            let image = Image::from_interleaved([2, 2].into(), 3, vec![v; 12])?;
            let gray = to_grayscale(&image)?;
            for &g in gray.as_slice() {
                // the BT.601 weights sum to 0.9999
                assert_relative_eq!(g, v, epsilon = 0.03);
            }
        }
        Ok(())
    }

    #[test]
    fn gray_ignores_alpha() -> Result<(), ImageError> {
        let rgb = Image::from_interleaved([1, 1].into(), 3, vec![10.0f32, 20.0, 30.0])?;
        let rgba = Image::from_interleaved([1, 1].into(), 4, vec![10.0f32, 20.0, 30.0, 0.0])?;
        assert_eq!(to_grayscale(&rgb)?, to_grayscale(&rgba)?);
        Ok(())
    }

    #[test]
    fn gray_single_channel_passthrough() -> Result<(), ImageError> {
        let data = vec![1.0f32, 2.0, 3.0, 4.0];
        let image = Image::from_interleaved([2, 2].into(), 1, data.clone())?;
        assert_eq!(to_grayscale(&image)?.as_slice(), data.as_slice());
        Ok(())
    }

    #[test]
    fn gray_rejects_two_channels() -> Result<(), ImageError> {
        let image = Image::from_interleaved([1, 1].into(), 2, vec![1.0f32, 2.0])?;
        assert_eq!(
            to_grayscale(&image),
            Err(ImageError::UnsupportedChannelCount(2))
        );

        let mut gray = Plane::from_size_val(image.size(), 0.0);
        assert_eq!(
            gray_from_rgb(&image, &mut gray),
            Err(ImageError::UnsupportedChannelCount(2))
        );
        Ok(())
    }
}
