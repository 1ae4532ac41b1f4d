use std::path::Path;

use edgemap_image::{Image, ImageSize};
use image::DynamicImage;

use crate::{error::IoError, png};

/// Reads an image from the given file path.
///
/// The method tries to read from any image format supported by the image crate.
/// 8-bit luma, luma + alpha, rgb and rgba images keep their channel count; any
/// other pixel format is converted to rgb8, or rgba8 when it carries alpha.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
///
/// # Returns
///
/// An image containing the de-interleaved 8-bit channel planes.
pub fn read_image_any(file_path: impl AsRef<Path>) -> Result<Image<u8>, IoError> {
    let file_path = file_path.as_ref();

    // verify the file exists
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    let img = image::ImageReader::open(file_path)?
        .with_guessed_format()?
        .decode()?;

    image_from_dynamic(img)
}

fn image_from_dynamic(img: DynamicImage) -> Result<Image<u8>, IoError> {
    let size = ImageSize {
        width: img.width() as usize,
        height: img.height() as usize,
    };

    let (channels, data) = match img {
        DynamicImage::ImageLuma8(buf) => (1, buf.into_raw()),
        DynamicImage::ImageLumaA8(buf) => (2, buf.into_raw()),
        DynamicImage::ImageRgb8(buf) => (3, buf.into_raw()),
        DynamicImage::ImageRgba8(buf) => (4, buf.into_raw()),
        other => {
            let color = other.color();
            log::debug!("converting {color:?} samples to 8 bits");
            if color.has_alpha() {
                (4, other.into_rgba8().into_raw())
            } else {
                (3, other.into_rgb8().into_raw())
            }
        }
    };

    Ok(Image::from_interleaved(size, channels, data)?)
}

/// Reads an image, using the native PNG decoder for `.png` files.
///
/// Other formats go through [`read_image_any`].
pub fn read_image(file_path: impl AsRef<Path>) -> Result<Image<u8>, IoError> {
    let file_path = file_path.as_ref();
    let is_png = file_path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));

    if is_png {
        png::read_image_png(file_path)
    } else {
        read_image_any(file_path)
    }
}

/// Writes an 8-bit image to a PNG file.
///
/// # Errors
///
/// Returns [`IoError::InvalidFileExtension`] unless the path ends in `.png`.
pub fn write_image(file_path: impl AsRef<Path>, image: &Image<u8>) -> Result<(), IoError> {
    let file_path = file_path.as_ref();
    let is_png = file_path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
    if !is_png {
        return Err(IoError::InvalidFileExtension(file_path.to_path_buf()));
    }

    png::write_image_png(file_path, image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, RgbImage, RgbaImage};

    #[test]
    fn read_any_keeps_channels() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;

        let gray_path = tmp_dir.path().join("gray.png");
        GrayImage::from_fn(4, 3, |x, y| image::Luma([(x * 10 + y) as u8])).save(&gray_path)?;
        let gray = read_image_any(&gray_path)?;
        assert_eq!(gray.num_channels(), 1);
        assert_eq!(gray.size(), ImageSize { width: 4, height: 3 });
        assert_eq!(gray.plane(0)?.get(2, 3), Some(&32));

        let rgb_path = tmp_dir.path().join("rgb.bmp");
        RgbImage::from_fn(4, 3, |x, y| image::Rgb([x as u8, y as u8, 7])).save(&rgb_path)?;
        let rgb = read_image_any(&rgb_path)?;
        assert_eq!(rgb.num_channels(), 3);
        assert_eq!(rgb.plane(2)?.as_slice(), &[7u8; 12]);
        Ok(())
    }

    #[test]
    fn read_image_dispatches_on_extension() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;

        let rgba = RgbaImage::from_fn(5, 2, |x, y| image::Rgba([x as u8, y as u8, 1, 200]));
        let png_path = tmp_dir.path().join("rgba.png");
        rgba.save(&png_path)?;

        let from_png = read_image(&png_path)?;
        let from_any = read_image_any(&png_path)?;
        assert_eq!(from_png, from_any);
        assert_eq!(from_png.num_channels(), 4);
        assert_eq!(from_png.to_interleaved(), rgba.into_raw());
        Ok(())
    }

    #[test]
    fn read_any_errors() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;

        assert!(matches!(
            read_image_any(tmp_dir.path().join("nope.jpg")),
            Err(IoError::FileDoesNotExist(_))
        ));

        let garbage = tmp_dir.path().join("garbage.jpg");
        std::fs::write(&garbage, b"not an image at all")?;
        assert!(matches!(
            read_image_any(&garbage),
            Err(IoError::ImageDecodeError(_))
        ));
        Ok(())
    }

    #[test]
    fn write_image_requires_png() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let image = Image::from_interleaved([2, 2].into(), 1, vec![0u8, 1, 2, 3])?;

        assert!(matches!(
            write_image(tmp_dir.path().join("out.jpg"), &image),
            Err(IoError::InvalidFileExtension(_))
        ));

        let path = tmp_dir.path().join("out.PNG");
        write_image(&path, &image)?;
        assert_eq!(read_image(&path)?, image);
        Ok(())
    }
}
