use std::{
    fs::{self, File},
    io::{BufWriter, Read},
    path::Path,
};

use edgemap_image::{Image, ImageSize, Plane};
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};

use crate::error::IoError;

/// Read a PNG image as 8-bit samples, keeping its channel count.
///
/// Palette and low bit depth images are expanded and 16-bit images are
/// stripped to 8 bits, so the result has 1 (gray), 2 (gray + alpha),
/// 3 (rgb) or 4 (rgba) channels.
///
/// # Arguments
///
/// * `file_path` - The path to the PNG file.
///
/// # Returns
///
/// The decoded image split into channel planes.
pub fn read_image_png(file_path: impl AsRef<Path>) -> Result<Image<u8>, IoError> {
    // verify the file exists
    let file_path = file_path.as_ref();
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    // verify the file extension
    let is_png = file_path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
    if !is_png {
        return Err(IoError::InvalidFileExtension(file_path.to_path_buf()));
    }

    decode_image_png(&fs::read(file_path)?)
}

/// Decode a PNG image from raw bytes.
///
/// See [`read_image_png`] for the channel layout of the result.
///
/// # Arguments
///
/// - `bytes` - Raw bytes of the png file
pub fn decode_image_png(bytes: &[u8]) -> Result<Image<u8>, IoError> {
    let (buf, size, channels) = decode_png_impl(bytes)?;
    Ok(Image::from_interleaved(size, channels, buf)?)
}

// utility function to decode a png stream into an interleaved 8-bit buffer
fn decode_png_impl(source: impl Read) -> Result<(Vec<u8>, ImageSize, usize), IoError> {
    let mut decoder = Decoder::new(source);
    decoder.set_transformations(Transformations::EXPAND | Transformations::STRIP_16);

    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::PngDecodeError(e.to_string()))?;

    let (color_type, _) = reader.output_color_type();

    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::PngDecodeError(e.to_string()))?;
    buf.truncate(info.buffer_size());

    let size = ImageSize {
        width: info.width as usize,
        height: info.height as usize,
    };

    Ok((buf, size, color_type.samples()))
}

/// Writes an 8-bit image with 1 to 4 channels to the given file path.
///
/// # Arguments
///
/// - `file_path` - The path to the PNG image.
/// - `image` - The image to encode.
///
/// # Errors
///
/// Returns [`IoError::UnsupportedChannelCount`] for more than 4 channels.
pub fn write_image_png(file_path: impl AsRef<Path>, image: &Image<u8>) -> Result<(), IoError> {
    let color_type = match image.num_channels() {
        1 => ColorType::Grayscale,
        2 => ColorType::GrayscaleAlpha,
        3 => ColorType::Rgb,
        4 => ColorType::Rgba,
        n => return Err(IoError::UnsupportedChannelCount(n)),
    };

    write_png_impl(
        file_path,
        &image.to_interleaved(),
        image.size(),
        BitDepth::Eight,
        color_type,
    )
}

/// Writes a single 8-bit plane as a grayscale PNG to the given file path.
///
/// # Arguments
///
/// - `file_path` - The path to the PNG image.
/// - `plane` - The grayscale samples.
pub fn write_image_png_gray8(
    file_path: impl AsRef<Path>,
    plane: &Plane<u8>,
) -> Result<(), IoError> {
    write_png_impl(
        file_path,
        plane.as_slice(),
        plane.size(),
        BitDepth::Eight,
        ColorType::Grayscale,
    )
}

fn write_png_impl(
    file_path: impl AsRef<Path>,
    image_data: &[u8],
    image_size: ImageSize,
    // Make sure you set `depth` correctly
    depth: BitDepth,
    color_type: ColorType,
) -> Result<(), IoError> {
    let file = File::create(file_path)?;

    let mut encoder = Encoder::new(
        BufWriter::new(file),
        image_size.width as u32,
        image_size.height as u32,
    );
    encoder.set_color(color_type);
    encoder.set_depth(depth);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::PngEncodingError(e.to_string()))?;
    writer
        .write_image_data(image_data)
        .map_err(|e| IoError::PngEncodingError(e.to_string()))?;
    writer
        .finish()
        .map_err(|e| IoError::PngEncodingError(e.to_string()))?;
    Ok(())
}
