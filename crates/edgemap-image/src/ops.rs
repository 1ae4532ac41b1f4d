use crate::{Image, ImageError, Plane};

/// Quantize a real-valued sample to 8 bits.
///
/// Values are saturated to `[0, 255]` and then truncated toward zero, so the
/// encoder never sees wrapped values. `NaN` maps to 0.
#[inline]
pub fn saturate_u8(x: f32) -> u8 {
    if x.is_nan() {
        return 0;
    }
    x.clamp(0.0, 255.0) as u8
}

/// Quantize a real-valued plane to 8 bits using [`saturate_u8`].
pub fn plane_to_u8(src: &Plane<f32>) -> Plane<u8> {
    src.map(|&x| saturate_u8(x))
}

/// Quantize every plane of a real-valued image to 8 bits using [`saturate_u8`].
pub fn image_to_u8(src: &Image<f32>) -> Result<Image<u8>, ImageError> {
    Image::from_planes(src.planes().iter().map(plane_to_u8).collect())
}

/// Promote an 8-bit image to real-valued samples in `[0, 255]`.
pub fn image_to_f32(src: &Image<u8>) -> Result<Image<f32>, ImageError> {
    src.cast()
}
