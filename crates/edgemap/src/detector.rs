use std::path::Path;

use edgemap_image::{ops, Image, ImageError, Plane};
use edgemap_imgproc::{
    color::to_grayscale,
    edges::{detect, GradientDirection},
    filter::DetectorType,
};
use edgemap_io::{functional as F, png};

use crate::error::EdgeError;

/// Selects how [`EdgeDetector::save_image`] encodes the loaded image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ImageType {
    /// Write the first three channels unchanged (single channel images stay gray).
    #[default]
    Color,
    /// Write the BT.601 luma plane as a single channel.
    Grayscale,
}

/// A file based edge detection session.
///
/// The session holds at most one decoded image. Every detector call recomputes
/// the grayscale plane from that image, so calls are independent of each other.
///
/// # Example
///
/// ```no_run
/// use edgemap::{DetectorType, EdgeDetector, GradientDirection};
///
/// let mut detector = EdgeDetector::new();
/// detector.load_image("input.png")?;
///
/// let edges = detector.apply_detector(DetectorType::Sobel, GradientDirection::Magnitude)?;
/// detector.save_edge_image("edges.png", &edges)?;
/// # Ok::<(), edgemap::EdgeError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct EdgeDetector {
    image: Option<Image<f32>>,
}

impl EdgeDetector {
    /// Create a session without an image.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session holding an already decoded image.
    pub fn with_image(image: Image<f32>) -> Self {
        Self { image: Some(image) }
    }

    /// The currently loaded image, if any.
    pub fn image(&self) -> Option<&Image<f32>> {
        self.image.as_ref()
    }

    /// Decode an image file and make it the session image.
    ///
    /// On failure the previously loaded image, if any, is kept.
    pub fn load_image(&mut self, file_path: impl AsRef<Path>) -> Result<(), EdgeError> {
        let file_path = file_path.as_ref();

        let image = F::read_image(file_path)
            .map_err(EdgeError::from)
            .and_then(|img| Ok(ops::image_to_f32(&img)?))
            .inspect_err(|e| log::error!("Error loading image {}: {e}", file_path.display()))?;

        log::debug!(
            "loaded {} with {} channels, {}",
            file_path.display(),
            image.num_channels(),
            image.size()
        );

        self.image = Some(image);
        Ok(())
    }

    fn loaded(&self) -> Result<&Image<f32>, EdgeError> {
        self.image.as_ref().ok_or_else(|| {
            log::error!("No image data available");
            EdgeError::NoImageLoaded
        })
    }

    /// Compute an edge map of the loaded image.
    ///
    /// # Errors
    ///
    /// Returns [`EdgeError::NoImageLoaded`] before a successful [`Self::load_image`],
    /// or the pipeline error (e.g. an unsupported channel count).
    pub fn apply_detector(
        &self,
        detector: DetectorType,
        direction: GradientDirection,
    ) -> Result<Plane<f32>, EdgeError> {
        let image = self.loaded()?;
        Ok(detect(image, detector, direction)?)
    }

    /// Save the loaded image as a PNG.
    ///
    /// [`ImageType::Color`] writes the first three channels of the image, or
    /// the single plane of a grayscale image. Two channel images cannot be
    /// written as color and fail with [`ImageError::UnsupportedChannelCount`].
    ///
    /// # Arguments
    ///
    /// * `file_path` - The destination PNG path.
    /// * `image_type` - Write the color channels or the luma plane.
    pub fn save_image(
        &self,
        file_path: impl AsRef<Path>,
        image_type: ImageType,
    ) -> Result<(), EdgeError> {
        let file_path = file_path.as_ref();
        let image = self.loaded()?;

        let encoded = match (image_type, image.num_channels()) {
            (ImageType::Color, n) if n >= 3 => ops::image_to_u8(&image.take_channels(3)?)?,
            (ImageType::Color, 1) => ops::image_to_u8(image)?,
            (ImageType::Color, n) => {
                log::error!("Cannot save a {n} channel image as color");
                return Err(ImageError::UnsupportedChannelCount(n).into());
            }
            (ImageType::Grayscale, _) => Image::from_planes(vec![ops::plane_to_u8(&to_grayscale(
                image,
            )?)])?,
        };

        F::write_image(file_path, &encoded)
            .inspect_err(|e| log::error!("Failed to save image {}: {e}", file_path.display()))?;
        Ok(())
    }

    /// Save an edge map as a single channel PNG.
    ///
    /// Values are saturated to `[0, 255]` before truncation to 8 bits.
    ///
    /// # Errors
    ///
    /// Returns [`EdgeError::NoImageLoaded`] without a loaded image and
    /// [`EdgeError::EdgeSizeMismatch`] if `edges` does not match its size.
    pub fn save_edge_image(
        &self,
        file_path: impl AsRef<Path>,
        edges: &Plane<f32>,
    ) -> Result<(), EdgeError> {
        let file_path = file_path.as_ref();
        let image = self.loaded()?;

        if edges.size() != image.size() {
            log::error!(
                "Edge plane size {} does not match the image size {}",
                edges.size(),
                image.size()
            );
            return Err(EdgeError::EdgeSizeMismatch(
                edges.width(),
                edges.height(),
                image.width(),
                image.height(),
            ));
        }

        png::write_image_png_gray8(file_path, &ops::plane_to_u8(edges))
            .inspect_err(|e| log::error!("Failed to save image {}: {e}", file_path.display()))?;
        Ok(())
    }
}
