use crate::error::ImageError;

/// Image size in pixels
///
/// A struct to represent the size of an image in pixels.
///
/// # Examples
///
/// ```
/// use edgemap_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl ImageSize {
    /// Number of pixels covered by the size.
    pub fn area(&self) -> usize {
        self.width * self.height
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// A single channel grid of samples stored in row-major order.
///
/// Planes are the unit the edge pipeline works on: the grayscale plane, the
/// gradient planes and every channel of an [`Image`].
#[derive(Clone, Debug, PartialEq)]
pub struct Plane<T> {
    size: ImageSize,
    data: Vec<T>,
}

impl<T> Plane<T> {
    /// Create a new plane from row-major sample data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the plane in pixels.
    /// * `data` - The samples of the plane, `height` rows of `width` values.
    ///
    /// # Errors
    ///
    /// If the length of the data does not match the plane size, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use edgemap_image::{ImageSize, Plane};
    ///
    /// let plane = Plane::new(ImageSize { width: 2, height: 3 }, vec![0u8; 6]).unwrap();
    ///
    /// assert_eq!(plane.width(), 2);
    /// assert_eq!(plane.height(), 3);
    /// ```
    pub fn new(size: ImageSize, data: Vec<T>) -> Result<Self, ImageError> {
        if data.len() != size.area() {
            return Err(ImageError::InvalidChannelShape(data.len(), size.area()));
        }
        Ok(Self { size, data })
    }

    /// Create a new plane with every sample set to `val`.
    pub fn from_size_val(size: ImageSize, val: T) -> Self
    where
        T: Clone,
    {
        Self {
            size,
            data: vec![val; size.area()],
        }
    }

    /// Get the size of the plane in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Get the width of the plane in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the plane in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the number of columns of the plane.
    pub fn cols(&self) -> usize {
        self.size.width
    }

    /// Get the number of rows of the plane.
    pub fn rows(&self) -> usize {
        self.size.height
    }

    /// Get the sample at the given `row` and `col`, if inside the plane.
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row >= self.size.height || col >= self.size.width {
            return None;
        }
        self.data.get(row * self.size.width + col)
    }

    /// Get a mutable reference to the sample at `row` and `col`, if inside the plane.
    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut T> {
        if row >= self.size.height || col >= self.size.width {
            return None;
        }
        self.data.get_mut(row * self.size.width + col)
    }

    /// Get a row of the plane as a slice.
    pub fn row(&self, row: usize) -> Option<&[T]> {
        if row >= self.size.height {
            return None;
        }
        let start = row * self.size.width;
        Some(&self.data[start..start + self.size.width])
    }

    /// Get the samples of the plane in row-major order.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Get the samples of the plane in row-major order as a mutable slice.
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Apply `f` to every sample, producing a new plane of the same size.
    pub fn map<U>(&self, f: impl Fn(&T) -> U) -> Plane<U> {
        Plane {
            size: self.size,
            data: self.data.iter().map(f).collect(),
        }
    }

    /// Cast the samples of the plane to a different type.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::CastError`] if a sample is not representable in `U`.
    pub fn cast<U>(&self) -> Result<Plane<U>, ImageError>
    where
        T: num_traits::NumCast + Copy,
        U: num_traits::NumCast,
    {
        let data = self
            .data
            .iter()
            .map(|&x| U::from(x).ok_or(ImageError::CastError))
            .collect::<Result<Vec<U>, ImageError>>()?;
        Ok(Plane {
            size: self.size,
            data,
        })
    }
}

/// Represents an image as an ordered sequence of channel planes.
///
/// Every plane shares the same size. Decoders produce interleaved buffers which
/// are split into planes with [`Image::from_interleaved`]; encoders take the
/// inverse path through [`Image::to_interleaved`].
#[derive(Clone, Debug, PartialEq)]
pub struct Image<T> {
    size: ImageSize,
    planes: Vec<Plane<T>>,
}

impl<T> Image<T> {
    /// Create a new image from its channel planes.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::EmptyImage`] without planes and
    /// [`ImageError::PlaneSizeMismatch`] when the planes differ in size.
    pub fn from_planes(planes: Vec<Plane<T>>) -> Result<Self, ImageError> {
        let size = planes.first().ok_or(ImageError::EmptyImage)?.size();

        if let Some((i, plane)) = planes.iter().enumerate().find(|(_, p)| p.size() != size) {
            return Err(ImageError::PlaneSizeMismatch(
                i,
                plane.width(),
                plane.height(),
                size.width,
                size.height,
            ));
        }

        Ok(Self { size, planes })
    }

    /// Create a new image by de-interleaving row-major, channel-interleaved data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `num_channels` - The number of interleaved channels.
    /// * `data` - The pixel data with layout (H, W, C).
    ///
    /// # Errors
    ///
    /// If the length of the pixel data does not match the image size, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use edgemap_image::{Image, ImageSize};
    ///
    /// let image = Image::from_interleaved(
    ///     ImageSize { width: 2, height: 1 },
    ///     3,
    ///     vec![1u8, 2, 3, 4, 5, 6],
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(image.num_channels(), 3);
    /// assert_eq!(image.plane(1).unwrap().as_slice(), &[2, 5]);
    /// ```
    pub fn from_interleaved(
        size: ImageSize,
        num_channels: usize,
        data: Vec<T>,
    ) -> Result<Self, ImageError>
    where
        T: Copy,
    {
        if num_channels == 0 {
            return Err(ImageError::EmptyImage);
        }

        let expected = size.area() * num_channels;
        if data.len() != expected {
            return Err(ImageError::InvalidChannelShape(data.len(), expected));
        }

        let planes = (0..num_channels)
            .map(|c| {
                let samples = data
                    .iter()
                    .skip(c)
                    .step_by(num_channels)
                    .copied()
                    .collect::<Vec<_>>();
                Plane::new(size, samples)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { size, planes })
    }

    /// Interleave the planes back into a row-major (H, W, C) buffer.
    pub fn to_interleaved(&self) -> Vec<T>
    where
        T: Copy,
    {
        let mut data = Vec::with_capacity(self.size.area() * self.num_channels());
        for idx in 0..self.size.area() {
            for plane in &self.planes {
                data.push(plane.as_slice()[idx]);
            }
        }
        data
    }

    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Get the width of the image in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the image in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the number of columns of the image.
    pub fn cols(&self) -> usize {
        self.size.width
    }

    /// Get the number of rows of the image.
    pub fn rows(&self) -> usize {
        self.size.height
    }

    /// Get the number of channels in the image.
    pub fn num_channels(&self) -> usize {
        self.planes.len()
    }

    /// Get a channel plane of the image.
    ///
    /// # Errors
    ///
    /// If the channel index is out of bounds, an error is returned.
    pub fn plane(&self, channel: usize) -> Result<&Plane<T>, ImageError> {
        self.planes
            .get(channel)
            .ok_or(ImageError::ChannelIndexOutOfBounds(
                channel,
                self.planes.len(),
            ))
    }

    /// Get all channel planes in order.
    pub fn planes(&self) -> &[Plane<T>] {
        &self.planes
    }

    /// Keep only the first `num_channels` planes.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::ChannelIndexOutOfBounds`] if the image has fewer channels.
    pub fn take_channels(&self, num_channels: usize) -> Result<Image<T>, ImageError>
    where
        T: Clone,
    {
        if num_channels == 0 {
            return Err(ImageError::EmptyImage);
        }
        if num_channels > self.planes.len() {
            return Err(ImageError::ChannelIndexOutOfBounds(
                num_channels - 1,
                self.planes.len(),
            ));
        }
        Ok(Self {
            size: self.size,
            planes: self.planes[..num_channels].to_vec(),
        })
    }

    /// Cast the pixel data of the image to a different type.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::CastError`] if a sample is not representable in `U`.
    pub fn cast<U>(&self) -> Result<Image<U>, ImageError>
    where
        T: num_traits::NumCast + Copy,
        U: num_traits::NumCast,
    {
        let planes = self
            .planes
            .iter()
            .map(|p| p.cast())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Image {
            size: self.size,
            planes,
        })
    }
}
