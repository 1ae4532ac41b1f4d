use std::{fmt, str::FromStr, sync::OnceLock};

use edgemap_image::ImageError;

/// A square grid of signed weights stored in row-major order.
///
/// Kernels are applied by cross-correlation, i.e. without spatial flipping.
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel {
    size: usize,
    data: Vec<f32>,
}

impl Kernel {
    /// Create a kernel from row-major weights.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::InvalidKernelShape`] unless `data` holds `k * k`
    /// weights for some `k >= 1`.
    pub fn new(data: Vec<f32>) -> Result<Self, ImageError> {
        let size = (data.len() as f64).sqrt().round() as usize;
        if size == 0 || size * size != data.len() {
            return Err(ImageError::InvalidKernelShape(data.len()));
        }
        Ok(Self { size, data })
    }

    /// Create a kernel from a fixed size array of rows.
    ///
    /// # Examples
    ///
    /// ```
    /// use edgemap_imgproc::filter::Kernel;
    ///
    /// let kernel = Kernel::from_rows([[1.0, 0.0], [0.0, -1.0]]);
    /// assert_eq!(kernel.size(), 2);
    /// assert_eq!(kernel.at(1, 1), -1.0);
    /// ```
    pub fn from_rows<const N: usize>(rows: [[f32; N]; N]) -> Self {
        Self {
            size: N,
            data: rows.iter().flatten().copied().collect(),
        }
    }

    /// The side length of the kernel.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Offset of the kernel's top-left cell relative to the output pixel.
    ///
    /// Both 3x3 and 2x2 kernels are anchored at `(i - 1, j - 1)`; the 2x2 case is
    /// therefore not centered on the output pixel.
    pub fn anchor(&self) -> usize {
        self.size / 2
    }

    /// Get the weight at `row` and `col`.
    ///
    /// # Panics
    ///
    /// If `row` or `col` is outside of the kernel.
    #[inline]
    pub fn at(&self, row: usize, col: usize) -> f32 {
        self.data[row * self.size + col]
    }

    /// Get the weights in row-major order.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Return the transposed kernel.
    pub fn transpose(&self) -> Self {
        let n = self.size;
        let data = (0..n * n).map(|idx| self.at(idx % n, idx / n)).collect();
        Self { size: n, data }
    }

    /// Return the kernel with the order of its rows reversed.
    pub fn flip_rows(&self) -> Self {
        let data = self
            .data
            .chunks_exact(self.size)
            .rev()
            .flatten()
            .copied()
            .collect();
        Self {
            size: self.size,
            data,
        }
    }
}

/// The first-derivative edge operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DetectorType {
    /// 3x3 Sobel operator.
    Sobel,
    /// 3x3 Prewitt operator.
    Prewitt,
    /// 2x2 Roberts Cross operator.
    RobertsCross,
}

impl DetectorType {
    /// All the supported detectors.
    pub const ALL: [DetectorType; 3] = [
        DetectorType::Sobel,
        DetectorType::Prewitt,
        DetectorType::RobertsCross,
    ];

    /// The primary (x) kernel of the detector family.
    fn primary_kernel(&self) -> Kernel {
        match self {
            DetectorType::Sobel => {
                Kernel::from_rows([[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]])
            }
            DetectorType::Prewitt => {
                Kernel::from_rows([[-1.0, 0.0, 1.0], [-1.0, 0.0, 1.0], [-1.0, 0.0, 1.0]])
            }
            DetectorType::RobertsCross => Kernel::from_rows([[1.0, 0.0], [0.0, -1.0]]),
        }
    }

    /// Build the (x, y) kernel pair of the detector family.
    ///
    /// The y kernel is derived from the x kernel: transposed for Sobel and
    /// Prewitt, rows reversed then transposed for Roberts Cross.
    pub fn kernels(&self) -> (Kernel, Kernel) {
        let kx = self.primary_kernel();
        let ky = match self {
            DetectorType::Sobel | DetectorType::Prewitt => kx.transpose(),
            DetectorType::RobertsCross => kx.flip_rows().transpose(),
        };
        (kx, ky)
    }
}

impl fmt::Display for DetectorType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            DetectorType::Sobel => "sobel",
            DetectorType::Prewitt => "prewitt",
            DetectorType::RobertsCross => "roberts_cross",
        };
        write!(f, "{name}")
    }
}

impl FromStr for DetectorType {
    type Err = ImageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "sobel" => Ok(DetectorType::Sobel),
            "prewitt" => Ok(DetectorType::Prewitt),
            "roberts" | "roberts_cross" | "robertscross" => Ok(DetectorType::RobertsCross),
            _ => Err(ImageError::InvalidDetector(s.to_string())),
        }
    }
}

/// Read-only table of the (x, y) kernel pairs of every detector family.
#[derive(Debug, Clone)]
pub struct KernelBank {
    sobel: (Kernel, Kernel),
    prewitt: (Kernel, Kernel),
    roberts_cross: (Kernel, Kernel),
}

impl Default for KernelBank {
    fn default() -> Self {
        Self::new()
    }
}

impl KernelBank {
    /// Build every kernel pair.
    pub fn new() -> Self {
        Self {
            sobel: DetectorType::Sobel.kernels(),
            prewitt: DetectorType::Prewitt.kernels(),
            roberts_cross: DetectorType::RobertsCross.kernels(),
        }
    }

    /// The process-wide kernel bank, built on first use.
    pub fn global() -> &'static KernelBank {
        static BANK: OnceLock<KernelBank> = OnceLock::new();
        BANK.get_or_init(KernelBank::new)
    }

    /// Get the (x, y) kernels of a detector family.
    ///
    /// # Examples
    ///
    /// ```
    /// use edgemap_imgproc::filter::{DetectorType, KernelBank};
    ///
    /// let (kx, ky) = KernelBank::global().kernels_for(DetectorType::Sobel);
    /// assert_eq!(kx.transpose(), *ky);
    /// ```
    pub fn kernels_for(&self, detector: DetectorType) -> (&Kernel, &Kernel) {
        let (kx, ky) = match detector {
            DetectorType::Sobel => &self.sobel,
            DetectorType::Prewitt => &self.prewitt,
            DetectorType::RobertsCross => &self.roberts_cross,
        };
        (kx, ky)
    }
}
