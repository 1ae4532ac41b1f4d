use argh::FromArgs;
use std::path::PathBuf;

use edgemap::{
    image::Plane, imgproc::normalize, DetectorType, EdgeDetector, GradientDirection,
};

#[derive(FromArgs)]
/// Compute an edge map of an image and save it as a grayscale PNG
struct Args {
    /// path to an input image
    #[argh(option, short = 'i')]
    input: PathBuf,

    /// path to the output PNG
    #[argh(option, short = 'o')]
    output: PathBuf,

    /// the detector: sobel, prewitt or roberts_cross
    #[argh(option, default = "String::from(\"sobel\")")]
    detector: String,

    /// the gradient direction: x, y or mag
    #[argh(option, default = "String::from(\"mag\")")]
    direction: String,

    /// stretch the edge map to [0, 255] before saving
    #[argh(switch)]
    normalize: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let detector_type: DetectorType = args.detector.parse()?;
    let direction: GradientDirection = args.direction.parse()?;

    let mut detector = EdgeDetector::new();
    detector.load_image(&args.input)?;

    let mut edges = detector.apply_detector(detector_type, direction)?;

    if args.normalize {
        let mut stretched = Plane::from_size_val(edges.size(), 0.0f32);
        normalize::normalize_min_max(&edges, &mut stretched, 0.0, 255.0)?;
        edges = stretched;
    }

    detector.save_edge_image(&args.output, &edges)?;
    log::info!(
        "{detector_type} {direction} edges of {} written to {}",
        args.input.display(),
        args.output.display()
    );

    Ok(())
}
