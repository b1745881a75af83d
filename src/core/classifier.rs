//! White-background detection by corner sampling.
//!
//! Product shots on a white sweep have pure (or near-pure) white in the top
//! corners, so the classifier only looks at the 5x5 pixel block in each top
//! corner. Cost is fixed at 50 pixels regardless of image resolution.

use std::path::Path;

use image::{DynamicImage, RgbImage};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Side length of the sampled corner block, in pixels.
pub const CORNER_BLOCK: u32 = 5;

/// Per-channel mean above which a corner counts as white under
/// [`BackgroundPolicy::ThresholdAverage`].
pub const CHANNEL_MEAN_THRESHOLD: f32 = 240.0;

/// Heuristic used to decide whether a corner block is white.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BackgroundPolicy {
    /// Every pixel in the block must be exactly (255, 255, 255).
    #[default]
    ExactMatch,
    /// The per-channel means over the block must all exceed 240.
    ThresholdAverage,
}

impl BackgroundPolicy {
    pub fn as_str(&self) -> &str {
        match self {
            BackgroundPolicy::ExactMatch => "Exact Match",
            BackgroundPolicy::ThresholdAverage => "Threshold Average",
        }
    }

    pub fn all() -> Vec<BackgroundPolicy> {
        vec![
            BackgroundPolicy::ExactMatch,
            BackgroundPolicy::ThresholdAverage,
        ]
    }
}

/// Classify an already-decoded image. Returns true for a white background.
///
/// Images smaller than the corner block in either dimension are classified
/// non-white.
pub fn is_white_background(img: &DynamicImage, policy: BackgroundPolicy) -> bool {
    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();

    if width < CORNER_BLOCK || height < CORNER_BLOCK {
        return false;
    }

    let left = corner_block(&rgb, 0);
    let right = corner_block(&rgb, width - CORNER_BLOCK);

    match policy {
        BackgroundPolicy::ExactMatch => block_is_pure_white(&left) || block_is_pure_white(&right),
        BackgroundPolicy::ThresholdAverage => {
            block_mean_is_white(&left) || block_mean_is_white(&right)
        }
    }
}

/// Classify an image file on disk. A file that cannot be decoded is
/// classified non-white rather than failing the run.
pub fn classify_file(path: &Path, policy: BackgroundPolicy) -> bool {
    match image::open(path) {
        Ok(img) => is_white_background(&img, policy),
        Err(e) => {
            debug!("Failed to decode {:?}, classifying as non-white: {}", path, e);
            false
        }
    }
}

/// Collect the 5x5 block starting at column `x0` in the top rows.
fn corner_block(rgb: &RgbImage, x0: u32) -> Vec<[u8; 3]> {
    let mut pixels = Vec::with_capacity((CORNER_BLOCK * CORNER_BLOCK) as usize);
    for y in 0..CORNER_BLOCK {
        for x in x0..x0 + CORNER_BLOCK {
            pixels.push(rgb.get_pixel(x, y).0);
        }
    }
    pixels
}

fn block_is_pure_white(block: &[[u8; 3]]) -> bool {
    block.iter().all(|p| *p == [255, 255, 255])
}

fn block_mean_is_white(block: &[[u8; 3]]) -> bool {
    let count = block.len() as f32;
    let mut sums = [0.0f32; 3];
    for p in block {
        sums[0] += p[0] as f32;
        sums[1] += p[1] as f32;
        sums[2] += p[2] as f32;
    }
    sums.iter().all(|s| s / count > CHANNEL_MEAN_THRESHOLD)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn uniform_image(width: u32, height: u32, color: [u8; 3]) -> DynamicImage {
        let mut img = RgbImage::new(width, height);
        for pixel in img.pixels_mut() {
            *pixel = Rgb(color);
        }
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn test_pure_white_corners_classify_white() {
        let img = uniform_image(10, 10, [255, 255, 255]);
        assert!(is_white_background(&img, BackgroundPolicy::ExactMatch));
        assert!(is_white_background(&img, BackgroundPolicy::ThresholdAverage));
    }

    #[test]
    fn test_one_off_pixel_fails_exact_match_for_that_corner_only() {
        let mut img = uniform_image(10, 10, [255, 255, 255]).to_rgb8();
        // Dirty the top-left corner; top-right stays pure white.
        img.put_pixel(0, 0, Rgb([254, 255, 255]));
        let img = DynamicImage::ImageRgb8(img);
        assert!(is_white_background(&img, BackgroundPolicy::ExactMatch));

        // Dirty both corners and exact match must fail overall.
        let mut both = img.to_rgb8();
        both.put_pixel(9, 0, Rgb([254, 255, 255]));
        let both = DynamicImage::ImageRgb8(both);
        assert!(!is_white_background(&both, BackgroundPolicy::ExactMatch));
        // The same image still passes the averaging policy.
        assert!(is_white_background(&both, BackgroundPolicy::ThresholdAverage));
    }

    #[test]
    fn test_threshold_average_boundary() {
        // 240 exactly does not exceed the threshold.
        let at = uniform_image(10, 10, [240, 240, 240]);
        assert!(!is_white_background(&at, BackgroundPolicy::ThresholdAverage));

        let above = uniform_image(10, 10, [241, 241, 241]);
        assert!(is_white_background(&above, BackgroundPolicy::ThresholdAverage));
    }

    #[test]
    fn test_gray_background_is_non_white() {
        let img = uniform_image(10, 10, [200, 200, 200]);
        assert!(!is_white_background(&img, BackgroundPolicy::ExactMatch));
        assert!(!is_white_background(&img, BackgroundPolicy::ThresholdAverage));
    }

    #[test]
    fn test_image_smaller_than_corner_block_is_non_white() {
        let img = uniform_image(4, 10, [255, 255, 255]);
        assert!(!is_white_background(&img, BackgroundPolicy::ExactMatch));
        let img = uniform_image(10, 3, [255, 255, 255]);
        assert!(!is_white_background(&img, BackgroundPolicy::ThresholdAverage));
    }

    #[test]
    fn test_alpha_channel_is_ignored() {
        let mut img = image::RgbaImage::new(10, 10);
        for pixel in img.pixels_mut() {
            *pixel = image::Rgba([255, 255, 255, 0]);
        }
        let img = DynamicImage::ImageRgba8(img);
        assert!(is_white_background(&img, BackgroundPolicy::ExactMatch));
    }

    #[test]
    fn test_classification_is_idempotent() {
        let img = uniform_image(10, 10, [255, 255, 255]);
        let first = is_white_background(&img, BackgroundPolicy::ExactMatch);
        let second = is_white_background(&img, BackgroundPolicy::ExactMatch);
        assert_eq!(first, second);
    }

    #[test]
    fn test_unreadable_file_classifies_non_white() {
        let path = Path::new("does-not-exist.png");
        assert!(!classify_file(path, BackgroundPolicy::ExactMatch));
    }
}
