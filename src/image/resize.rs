//! Bounding-dimension resize.
//!
//! Scales an image so its larger dimension equals a target size while
//! preserving aspect ratio. Images already within bounds are left alone.

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};

/// Compute the bounding-dimension target for an image.
///
/// Returns `None` when both dimensions already fit within `max_size`.
/// The secondary dimension truncates rather than rounds, and is clamped to
/// at least 1 so a degenerate aspect ratio cannot produce a zero dimension.
pub fn fit_within(width: u32, height: u32, max_size: u32) -> Option<(u32, u32)> {
    if width <= max_size && height <= max_size {
        return None;
    }

    let ratio = |dim: u32, larger: u32| {
        let scaled = (f64::from(dim) * (f64::from(max_size) / f64::from(larger))) as u32;
        scaled.max(1)
    };

    if width > height {
        Some((max_size, ratio(height, width)))
    } else {
        Some((ratio(width, height), max_size))
    }
}

/// Downscale so the larger dimension equals `max_size`.
///
/// Returns `None` when the image already fits; the caller keeps the
/// original. Uses Lanczos3 resampling.
pub fn shrink_to_bounds(img: &DynamicImage, max_size: u32) -> Option<DynamicImage> {
    let (width, height) = (img.width(), img.height());
    let (new_width, new_height) = fit_within(width, height, max_size)?;
    Some(img.resize_exact(new_width, new_height, FilterType::Lanczos3))
}

#[cfg(test)]
mod tests {
    use image::{GenericImageView, Rgba, RgbaImage};

    use super::{fit_within, shrink_to_bounds};

    #[test]
    fn fits_within_bounds_untouched() {
        assert_eq!(fit_within(600, 600, 600), None);
        assert_eq!(fit_within(1, 1, 600), None);
        assert_eq!(fit_within(599, 600, 600), None);
    }

    #[test]
    fn landscape_truncates_height() {
        assert_eq!(fit_within(1000, 750, 600), Some((600, 450)));
        // 601 * 600 / 1000 = 360.6 -> truncates to 360
        assert_eq!(fit_within(1000, 601, 600), Some((600, 360)));
    }

    #[test]
    fn portrait_truncates_width() {
        assert_eq!(fit_within(750, 1000, 600), Some((450, 600)));
        assert_eq!(fit_within(599, 601, 600), Some((598, 600)));
    }

    #[test]
    fn square_maps_to_square() {
        assert_eq!(fit_within(601, 601, 600), Some((600, 600)));
    }

    #[test]
    fn degenerate_aspect_clamps_to_one() {
        // 1 * 600 / 10000 truncates to 0; clamp keeps the image decodable
        assert_eq!(fit_within(10000, 1, 600), Some((600, 1)));
    }

    #[test]
    fn shrink_returns_none_when_within_bounds() {
        let img = RgbaImage::from_pixel(8, 6, Rgba([10, 20, 30, 255]));
        assert!(shrink_to_bounds(&img.into(), 10).is_none());
    }

    #[test]
    fn shrink_hits_exact_target_dimensions() {
        let img = RgbaImage::from_pixel(20, 15, Rgba([10, 20, 30, 255]));
        let out = shrink_to_bounds(&img.into(), 10).unwrap();
        // 15 * 10 / 20 = 7.5 -> truncates to 7
        assert_eq!((out.width(), out.height()), (10, 7));
    }
}
