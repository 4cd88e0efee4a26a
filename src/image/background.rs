//! Near-white background keying.
//!
//! Sprites in the set ship on a white matte; any pixel whose R, G and B
//! channels all sit above the whiteness threshold is treated as background
//! and made fully transparent. Color channels are preserved so anti-aliased
//! edges composite cleanly.

use image::RgbaImage;

/// Channel value above which a pixel counts as near-white (of 255).
pub const DEFAULT_THRESHOLD: u8 = 245;

/// Key out near-white pixels in place.
///
/// A pixel matches when R, G and B are each strictly greater than
/// `threshold`; matching pixels get alpha 0 with RGB untouched. All other
/// pixels are left unchanged, including their alpha. Returns the number of
/// matching pixels.
///
/// Applying this twice is equivalent to applying it once: the test reads
/// only the color channels, and those are never modified.
pub fn key_out_white(img: &mut RgbaImage, threshold: u8) -> usize {
    let mut keyed = 0;
    for pixel in img.pixels_mut() {
        let [r, g, b, _] = pixel.0;
        if r > threshold && g > threshold && b > threshold {
            pixel.0[3] = 0;
            keyed += 1;
        }
    }
    keyed
}

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};

    use super::{DEFAULT_THRESHOLD, key_out_white};

    #[test]
    fn near_white_becomes_transparent_with_rgb_preserved() {
        let mut img = RgbaImage::from_pixel(2, 1, Rgba([250, 248, 246, 255]));
        let keyed = key_out_white(&mut img, DEFAULT_THRESHOLD);

        assert_eq!(keyed, 2);
        assert_eq!(img.get_pixel(0, 0), &Rgba([250, 248, 246, 0]));
        assert_eq!(img.get_pixel(1, 0), &Rgba([250, 248, 246, 0]));
    }

    #[test]
    fn threshold_is_strict() {
        // all three channels must exceed the threshold, not merely equal it
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, Rgba([245, 245, 245, 255]));
        img.put_pixel(1, 0, Rgba([246, 246, 246, 255]));

        let keyed = key_out_white(&mut img, DEFAULT_THRESHOLD);
        assert_eq!(keyed, 1);
        assert_eq!(img.get_pixel(0, 0), &Rgba([245, 245, 245, 255]));
        assert_eq!(img.get_pixel(1, 0), &Rgba([246, 246, 246, 0]));
    }

    #[test]
    fn one_low_channel_keeps_pixel_opaque() {
        let mut img = RgbaImage::from_pixel(1, 1, Rgba([250, 250, 100, 255]));
        assert_eq!(key_out_white(&mut img, DEFAULT_THRESHOLD), 0);
        assert_eq!(img.get_pixel(0, 0), &Rgba([250, 250, 100, 255]));
    }

    #[test]
    fn idempotent_on_second_pass() {
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, Rgba([255, 255, 255, 255]));
        img.put_pixel(1, 0, Rgba([30, 30, 30, 128]));

        key_out_white(&mut img, DEFAULT_THRESHOLD);
        let first = img.clone();
        key_out_white(&mut img, DEFAULT_THRESHOLD);

        assert_eq!(img, first);
        assert_eq!(img.get_pixel(0, 0), &Rgba([255, 255, 255, 0]));
        assert_eq!(img.get_pixel(1, 0), &Rgba([30, 30, 30, 128]));
    }
}
