//! Lossless-optimized PNG encode.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{DynamicImage, GenericImageView, ImageEncoder};

/// Write an image as PNG with the smallest lossless output the encoder
/// offers (best compression, adaptive filtering). Pixel data is unchanged.
pub fn save_png_optimized(img: &DynamicImage, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create `{}`", path.display()))?;
    let writer = BufWriter::new(file);

    let encoder =
        PngEncoder::new_with_quality(writer, CompressionType::Best, FilterType::Adaptive);
    encoder
        .write_image(
            img.as_bytes(),
            img.width(),
            img.height(),
            img.color().into(),
        )
        .with_context(|| format!("failed to encode `{}`", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use image::{DynamicImage, GenericImageView, Rgba, RgbaImage};

    use super::save_png_optimized;

    #[test]
    fn round_trips_pixel_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");

        let mut img = RgbaImage::from_pixel(3, 2, Rgba([10, 200, 30, 255]));
        img.put_pixel(1, 1, Rgba([250, 250, 250, 0]));
        save_png_optimized(&DynamicImage::ImageRgba8(img.clone()), &path).unwrap();

        let decoded = image::open(&path).unwrap();
        assert_eq!(decoded.dimensions(), (3, 2));
        assert_eq!(decoded.to_rgba8(), img);
    }
}
