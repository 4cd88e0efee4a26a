//! `pipit shrink` - downscale oversized sprites in place.
//!
//! Scans the sprite directory for PNG files and rewrites any image whose
//! width or height exceeds the configured bound. Every file is re-encoded
//! with lossless optimization, resized or not. The batch has no per-file
//! isolation: the first decode/encode failure aborts the run.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::GenericImageView;

use crate::config::PipitConfig;
use crate::image::encode::save_png_optimized;
use crate::image::resize::shrink_to_bounds;
use crate::log;

/// Run the shrink batch over the configured sprite directory.
pub fn run(config: &PipitConfig) -> Result<()> {
    let dir = config.asset_dir();
    let max_size = config.shrink.max_size;

    let files = scan_pngs(&dir)?;
    log!("shrink"; "{} png file(s) in {}", files.len(), dir.display());

    for path in &files {
        shrink_file(path, max_size)?;
    }
    Ok(())
}

/// Scan a directory for PNG files (non-recursive, directory order).
///
/// Only the `.png` name suffix decides inclusion; subdirectories and other
/// files are ignored.
fn scan_pngs(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("failed to read sprite directory `{}`", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        let is_png = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(".png"));
        if is_png && path.is_file() {
            files.push(path);
        }
    }
    Ok(files)
}

/// Shrink a single file in place and report its final size.
fn shrink_file(path: &Path, max_size: u32) -> Result<()> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let mut img =
        image::open(path).with_context(|| format!("failed to decode `{}`", path.display()))?;
    let (width, height) = img.dimensions();
    log!("shrink"; "processing {name}: {width}x{height}");

    if let Some(resized) = shrink_to_bounds(&img, max_size) {
        log!("shrink"; "resized to {}x{}", resized.width(), resized.height());
        img = resized;
    }

    save_png_optimized(&img, path)?;

    let kb = fs::metadata(path)
        .with_context(|| format!("failed to stat `{}`", path.display()))?
        .len() as f64
        / 1024.0;
    log!("shrink"; "saved {name}, new size: {kb:.2} KB");
    Ok(())
}
