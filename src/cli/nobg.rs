//! `pipit nobg` - key out near-white sprite backgrounds in place.
//!
//! Each configured file is processed independently: a missing file is
//! skipped, a failed file is reported, and the batch always continues.
//! Outcomes are collected into a summary printed at the end.

use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use image::{DynamicImage, ImageFormat};

use crate::config::PipitConfig;
use crate::image::background::key_out_white;
use crate::log;
use crate::logger::{status_err, status_ok, status_skip};

/// Outcome of processing one file.
#[derive(Debug)]
pub enum FileOutcome {
    /// File rewritten; `keyed` near-white pixels made transparent.
    Processed { keyed: usize },
    /// File did not exist; skipped.
    Missing,
    /// Decode, transform or save failed; the batch continued.
    Failed(anyhow::Error),
}

/// Batch summary counters.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub processed: usize,
    pub missing: usize,
    pub failed: usize,
}

impl Summary {
    fn record(&mut self, outcome: &FileOutcome) {
        match outcome {
            FileOutcome::Processed { .. } => self.processed += 1,
            FileOutcome::Missing => self.missing += 1,
            FileOutcome::Failed(_) => self.failed += 1,
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "done: {} processed, {} missing, {} failed",
            self.processed, self.missing, self.failed
        )
    }
}

/// Run the nobg batch over the configured file list.
///
/// Always returns `Ok`: individual failures end up in the summary, not the
/// exit status.
pub fn run(config: &PipitConfig) -> Result<()> {
    let dir = config.asset_dir();
    let threshold = config.nobg.threshold;

    log!(
        "nobg";
        "{} file(s) in {}, threshold {}",
        config.nobg.files.len(),
        dir.display(),
        threshold
    );

    let mut summary = Summary::default();
    for name in &config.nobg.files {
        let outcome = process_file(&dir.join(name), threshold);
        match &outcome {
            FileOutcome::Processed { keyed } => {
                status_ok(&format!("{name} ({keyed} pixel(s) keyed)"));
            }
            FileOutcome::Missing => status_skip(&format!("{name}: file not found")),
            FileOutcome::Failed(err) => status_err(name, &format!("{err:#}")),
        }
        summary.record(&outcome);
    }

    log!("nobg"; "{summary}");
    Ok(())
}

/// Process one file in place. Never propagates; errors become outcomes.
pub fn process_file(path: &Path, threshold: u8) -> FileOutcome {
    if !path.exists() {
        return FileOutcome::Missing;
    }
    match key_out_file(path, threshold) {
        Ok(keyed) => FileOutcome::Processed { keyed },
        Err(err) => FileOutcome::Failed(err),
    }
}

/// Decode forcing RGBA, key out near-white pixels, re-encode as PNG.
fn key_out_file(path: &Path, threshold: u8) -> Result<usize> {
    let img =
        image::open(path).with_context(|| format!("failed to decode `{}`", path.display()))?;
    let mut rgba = img.to_rgba8();
    let keyed = key_out_white(&mut rgba, threshold);

    DynamicImage::ImageRgba8(rgba)
        .save_with_format(path, ImageFormat::Png)
        .with_context(|| format!("failed to save `{}`", path.display()))?;
    Ok(keyed)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use image::{DynamicImage, Rgba, RgbaImage};

    use super::{FileOutcome, Summary, process_file};

    fn write_sprite(path: &Path) {
        let mut img = RgbaImage::from_pixel(2, 2, Rgba([255, 255, 255, 255]));
        img.put_pixel(1, 1, Rgba([30, 30, 30, 255]));
        DynamicImage::ImageRgba8(img).save(path).unwrap();
    }

    #[test]
    fn missing_file_is_skipped_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = process_file(&dir.path().join("gone.png"), 245);
        assert!(matches!(outcome, FileOutcome::Missing));
    }

    #[test]
    fn processed_file_has_transparent_background() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("egg.png");
        write_sprite(&path);

        let outcome = process_file(&path, 245);
        assert!(matches!(outcome, FileOutcome::Processed { keyed: 3 }));

        let out = image::open(&path).unwrap().to_rgba8();
        assert_eq!(out.get_pixel(0, 0), &Rgba([255, 255, 255, 0]));
        assert_eq!(out.get_pixel(1, 1), &Rgba([30, 30, 30, 255]));
    }

    #[test]
    fn running_twice_matches_running_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("egg.png");
        write_sprite(&path);

        process_file(&path, 245);
        let first = image::open(&path).unwrap().to_rgba8();
        let outcome = process_file(&path, 245);

        // Transparent near-white pixels still match the channel test
        assert!(matches!(outcome, FileOutcome::Processed { keyed: 3 }));
        assert_eq!(image::open(&path).unwrap().to_rgba8(), first);
    }

    #[test]
    fn decode_failure_does_not_stop_the_batch() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("bad.png");
        let good = dir.path().join("good.png");
        fs::write(&bad, b"not a png").unwrap();
        write_sprite(&good);

        let mut summary = Summary::default();
        for path in [&bad, &good] {
            summary.record(&process_file(path, 245));
        }

        assert_eq!(
            summary,
            Summary {
                processed: 1,
                missing: 0,
                failed: 1
            }
        );
    }

    #[test]
    fn summary_display_counts() {
        let summary = Summary {
            processed: 5,
            missing: 1,
            failed: 2,
        };
        assert_eq!(summary.to_string(), "done: 5 processed, 1 missing, 2 failed");
    }
}
