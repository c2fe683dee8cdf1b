use crate::constants::PROGRESS_BAR_TEMPLATE;
use crate::crusher::{CrushReport, ImageCrusher};
use crate::error::{CrushError, Result};
use crate::formats::is_batch_image;
use crate::shell::{CommandRunner, SystemShell};
use crate::utils::format_file_size;
use crate::{info, logger, verbose, warn};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Instant;
use walkdir::WalkDir;

/// Per-file results of a batch run. Every fetched image lands in exactly
/// one of the two lists.
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub reports: Vec<CrushReport>,
    pub failures: Vec<(PathBuf, CrushError)>,
}

impl BatchSummary {
    /// Number of crush attempts made.
    pub fn attempted(&self) -> usize {
        self.reports.len() + self.failures.len()
    }

    pub fn crushed_count(&self) -> usize {
        self.reports.iter().filter(|r| !r.is_skipped()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.failures.len()
    }

    pub fn total_bytes_saved(&self) -> u64 {
        self.reports.iter().map(CrushReport::bytes_saved).sum()
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Crushes every PNG/JPEG in `directory` in place through the system shell.
///
/// # Arguments
/// * `directory` - Directory to scan
/// * `recursive` - Descend into subdirectories
///
/// # Returns
/// * `Ok(BatchSummary)` - Per-file outcomes; individual failures do not stop the run
/// * `Err(CrushError::DirectoryNotFound)` - If `directory` is not an existing directory
pub fn batch(directory: &Path, recursive: bool) -> Result<BatchSummary> {
    batch_with(&SystemShell, directory, recursive)
}

pub fn batch_with<R: CommandRunner + ?Sized>(
    runner: &R,
    directory: &Path,
    recursive: bool,
) -> Result<BatchSummary> {
    if !directory.is_dir() {
        return Err(CrushError::DirectoryNotFound(directory.to_path_buf()));
    }

    let images = fetch_images(directory, recursive)?;
    Ok(batch_compress_with(runner, &images))
}

/// Lists files named `*.png` / `*.jpg` (any case) under `directory`.
///
/// Only the top level is read unless `recursive` is set. Entries come back
/// sorted by file name within each directory; the directory itself and
/// subdirectories are never returned. Symlinks to files are listed;
/// symlinked directories are not descended into.
pub fn fetch_images(directory: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
    let mut walker = WalkDir::new(directory).min_depth(1).sort_by_file_name();
    if !recursive {
        walker = walker.max_depth(1);
    }

    let mut images = Vec::new();
    for entry in walker {
        let entry = entry?;
        // Follows symlinks, so a link to an image counts as an image
        if entry.path().is_file() && is_batch_image(entry.path()) {
            images.push(entry.into_path());
        }
    }

    Ok(images)
}

/// Crushes each image in place, one after another, and keeps going past
/// failures.
pub fn batch_compress(images: &[PathBuf]) -> BatchSummary {
    batch_compress_with(&SystemShell, images)
}

pub fn batch_compress_with<R: CommandRunner + ?Sized>(
    runner: &R,
    images: &[PathBuf],
) -> BatchSummary {
    let mut summary = BatchSummary::default();
    if images.is_empty() {
        warn!("No PNG/JPEG files found");
        return summary;
    }

    let progress = progress_bar(images.len() as u64);
    for image in images {
        progress.set_message(
            image
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
        );

        match ImageCrusher::in_place(image).crush_with(runner) {
            Ok(report) => {
                verbose!(
                    "{}: saved {}",
                    image.display(),
                    format_file_size(report.bytes_saved())
                );
                summary.reports.push(report);
            }
            Err(e) => {
                progress.suspend(|| {
                    crate::error!("Failed to crush {}: {}", image.display(), e);
                });
                summary.failures.push((image.clone(), e));
            }
        }
        progress.inc(1);
    }
    progress.finish_and_clear();

    summary
}

fn progress_bar(len: u64) -> ProgressBar {
    if logger::is_quiet() {
        return ProgressBar::hidden();
    }
    let progress = ProgressBar::new(len);
    progress.set_style(
        ProgressStyle::default_bar()
            .template(PROGRESS_BAR_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    progress
}

pub fn print_batch_summary(summary: &BatchSummary, started: Instant) {
    let elapsed = started.elapsed();
    info!("\n📊 Batch Crush Summary:");
    info!("  📁 Files attempted: {}", summary.attempted());
    info!("  🗜️  Files crushed: {}", summary.crushed_count());
    info!(
        "  💾 Total saved: {}",
        format_file_size(summary.total_bytes_saved())
    );
    info!("  ⏱️  Total time: {:?}", elapsed);
    if !summary.is_success() {
        warn!("Failed files: {}", summary.failed_count());
    }
}
