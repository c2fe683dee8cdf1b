//! Size formatting and report printing shared by the single-file and batch paths.

use crate::constants::{COMPRESSION_RATIO_PREFIX, CRUSHED_SIZE_PREFIX, ORIGINAL_SIZE_PREFIX};
use crate::crusher::{CrushOutcome, CrushReport};
use crate::{info, success, warn};

/// Format file size in human-readable format
///
/// # Arguments
/// * `bytes` - Size in bytes
///
/// # Returns
/// * Human-readable size string (e.g., "1.2 MB", "512 B")
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    const THRESHOLD: f64 = 1024.0;

    let mut size = bytes as f64;
    let mut unit_index = 0;
    while size >= THRESHOLD && unit_index < UNITS.len() - 1 {
        size /= THRESHOLD;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}

/// Size reduction as a percentage; negative when the file grew.
pub fn calculate_compression_ratio(original_size: u64, crushed_size: u64) -> f64 {
    if original_size == 0 {
        return 0.0;
    }
    ((original_size as f64 - crushed_size as f64) / original_size as f64) * 100.0
}

pub fn print_crush_report(report: &CrushReport) {
    match &report.outcome {
        CrushOutcome::Skipped => {
            info!(
                "⏭️  {} left untouched (no crusher for type \"{}\")",
                report.source.display(),
                report.image_type
            );
        }
        CrushOutcome::Crushed {
            output,
            original_size,
            crushed_size,
        } => {
            let ratio = calculate_compression_ratio(*original_size, *crushed_size);
            info!("📁 Output: {}", output.display());
            info!(
                "{} {} ({})",
                ORIGINAL_SIZE_PREFIX,
                original_size,
                format_file_size(*original_size)
            );
            info!(
                "{} {} ({})",
                CRUSHED_SIZE_PREFIX,
                crushed_size,
                format_file_size(*crushed_size)
            );
            info!("{} {:.1}%", COMPRESSION_RATIO_PREFIX, ratio);
            if ratio >= 0.0 {
                success!("Reduced file size by {:.1}%", ratio);
            } else {
                warn!("File size increased by {:.1}%", ratio.abs());
            }
        }
    }
}
