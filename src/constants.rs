/// Appended to the source path to name the temporary output in temp mode.
pub const TMP_FILENAME_APPEND: &str = "_tmp";

/// pngcrush command template.
///
/// * `-rem alla` removes all ancillary chunks except transparency
/// * `-brute` tries more than 100 filter/compression combinations
/// * `-reduce` lossless color-type and bit-depth reduction where possible
pub const PNGCRUSH_CMD: &str = "pngcrush -rem alla -brute -reduce {source} {output}";

/// jpegtran command template. jpegtran writes to stdout, hence the redirect.
///
/// * `-copy none` drops all extra markers (EXIF, comments)
/// * `-optimize` builds optimal Huffman tables
pub const JPEGTRAN_CMD: &str = "jpegtran -copy none -optimize {source} > {output}";

/// Tool invoked with no arguments to check the toolchain is installed.
/// jpegtran is not checked: run bare it waits on stdin and prints nothing.
pub const CHECK_TOOL: &str = "pngcrush";

/// Extensions picked up by batch mode (case-insensitive).
pub const BATCH_EXTENSIONS: &[&str] = &["png", "jpg"];

pub const PROGRESS_BAR_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}";

// Common output message prefixes
pub const ORIGINAL_SIZE_PREFIX: &str = "📊 Original size:";
pub const CRUSHED_SIZE_PREFIX: &str = "📈 Crushed size:";
pub const COMPRESSION_RATIO_PREFIX: &str = "🎯 Compression ratio:";
