/// Image type resolution by file extension
///
/// Dispatch is by name only: the substring after the last `.` of the
/// file name, lower-cased. File contents are never inspected.

use crate::constants::{JPEGTRAN_CMD, PNGCRUSH_CMD};
use std::convert::Infallible;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Image type a crush job dispatches on
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ImageType {
    /// Crushed with pngcrush
    Png,
    /// Crushed with jpegtran
    Jpg,
    /// Passed through untouched
    Gif,
    /// Any other extension, kept lower-cased as found
    Other(String),
}

impl ImageType {
    /// Maps a raw extension (any case) to an image type.
    ///
    /// Only the literal `jpg` maps to [`ImageType::Jpg`]; `jpeg` stays
    /// `Other("jpeg")` and is skipped like every unknown type.
    pub fn from_extension(extension: &str) -> Self {
        let ext = extension.to_lowercase();
        match ext.as_str() {
            "png" => ImageType::Png,
            "jpg" => ImageType::Jpg,
            "gif" => ImageType::Gif,
            _ => ImageType::Other(ext),
        }
    }

    /// Resolves the type from the final `.`-separated part of the file name.
    ///
    /// A name without any `.` resolves to the whole name lower-cased.
    pub fn from_path(path: &Path) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        let extension = name.rsplit('.').next().unwrap_or_default();
        Self::from_extension(extension)
    }

    /// The command template used to crush this type, if any.
    pub fn command_template(&self) -> Option<&'static str> {
        match self {
            ImageType::Png => Some(PNGCRUSH_CMD),
            ImageType::Jpg => Some(JPEGTRAN_CMD),
            ImageType::Gif | ImageType::Other(_) => None,
        }
    }

    pub fn is_crushable(&self) -> bool {
        self.command_template().is_some()
    }

    pub fn as_str(&self) -> &str {
        match self {
            ImageType::Png => "png",
            ImageType::Jpg => "jpg",
            ImageType::Gif => "gif",
            ImageType::Other(ext) => ext,
        }
    }
}

impl fmt::Display for ImageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ImageType {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(ImageType::from_extension(s))
    }
}

/// Whether batch mode should pick up this file, by name.
pub fn is_batch_image(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .and_then(|n| n.rsplit_once('.'))
        .map(|(_, ext)| {
            crate::constants::BATCH_EXTENSIONS
                .iter()
                .any(|candidate| ext.eq_ignore_ascii_case(candidate))
        })
        .unwrap_or(false)
}
