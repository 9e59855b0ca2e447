//! Image format tags.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// An image format tag as it appears on the wire and in the UI.
///
/// The set is fixed and closed: the conversion engine ships decoders and
/// encoders for exactly these formats, and the backend rejects anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageFormat {
    /// Animated PNG
    #[serde(rename = "APNG")]
    Apng,
    /// AV1 Image File Format
    #[serde(rename = "AVIF")]
    Avif,
    /// Graphics Interchange Format
    #[serde(rename = "GIF")]
    Gif,
    /// JPEG
    #[serde(rename = "JPEG")]
    Jpeg,
    /// Portable Network Graphics
    #[serde(rename = "PNG")]
    Png,
    /// Scalable Vector Graphics
    #[serde(rename = "SVG")]
    Svg,
    /// WebP
    WebP,
    /// Windows Bitmap
    #[serde(rename = "BMP")]
    Bmp,
    /// Windows Icon
    #[serde(rename = "ICO")]
    Ico,
    /// Tagged Image File Format
    #[serde(rename = "TIFF")]
    Tiff,
}

impl ImageFormat {
    /// All formats in their canonical ordering.
    ///
    /// This is the ordering the UI presents in format selectors, and the
    /// ordering "first value other than the destination" refers to when a
    /// new conversion mapping picks its placeholder source.
    pub const ALL: [ImageFormat; 10] = [
        ImageFormat::Apng,
        ImageFormat::Avif,
        ImageFormat::Gif,
        ImageFormat::Jpeg,
        ImageFormat::Png,
        ImageFormat::Svg,
        ImageFormat::WebP,
        ImageFormat::Bmp,
        ImageFormat::Ico,
        ImageFormat::Tiff,
    ];

    /// The wire spelling of this format.
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageFormat::Apng => "APNG",
            ImageFormat::Avif => "AVIF",
            ImageFormat::Gif => "GIF",
            ImageFormat::Jpeg => "JPEG",
            ImageFormat::Png => "PNG",
            ImageFormat::Svg => "SVG",
            ImageFormat::WebP => "WebP",
            ImageFormat::Bmp => "BMP",
            ImageFormat::Ico => "ICO",
            ImageFormat::Tiff => "TIFF",
        }
    }
}

/// The destination preselected by the UI wherever a format choice appears.
impl Default for ImageFormat {
    fn default() -> Self {
        ImageFormat::Png
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|format| format.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownFormat(s.to_string()))
    }
}
