//! File format detection by extension.

use mime_guess::mime;

const SVG_ESSENCE: &str = "image/svg+xml";

/// Whether `name` has a raster image extension (jpg, png, gif, ...).
pub fn is_image_format(name: &str) -> bool {
    mime_guess::from_path(name)
        .iter()
        .any(|m| m.type_() == mime::IMAGE && m.essence_str() != SVG_ESSENCE)
}

/// Whether `name` has a video extension.
pub fn is_video_format(name: &str) -> bool {
    mime_guess::from_path(name)
        .iter()
        .any(|m| m.type_() == mime::VIDEO)
}

/// Whether `name` is an SVG file.
pub fn is_svg_format(name: &str) -> bool {
    mime_guess::from_path(name)
        .iter()
        .any(|m| m.essence_str() == SVG_ESSENCE)
}
