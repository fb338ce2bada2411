//! Media fields: file attachments stored as a JSON descriptor in one column.
//!
//! - [`FieldPolicy`] decides whether an upload is acceptable
//! - [`MediaFile`] absorbs uploads and JSON payloads and serializes itself
//! - URLs for new files come from [`crate::template`]
//!
//! Moving bytes to storage is left to the caller, which reads
//! [`MediaFile::take_file_header`] while saving the record.

mod descriptor;
mod format;
mod input;
pub mod naming;
mod policy;
mod size;
mod upload;

pub use descriptor::{CropOption, ImageSize, MediaFile, Rectangle};
pub use format::{is_image_format, is_svg_format, is_video_format};
pub use input::MediaInput;
pub use policy::{parse_tag_options, FieldPolicy};
pub use size::{format_bytes, parse_byte_size};
pub use upload::{FileHeader, LocalFile, MultipartForm, PendingUpload, UploadedFile};
