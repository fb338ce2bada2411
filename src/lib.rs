//! mediabase - file attachments for database records
//!
//! Validates uploads against per-field policy, keeps a JSON descriptor of the
//! attached file in a single column, and renders storage URLs from templates.

pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod media;
pub mod template;

pub use config::{Config, FieldConfig, LoggingConfig, MediaConfig};
pub use error::{MediaError, Result};
pub use media::{
    CropOption, FieldPolicy, FileHeader, LocalFile, MediaFile, MediaInput, MultipartForm,
    PendingUpload, Rectangle, UploadedFile,
};
pub use template::{render_url, MediaOwner, UrlContext, UrlTemplater, DEFAULT_URL_TEMPLATE};
