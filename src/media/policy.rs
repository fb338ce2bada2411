//! Per-field upload policy: allowed extensions and maximum size.

use std::collections::{BTreeMap, BTreeSet};

use super::descriptor::MediaFile;
use super::input::MediaInput;
use super::naming::normalized_ext;
use super::size::{format_bytes, parse_byte_size};
use super::upload::FileHeader;
use crate::{MediaError, Result};

/// Validation settings of one media field.
///
/// Built once when the field is registered; a malformed size is reported
/// right there, independent of any upload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPolicy {
    allowed_extensions: BTreeSet<String>,
    max_bytes: Option<u64>,
    url_template: Option<String>,
}

impl FieldPolicy {
    /// Create a policy from a comma-separated extension list and a size
    /// string such as `5MB`.
    pub fn new(types: Option<&str>, max_size: Option<&str>) -> Result<Self> {
        let mut policy = Self::default();

        if let Some(types) = types {
            policy.allowed_extensions = types
                .split(',')
                .map(|t| t.trim().to_lowercase())
                .filter(|t| !t.is_empty())
                .collect();
        }

        if let Some(max_size) = max_size {
            let max_bytes = parse_byte_size(max_size)
                .map_err(|e| MediaError::Config(format!("field MAX-SIZE {max_size:?}: {e}")))?;
            policy.max_bytes = Some(max_bytes);
        }

        Ok(policy)
    }

    /// Parse a tag like `TYPES:jpg,png;MAX-SIZE:5MB;URL:/files/{{filename}}`.
    pub fn from_tag(tag: &str) -> Result<Self> {
        let options = parse_tag_options(tag);
        let policy = Self::new(
            options.get("TYPES").map(String::as_str),
            options.get("MAX-SIZE").map(String::as_str),
        )?;

        Ok(match options.get("URL") {
            Some(url) => policy.with_url_template(url.clone()),
            None => policy,
        })
    }

    /// Set the URL template of the field.
    pub fn with_url_template(mut self, template: impl Into<String>) -> Self {
        self.url_template = Some(template.into());
        self
    }

    /// Lower-cased allowed extensions; empty means any.
    pub fn allowed_extensions(&self) -> &BTreeSet<String> {
        &self.allowed_extensions
    }

    /// Maximum upload size in bytes.
    pub fn max_bytes(&self) -> Option<u64> {
        self.max_bytes
    }

    /// Field-level URL template override.
    pub fn url_template(&self) -> Option<&str> {
        self.url_template.as_deref()
    }

    /// Whether any check is configured.
    pub fn is_restricted(&self) -> bool {
        !self.allowed_extensions.is_empty() || self.max_bytes.is_some()
    }

    /// Decide whether `input` may be absorbed.
    ///
    /// Only file inputs are checked. In a batch of several uploads every
    /// non-empty entry is checked and the first failure is reported with the
    /// entry's position.
    pub fn validate(&self, input: &MediaInput) -> Result<()> {
        if !self.is_restricted() {
            return Ok(());
        }

        match input {
            MediaInput::File(file) => self.check(file.file_name(), file.size()?),
            MediaInput::Upload(upload) => self.check(upload.file_name(), upload.len()),
            MediaInput::Uploads(uploads) if uploads.len() == 1 => {
                self.check(uploads[0].file_name(), uploads[0].len())
            }
            MediaInput::Uploads(uploads) => {
                for (i, upload) in uploads.iter().enumerate() {
                    if upload.is_empty() {
                        continue;
                    }
                    if let Err(e) = self.check_file(upload.file_name(), upload.len()) {
                        return Err(MediaError::Validation(format!("File #{i}: {e}")));
                    }
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Validate `input`, then absorb it into `file`.
    ///
    /// A rejected upload never reaches the descriptor.
    pub fn field_scan(&self, file: &mut MediaFile, input: MediaInput) -> Result<()> {
        if let Err(e) = self.validate(&input) {
            tracing::warn!(kind = input.kind(), error = %e, "upload rejected");
            return Err(e);
        }
        file.scan(input)
    }

    /// Checks for a single candidate; nameless or empty files pass.
    fn check(&self, file_name: &str, size: u64) -> Result<()> {
        if file_name.is_empty() || size == 0 {
            return Ok(());
        }
        self.check_file(file_name, size)
            .map_err(MediaError::Validation)
    }

    fn check_file(&self, file_name: &str, size: u64) -> std::result::Result<(), String> {
        if !self.allowed_extensions.is_empty() {
            let ext = normalized_ext(file_name);
            if !self.allowed_extensions.contains(&ext) {
                return Err(format!("Invalid file type {ext:?}"));
            }
        }

        if let Some(max_bytes) = self.max_bytes {
            if size > max_bytes {
                return Err(format!(
                    "Very large file. The expected maximum size is {}, but obtained {}.",
                    format_bytes(max_bytes),
                    format_bytes(size)
                ));
            }
        }

        Ok(())
    }
}

/// Split `KEY:value;FLAG;...` into upper-cased keys and trimmed values.
///
/// A key without a value maps to itself.
pub fn parse_tag_options(tag: &str) -> BTreeMap<String, String> {
    let mut options = BTreeMap::new();

    for part in tag.split(';') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }

        match part.split_once(':') {
            Some((key, value)) => {
                options.insert(key.trim().to_uppercase(), value.trim().to_string());
            }
            None => {
                let key = part.to_uppercase();
                options.insert(key.clone(), key);
            }
        }
    }

    options
}
