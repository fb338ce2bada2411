//! The media descriptor: what is known about the file attached to one field
//! of one record.
//!
//! A descriptor is stored as a JSON object in a single column:
//!
//! ```json
//! {
//!   "FileName": "photo.jpg",
//!   "Url": "/system/products/42/image/photo.20261016120102123456789000.jpg",
//!   "CropOptions": {"thumb": {"X": 0, "Y": 0, "Width": 100, "Height": 100}},
//!   "Options": {"alt": "a product photo"}
//! }
//! ```
//!
//! `CropOptions` and `Options` are left out when empty. Delete/crop flags and
//! the pending upload are never stored.

use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;

use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::format::{is_image_format, is_svg_format, is_video_format};
use super::input::MediaInput;
use super::naming::{path_base, path_ext};
use super::policy::FieldPolicy;
use super::upload::{FileHeader, PendingUpload};
use crate::template::{render_url, UrlContext, UrlTemplater};
use crate::{MediaError, Result};

/// A crop rectangle in source image pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CropOption {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl CropOption {
    /// Create a crop rectangle.
    pub fn new(x: i64, y: i64, width: i64, height: i64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

impl<'de> Deserialize<'de> for CropOption {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(CropOptionVisitor)
    }
}

struct CropOptionVisitor;

impl<'de> Visitor<'de> for CropOptionVisitor {
    type Value = CropOption;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a crop rectangle object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<CropOption, A::Error> {
        let mut crop = CropOption::default();
        while let Some(key) = map.next_key::<String>()? {
            let slot = match key.to_ascii_lowercase().as_str() {
                "x" => &mut crop.x,
                "y" => &mut crop.y,
                "width" => &mut crop.width,
                "height" => &mut crop.height,
                _ => {
                    map.next_value::<IgnoredAny>()?;
                    continue;
                }
            };
            if let Some(value) = map.next_value::<Option<i64>>()? {
                *slot = value;
            }
        }
        Ok(crop)
    }
}

/// Crop bounds as corner points, `max` exclusive. Saturates at the `i64`
/// range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rectangle {
    pub min_x: i64,
    pub min_y: i64,
    pub max_x: i64,
    pub max_y: i64,
}

impl From<CropOption> for Rectangle {
    fn from(crop: CropOption) -> Self {
        Self {
            min_x: crop.x,
            min_y: crop.y,
            max_x: crop.x.saturating_add(crop.width),
            max_y: crop.y.saturating_add(crop.height),
        }
    }
}

/// Target dimensions of a named image size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

/// File attached to one field of one record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaFile {
    file_name: String,
    url: String,
    crop_options: BTreeMap<String, CropOption>,
    options: BTreeMap<String, String>,
    pending_upload: Option<PendingUpload>,
    delete: bool,
    crop: bool,
    cropped: bool,
}

/// One decoded JSON payload: the persisted fields plus the write-side
/// flags that may ride along. Absent keys leave the descriptor untouched.
///
/// Keys match case-insensitively and a repeated key keeps its last value.
/// Only JSON objects are accepted.
#[derive(Debug, Default)]
struct Payload {
    file_name: Option<String>,
    url: Option<String>,
    crop_options: Option<BTreeMap<String, CropOption>>,
    options: Option<BTreeMap<String, String>>,
    crop: Option<bool>,
    delete: Option<bool>,
}

impl<'de> Deserialize<'de> for Payload {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(PayloadVisitor)
    }
}

struct PayloadVisitor;

impl<'de> Visitor<'de> for PayloadVisitor {
    type Value = Payload;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a media descriptor object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Payload, A::Error> {
        let mut payload = Payload::default();
        while let Some(key) = map.next_key::<String>()? {
            match key.to_ascii_lowercase().as_str() {
                "filename" => keep_last(&mut payload.file_name, map.next_value()?),
                "url" => keep_last(&mut payload.url, map.next_value()?),
                "cropoptions" => keep_last(&mut payload.crop_options, map.next_value()?),
                "options" => keep_last(&mut payload.options, map.next_value()?),
                "crop" => keep_last(&mut payload.crop, map.next_value()?),
                "delete" => keep_last(&mut payload.delete, map.next_value()?),
                _ => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }
        Ok(payload)
    }
}

// `null` leaves an earlier value in place.
fn keep_last<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct PersistedRef<'a> {
    file_name: &'a str,
    url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    crop_options: Option<&'a BTreeMap<String, CropOption>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<&'a BTreeMap<String, String>>,
}

impl MediaFile {
    /// Create an empty descriptor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the stored file name.
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    /// Set the URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Add a crop rectangle.
    pub fn with_crop_option(mut self, name: impl Into<String>, crop: CropOption) -> Self {
        self.crop_options.insert(name.into(), crop);
        self
    }

    /// Add a free-form option.
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Absorb one input.
    ///
    /// Files and uploads become the pending upload; JSON payloads are merged
    /// into the persisted fields. Whatever the input, a descriptor marked for
    /// delete ends up without URL, file name and crop rectangles.
    pub fn scan(&mut self, input: MediaInput) -> Result<()> {
        tracing::debug!(kind = input.kind(), "absorbing media input");

        let result = match input {
            MediaInput::File(file) => {
                self.file_name = file.file_name().to_string();
                self.pending_upload = Some(PendingUpload::Local(file));
                Ok(())
            }
            MediaInput::Upload(upload) => {
                self.file_name = upload.file_name().to_string();
                self.pending_upload = Some(PendingUpload::Upload(upload));
                Ok(())
            }
            MediaInput::Uploads(mut uploads) => {
                if uploads.first().is_some_and(|first| !first.is_empty()) {
                    let first = uploads.swap_remove(0);
                    self.file_name = first.file_name().to_string();
                    self.pending_upload = Some(PendingUpload::Upload(first));
                }
                Ok(())
            }
            MediaInput::Bytes(bytes) => self.scan_json(&bytes),
            MediaInput::Text(text) => self.scan_json(text.as_bytes()),
            MediaInput::TextList(texts) => {
                for text in texts {
                    self.scan(MediaInput::Text(text))?;
                }
                Ok(())
            }
            MediaInput::Unsupported(kind) => Err(MediaError::UnsupportedInput(format!(
                "media field cannot absorb {kind}"
            ))),
        };

        if self.delete {
            self.clear();
        }

        result
    }

    fn scan_json(&mut self, bytes: &[u8]) -> Result<()> {
        if bytes.is_empty() {
            return Ok(());
        }

        let Some(payload) = serde_json::from_slice::<Option<Payload>>(bytes)? else {
            return Ok(());
        };

        self.crop |= payload.crop.unwrap_or(false);
        self.delete |= payload.delete.unwrap_or(false);
        self.merge(payload);
        Ok(())
    }

    fn merge(&mut self, fields: Payload) {
        if let Some(file_name) = fields.file_name {
            self.file_name = file_name;
        }
        if let Some(url) = fields.url {
            self.url = url;
        }
        if let Some(crop_options) = fields.crop_options {
            self.crop_options.extend(crop_options);
        }
        if let Some(options) = fields.options {
            self.options.extend(options);
        }
    }

    fn clear(&mut self) {
        self.url.clear();
        self.file_name.clear();
        self.crop_options.clear();
    }

    /// Column value: JSON text, or `None` (NULL) when marked for delete.
    pub fn value(&self) -> Result<Option<String>> {
        if self.delete {
            return Ok(None);
        }
        Ok(Some(serde_json::to_string(self)?))
    }

    /// Lower-cased extension of the URL, including the dot.
    pub fn ext(&self) -> String {
        path_ext(&self.url).to_lowercase()
    }

    /// URL of the file, or of one of its styles.
    ///
    /// `url(Some("thumb"))` on `/a/photo.jpg` gives `/a/photo.thumb.jpg`.
    pub fn url(&self, style: Option<&str>) -> String {
        match style {
            Some(style) if !self.url.is_empty() => {
                let ext = path_ext(&self.url);
                let stem = self.url.strip_suffix(ext).unwrap_or(&self.url);
                format!("{stem}.{style}{ext}")
            }
            _ => self.url.clone(),
        }
    }

    /// Replace the URL.
    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
    }

    /// File name, falling back to the last element of the URL.
    pub fn file_name(&self) -> &str {
        if !self.file_name.is_empty() {
            &self.file_name
        } else {
            path_base(&self.url)
        }
    }

    /// Upload introduced by the current save, if any.
    pub fn file_header(&self) -> Option<&PendingUpload> {
        self.pending_upload.as_ref()
    }

    /// Hand the pending upload over to the storage step.
    pub fn take_file_header(&mut self) -> Option<PendingUpload> {
        self.pending_upload.take()
    }

    /// All crop rectangles by size name.
    pub fn crop_options(&self) -> &BTreeMap<String, CropOption> {
        &self.crop_options
    }

    /// Crop bounds for a size. `thumb@2x` uses the `thumb` rectangle.
    pub fn crop_option(&self, name: &str) -> Option<Rectangle> {
        let key = name.split('@').next().unwrap_or(name);
        self.crop_options.get(key).copied().map(Rectangle::from)
    }

    /// Free-form options.
    pub fn options(&self) -> &BTreeMap<String, String> {
        &self.options
    }

    /// Look up one free-form option.
    pub fn option(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(String::as_str)
    }

    /// Mark the file for deletion. Takes effect on the next absorb and on save.
    pub fn mark_for_delete(&mut self) {
        self.delete = true;
    }

    /// Whether the file is marked for deletion.
    pub fn is_marked_for_delete(&self) -> bool {
        self.delete
    }

    /// Ask the downstream cropper to run.
    pub fn mark_for_crop(&mut self) {
        self.crop = true;
    }

    /// Whether the file needs to be cropped.
    pub fn need_crop(&self) -> bool {
        self.crop
    }

    /// Return the in-process cropped flag, setting it when `value` is given.
    pub fn cropped(&mut self, value: Option<bool>) -> bool {
        let previous = self.cropped;
        if let Some(value) = value {
            self.cropped = value;
        }
        previous
    }

    /// Named sizes to crop into. None at this layer.
    pub fn sizes(&self) -> BTreeMap<String, ImageSize> {
        BTreeMap::new()
    }

    /// Fetch stored content by URL. Storage backends provide this.
    pub fn retrieve(&self, url: &str) -> Result<File> {
        Err(MediaError::NotImplemented(format!("retrieve {url}")))
    }

    /// Whether the URL points at a raster image.
    pub fn is_image(&self) -> bool {
        is_image_format(&self.url)
    }

    /// Whether the URL points at a video.
    pub fn is_video(&self) -> bool {
        is_video_format(&self.url)
    }

    /// Whether the URL points at an SVG.
    pub fn is_svg(&self) -> bool {
        is_svg_format(&self.url)
    }

    /// Render the storage URL for this file.
    ///
    /// Returns an empty string when no template applies or rendering fails.
    pub fn get_url<T: UrlTemplater + ?Sized>(
        &self,
        policy: &FieldPolicy,
        context: &UrlContext,
        templater: &T,
    ) -> String {
        let template = templater.url_template(policy);
        if template.is_empty() {
            return String::new();
        }
        let context = context.clone().with_filename(self.file_name());
        render_url(&template, &context)
    }

    /// Render the URL with the field's own template and store it.
    ///
    /// Returns `false` and leaves the URL alone when nothing was rendered.
    pub fn assign_url(&mut self, policy: &FieldPolicy, context: &UrlContext) -> bool {
        let url = self.get_url(policy, context, &*self);
        if url.is_empty() {
            return false;
        }
        self.url = url;
        true
    }
}

impl UrlTemplater for MediaFile {}

impl fmt::Display for MediaFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

impl Serialize for MediaFile {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let (file_name, url, crop_options) = if self.delete {
            ("", "", None)
        } else {
            (
                self.file_name.as_str(),
                self.url.as_str(),
                Some(&self.crop_options).filter(|m| !m.is_empty()),
            )
        };

        PersistedRef {
            file_name,
            url,
            crop_options,
            options: Some(&self.options).filter(|m| !m.is_empty()),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for MediaFile {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let payload = Payload::deserialize(deserializer)?;
        let mut file = MediaFile::default();
        file.merge(payload);
        Ok(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::UploadedFile;
    use serde_json::json;

    fn populated() -> MediaFile {
        MediaFile::new()
            .with_file_name("photo.jpg")
            .with_url("/a/b/photo.jpg")
            .with_crop_option("thumb", CropOption::new(0, 0, 100, 100))
            .with_option("alt", "a product photo")
    }

    #[test]
    fn test_serialize_shape() {
        let value: serde_json::Value = serde_json::to_value(populated()).unwrap();
        assert_eq!(
            value,
            json!({
                "FileName": "photo.jpg",
                "Url": "/a/b/photo.jpg",
                "CropOptions": {"thumb": {"X": 0, "Y": 0, "Width": 100, "Height": 100}},
                "Options": {"alt": "a product photo"}
            })
        );
    }

    #[test]
    fn test_serialize_omits_empty_maps() {
        let json = serde_json::to_string(&MediaFile::new().with_url("/x.png")).unwrap();
        assert_eq!(json, r#"{"FileName":"","Url":"/x.png"}"#);
    }

    #[test]
    fn test_round_trip() {
        let original = populated();
        let json = original.value().unwrap().unwrap();

        let mut decoded = MediaFile::new();
        decoded.scan(MediaInput::Text(json.clone())).unwrap();
        assert_eq!(decoded, original);

        let via_serde: MediaFile = serde_json::from_str(&json).unwrap();
        assert_eq!(via_serde, original);
    }

    #[test]
    fn test_scan_delete_clears_fields() {
        let mut file = populated();
        file.scan(MediaInput::from(r#"{"delete": true}"#)).unwrap();

        assert!(file.is_marked_for_delete());
        assert_eq!(file.file_name(), "");
        assert_eq!(file.url(None), "");
        assert!(file.crop_options().is_empty());
        assert_eq!(file.option("alt"), Some("a product photo"));
        assert_eq!(file.value().unwrap(), None);
    }

    #[test]
    fn test_scan_delete_wins_over_payload() {
        let mut file = MediaFile::new();
        file.scan(MediaInput::from(r#"{"Url": "/new.png", "FileName": "new.png", "Delete": true}"#))
            .unwrap();
        assert_eq!(file.url(None), "");
        assert_eq!(file.file_name(), "");
    }

    #[test]
    fn test_scan_crop_flag_keeps_other_fields() {
        let mut file = populated();
        file.scan(MediaInput::from(
            r#"{"Crop": true, "CropOptions": {"wide": {"X": 1, "Y": 2, "Width": 3, "Height": 4}}}"#,
        ))
        .unwrap();

        assert!(file.need_crop());
        assert_eq!(file.url(None), "/a/b/photo.jpg");
        assert_eq!(file.crop_options().len(), 2);
    }

    #[test]
    fn test_scan_flags_are_sticky() {
        let mut file = MediaFile::new();
        file.scan(MediaInput::from(r#"{"crop": true}"#)).unwrap();
        file.scan(MediaInput::from(r#"{"crop": false}"#)).unwrap();
        assert!(file.need_crop());
    }

    #[test]
    fn test_scan_empty_and_null_payloads() {
        let mut file = populated();
        file.scan(MediaInput::Bytes(Vec::new())).unwrap();
        file.scan(MediaInput::from("null")).unwrap();
        assert_eq!(file, populated());
    }

    #[test]
    fn test_scan_malformed_json() {
        let mut file = MediaFile::new();
        let err = file.scan(MediaInput::from("{not json")).unwrap_err();
        assert!(matches!(err, MediaError::Decode(_)));
    }

    #[test]
    fn test_scan_bad_instruction_type() {
        let mut file = MediaFile::new();
        let err = file
            .scan(MediaInput::from(r#"{"Url": "/a.png", "delete": "yes"}"#))
            .unwrap_err();
        assert!(matches!(err, MediaError::Decode(_)));
        assert_eq!(file.url(None), "");
    }

    #[test]
    fn test_scan_rejects_non_object_payload() {
        let mut file = populated();
        let err = file
            .scan(MediaInput::from(r#"["evil.exe","/x/evil.exe",null,null]"#))
            .unwrap_err();
        assert!(matches!(err, MediaError::Decode(_)));
        assert_eq!(file, populated());

        assert!(file.scan(MediaInput::from(r#""just a string""#)).is_err());
        assert!(file.scan(MediaInput::from("42")).is_err());
        assert_eq!(file, populated());
    }

    #[test]
    fn test_scan_failed_payload_leaves_descriptor_unchanged() {
        let mut file = populated();
        let result = file.scan(MediaInput::from(
            r#"{"Url": "/other.png", "FileName": "other.png", "Crop": 1}"#,
        ));
        assert!(result.is_err());
        assert_eq!(file, populated());
        assert!(!file.need_crop());
    }

    #[test]
    fn test_scan_keys_match_any_case() {
        let mut file = MediaFile::new();
        file.scan(MediaInput::from(
            r#"{"FILENAME": "a.png", "url": "/a.png", "cropoptions": {"thumb": {"x": 1, "Y": 2, "WIDTH": 3, "height": 4}}, "DELETE": false}"#,
        ))
        .unwrap();

        assert_eq!(file.file_name(), "a.png");
        assert_eq!(file.url(None), "/a.png");
        assert_eq!(file.crop_options()["thumb"], CropOption::new(1, 2, 3, 4));
        assert!(!file.is_marked_for_delete());
    }

    #[test]
    fn test_scan_repeated_key_keeps_last() {
        let mut file = MediaFile::new();
        file.scan(MediaInput::from(r#"{"Url": "/a.png", "url": "/b.png"}"#))
            .unwrap();
        assert_eq!(file.url(None), "/b.png");

        file.scan(MediaInput::from(r#"{"Url": "/c.png", "URL": null}"#))
            .unwrap();
        assert_eq!(file.url(None), "/c.png");
    }

    #[test]
    fn test_crop_option_saturates_at_range_end() {
        let mut file = MediaFile::new();
        file.scan(MediaInput::from(
            r#"{"Url": "/a.png", "CropOptions": {"thumb": {"X": 2147483647, "Y": 0, "Width": 1, "Height": 1}}}"#,
        ))
        .unwrap();

        let rect = file.crop_option("thumb@2x").unwrap();
        assert_eq!(rect.max_x, 2_147_483_648);
        assert_eq!(rect.max_y, 1);

        let far = MediaFile::new().with_crop_option("edge", CropOption::new(i64::MAX, i64::MIN, 1, -1));
        let rect = far.crop_option("edge").unwrap();
        assert_eq!(rect.max_x, i64::MAX);
        assert_eq!(rect.max_y, i64::MIN);
    }

    #[test]
    fn test_scan_text_list_in_order() {
        let mut file = MediaFile::new();
        file.scan(MediaInput::TextList(vec![
            r#"{"Url": "/first.png"}"#.to_string(),
            r#"{"Url": "/second.png"}"#.to_string(),
        ]))
        .unwrap();
        assert_eq!(file.url(None), "/second.png");
    }

    #[test]
    fn test_scan_text_list_stops_on_error() {
        let mut file = MediaFile::new();
        let result = file.scan(MediaInput::TextList(vec![
            "oops".to_string(),
            r#"{"Url": "/never.png"}"#.to_string(),
        ]));
        assert!(result.is_err());
        assert_eq!(file.url(None), "");
    }

    #[test]
    fn test_scan_upload() {
        let mut file = MediaFile::new();
        file.scan(MediaInput::Upload(UploadedFile::new("cat.png", vec![1])))
            .unwrap();
        assert_eq!(file.file_name(), "cat.png");
        assert_eq!(file.file_header().unwrap().file_name(), "cat.png");

        let taken = file.take_file_header();
        assert!(taken.is_some());
        assert!(file.file_header().is_none());
    }

    #[test]
    fn test_scan_upload_batch_uses_first_non_empty() {
        let mut file = MediaFile::new();
        file.scan(MediaInput::Uploads(vec![
            UploadedFile::new("a.png", vec![1]),
            UploadedFile::new("b.png", vec![2]),
        ]))
        .unwrap();
        assert_eq!(file.file_name(), "a.png");

        let mut empty = MediaFile::new();
        empty
            .scan(MediaInput::Uploads(vec![UploadedFile::new("a.png", vec![])]))
            .unwrap();
        empty.scan(MediaInput::Uploads(vec![])).unwrap();
        assert!(empty.file_header().is_none());
        assert_eq!(empty.file_name(), "");
    }

    #[test]
    fn test_scan_unsupported() {
        let mut file = MediaFile::new();
        let err = file
            .scan(MediaInput::Unsupported("number".to_string()))
            .unwrap_err();
        assert!(matches!(err, MediaError::UnsupportedInput(_)));
    }

    #[test]
    fn test_url_style() {
        let file = MediaFile::new().with_url("/a/b/photo.jpg");
        assert_eq!(file.url(Some("thumb")), "/a/b/photo.thumb.jpg");
        assert_eq!(file.url(None), "/a/b/photo.jpg");
        assert_eq!(file.to_string(), "/a/b/photo.jpg");
        assert_eq!(MediaFile::new().url(Some("thumb")), "");
    }

    #[test]
    fn test_ext_and_file_name_fallback() {
        let file = MediaFile::new().with_url("/a/b/Photo.JPG");
        assert_eq!(file.ext(), ".jpg");
        assert_eq!(file.file_name(), "Photo.JPG");
        assert_eq!(MediaFile::new().file_name(), "");
    }

    #[test]
    fn test_crop_option_lookup() {
        let file = populated();
        let rect = file.crop_option("thumb@2x").unwrap();
        assert_eq!(
            rect,
            Rectangle {
                min_x: 0,
                min_y: 0,
                max_x: 100,
                max_y: 100
            }
        );
        assert!(file.crop_option("thumb").is_some());
        assert!(file.crop_option("banner@2x").is_none());
    }

    #[test]
    fn test_cropped_toggle() {
        let mut file = MediaFile::new();
        assert!(!file.cropped(Some(true)));
        assert!(file.cropped(None));
        assert!(file.cropped(Some(false)));
        assert!(!file.cropped(None));
    }

    #[test]
    fn test_retrieve_not_implemented() {
        let err = populated().retrieve("/a/b/photo.jpg").unwrap_err();
        assert!(matches!(err, MediaError::NotImplemented(_)));
        assert!(populated().sizes().is_empty());
    }

    #[test]
    fn test_format_queries() {
        assert!(populated().is_image());
        assert!(MediaFile::new().with_url("/v/clip.mp4").is_video());
        assert!(MediaFile::new().with_url("/v/logo.svg").is_svg());
        assert!(!MediaFile::new().with_url("/v/logo.svg").is_image());
    }

    #[test]
    fn test_assign_url() {
        let mut file = MediaFile::new();
        file.scan(MediaInput::Upload(UploadedFile::new("My Photo.jpg", vec![1])))
            .unwrap();

        let policy = FieldPolicy::default().with_url_template("/files/{{column}}/{{filename}}");
        let ctx = UrlContext::new("Product", 42, "Image", "");
        assert!(file.assign_url(&policy, &ctx));
        assert_eq!(file.url(None), "/files/image/My Photo.jpg");

        let broken = FieldPolicy::default().with_url_template("/files/{{nope}}");
        assert!(!file.assign_url(&broken, &ctx));
        assert_eq!(file.url(None), "/files/image/My Photo.jpg");
    }
}
