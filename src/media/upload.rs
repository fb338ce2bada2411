//! Upload handles: things that can be read as the content of a new file.
//!
//! A handle only lives for one save cycle. Whoever persists the record reads
//! it through [`FileHeader::open`] and drops it afterwards.

use std::collections::BTreeMap;
use std::fmt;
use std::fs::{self, File};
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::extract::multipart::Field;
use axum::extract::Multipart;

use super::input::MediaInput;
use crate::Result;

/// Something with a name, a size and readable content.
pub trait FileHeader {
    /// Declared file name (base name only).
    fn file_name(&self) -> &str;

    /// Size in bytes.
    fn size(&self) -> std::io::Result<u64>;

    /// Open the content for reading.
    fn open(&self) -> std::io::Result<Box<dyn Read + Send>>;
}

/// A file on the local filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFile {
    path: PathBuf,
    name: String,
}

impl LocalFile {
    /// Create a handle for the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { path, name }
    }

    /// Full path of the file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FileHeader for LocalFile {
    fn file_name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> std::io::Result<u64> {
        Ok(fs::metadata(&self.path)?.len())
    }

    fn open(&self) -> std::io::Result<Box<dyn Read + Send>> {
        Ok(Box::new(File::open(&self.path)?))
    }
}

/// One uploaded part of a multipart form, buffered in memory.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadedFile {
    file_name: String,
    content_type: Option<String>,
    data: Arc<[u8]>,
}

impl UploadedFile {
    /// Create an upload from its declared name and content.
    pub fn new(file_name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            data: Arc::from(data.into()),
        }
    }

    /// Set the declared content type.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Buffer a multipart field.
    pub async fn from_field(field: Field<'_>) -> Result<Self> {
        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(|s| s.to_string());
        let data = field.bytes().await?;

        Ok(Self {
            file_name,
            content_type,
            data: Arc::from(&data[..]),
        })
    }

    /// Declared content type, if the client sent one.
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Size in bytes.
    pub fn len(&self) -> u64 {
        self.data.len() as u64
    }

    /// Whether the upload has no content.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Raw content.
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }
}

impl fmt::Debug for UploadedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadedFile")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.data.len())
            .finish()
    }
}

impl FileHeader for UploadedFile {
    fn file_name(&self) -> &str {
        &self.file_name
    }

    fn size(&self) -> std::io::Result<u64> {
        Ok(self.len())
    }

    fn open(&self) -> std::io::Result<Box<dyn Read + Send>> {
        Ok(Box::new(Cursor::new(Arc::clone(&self.data))))
    }
}

/// The upload a descriptor carries during the save that introduces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingUpload {
    /// File taken from the local filesystem.
    Local(LocalFile),
    /// File received in a multipart form.
    Upload(UploadedFile),
}

impl FileHeader for PendingUpload {
    fn file_name(&self) -> &str {
        match self {
            PendingUpload::Local(file) => file.file_name(),
            PendingUpload::Upload(file) => file.file_name(),
        }
    }

    fn size(&self) -> std::io::Result<u64> {
        match self {
            PendingUpload::Local(file) => file.size(),
            PendingUpload::Upload(file) => file.size(),
        }
    }

    fn open(&self) -> std::io::Result<Box<dyn Read + Send>> {
        match self {
            PendingUpload::Local(file) => file.open(),
            PendingUpload::Upload(file) => file.open(),
        }
    }
}

/// A multipart form split into file parts and text values by field name.
#[derive(Debug, Default, Clone)]
pub struct MultipartForm {
    files: BTreeMap<String, Vec<UploadedFile>>,
    values: BTreeMap<String, Vec<String>>,
}

impl MultipartForm {
    /// Read every field of the form.
    ///
    /// Parts with a file name are buffered as uploads (even when empty, so a
    /// form posted without choosing a file yields a zero-sized batch entry);
    /// all other parts are read as text.
    pub async fn read(multipart: &mut Multipart) -> Result<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();

            if field.file_name().is_some() {
                let upload = UploadedFile::from_field(field).await?;
                tracing::debug!(field = %name, file = %upload.file_name, size = upload.len(), "buffered upload");
                form.files.entry(name).or_default().push(upload);
            } else {
                let text = field.text().await?;
                form.values.entry(name).or_default().push(text);
            }
        }

        Ok(form)
    }

    /// Uploaded files of a field, as a batch input.
    pub fn files(&self, name: &str) -> Option<MediaInput> {
        self.files
            .get(name)
            .map(|files| MediaInput::Uploads(files.clone()))
    }

    /// Text values of a field, as a string list input.
    pub fn values(&self, name: &str) -> Option<MediaInput> {
        self.values
            .get(name)
            .map(|values| MediaInput::TextList(values.clone()))
    }

    /// Names of all fields that carried files.
    pub fn file_fields(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }
}
