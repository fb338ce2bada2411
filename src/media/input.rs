//! Inputs a media field can absorb.

use std::path::PathBuf;

use serde_json::Value;

use super::upload::{LocalFile, UploadedFile};

/// One value handed to a media field, from a form, a file or the database.
#[derive(Debug, Clone)]
pub enum MediaInput {
    /// A file on the local filesystem.
    File(LocalFile),
    /// A single uploaded file.
    Upload(UploadedFile),
    /// Every file posted under one form field.
    Uploads(Vec<UploadedFile>),
    /// Raw JSON bytes, e.g. a column value.
    Bytes(Vec<u8>),
    /// JSON text.
    Text(String),
    /// Several JSON texts, absorbed in order.
    TextList(Vec<String>),
    /// Anything else; absorbing it fails. Holds a description of the kind.
    Unsupported(String),
}

impl MediaInput {
    /// Short name of the input kind, for logs and errors.
    pub fn kind(&self) -> &str {
        match self {
            MediaInput::File(_) => "file",
            MediaInput::Upload(_) => "upload",
            MediaInput::Uploads(_) => "upload batch",
            MediaInput::Bytes(_) => "bytes",
            MediaInput::Text(_) => "text",
            MediaInput::TextList(_) => "text list",
            MediaInput::Unsupported(kind) => kind,
        }
    }
}

impl From<LocalFile> for MediaInput {
    fn from(file: LocalFile) -> Self {
        MediaInput::File(file)
    }
}

impl From<PathBuf> for MediaInput {
    fn from(path: PathBuf) -> Self {
        MediaInput::File(LocalFile::new(path))
    }
}

impl From<UploadedFile> for MediaInput {
    fn from(upload: UploadedFile) -> Self {
        MediaInput::Upload(upload)
    }
}

impl From<Vec<UploadedFile>> for MediaInput {
    fn from(uploads: Vec<UploadedFile>) -> Self {
        MediaInput::Uploads(uploads)
    }
}

impl From<Vec<u8>> for MediaInput {
    fn from(bytes: Vec<u8>) -> Self {
        MediaInput::Bytes(bytes)
    }
}

impl From<String> for MediaInput {
    fn from(text: String) -> Self {
        MediaInput::Text(text)
    }
}

impl From<&str> for MediaInput {
    fn from(text: &str) -> Self {
        MediaInput::Text(text.to_string())
    }
}

impl From<Vec<String>> for MediaInput {
    fn from(texts: Vec<String>) -> Self {
        MediaInput::TextList(texts)
    }
}

/// Form values arrive as JSON: strings and string arrays are accepted,
/// everything else is passed on as unsupported.
impl From<Value> for MediaInput {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => MediaInput::Text(text),
            Value::Array(items) => {
                let mut texts = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Value::String(text) => texts.push(text),
                        other => {
                            return MediaInput::Unsupported(format!(
                                "array containing {}",
                                json_kind(&other)
                            ))
                        }
                    }
                }
                MediaInput::TextList(texts)
            }
            other => MediaInput::Unsupported(json_kind(&other).to_string()),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
