//! URL template engine.
//!
//! Storage paths for new uploads are rendered from templates such as
//! `/system/{{class}}/{{primary_key}}/{{column}}/{{filename_with_hash}}`.
//!
//! # Placeholders
//!
//! - `class`: param-cased, pluralized type name of the owning record
//! - `primary_key`: primary key of the owning record
//! - `column`: lower-cased field name
//! - `filename`: current file name
//! - `basename`: file name without extension
//! - `extension`: extension without the dot
//! - `hash`: digits-only timestamp token
//! - `filename_with_hash`: `{slug}.{hash}{.ext}`, whitespace and `+` runs
//!   replaced by `-`
//!
//! `\{{` outputs a literal `{{`.
//!
//! # Example
//!
//! ```
//! use mediabase::template::{render_url, UrlContext};
//!
//! let ctx = UrlContext::new("Product", 42, "Image", "photo.jpg");
//! assert_eq!(render_url("/{{class}}/{{primary_key}}/{{filename}}", &ctx), "/products/42/photo.jpg");
//! ```

mod parser;
mod renderer;

use std::fmt::Display;

use thiserror::Error;

use crate::media::naming::{pluralize, to_param_string};
use crate::media::FieldPolicy;

pub use parser::{Node, Parser};
pub use renderer::Renderer;

/// Template used when a field does not configure its own.
pub const DEFAULT_URL_TEMPLATE: &str =
    "/system/{{class}}/{{primary_key}}/{{column}}/{{filename_with_hash}}";

/// Template-related errors.
#[derive(Error, Debug)]
pub enum TemplateError {
    /// Parse error.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Placeholder name not known to the renderer.
    #[error("Unknown placeholder: {0}")]
    UnknownPlaceholder(String),
}

/// Result type for template operations.
pub type Result<T> = std::result::Result<T, TemplateError>;

/// A record type that owns media fields.
pub trait MediaOwner {
    /// Type name of the record, e.g. `Product`.
    fn model_name(&self) -> &str;

    /// Primary key value as text.
    fn primary_key_value(&self) -> String;
}

/// Everything a URL template can refer to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlContext {
    model_name: String,
    primary_key: String,
    field_name: String,
    filename: String,
}

impl UrlContext {
    /// Create a context from the record type name, its primary key, the field
    /// name and the current file name.
    pub fn new(
        model_name: impl Into<String>,
        primary_key: impl Display,
        field_name: impl Into<String>,
        filename: impl Into<String>,
    ) -> Self {
        Self {
            model_name: model_name.into(),
            primary_key: primary_key.to_string(),
            field_name: field_name.into(),
            filename: filename.into(),
        }
    }

    /// Create a context for a field of `record`.
    pub fn for_record<R: MediaOwner + ?Sized>(
        record: &R,
        field_name: impl Into<String>,
        filename: impl Into<String>,
    ) -> Self {
        Self::new(
            record.model_name(),
            record.primary_key_value(),
            field_name,
            filename,
        )
    }

    /// Replace the file name.
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }

    /// `class` placeholder value, e.g. `product-images` for `ProductImage`.
    pub fn class(&self) -> String {
        pluralize(&to_param_string(&self.model_name))
    }

    /// `primary_key` placeholder value.
    pub fn primary_key(&self) -> &str {
        &self.primary_key
    }

    /// `column` placeholder value.
    pub fn column(&self) -> String {
        self.field_name.to_lowercase()
    }

    /// Current file name.
    pub fn filename(&self) -> &str {
        &self.filename
    }
}

/// Parse and render a template.
pub fn try_render_url(template: &str, context: &UrlContext) -> Result<String> {
    let nodes = Parser::new(template).parse()?;
    Renderer::new(context).render(&nodes)
}

/// Render a template, returning an empty string on any failure.
///
/// An empty result means "no URL assigned yet", never an error to report.
pub fn render_url(template: &str, context: &UrlContext) -> String {
    match try_render_url(template, context) {
        Ok(url) => url,
        Err(e) => {
            tracing::warn!(template, error = %e, "URL template render failed");
            String::new()
        }
    }
}

/// Chooses the URL template for a field.
pub trait UrlTemplater {
    /// Template for the field described by `policy`.
    fn url_template(&self, policy: &FieldPolicy) -> String {
        policy
            .url_template()
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_URL_TEMPLATE)
            .to_string()
    }
}
