//! Template renderer module.
//!
//! Resolves placeholder nodes against a [`UrlContext`].

use super::parser::Node;
use super::{Result, TemplateError, UrlContext};
use crate::media::naming::{collapse_separators, hash_token, path_ext, path_stem, slugify};

/// Template renderer.
pub struct Renderer<'a> {
    context: &'a UrlContext,
}

impl<'a> Renderer<'a> {
    /// Create a new renderer with the given context.
    pub fn new(context: &'a UrlContext) -> Self {
        Self { context }
    }

    /// Render a list of nodes to a string.
    pub fn render(&self, nodes: &[Node]) -> Result<String> {
        let mut output = String::new();

        for node in nodes {
            match node {
                Node::Text(text) => output.push_str(text),
                Node::Placeholder(name) => output.push_str(&self.resolve(name)?),
            }
        }

        Ok(output)
    }

    /// Resolve one placeholder. Each `hash` occurrence gets a fresh token.
    fn resolve(&self, name: &str) -> Result<String> {
        let filename = self.context.filename();

        let value = match name {
            "class" => self.context.class(),
            "primary_key" => self.context.primary_key().to_string(),
            "column" => self.context.column(),
            "filename" => filename.to_string(),
            "basename" => path_stem(filename).to_string(),
            "hash" => hash_token(),
            "filename_with_hash" => collapse_separators(&format!(
                "{}.{}{}",
                slugify(path_stem(filename)),
                hash_token(),
                path_ext(filename)
            )),
            "extension" => path_ext(filename).trim_start_matches('.').to_string(),
            _ => return Err(TemplateError::UnknownPlaceholder(name.to_string())),
        };

        Ok(value)
    }
}
