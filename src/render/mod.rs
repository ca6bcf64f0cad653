//! Renderers: trait-based output format dispatch.

pub mod json;
pub mod markdown;

use crate::error::{Error, Result};
use crate::model::DocItem;

/// Turns one module's items into a document in a specific output format.
pub trait Renderer {
    fn render(&self, module: &str, items: &[DocItem]) -> Result<String>;
    fn file_extension(&self) -> &str;
}

/// Create a renderer for the given format name.
pub fn create_renderer(format: &str) -> Result<Box<dyn Renderer>> {
    match format {
        "markdown" | "md" => Ok(Box::new(markdown::MarkdownRenderer)),
        "json" => Ok(Box::new(json::JsonRenderer)),
        _ => Err(Error::UnknownFormat(format.to_string())),
    }
}
