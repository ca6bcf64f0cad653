//! JSON renderer: structured output for tooling integration.
//!
//! Serializes the item tree directly; maps keep the order the source wrote.

use crate::error::Result;
use crate::model::DocItem;
use crate::render::Renderer;
use serde::Serialize;

pub struct JsonRenderer;

#[derive(Serialize)]
struct Document<'a> {
    module: &'a str,
    items: &'a [DocItem],
}

impl Renderer for JsonRenderer {
    fn render(&self, module: &str, items: &[DocItem]) -> Result<String> {
        let mut out = serde_json::to_string_pretty(&Document { module, items })?;
        out.push('\n');
        Ok(out)
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}
