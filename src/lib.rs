//! hashdoc: documentation extraction from `#/` comments in Python source.
//!
//! The pipeline runs two independent read-only passes over the source text
//! (comment extraction and the structure walk), joins them by line number,
//! parses each matched block under one documentation style and assembles the
//! result into an ordered [`DocItem`] tree.
//!
//! ```no_run
//! use hashdoc::{document_file, Style};
//! use std::path::Path;
//!
//! let items = document_file(Path::new("calc.py"), Style::Google)?;
//! for item in &items {
//!     println!("{} {}", item.kind.as_str(), item.name);
//! }
//! # Ok::<(), hashdoc::Error>(())
//! ```

pub mod assemble;
pub mod associate;
pub mod error;
pub mod extract;
pub mod model;
pub mod render;
pub mod style;
pub mod walker;

pub use error::{Error, Result};
pub use model::{CommentBlock, ConstructDescriptor, ConstructKind, DocItem, DocRecord, Param};
pub use style::Style;

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Source file extensions the walker understands.
pub const SOURCE_EXTENSIONS: &[&str] = &["py", "pyi"];

/// Run the whole pipeline over in-memory source.
///
/// Syntax errors carry a `<source>` placeholder path.
pub fn document_source(module_name: &str, source: &str, style: Style) -> Result<Vec<DocItem>> {
    let blocks = extract::extract(source);
    let module = walker::walk(module_name, source)?;
    let assoc = associate::associate(source, &blocks, &module);

    debug!(
        module = module_name,
        blocks = blocks.len(),
        constructs = module.children.len(),
        orphans = assoc.orphans.len(),
        "extracted"
    );

    Ok(assemble::assemble(&module, &blocks, &assoc, style))
}

/// Read and document one file. The module name is the file stem.
pub fn document_file(path: &Path, style: Style) -> Result<Vec<DocItem>> {
    let source = fs::read_to_string(path).map_err(|source| Error::NotFound {
        path: path.to_path_buf(),
        source,
    })?;
    document_source(&module_name(path), &source, style).map_err(|e| e.with_path(path))
}

/// Document every file in `paths` under the style named `style`.
///
/// The style is validated before any file is touched; an unknown name fails
/// the whole batch. Per-file failures are returned alongside their path and
/// do not stop the remaining files.
pub fn document_batch<P: AsRef<Path>>(
    paths: &[P],
    style: &str,
) -> Result<Vec<(PathBuf, Result<Vec<DocItem>>)>> {
    let style: Style = style.parse()?;
    Ok(paths
        .iter()
        .map(|p| {
            let path = p.as_ref();
            (path.to_path_buf(), document_file(path, style))
        })
        .collect())
}

/// Module name for a source path: `pkg/calc.py` → `calc`.
pub fn module_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
