//! hashdoc: generate documentation from `#/` comments in Python source files.
//!
//! `hashdoc -s numpy -o docs/api src/pkg/*.py`

mod logging;

use anyhow::{bail, Context, Result};
use clap::Parser;
use hashdoc::render::{self, Renderer};
use hashdoc::{module_name, DocItem, Style, SOURCE_EXTENSIONS};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

#[derive(Parser)]
#[command(
    name = "hashdoc",
    version,
    about = "Generate documentation from #/ comments in Python source files"
)]
struct Cli {
    /// Input files, directories or glob patterns
    #[arg(required = true)]
    files: Vec<String>,

    /// Documentation style of the comment blocks: google, numpy or sphinx
    #[arg(short = 's', long, env = "HASHDOC_STYLE", default_value = "google")]
    style: String,

    /// Output format: markdown (default) or json
    #[arg(short = 'f', long, default_value = "markdown")]
    format: String,

    /// Write one file per input into this directory instead of stdout
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// More diagnostics (-v debug, -vv trace)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// No diagnostics at all
    #[arg(short = 'q', long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(logging::LogOptions {
        verbosity: cli.verbose,
        quiet: cli.quiet,
    });

    // Both are checked before any input is touched.
    let style: Style = cli.style.parse()?;
    let renderer = render::create_renderer(&cli.format)?;

    let input_files = expand_globs(&cli.files)?;
    if input_files.is_empty() {
        bail!("no input files");
    }

    if let Some(ref dir) = cli.output {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create output directory: {}", dir.display()))?;
    }

    info!(files = input_files.len(), %style, "documenting");

    let total = input_files.len();
    let (sources, others): (Vec<PathBuf>, Vec<PathBuf>) =
        input_files.into_iter().partition(|p| is_python_source(p));

    let mut failed = 0;
    for path in &others {
        error!("not a python source file: {}", path.display());
        failed += 1;
    }

    let results = hashdoc::document_batch(&sources, style.name())?;

    for (path, result) in results {
        let outcome = result
            .map_err(anyhow::Error::from)
            .and_then(|items| emit(renderer.as_ref(), &path, &items, cli.output.as_deref()));
        if let Err(e) = outcome {
            error!("{}: {:#}", path.display(), e);
            failed += 1;
        }
    }

    if failed > 0 {
        bail!("{} of {} files failed", failed, total);
    }
    Ok(())
}

/// Render one file's items to the output directory, or stdout without one.
fn emit(
    renderer: &dyn Renderer,
    source: &Path,
    items: &[DocItem],
    output_dir: Option<&Path>,
) -> Result<()> {
    let name = module_name(source);
    let document = renderer.render(&name, items)?;

    match output_dir {
        Some(dir) => {
            let out_path = dir.join(format!("{}.{}", name, renderer.file_extension()));
            fs::write(&out_path, &document)
                .with_context(|| format!("failed to write {}", out_path.display()))?;
            debug!(source = %source.display(), output = %out_path.display(), "wrote");
        }
        None => print!("{}", document),
    }
    Ok(())
}

fn is_python_source(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

/// Expand glob patterns into a list of file paths.
/// Bare directories are scanned (non-recursively) for Python sources; any
/// other argument without glob characters is kept as given, so a missing
/// file fails when it is read.
fn expand_globs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_dir() {
            let entries = fs::read_dir(path)
                .with_context(|| format!("failed to read directory: {}", path.display()))?;
            for entry in entries.flatten() {
                let p = entry.path();
                if p.is_file() && is_python_source(&p) {
                    files.push(p);
                }
            }
            continue;
        }
        if path.is_file() || !is_glob(pattern) {
            files.push(path.to_path_buf());
            continue;
        }
        let matches: Vec<_> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file() && is_python_source(p))
            .collect();
        if matches.is_empty() {
            warn!("no files matched: {}", pattern);
        }
        files.extend(matches);
    }
    files.sort();
    files.dedup();
    Ok(files)
}
