use hashdoc::extract::{extract, marker_content};
use hashdoc::{document_batch, document_file, document_source, ConstructKind, Error, Style};
use std::path::Path;

fn fixture_path(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn fixture(name: &str) -> String {
    std::fs::read_to_string(fixture_path(name)).unwrap()
}

/// Top-level `def`/`class` lines, counted without the syntax tree.
fn count_top_level_constructs(source: &str) -> usize {
    source
        .lines()
        .filter(|l| {
            l.starts_with("def ") || l.starts_with("async def ") || l.starts_with("class ")
        })
        .count()
}

#[test]
fn one_item_per_top_level_construct() {
    for name in ["calculator.py", "stats.py", "store.py"] {
        let source = fixture(name);
        let items = document_source(name, &source, Style::Google).unwrap();
        let constructs = items
            .iter()
            .filter(|i| i.kind != ConstructKind::Module)
            .count();
        assert_eq!(constructs, count_top_level_constructs(&source), "{name}");
    }
}

#[test]
fn blocks_round_trip_to_trimmed_lines() {
    let source = fixture("calculator.py");
    let lines: Vec<&str> = source.lines().collect();
    for block in extract(&source) {
        let original: Vec<String> = lines[block.start_line - 1..block.end_line]
            .iter()
            .map(|l| l.trim().to_string())
            .collect();
        assert_eq!(block.source_lines(), original);
        assert!(original.iter().all(|l| marker_content(l).is_some()));
    }
}

#[test]
fn pipeline_is_idempotent() {
    let source = fixture("calculator.py");
    let first = document_source("calculator", &source, Style::Google).unwrap();
    let second = document_source("calculator", &source, Style::Google).unwrap();
    assert_eq!(first, second);
}

#[test]
fn blank_line_keeps_association() {
    let items = document_source("m", "#/ Docs.\n\ndef f():\n    pass\n", Style::Google).unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].doc.description, "Docs.");
}

#[test]
fn statement_line_orphans_the_block() {
    let items = document_source(
        "m",
        "#/ Docs.\nx = 1\ndef f():\n    pass\n",
        Style::Google,
    )
    .unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].kind, ConstructKind::Function);
    assert!(items[0].doc.is_empty());
    assert!(!items[0].is_documented());
}

#[test]
fn block_above_trailing_statements_documents_the_module() {
    let source = "def f():\n    pass\n\n#/ Trailer.\nif __name__ == '__main__':\n    f()\n";
    let items = document_source("m", source, Style::Google).unwrap();
    let kinds: Vec<_> = items.iter().map(|i| i.kind).collect();
    assert_eq!(kinds, vec![ConstructKind::Module, ConstructKind::Function]);
    assert_eq!(items[0].doc.description, "Trailer.");
    assert!(!items[1].is_documented());
}

#[test]
fn header_above_statements_only_documents_the_module() {
    let items = document_source("m", "#/ Module docs.\nimport os\nx = 1\n", Style::Google).unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].kind, ConstructKind::Module);
    assert_eq!(items[0].doc.description, "Module docs.");
}

#[test]
fn google_example() {
    let source = "#/ Does X.\n#/\n#/ Args:\n#/     a: first\n#/ Returns:\n#/     bool: result\ndef x(a):\n    pass\n";
    let items = document_source("m", source, Style::Google).unwrap();
    let doc = &items[0].doc;
    assert_eq!(doc.description, "Does X.");
    assert_eq!(doc.params.len(), 1);
    assert_eq!(doc.params["a"], "first");
    assert_eq!(doc.returns, "bool: result");
    assert!(doc.raises.is_empty());
}

#[test]
fn numpy_example() {
    let doc = Style::Numpy.parse("Parameters\n----------\na : int\n    first");
    assert_eq!(doc.params.len(), 1);
    assert_eq!(doc.params["a"], "first");
}

#[test]
fn sphinx_example() {
    let doc = Style::Sphinx.parse(":param a: first\n:returns: result");
    assert_eq!(doc.params.len(), 1);
    assert_eq!(doc.params["a"], "first");
    assert_eq!(doc.returns, "result");
}

#[test]
fn decorated_construct_takes_block_above_decorator() {
    let source = fixture("calculator.py");
    let items = document_source("calculator", &source, Style::Google).unwrap();
    let factorial = items.iter().find(|i| i.name == "factorial").unwrap();
    assert_eq!(factorial.doc.raises[0].0, "ValueError");
}

#[test]
fn unsupported_style_rejects_the_whole_batch() {
    let paths = vec![
        fixture_path("calculator.py"),
        fixture_path("broken.py"),
        "/nonexistent/missing.py".to_string(),
    ];
    let err = document_batch(&paths, "haskell").unwrap_err();
    assert!(matches!(err, Error::UnsupportedStyle(ref s) if s == "haskell"));
}

#[test]
fn batch_reports_each_file() {
    let paths = vec![
        fixture_path("broken.py"),
        fixture_path("calculator.py"),
        "/nonexistent/missing.py".to_string(),
    ];
    let results = document_batch(&paths, "google").unwrap();
    assert_eq!(results.len(), 3);
    assert!(matches!(results[0].1, Err(Error::Syntax { .. })));
    assert!(results[1].1.is_ok());
    assert!(matches!(results[2].1, Err(Error::NotFound { .. })));
}

#[test]
fn syntax_error_carries_the_path() {
    let path = fixture_path("broken.py");
    let err = document_file(Path::new(&path), Style::Google).unwrap_err();
    match err {
        Error::Syntax { path: p, line, .. } => {
            assert!(p.ends_with("broken.py"));
            assert!(line >= 1);
        }
        other => panic!("expected syntax error, got {other}"),
    }
}

#[test]
fn module_name_comes_from_file_stem() {
    let items = document_file(Path::new(&fixture_path("stats.py")), Style::Numpy).unwrap();
    assert_eq!(items[0].kind, ConstructKind::Module);
    assert_eq!(items[0].name, "stats");
    assert_eq!(items[0].doc.description, "Descriptive statistics.");
}
