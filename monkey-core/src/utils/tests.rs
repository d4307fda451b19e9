use std::path::PathBuf;

use pretty_assertions::assert_eq;
use termcolor::Buffer;

use crate::parser::prelude::parse;

use super::prelude::{Diagnostic, Error, SrcSpan};

fn parse_failure(src: &str) -> Error {
    let (_, errors) = parse(src);

    Error::Parse {
        path: PathBuf::from("test.mk"),
        src: src.to_string(),
        errors
    }
}

#[test]
fn test_src_span() {
    let span = SrcSpan::from(4, 9);

    assert_eq!(span.to_string(), "4..9");
    assert_eq!(span.range(), 4..9);
    assert_eq!(span.merge(SrcSpan::from(1, 5)), SrcSpan::from(1, 9));
    assert_eq!(SrcSpan::at(3), SrcSpan::from(3, 3));
}

#[test]
fn test_parse_error_has_one_diagnostic_per_error() {
    let error = parse_failure("let = 10; let x 5;");
    let diagnostics = error.to_diagnostics();

    let texts = diagnostics.iter()
        .map(|diagnostic| diagnostic.text.as_str())
        .collect::<Vec<&str>>();

    assert_eq!(texts, vec![
        "expected next token to be IDENT, got = instead",
        "no prefix parse function for = found",
        "expected next token to be =, got INT instead",
    ]);

    let spans = diagnostics.iter()
        .map(|diagnostic| diagnostic.location.as_ref().map(|location| location.label.span))
        .collect::<Vec<Option<SrcSpan>>>();

    assert_eq!(spans, vec![
        Some(SrcSpan::from(4, 5)),
        Some(SrcSpan::from(4, 5)),
        Some(SrcSpan::from(16, 17)),
    ]);
}

#[test]
fn test_pretty_string_renders_source_snippet() {
    let rendered = parse_failure("let x 5;").pretty_string();

    assert!(rendered.contains("error: Syntax error"), "{rendered}");
    assert!(rendered.contains("test.mk:1:7"), "{rendered}");
    assert!(rendered.contains("expected `=` here"), "{rendered}");
    assert!(rendered.contains("expected next token to be =, got INT instead"), "{rendered}");
}

#[test]
fn test_unexpected_eof_points_at_end_of_text() {
    let src = "if (x) { 1\n\n";
    let error = parse_failure(src);
    let diagnostics = error.to_diagnostics();

    assert_eq!(diagnostics.len(), 1);

    let location = diagnostics[0].location.as_ref().expect("parse diagnostics carry a location");

    assert_eq!(location.label.span, SrcSpan::at(10));
    assert_eq!(diagnostics[0].text, "expected next token to be }, got EOF instead");
}

#[test]
fn test_runtime_error_is_title_only() {
    let error = Error::Runtime {
        path: PathBuf::from("main.mk"),
        message: "identifier not found: x".to_string()
    };

    assert_eq!(error.to_string(), "evaluation failed: identifier not found: x");
    assert_eq!(
        error.pretty_string(),
        "error: Runtime error in main.mk\n\nidentifier not found: x\n\n"
    );
}

#[test]
fn test_io_error() {
    let error = Error::from(std::io::Error::from(std::io::ErrorKind::NotFound));

    assert_eq!(error, Error::StdIo { err: std::io::ErrorKind::NotFound });
    assert!(error.pretty_string().starts_with("error: Standard IO error\n\n"));
}

#[test]
fn test_title_only_diagnostic_without_text() {
    let mut buf = Buffer::no_color();

    Diagnostic {
        title: "nothing to run".into(),
        text: String::new(),
        location: None
    }.write(&mut buf);

    assert_eq!(String::from_utf8_lossy(buf.as_slice()), "error: nothing to run\n\n");
}
