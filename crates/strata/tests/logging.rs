//! Tests for logging functionality
//!
//! Only one global subscriber can be installed per process, so repeated
//! initialization is allowed to fail; it must never panic.

use std::str::FromStr;

use strata::core::logging::{init_logging, LogFormat};
use strata::{render, Size, ThemeKind, ViewKind};

#[test]
fn test_log_format_parsing() {
    assert_eq!(LogFormat::from_str("compact").unwrap(), LogFormat::Compact);
    assert_eq!(LogFormat::from_str("pretty").unwrap(), LogFormat::Pretty);
    assert_eq!(LogFormat::from_str("JSON").unwrap(), LogFormat::Json);
    assert!(LogFormat::from_str("xml").is_err());
}

#[test]
fn test_log_format_variants() {
    let variants = LogFormat::variants();
    assert!(variants.contains(&"compact"));
    assert!(variants.contains(&"pretty"));
    assert!(variants.contains(&"json"));
}

#[test]
fn test_init_logging_levels_and_formats() {
    let _ = init_logging(Some("trace"), Some("compact"));
    let _ = init_logging(Some("debug"), Some("pretty"));
    let _ = init_logging(Some("info"), Some("json"));
    let _ = init_logging(Some("off"), None);
    let _ = init_logging(None, None);
}

#[test]
fn test_init_logging_invalid_format() {
    assert!(init_logging(Some("info"), Some("invalid_format")).is_err());
}

#[test]
fn test_pipeline_runs_with_trace_logging() {
    let _ = init_logging(Some("trace"), Some("compact"));
    // Spans and per-tick events must not disturb the result
    let payload = r#"{"nodes":[{"id":"1"},{"id":"2","parent":"1"}],"links":[{"source":"1","target":"2"},{"source":"1","target":"9"}]}"#;
    for view in [ViewKind::Columns, ViewKind::Tree, ViewKind::Force] {
        let scene = render(payload, view, ThemeKind::Light, Size::default()).unwrap();
        assert_eq!(scene.nodes.len(), 2);
    }
}
