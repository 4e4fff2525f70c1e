//! Loading record files from disk and compiling them

use doxs_schemas::{Format, LoaderError, RecordLoader};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_yaml_file_compiles() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("add.yml");
    fs::write(
        &path,
        "title: Add\nsummary: Adds two numbers.\nparameters:\n  a: first operand\n  b: second operand\nreturns: the sum\n",
    )
    .unwrap();

    let raw = RecordLoader::new().parse_file(&path).unwrap();
    let out = doxs_core::compile(&raw).unwrap();
    assert_eq!(
        out,
        "Add\n\nAdds two numbers.\n\nParameters\n----------\na : first operand\nb : second operand\n\nReturns\n-------\nthe sum\n"
    );
}

#[test]
fn test_json_file_with_unknown_section() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(&path, r#"{"title": "x", "bogus": "y"}"#).unwrap();

    let raw = RecordLoader::new().parse_file(&path).unwrap();
    let err = doxs_core::compile(&raw).unwrap_err();
    assert!(err.violations().unwrap().names_key("bogus"));
}

#[test]
fn test_missing_and_unsupported_files() {
    let dir = TempDir::new().unwrap();
    let loader = RecordLoader::new();

    let missing = dir.path().join("missing.yaml");
    assert!(matches!(loader.parse_file(&missing), Err(LoaderError::IoError { .. })));

    let text = dir.path().join("record.txt");
    fs::write(&text, "title: x\n").unwrap();
    assert!(matches!(loader.parse_file(&text), Err(LoaderError::UnsupportedFormat { .. })));

    let (value, format) = loader
        .parse_with_fallback(&fs::read_to_string(&text).unwrap(), &text)
        .unwrap();
    assert_eq!(format, Format::Yaml);
    assert_eq!(value["title"], "x");
}

#[test]
fn test_invalid_yaml_reports_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.yaml");
    fs::write(&path, "title: [unclosed\n").unwrap();

    let err = RecordLoader::new().parse_file(&path).unwrap_err();
    assert!(matches!(err, LoaderError::YamlParseError { .. }));
    assert!(err.to_string().contains("broken.yaml"));
}
