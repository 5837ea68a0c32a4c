//! File helpers and read failures.

use std::fs;

use crate::helpers::fixtures::*;
use jccl::diagnostics::codes;
use jccl::io::{
    load_chunk_database, load_descriptor_database, read_chunk_database, read_descriptor_database,
    save_chunk_database, save_descriptor_database,
};
use jccl::{ChunkFactory, ConfigIoError, Severity, VarValue};
use rstest::rstest;
use tempfile::TempDir;

#[test]
fn test_save_then_load_chunk_database() {
    let factory = display_factory();
    let (db, _) = build_chunks(r#"<ConfigChunkDB><Keyboard name="kb" port="5"/></ConfigChunkDB>"#);
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("chunks.xml");

    let diags = save_chunk_database(&path, &db).unwrap();
    assert!(diags.is_empty(), "{diags}");
    let written = fs::read_to_string(&path).unwrap();
    assert!(written.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));

    let (loaded, diags) = load_chunk_database(&path, &factory);
    assert!(diags.is_empty(), "{diags}");
    let loaded = loaded.expect("database");
    assert_eq!(loaded, db);
    assert_eq!(loaded.get("kb").unwrap().value("port", 0), Some(&VarValue::Int(5)));
}

#[test]
fn test_save_then_load_descriptor_database() {
    let (db, _) = read_descriptor_database(DISPLAY_DESCS.as_bytes()).unwrap();
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("descs.xml");

    save_descriptor_database(&path, &db).unwrap();
    let (loaded, diags) = load_descriptor_database(&path);

    assert!(diags.is_empty(), "{diags}");
    assert_eq!(loaded, Some(db));
}

#[test]
fn test_missing_file_is_a_failure() {
    let temp_dir = TempDir::new().unwrap();
    let (db, diags) = load_descriptor_database(temp_dir.path().join("absent.xml"));

    assert!(db.is_none());
    assert_eq!(diags.len(), 1);
    let failure = diags.iter().next().unwrap();
    assert_eq!(failure.severity, Severity::Failure);
    assert_eq!(failure.code, codes::READ_FAILURE);
    assert!(matches!(failure.cause.as_deref(), Some(ConfigIoError::Io(_))));
}

#[test]
fn test_malformed_file_is_a_failure() {
    let factory = display_factory();
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.xml");
    fs::write(&path, "<ConfigChunkDB><Keyboard></ConfigChunkDB>").unwrap();

    let (db, diags) = load_chunk_database(&path, &factory);

    assert!(db.is_none());
    assert!(diags.has_failure());
    assert_eq!(diags.errors().count(), 0);
}

#[rstest]
#[case::mismatched_tags("<ConfigChunkDB><a></b></ConfigChunkDB>")]
#[case::unclosed("<ConfigChunkDB><a>")]
#[case::stray_end("</ConfigChunkDB>")]
fn test_malformed_source_fails_whole_read(#[case] source: &str) {
    assert!(read_chunk_database(source.as_bytes(), &ChunkFactory::new()).is_err());
}

#[test]
fn test_empty_source_reads_as_empty_database() {
    let (db, diags) = read_chunk_database(b"", &ChunkFactory::new()).unwrap();
    assert!(db.is_empty());
    assert!(diags.is_empty());
}
