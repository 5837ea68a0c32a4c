//! Serialize → rebuild round trips.

use crate::helpers::fixtures::*;
use jccl::diagnostics::codes;
use jccl::io::{read_chunk_database, read_descriptor_database, write_chunk_database, write_descriptor_database};
use jccl::writer::{self, WriteOptions};
use jccl::{ChunkFactory, VarValue};
use rstest::rstest;

const CHUNKS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ConfigChunkDB>
  <Display name="left" title="&quot;Left &amp; right&quot;" stereo="true" mode="stereo">
    <size>1024 768</size>
    <channels>red "deep blue" &lt;green&gt;</channels>
    <input>kb</input>
    <panels>
      <Panel name="top" label="Top" order="1"/>
      <Panel name="bottom" label="Bottom" order="2"/>
    </panels>
  </Display>
  <Display name="plain"/>
  <Keyboard name="kb" port="3"/>
</ConfigChunkDB>
"#;

#[rstest]
#[case(WriteOptions::default())]
#[case(WriteOptions::compact())]
fn test_chunk_database_round_trip(#[case] options: WriteOptions) {
    let factory = display_factory();
    let (db, diags) = read_chunk_database(CHUNKS.as_bytes(), &factory).unwrap();
    assert!(diags.is_empty(), "{diags}");

    let (text, diags) = writer::write_chunk_database(&db, &options).unwrap();
    assert!(diags.is_empty(), "{diags}");
    let (rebuilt, diags) = read_chunk_database(text.as_bytes(), &factory).unwrap();

    assert!(diags.is_empty(), "{diags}\n{text}");
    assert_eq!(rebuilt, db, "{text}");
}

#[test]
fn test_round_trip_preserves_awkward_strings() {
    let factory = display_factory();
    let (mut db, _) = read_chunk_database(CHUNKS.as_bytes(), &factory).unwrap();
    let display = db.get_mut("plain").unwrap();
    let channels = display.property_mut("channels").unwrap();
    channels.set_value(VarValue::from("a < b && c > d"), 0).unwrap();
    channels.set_value(VarValue::from(""), 1).unwrap();
    channels.set_value(VarValue::from("  padded  "), 2).unwrap();

    let (text, _) = write_chunk_database(&db).unwrap();
    let (rebuilt, _) = read_chunk_database(text.as_bytes(), &factory).unwrap();

    let channels = rebuilt.get("plain").unwrap().property("channels").unwrap();
    assert_eq!(
        channels.values(),
        &[
            VarValue::from("a < b && c > d"),
            VarValue::from(""),
            VarValue::from("  padded  "),
        ]
    );
}

#[test]
fn test_round_trip_keeps_quotes_inside_bare_tokens() {
    let factory = display_factory();
    let source = r#"<ConfigChunkDB>
        <Display name="q" title='ab"cd' channels='x"y "two words" ends"'/>
      </ConfigChunkDB>"#;
    let (db, diags) = read_chunk_database(source.as_bytes(), &factory).unwrap();
    assert!(diags.is_empty(), "{diags}");

    let (text, diags) = write_chunk_database(&db).unwrap();
    assert!(diags.is_empty(), "{diags}");
    let (rebuilt, diags) = read_chunk_database(text.as_bytes(), &factory).unwrap();

    assert!(diags.is_empty(), "{diags}\n{text}");
    assert_eq!(rebuilt, db, "{text}");
    let display = rebuilt.get("q").unwrap();
    assert_eq!(display.value("title", 0), Some(&VarValue::from(r#"ab"cd"#)));
    assert_eq!(
        display.property("channels").unwrap().values(),
        &[
            VarValue::from(r#"x"y"#),
            VarValue::from("two words"),
            VarValue::from(r#"ends""#),
        ]
    );
}

#[test]
fn test_unwritable_string_is_reported_instead_of_split() {
    let factory = display_factory();
    let (mut db, _) = read_chunk_database(CHUNKS.as_bytes(), &factory).unwrap();
    let channels = db.get_mut("plain").unwrap().property_mut("channels").unwrap();
    channels.set_value(VarValue::from(r#"say "hi""#), 0).unwrap();
    channels.set_value(VarValue::from("next"), 1).unwrap();

    let (text, diags) = write_chunk_database(&db).unwrap();
    assert_eq!(diags.count_code(codes::UNWRITABLE_VALUE), 1);

    let (rebuilt, _) = read_chunk_database(text.as_bytes(), &factory).unwrap();
    let channels = rebuilt.get("plain").unwrap().property("channels").unwrap();
    assert_eq!(channels.values(), &[VarValue::from(""), VarValue::from("next")]);
}

#[test]
fn test_round_trip_keeps_chunk_order_and_names() {
    let factory = display_factory();
    let (db, _) = read_chunk_database(CHUNKS.as_bytes(), &factory).unwrap();
    let (text, _) = write_chunk_database(&db).unwrap();
    let (rebuilt, _) = read_chunk_database(text.as_bytes(), &factory).unwrap();

    let types: Vec<_> = rebuilt.iter().map(|c| (c.name(), c.desc_token())).collect();
    assert_eq!(
        types,
        [("left", "Display"), ("plain", "Display"), ("kb", "Keyboard")]
    );
}

#[test]
fn test_descriptor_database_round_trip() {
    let (db, diags) = read_descriptor_database(DISPLAY_DESCS.as_bytes()).unwrap();
    assert!(diags.is_empty(), "{diags}");

    let text = write_descriptor_database(&db).unwrap();
    let (rebuilt, diags) = read_descriptor_database(text.as_bytes()).unwrap();

    assert!(diags.is_empty(), "{diags}\n{text}");
    assert_eq!(rebuilt, db, "{text}");

    // The rebuilt descriptors still resolve their defaults.
    let (factory, diags) = ChunkFactory::with_descriptors(&rebuilt);
    assert!(diags.is_empty(), "{diags}");
    let display = factory.create_chunk("Display", true).unwrap();
    assert_eq!(display.value("scale", 0), Some(&VarValue::Float(1.5)));
}
