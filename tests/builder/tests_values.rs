//! Value text: tokenization, enumerations and literal coercion.

use crate::helpers::fixtures::*;
use jccl::diagnostics::codes;
use jccl::dom::{Element, Node};
use jccl::{BuildOptions, ChunkBuilder, Diagnostics, VarValue};
use rstest::rstest;

// =============================================================================
// TOKENIZATION
// =============================================================================

#[test]
fn test_quoted_tokens_keep_whitespace() {
    let (db, diags) = build_chunks(
        r#"<ConfigChunkDB>
             <Display name="d"><channels>foo "bar baz" qux</channels></Display>
           </ConfigChunkDB>"#,
    );

    assert!(diags.is_empty(), "{diags}");
    let channels: Vec<_> = db.get("d").unwrap().property("channels").unwrap().values().to_vec();
    assert_eq!(
        channels,
        [VarValue::from("foo"), VarValue::from("bar baz"), VarValue::from("qux")]
    );
}

#[test]
fn test_unterminated_quote_runs_to_end() {
    let (db, _) = build_chunks(
        r#"<ConfigChunkDB><Display name="d"><channels>foo "bar</channels></Display></ConfigChunkDB>"#,
    );
    let channels = db.get("d").unwrap().property("channels").unwrap();
    assert_eq!(channels.values(), &[VarValue::from("foo"), VarValue::from("bar")]);
}

// =============================================================================
// VARIABLE COUNTS
// =============================================================================

#[test]
fn test_variable_property_continues_across_text_fragments() {
    let factory = display_factory();
    let mut diags = Diagnostics::new();
    let display = Element::new("Display").with_child(
        Element::new("channels")
            .with_child(Node::text("a b"))
            .with_child(Node::text(" \"c d\" e"))
            .with_child(Node::text("f g h i j")),
    );

    let chunk = ChunkBuilder::new(&factory, &mut diags)
        .build_config_chunk(&display.into(), true)
        .expect("display");

    let channels: Vec<_> = chunk
        .property("channels")
        .unwrap()
        .values()
        .iter()
        .filter_map(VarValue::as_str)
        .collect();
    assert_eq!(channels, ["a", "b", "c d", "e", "f", "g", "h", "i", "j"]);
    assert!(diags.is_empty(), "{diags}");
}

#[test]
fn test_comment_between_fragments_warns_but_keeps_numbering() {
    let (db, diags) = build_chunks(
        r#"<ConfigChunkDB>
             <Display name="d"><channels>a b<!-- split -->c</channels></Display>
           </ConfigChunkDB>"#,
    );

    let channels = db.get("d").unwrap().property("channels").unwrap();
    assert_eq!(channels.len(), 3);
    assert_eq!(channels.value(2), Some(&VarValue::from("c")));
    assert_eq!(diags.count_code(codes::UNEXPECTED_CHILD), 1);
}

#[test]
fn test_document_values_replace_variable_defaults() {
    let factory = display_factory();
    let mut diags = Diagnostics::new();
    let mut chunk = factory.create_chunk("Display", true).unwrap();
    let channels = chunk.property_mut("channels").unwrap();
    channels.set_value(VarValue::from("x"), 0).unwrap();
    channels.set_value(VarValue::from("y"), 1).unwrap();

    let mut builder = ChunkBuilder::new(&factory, &mut diags);
    builder.build_property(&mut chunk, &Element::new("channels").with_text("z").into());

    assert_eq!(chunk.property("channels").unwrap().values(), &[VarValue::from("z")]);
}

#[test]
fn test_fixed_property_overflow_warns() {
    let (db, diags) = build_chunks(
        r#"<ConfigChunkDB><Display name="d" size="1 2 3"/></ConfigChunkDB>"#,
    );

    let display = db.get("d").unwrap();
    assert_eq!(display.property("size").unwrap().len(), 2);
    assert_eq!(diags.count_code(codes::TOO_MANY_VALUES), 1);
    assert!(!diags.has_errors());
}

// =============================================================================
// ENUMERATIONS AND LITERALS
// =============================================================================

#[rstest]
#[case("mode", "stereo", VarValue::Int(2))]
#[case("mode", "mono", VarValue::Int(1))]
#[case("mode", "7", VarValue::Int(7))]
#[case("port", "42", VarValue::Int(42))]
#[case("stereo", "true", VarValue::Bool(true))]
#[case("stereo", "0", VarValue::Bool(false))]
#[case("scale", "0.25", VarValue::Float(0.25))]
#[case("input", "kb", VarValue::Chunk("kb".into()))]
fn test_enumeration_or_literal(#[case] token: &str, #[case] text: &str, #[case] expected: VarValue) {
    let chunk_type = if token == "port" { "Keyboard" } else { "Display" };
    let xml = format!(r#"<ConfigChunkDB><{chunk_type} name="c" {token}="{text}"/></ConfigChunkDB>"#);

    let (db, diags) = build_chunks(&xml);

    assert!(diags.is_empty(), "{diags}");
    assert_eq!(db.get("c").unwrap().value(token, 0), Some(&expected));
}

#[rstest]
#[case("port", "many")]
#[case("port", "1.5")]
fn test_bad_literal_is_an_error(#[case] token: &str, #[case] text: &str) {
    let xml = format!(r#"<ConfigChunkDB><Keyboard name="kb" {token}="{text}"/></ConfigChunkDB>"#);

    let (db, diags) = build_chunks(&xml);

    assert_eq!(diags.count_code(codes::INVALID_LITERAL), 1);
    assert_eq!(db.get("kb").unwrap().value(token, 0), Some(&VarValue::Int(0)));
}

#[test]
fn test_enumeration_labels_match_exactly() {
    let (_, diags) = build_chunks(
        r#"<ConfigChunkDB><Display name="d" mode="STEREO"/></ConfigChunkDB>"#,
    );
    assert_eq!(diags.count_code(codes::INVALID_LITERAL), 1);
}

#[test]
fn test_lazy_build_without_defaults() {
    let factory = display_factory();
    let (db, diags) = jccl::io::read_chunk_database_with(
        br#"<ConfigChunkDB><Display name="d" title="t"/></ConfigChunkDB>"#,
        &factory,
        BuildOptions { use_defaults: false },
    )
    .unwrap();

    assert!(diags.is_empty());
    let display = db.get("d").unwrap();
    assert_eq!(display.properties().count(), 1);
    assert!(display.value("size", 0).is_none());
}
