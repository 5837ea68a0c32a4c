//! Chunk database construction from documents.

use crate::helpers::fixtures::*;
use jccl::diagnostics::codes;
use jccl::dom::{Element, Node};
use jccl::{ChunkBuilder, ConfigChunkDB, Diagnostics, VarValue};

// =============================================================================
// TYPE DISPATCH
// =============================================================================

#[test]
fn test_unknown_chunk_type_is_dropped_with_one_error() {
    let (db, diags) = build_chunks(
        r#"<ConfigChunkDB>
             <FrobnicatorXYZ name="f" speed="3"/>
           </ConfigChunkDB>"#,
    );

    assert!(db.is_empty());
    assert_eq!(diags.len(), 1, "{diags}");
    assert_eq!(diags.errors().count(), 1);
    assert_eq!(diags.count_code(codes::UNKNOWN_CHUNK_TYPE), 1);
}

#[test]
fn test_unknown_chunk_type_does_not_stop_the_build() {
    let (db, diags) = build_chunks(
        r#"<ConfigChunkDB>
             <Keyboard name="first" port="1"/>
             <FrobnicatorXYZ/>
             <Keyboard name="second" port="2"/>
           </ConfigChunkDB>"#,
    );

    assert_eq!(db.names().collect::<Vec<_>>(), ["first", "second"]);
    assert_eq!(diags.errors().count(), 1);
}

#[test]
fn test_names_match_case_insensitively() {
    let (db, diags) = build_chunks(
        r#"<configchunkdb>
             <KEYBOARD NAME="kb" Port="4"/>
           </configchunkdb>"#,
    );

    assert!(diags.is_empty(), "{diags}");
    let kb = db.get("KB").expect("chunk 'kb'");
    assert_eq!(kb.desc_token(), "Keyboard");
    assert_eq!(kb.value("port", 0), Some(&VarValue::Int(4)));
}

#[test]
fn test_unnamed_chunk_takes_type_token() {
    let (db, _) = build_chunks("<ConfigChunkDB><keyboard/></ConfigChunkDB>");
    assert_eq!(db.names().collect::<Vec<_>>(), ["Keyboard"]);
}

#[test]
fn test_comments_and_instructions_are_skipped() {
    let (db, diags) = build_chunks(
        r#"<!-- saved configuration -->
           <?editor version="2"?>
           <ConfigChunkDB>
             <!-- input devices -->
             <Keyboard name="kb"/>
           </ConfigChunkDB>"#,
    );

    assert_eq!(db.len(), 1);
    assert!(diags.is_empty(), "{diags}");
}

// =============================================================================
// PROPERTIES
// =============================================================================

#[test]
fn test_unknown_attribute_warns_once_and_siblings_populate() {
    let (db, diags) = build_chunks(
        r#"<ConfigChunkDB>
             <Keyboard name="kb" depth="3" port="9"/>
           </ConfigChunkDB>"#,
    );

    assert_eq!(diags.len(), 1, "{diags}");
    assert_eq!(diags.count_code(codes::NO_SUCH_PROPERTY), 1);
    let kb = db.get("kb").unwrap();
    assert_eq!(kb.value("port", 0), Some(&VarValue::Int(9)));
    assert!(kb.property("depth").is_none());
}

#[test]
fn test_unknown_child_element_warns_once_and_siblings_populate() {
    let (db, diags) = build_chunks(
        r#"<ConfigChunkDB>
             <Display name="d">
               <colour>red</colour>
               <title>"Left eye"</title>
             </Display>
           </ConfigChunkDB>"#,
    );

    assert_eq!(diags.len(), 1, "{diags}");
    assert_eq!(diags.warnings().count(), 1);
    let display = db.get("d").unwrap();
    assert_eq!(display.value("title", 0), Some(&VarValue::from("Left eye")));
}

#[test]
fn test_defaults_fill_unset_properties() {
    let (db, diags) = build_chunks(
        r#"<ConfigChunkDB>
             <Display name="d" scale="2.0"/>
           </ConfigChunkDB>"#,
    );

    assert!(diags.is_empty(), "{diags}");
    let display = db.get("d").unwrap();
    assert_eq!(display.value("size", 0), Some(&VarValue::Int(640)));
    assert_eq!(display.value("size", 1), Some(&VarValue::Int(480)));
    assert_eq!(display.value("scale", 0), Some(&VarValue::Float(2.0)));
    assert_eq!(display.value("stereo", 0), Some(&VarValue::Bool(false)));
}

#[test]
fn test_embedded_chunks() {
    let (db, diags) = build_chunks(
        r#"<ConfigChunkDB>
             <Display name="d">
               <panels>
                 <Panel name="left" label="L" order="1"/>
                 <Panel name="right">
                   <label>R</label>
                   <order>2</order>
                 </Panel>
               </panels>
             </Display>
           </ConfigChunkDB>"#,
    );

    assert!(diags.is_empty(), "{diags}");
    let panels = db.get("d").unwrap().property("panels").unwrap();
    let names: Vec<_> = panels
        .values()
        .iter()
        .filter_map(VarValue::as_chunk)
        .map(|panel| (panel.name(), panel.value("order", 0).and_then(VarValue::as_int)))
        .collect();
    assert_eq!(names, [("left", Some(1)), ("right", Some(2))]);
}

#[test]
fn test_nested_unknown_type_is_an_error_inside_embedded_property() {
    let (db, diags) = build_chunks(
        r#"<ConfigChunkDB>
             <Display name="d"><panels><Gizmo/><Panel/></panels></Display>
           </ConfigChunkDB>"#,
    );

    assert_eq!(diags.count_code(codes::UNKNOWN_CHUNK_TYPE), 1);
    assert_eq!(db.get("d").unwrap().property("panels").unwrap().len(), 1);
}

#[test]
fn test_build_property_from_attribute_node() {
    let factory = display_factory();
    let mut diags = Diagnostics::new();
    let mut builder = ChunkBuilder::new(&factory, &mut diags);

    let mut chunk = builder
        .build_config_chunk(&Element::new("Keyboard").into(), true)
        .expect("keyboard");
    builder.build_property(&mut chunk, &Node::Attribute(jccl::dom::Attribute::new("port", "12")));
    builder.build_property(&mut chunk, &Node::Attribute(jccl::dom::Attribute::new("Name", "kb")));

    assert_eq!(chunk.name(), "kb");
    assert_eq!(chunk.value("port", 0), Some(&VarValue::Int(12)));
    assert!(diags.is_empty());
}

#[test]
fn test_build_config_chunk_from_fragment_uses_first_child() {
    let factory = display_factory();
    let mut diags = Diagnostics::new();
    let fragment = Node::Fragment(vec![
        Element::new("Keyboard").with_attribute("name", "first").into(),
        Element::new("Keyboard").with_attribute("name", "second").into(),
    ]);

    let chunk = ChunkBuilder::new(&factory, &mut diags).build_config_chunk(&fragment, true);
    assert_eq!(chunk.map(|c| c.name().to_string()).as_deref(), Some("first"));
}

#[test]
fn test_unexpected_node_kind_warns() {
    let factory = display_factory();
    let mut diags = Diagnostics::new();
    let mut db = ConfigChunkDB::new();
    ChunkBuilder::new(&factory, &mut diags).build_chunk_database(&mut db, &Node::Other("x".into()));

    assert_eq!(diags.count_code(codes::UNEXPECTED_NODE_KIND), 1);
}

// =============================================================================
// DESCRIPTOR LIMITS
// =============================================================================

#[test]
fn test_oversized_value_count_is_rejected_before_chunks_are_built() {
    let (factory, diags) = jccl::ChunkFactory::from_descriptor_source(
        br#"<ChunkDescDB><ChunkDesc token="A">
              <PropertyDesc token="p" type="string" num="18446744073709551615"/>
              <PropertyDesc token="q" type="int"/>
            </ChunkDesc></ChunkDescDB>"#,
    )
    .unwrap();
    assert_eq!(diags.count_code(codes::INVALID_NUM), 1);

    let (db, diags) = jccl::io::read_chunk_database(
        br#"<ConfigChunkDB><A name="x" q="4"/></ConfigChunkDB>"#,
        &factory,
    )
    .unwrap();

    assert!(diags.is_empty(), "{diags}");
    let chunk = db.get("x").unwrap();
    assert!(chunk.property("p").is_none());
    assert_eq!(chunk.value("q", 0), Some(&VarValue::Int(4)));
}
