//! Descriptor fixtures and build helpers.

use jccl::io::read_chunk_database;
use jccl::{ChunkFactory, ConfigChunkDB, Diagnostics};

/// Descriptors covering every value type, enumerations, variable counts,
/// embedded chunks and a defaults template.
pub const DISPLAY_DESCS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ChunkDescDB>
  <ChunkDesc token="Display" name="Display Window">
    <help>A window on one screen.</help>
    <PropertyDesc token="size" type="int" num="2">
      <label name="width"/>
      <label name="height"/>
    </PropertyDesc>
    <PropertyDesc token="title" type="string"/>
    <PropertyDesc token="stereo" type="bool"/>
    <PropertyDesc token="scale" type="float"/>
    <PropertyDesc token="mode" type="int">
      <enumeration name="mono" value="1"/>
      <enumeration name="stereo" value="2"/>
    </PropertyDesc>
    <PropertyDesc token="channels" type="string" num="var"/>
    <PropertyDesc token="input" type="chunk"/>
    <PropertyDesc token="panels" type="embeddedchunk" num="var"/>
    <Defaults>
      <Display size="640 480" scale="1.5"/>
    </Defaults>
  </ChunkDesc>
  <ChunkDesc token="Panel">
    <PropertyDesc token="label" type="string"/>
    <PropertyDesc token="order" type="int"/>
  </ChunkDesc>
  <ChunkDesc token="Keyboard">
    <PropertyDesc token="port" type="int"/>
  </ChunkDesc>
</ChunkDescDB>
"#;

pub fn display_factory() -> ChunkFactory {
    let (factory, diagnostics) =
        ChunkFactory::from_descriptor_source(DISPLAY_DESCS.as_bytes()).expect("descriptors parse");
    assert!(diagnostics.is_empty(), "{diagnostics}");
    factory
}

/// Build a chunk database from text against the display descriptors.
pub fn build_chunks(xml: &str) -> (ConfigChunkDB, Diagnostics) {
    read_chunk_database(xml.as_bytes(), &display_factory()).expect("chunk document parses")
}
