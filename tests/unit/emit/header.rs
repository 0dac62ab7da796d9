use super::*;
use crate::compile::table::compile_mapping;
use crate::graph::model::{Face, FaceGraph, Link};

fn abc_table() -> MappingTable {
    let g = FaceGraph::new(
        vec![Face::new("A"), Face::new("B"), Face::new("C")],
        vec![Link::bidirectional(0, 1), Link::one_way(0, 2)],
    )
    .unwrap();
    compile_mapping(&g)
}

#[test]
fn mapping_header_layout() {
    let text = emit_mapping_header(&abc_table());
    let expected = "\
#define NUMBER_FACES 3
#define INVALID_FACE -1
#define A 0
#define B 1
#define C 2
const int8_t nextFaces[][2] = {
  {B, C}, //A
  {A, INVALID_FACE}, //B
  {INVALID_FACE, INVALID_FACE}, //C
};
";
    assert_eq!(text, expected);
}

#[test]
fn bitmap_header_layout() {
    let mut first = [0u8; BYTES_PER_LAYER];
    first[0] = 0b1010_0000;
    let faces = vec![
        PackedFace {
            name: "A".to_string(),
            layers: [first, [0xff; BYTES_PER_LAYER]],
        },
        PackedFace {
            name: "B".to_string(),
            layers: [[0; BYTES_PER_LAYER]; LAYERS_PER_FACE],
        },
    ];
    let text = emit_bitmap_header(&faces);
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "static const byte allFaces[][2][64] PROGMEM = {");
    assert_eq!(lines[1], "  {");
    assert!(lines[2].starts_with("    {0b10100000, 0b00000000, "));
    assert!(lines[2].ends_with("0b00000000},"));
    assert!(lines[3].ends_with("0b11111111}"));
    assert_eq!(lines[4], "  },");
    assert_eq!(lines[8], "  }");
    assert_eq!(lines[9], "};");
    assert_eq!(lines.len(), 10);

    let literals = lines[2].matches("0b").count();
    assert_eq!(literals, 64);
}

#[test]
fn empty_bitmap_table_is_still_valid_c() {
    assert_eq!(
        emit_bitmap_header(&[]),
        "static const byte allFaces[][2][64] PROGMEM = {\n};\n"
    );
}

#[test]
fn combined_header_contains_both_tables() {
    let text = emit_combined_header(&abc_table(), &[]);
    assert!(text.contains("const int8_t nextFaces[][2]"));
    assert!(text.contains("static const byte allFaces"));
    assert!(text.find("nextFaces") < text.find("allFaces"));
}
