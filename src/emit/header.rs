use crate::bitmap::pack::{PackedFace, binary_literal};
use crate::compile::table::MappingTable;
use crate::foundation::core::{BYTES_PER_LAYER, INVALID_FACE, LAYERS_PER_FACE, NUMBER_FACES};

/// Render the face defines and the `nextFaces` transition table.
pub fn emit_mapping_header(table: &MappingTable) -> String {
    let mut out = String::new();
    out.push_str(&format!("#define {NUMBER_FACES} {}\n", table.face_count()));
    out.push_str(&format!("#define {INVALID_FACE} -1\n"));
    for (index, symbol) in table.symbols().iter().enumerate() {
        out.push_str(&format!("#define {symbol} {index}\n"));
    }

    out.push_str(&format!(
        "const int8_t nextFaces[][{}] = {{\n",
        table.max_links()
    ));
    for (symbol, row) in table.symbols().iter().zip(table.rows()) {
        out.push_str(&format!("  {{{}}}, //{symbol}\n", row.join(", ")));
    }
    out.push_str("};\n");
    out
}

/// Render the `allFaces` bitmap table, one entry per face in the given order.
pub fn emit_bitmap_header(faces: &[PackedFace]) -> String {
    let mut out = format!(
        "static const byte allFaces[][{LAYERS_PER_FACE}][{BYTES_PER_LAYER}] PROGMEM = {{\n"
    );
    for (i, face) in faces.iter().enumerate() {
        out.push_str("  {\n");
        for (j, layer) in face.layers.iter().enumerate() {
            let literals: Vec<String> = layer.iter().map(|b| binary_literal(*b)).collect();
            let sep = if j + 1 < face.layers.len() { "," } else { "" };
            out.push_str(&format!("    {{{}}}{sep}\n", literals.join(", ")));
        }
        let sep = if i + 1 < faces.len() { "," } else { "" };
        out.push_str(&format!("  }}{sep}\n"));
    }
    out.push_str("};\n");
    out
}

/// Both tables in one header, mapping first.
pub fn emit_combined_header(table: &MappingTable, faces: &[PackedFace]) -> String {
    let mut out = emit_mapping_header(table);
    out.push('\n');
    out.push_str(&emit_bitmap_header(faces));
    out
}

#[cfg(test)]
#[path = "../../tests/unit/emit/header.rs"]
mod tests;
