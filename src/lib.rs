//! facemap compiles face animation graphs for small embedded displays.
//!
//! A face is a named pair of 32x16 monochrome bitmaps. Faces are joined by links that
//! say which face may follow which. facemap turns a saved diagram of faces and links into
//! two C headers:
//!
//! - a mapping header: one `#define` per face plus the `nextFaces` table, where every row
//!   lists the faces reachable from one face, padded with `INVALID_FACE`
//! - a bitmap header: the `allFaces` table holding both layers of every face, one bit per
//!   pixel, as binary literals
//!
//! # Pipeline overview
//!
//! 1. **Load**: [`Project`] names a [`GraphDocument`] and the face images.
//! 2. **Import + ingest**: [`import_graph`] drops nodes without images, [`ingest`] resolves
//!    the document into an immutable [`FaceGraph`], folding reverse links with [`merge_link`].
//! 3. **Compile**: [`compile_mapping`] builds the fixed-width [`MappingTable`].
//! 4. **Pack**: [`pack_faces`] decodes and packs every layer into [`PackedFace`]s.
//! 5. **Emit**: [`emit_mapping_header`] / [`emit_bitmap_header`] render the C text.
//!
//! Everything except image IO is pure and deterministic for a given input.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod bitmap;
mod compile;
mod emit;
mod foundation;
mod graph;
mod pipeline;
mod project;

pub use bitmap::decode::{decode_data_uri, decode_layer, load_layer, load_source_bytes};
pub use bitmap::grid::PixelGrid;
pub use bitmap::pack::{
    PackOpts, PackedFace, PackedLayer, binary_literal, pack_bits, pack_face, pack_faces,
    pack_grid,
};
pub use compile::parse::parse_mapping_header;
pub use compile::table::{MappingTable, compile_mapping};
pub use emit::header::{emit_bitmap_header, emit_combined_header, emit_mapping_header};
pub use foundation::core::{
    BYTES_PER_LAYER, FACE_HEIGHT, FACE_WIDTH, FaceIndex, INVALID_FACE, LAYERS_PER_FACE,
    NUMBER_FACES, cmp_face_names, face_symbol, validate_face_name,
};
pub use foundation::error::{FacemapError, FacemapResult};
pub use graph::document::{Cell, Endpoint, GraphDocument, LinkRecord, NodeRecord, STANDARD_LINK};
pub use graph::ingest::{import_graph, ingest};
pub use graph::merge::merge_link;
pub use graph::model::{DirectedEdge, Face, FaceGraph, Link};
pub use pipeline::{
    ExportOutput, export_all, export_bitmaps, export_mapping, write_output, write_outputs,
};
pub use project::config::{FaceSource, Project, ProjectDef};
pub use project::images::{
    FaceLayers, IMAGE_EXTENSIONS, ImageSet, is_data_uri, validate_source,
};
