use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::bitmap::pack::{PackOpts, PackedFace, pack_faces};
use crate::compile::table::{MappingTable, compile_mapping};
use crate::emit::header::{emit_bitmap_header, emit_combined_header, emit_mapping_header};
use crate::foundation::error::{FacemapError, FacemapResult};
use crate::graph::model::FaceGraph;

#[derive(Clone, Debug)]
/// A compiled table and packed faces; header text is rendered when requested.
pub struct ExportOutput {
    /// Compiled transition table.
    pub table: MappingTable,
    /// Packed face bitmaps in face order.
    pub faces: Vec<PackedFace>,
}

impl ExportOutput {
    /// Mapping header text.
    pub fn mapping_header(&self) -> String {
        emit_mapping_header(&self.table)
    }

    /// Bitmap header text.
    pub fn bitmap_header(&self) -> String {
        emit_bitmap_header(&self.faces)
    }

    /// Both tables in one header.
    pub fn combined_header(&self) -> String {
        emit_combined_header(&self.table, &self.faces)
    }
}

fn ensure_faces(graph: &FaceGraph) -> FacemapResult<()> {
    if graph.is_empty() {
        return Err(FacemapError::export("no faces loaded; nothing to export"));
    }
    Ok(())
}

/// Compile and render the mapping header.
#[tracing::instrument(skip(graph), fields(faces = graph.face_count()))]
pub fn export_mapping(graph: &FaceGraph) -> FacemapResult<String> {
    ensure_faces(graph)?;
    Ok(emit_mapping_header(&compile_mapping(graph)))
}

/// Decode, pack and render the bitmap header. Any failing image aborts the export.
#[tracing::instrument(skip(graph, root), fields(faces = graph.face_count()))]
pub fn export_bitmaps(graph: &FaceGraph, root: &Path, opts: PackOpts) -> FacemapResult<String> {
    ensure_faces(graph)?;
    let faces = pack_faces(graph.faces(), root, opts)?;
    Ok(emit_bitmap_header(&faces))
}

/// Compile the mapping table and pack every face.
#[tracing::instrument(skip(graph, root), fields(faces = graph.face_count()))]
pub fn export_all(graph: &FaceGraph, root: &Path, opts: PackOpts) -> FacemapResult<ExportOutput> {
    ensure_faces(graph)?;
    let table = compile_mapping(graph);
    let faces = pack_faces(graph.faces(), root, opts)?;
    Ok(ExportOutput { table, faces })
}

/// Write header text to `path`, creating parent directories.
pub fn write_output(path: &Path, text: &str) -> FacemapResult<()> {
    write_outputs(&[(path, text)])
}

/// Write several headers, all or none.
///
/// Every file is first staged as a hidden `.tmp` sibling of its target. Targets are only
/// replaced once all of them are staged; on a staging failure the staged files are removed
/// and no target is touched.
pub fn write_outputs(outputs: &[(&Path, &str)]) -> FacemapResult<()> {
    let mut staged: Vec<(PathBuf, &Path)> = Vec::with_capacity(outputs.len());
    for &(path, text) in outputs {
        match stage_output(path, text) {
            Ok(tmp) => staged.push((tmp, path)),
            Err(err) => {
                discard_staged(&staged);
                return Err(err);
            }
        }
    }

    for (i, (tmp, path)) in staged.iter().enumerate() {
        if let Err(err) = std::fs::rename(tmp, path) {
            discard_staged(&staged[i..]);
            return Err(anyhow::Error::new(err)
                .context(format!("replace header '{}'", path.display()))
                .into());
        }
    }
    for ((_, path), (_, text)) in staged.iter().zip(outputs) {
        tracing::info!(path = %path.display(), bytes = text.len(), "header written");
    }
    Ok(())
}

fn stage_output(path: &Path, text: &str) -> FacemapResult<PathBuf> {
    let name = path.file_name().ok_or_else(|| {
        FacemapError::validation(format!("output path '{}' has no file name", path.display()))
    })?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let tmp = path.with_file_name(format!(".{}.tmp", name.to_string_lossy()));
    if let Err(err) = std::fs::write(&tmp, text) {
        let _ = std::fs::remove_file(&tmp);
        return Err(anyhow::Error::new(err)
            .context(format!("write header '{}'", path.display()))
            .into());
    }
    Ok(tmp)
}

fn discard_staged(staged: &[(PathBuf, &Path)]) {
    for (tmp, _) in staged {
        if let Err(err) = std::fs::remove_file(tmp) {
            tracing::warn!(path = %tmp.display(), %err, "failed to remove staged header");
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
