use std::path::Path;

use rayon::prelude::*;

use crate::bitmap::{decode::load_layer, grid::PixelGrid};
use crate::foundation::core::{BYTES_PER_LAYER, LAYERS_PER_FACE};
use crate::foundation::error::{FacemapError, FacemapResult};
use crate::graph::model::Face;

/// Packed bytes of one layer.
pub type PackedLayer = [u8; BYTES_PER_LAYER];

#[derive(Clone, Debug, PartialEq, Eq)]
/// A face's layers packed one bit per pixel.
pub struct PackedFace {
    /// Face name.
    pub name: String,
    /// Packed layers in layer order.
    pub layers: [PackedLayer; LAYERS_PER_FACE],
}

impl PackedFace {
    /// Binary literals of every layer, layer by layer.
    pub fn literals(&self) -> impl Iterator<Item = String> + '_ {
        self.layers.iter().flatten().map(|b| binary_literal(*b))
    }
}

#[derive(Clone, Copy, Debug)]
/// Options controlling [`pack_faces`].
pub struct PackOpts {
    /// Decode faces on the rayon pool. Every decode owns its buffers.
    pub parallel: bool,
}

impl Default for PackOpts {
    fn default() -> Self {
        Self { parallel: true }
    }
}

/// Pack bits eight at a time, first bit in the most significant position.
///
/// A short final chunk is zero-padded on the right.
pub fn pack_bits(bits: impl IntoIterator<Item = bool>) -> Vec<u8> {
    let mut out = Vec::new();
    let mut acc = 0u8;
    let mut n = 0u32;
    for bit in bits {
        acc = (acc << 1) | u8::from(bit);
        n += 1;
        if n == 8 {
            out.push(acc);
            acc = 0;
            n = 0;
        }
    }
    if n > 0 {
        out.push(acc << (8 - n));
    }
    out
}

/// Pack a grid row-major into its layer bytes.
pub fn pack_grid(grid: &PixelGrid) -> PackedLayer {
    let mut out = [0u8; BYTES_PER_LAYER];
    for (dst, src) in out.iter_mut().zip(pack_bits(grid.iter_row_major())) {
        *dst = src;
    }
    out
}

/// Render a byte as a C binary literal (`0b` plus 8 digits).
pub fn binary_literal(byte: u8) -> String {
    format!("0b{byte:08b}")
}

/// Decode and pack both layers of `face`; sources resolve relative to `root`.
pub fn pack_face(face: &Face, root: &Path) -> FacemapResult<PackedFace> {
    if face.images.len() != LAYERS_PER_FACE {
        return Err(FacemapError::decode(format!(
            "face '{}' has {} layer images, expected {LAYERS_PER_FACE}",
            face.name,
            face.images.len()
        )));
    }
    let mut layers = [[0u8; BYTES_PER_LAYER]; LAYERS_PER_FACE];
    for (slot, source) in layers.iter_mut().zip(&face.images) {
        let grid = load_layer(root, source).map_err(|e| match e {
            FacemapError::Decode(msg) => FacemapError::decode(format!("face '{}': {msg}", face.name)),
            other => other,
        })?;
        *slot = pack_grid(&grid);
    }
    Ok(PackedFace {
        name: face.name.clone(),
        layers,
    })
}

/// Pack every face, preserving face order. The first failing face aborts the whole run.
#[tracing::instrument(skip(faces, root), fields(faces = faces.len()))]
pub fn pack_faces(faces: &[Face], root: &Path, opts: PackOpts) -> FacemapResult<Vec<PackedFace>> {
    let packed: Vec<PackedFace> = if opts.parallel {
        faces.par_iter().map(|f| pack_face(f, root)).collect::<FacemapResult<_>>()?
    } else {
        faces.iter().map(|f| pack_face(f, root)).collect::<FacemapResult<_>>()?
    };
    tracing::debug!(faces = packed.len(), "faces packed");
    Ok(packed)
}

#[cfg(test)]
#[path = "../../tests/unit/bitmap/pack.rs"]
mod tests;
