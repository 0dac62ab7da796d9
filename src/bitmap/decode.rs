use std::path::Path;

use base64::Engine as _;

use crate::bitmap::grid::PixelGrid;
use crate::foundation::error::{FacemapError, FacemapResult};
use crate::project::images::is_data_uri;

/// Decode encoded image bytes into a thresholded face layer.
pub fn decode_layer(bytes: &[u8]) -> FacemapResult<PixelGrid> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| FacemapError::decode(format!("decode image from memory: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    PixelGrid::from_rgba8(width, height, rgba.as_raw())
}

/// Read the encoded bytes behind an image source.
///
/// `source` is either a `data:<mime>;base64,<payload>` URI or a path relative to `root`.
pub fn load_source_bytes(root: &Path, source: &str) -> FacemapResult<Vec<u8>> {
    if is_data_uri(source) {
        return decode_data_uri(source);
    }
    let path = root.join(Path::new(source));
    std::fs::read(&path)
        .map_err(|e| FacemapError::decode(format!("read image '{}': {e}", path.display())))
}

/// Extract the payload of a base64 `data:` URI.
pub fn decode_data_uri(uri: &str) -> FacemapResult<Vec<u8>> {
    let Some(rest) = uri.strip_prefix("data:") else {
        return Err(FacemapError::decode("not a data URI"));
    };
    let Some((meta, payload)) = rest.split_once(',') else {
        return Err(FacemapError::decode("data URI has no payload"));
    };
    if !meta.ends_with(";base64") {
        return Err(FacemapError::decode(format!(
            "data URI '{meta}' is not base64 encoded"
        )));
    }
    base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|e| FacemapError::decode(format!("data URI payload: {e}")))
}

/// Load and threshold one face layer.
pub fn load_layer(root: &Path, source: &str) -> FacemapResult<PixelGrid> {
    let bytes = load_source_bytes(root, source)?;
    decode_layer(&bytes).map_err(|e| match e {
        FacemapError::Decode(msg) => FacemapError::decode(format!("{}: {msg}", short(source))),
        other => other,
    })
}

fn short(source: &str) -> &str {
    if is_data_uri(source) {
        source.split_once(',').map_or(source, |(meta, _)| meta)
    } else {
        source
    }
}

#[cfg(test)]
#[path = "../../tests/unit/bitmap/decode.rs"]
mod tests;
