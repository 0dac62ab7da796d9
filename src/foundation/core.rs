use crate::foundation::error::{FacemapError, FacemapResult};

/// Width of one face layer in pixels.
pub const FACE_WIDTH: u32 = 32;
/// Height of one face layer in pixels.
pub const FACE_HEIGHT: u32 = 16;
/// Animation layers stored per face.
pub const LAYERS_PER_FACE: usize = 2;
/// Packed bytes per layer (one bit per pixel).
pub const BYTES_PER_LAYER: usize = (FACE_WIDTH * FACE_HEIGHT / 8) as usize;

/// Sentinel token padding mapping rows that have fewer than `max_links` targets.
pub const INVALID_FACE: &str = "INVALID_FACE";
/// Name of the face count define in the mapping header.
pub const NUMBER_FACES: &str = "NUMBER_FACES";

/// 0-based position of a face in the sorted face list.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FaceIndex(pub usize);

impl std::fmt::Display for FaceIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Uppercase symbolic name used for a face in emitted headers.
pub fn face_symbol(name: &str) -> String {
    name.to_uppercase()
}

/// Validate that `name` can be emitted as a C preprocessor symbol and return that symbol.
pub fn validate_face_name(name: &str) -> FacemapResult<String> {
    if name.trim().is_empty() {
        return Err(FacemapError::validation("face name must be non-empty"));
    }
    let symbol = face_symbol(name);
    let mut chars = symbol.chars();
    let head_ok = chars
        .next()
        .is_some_and(|c| c.is_ascii_uppercase() || c == '_');
    let tail_ok = chars.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_');
    if !head_ok || !tail_ok {
        return Err(FacemapError::validation(format!(
            "face name '{name}' is not a valid C identifier"
        )));
    }
    if symbol == INVALID_FACE || symbol == NUMBER_FACES {
        return Err(FacemapError::validation(format!(
            "face name '{name}' collides with reserved symbol '{symbol}'"
        )));
    }
    Ok(symbol)
}

/// Case-insensitive lexical ordering used for the face list.
///
/// Names equal ignoring case fall back to byte order so the result is total.
pub fn cmp_face_names(a: &str, b: &str) -> std::cmp::Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
