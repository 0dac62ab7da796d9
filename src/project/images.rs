use std::{collections::BTreeMap, path::Path};

use anyhow::Context as _;

use crate::foundation::core::LAYERS_PER_FACE;
use crate::foundation::error::{FacemapError, FacemapResult};

/// File extensions picked up when grouping an image directory.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "bmp", "gif", "jpg", "jpeg"];

/// Layer sources of one face, in layer order.
pub type FaceLayers = [String; LAYERS_PER_FACE];

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// The currently loaded faces: face name to layer image sources.
pub struct ImageSet {
    faces: BTreeMap<String, FaceLayers>,
}

impl ImageSet {
    /// Empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a face, returning the previous layers if any.
    pub fn insert(&mut self, name: impl Into<String>, layers: FaceLayers) -> Option<FaceLayers> {
        self.faces.insert(name.into(), layers)
    }

    /// Layer sources of face `name`.
    pub fn get(&self, name: &str) -> Option<&FaceLayers> {
        self.faces.get(name)
    }

    /// Return `true` when face `name` is loaded.
    pub fn contains(&self, name: &str) -> bool {
        self.faces.contains_key(name)
    }

    /// Number of loaded faces.
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// Return `true` when no faces are loaded.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Loaded face names in byte order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.faces.keys().map(String::as_str)
    }

    /// Merge `other` into `self`; faces in `other` win.
    pub fn extend(&mut self, other: ImageSet) {
        self.faces.extend(other.faces);
    }

    /// Group `<name>_<layer>.<ext>` file names found in `dir` into faces.
    ///
    /// Files with other extensions or without a layer suffix are ignored. A face with a
    /// missing or duplicated layer is rejected.
    pub fn group_files<'a>(
        dir: &str,
        file_names: impl IntoIterator<Item = &'a str>,
    ) -> FacemapResult<Self> {
        let dir = dir.trim_end_matches('/');
        let mut partial: BTreeMap<String, [Option<String>; LAYERS_PER_FACE]> = BTreeMap::new();

        for file in file_names {
            let Some((stem, ext)) = file.rsplit_once('.') else {
                continue;
            };
            if !IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()) {
                continue;
            }
            let Some((name, layer)) = stem.rsplit_once('_') else {
                tracing::debug!(file, "image without layer suffix ignored");
                continue;
            };
            let Some(layer) = layer.parse::<usize>().ok().filter(|l| *l < LAYERS_PER_FACE) else {
                tracing::debug!(file, "image with unknown layer ignored");
                continue;
            };

            let source = if dir.is_empty() {
                file.to_string()
            } else {
                format!("{dir}/{file}")
            };
            let slots = partial.entry(name.to_string()).or_default();
            if let Some(prev) = &slots[layer] {
                return Err(FacemapError::validation(format!(
                    "face '{name}' has two images for layer {layer}: '{prev}' and '{source}'"
                )));
            }
            slots[layer] = Some(source);
        }

        let mut out = Self::new();
        for (name, slots) in partial {
            let [Some(l0), Some(l1)] = slots else {
                return Err(FacemapError::validation(format!(
                    "face '{name}' needs exactly {LAYERS_PER_FACE} layer images"
                )));
            };
            out.insert(name, [l0, l1]);
        }
        Ok(out)
    }

    /// Group the images of directory `dir` (relative to `root`).
    pub fn scan_dir(root: &Path, dir: &str) -> FacemapResult<Self> {
        let abs = root.join(Path::new(dir));
        let mut names: Vec<String> = Vec::new();
        for entry in std::fs::read_dir(&abs)
            .with_context(|| format!("read image dir '{}'", abs.display()))?
        {
            let entry = entry.with_context(|| format!("read image dir '{}'", abs.display()))?;
            if !entry.path().is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        names.sort();
        let set = Self::group_files(dir, names.iter().map(String::as_str))?;
        tracing::debug!(dir, faces = set.len(), "image dir grouped");
        Ok(set)
    }
}

/// Return `true` for inline `data:` image sources.
pub fn is_data_uri(source: &str) -> bool {
    source.starts_with("data:")
}

/// Validate an image source: a data URI, or a relative path without `..` segments.
pub fn validate_source(source: &str, field: &str) -> FacemapResult<()> {
    if source.trim().is_empty() {
        return Err(FacemapError::validation(format!(
            "{field} must be non-empty"
        )));
    }
    if is_data_uri(source) {
        return Ok(());
    }
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(FacemapError::validation(format!(
            "{field} must be a relative path"
        )));
    }
    if s.split('/').any(|part| part == "..") {
        return Err(FacemapError::validation(format!(
            "{field} must not contain '..'"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/project/images.rs"]
mod tests;
