use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use crate::bitmap::pack::PackOpts;
use crate::foundation::core::{LAYERS_PER_FACE, validate_face_name};
use crate::foundation::error::{FacemapError, FacemapResult};
use crate::graph::{
    document::GraphDocument,
    ingest::{import_graph, ingest},
    model::FaceGraph,
};
use crate::project::images::{ImageSet, validate_source};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// JSON-facing project file.
pub struct ProjectDef {
    /// Graph document path, relative to the project file.
    pub graph: String,
    /// Directory grouped into faces from `<name>_<layer>.<ext>` files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images_dir: Option<String>,
    /// Explicit faces; they replace grouped faces of the same name.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub faces: Vec<FaceSource>,
    /// Default mapping header output path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mapping_out: Option<String>,
    /// Default bitmap header output path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bitmap_out: Option<String>,
    /// Decode faces in parallel.
    #[serde(default = "default_parallel_decode")]
    pub parallel_decode: bool,
}

fn default_parallel_decode() -> bool {
    true
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// One explicitly listed face.
pub struct FaceSource {
    /// Face name.
    pub name: String,
    /// Layer image sources (paths relative to the project file, or data URIs).
    pub images: Vec<String>,
}

/// A loaded project: its definition plus the directory relative paths resolve against.
#[derive(Debug, Clone)]
pub struct Project {
    def: ProjectDef,
    root: PathBuf,
}

impl Project {
    /// Wrap a definition; relative paths resolve against `root`.
    pub fn from_def(def: ProjectDef, root: impl Into<PathBuf>) -> Self {
        Self {
            def,
            root: root.into(),
        }
    }

    /// Parse a project from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R, root: impl Into<PathBuf>) -> FacemapResult<Self> {
        let def: ProjectDef = serde_json::from_reader(r)
            .map_err(|e| FacemapError::validation(format!("parse project JSON: {e}")))?;
        Ok(Self::from_def(def, root))
    }

    /// Parse a project file; its directory becomes the project root.
    pub fn from_path(path: impl AsRef<Path>) -> FacemapResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            FacemapError::validation(format!("open project JSON '{}': {e}", path.display()))
        })?;
        let root = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        Self::from_reader(BufReader::new(f), root)
    }

    /// Project definition.
    pub fn def(&self) -> &ProjectDef {
        &self.def
    }

    /// Directory relative paths resolve against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Check paths and explicit faces.
    pub fn validate(&self) -> FacemapResult<()> {
        validate_source(&self.def.graph, "project graph")?;
        if let Some(dir) = &self.def.images_dir {
            validate_source(dir, "project images_dir")?;
        }
        for face in &self.def.faces {
            validate_face_name(&face.name)?;
            if face.images.len() != LAYERS_PER_FACE {
                return Err(FacemapError::validation(format!(
                    "face '{}' lists {} images, expected {LAYERS_PER_FACE}",
                    face.name,
                    face.images.len()
                )));
            }
            for source in &face.images {
                validate_source(source, &format!("face '{}' image", face.name))?;
            }
        }
        Ok(())
    }

    /// Faces loaded by this project: the grouped image directory plus explicit faces.
    pub fn image_set(&self) -> FacemapResult<ImageSet> {
        let mut set = match &self.def.images_dir {
            Some(dir) => ImageSet::scan_dir(&self.root, dir)?,
            None => ImageSet::new(),
        };
        let mut explicit = ImageSet::new();
        for face in &self.def.faces {
            let [l0, l1] = face.images.as_slice() else {
                return Err(FacemapError::validation(format!(
                    "face '{}' must list exactly {LAYERS_PER_FACE} images",
                    face.name
                )));
            };
            explicit.insert(face.name.clone(), [l0.clone(), l1.clone()]);
        }
        set.extend(explicit);
        Ok(set)
    }

    /// Load the graph document named by the project.
    pub fn graph_document(&self) -> FacemapResult<GraphDocument> {
        GraphDocument::from_path(self.root.join(Path::new(&self.def.graph)))
    }

    /// Validate, load images and graph, import the graph against the loaded faces and ingest it.
    #[tracing::instrument(skip(self), fields(root = %self.root.display()))]
    pub fn face_graph(&self) -> FacemapResult<FaceGraph> {
        self.validate()?;
        let images = self.image_set()?;
        let doc = self.graph_document()?;
        ingest(&import_graph(&doc, &images))
    }

    /// Mapping header path from the project, resolved against the root.
    pub fn mapping_out(&self) -> Option<PathBuf> {
        self.def.mapping_out.as_ref().map(|p| self.root.join(p))
    }

    /// Bitmap header path from the project, resolved against the root.
    pub fn bitmap_out(&self) -> Option<PathBuf> {
        self.def.bitmap_out.as_ref().map(|p| self.root.join(p))
    }

    /// Packing options derived from the project.
    pub fn pack_opts(&self) -> PackOpts {
        PackOpts {
            parallel: self.def.parallel_decode,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/project/config.rs"]
mod tests;
