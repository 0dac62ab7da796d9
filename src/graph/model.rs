use std::collections::{BTreeSet, HashMap};

use crate::foundation::core::{FaceIndex, face_symbol, validate_face_name};
use crate::foundation::error::{FacemapError, FacemapResult};

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// A named bitmap entity with one image source per animation layer.
pub struct Face {
    /// Unique face name; uppercased it becomes the face's header symbol.
    pub name: String,
    /// Image sources, one per layer (file path or data URI).
    #[serde(default)]
    pub images: Vec<String>,
}

impl Face {
    /// Face without image sources (enough for mapping compilation).
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            images: Vec::new(),
        }
    }

    /// Face with explicit layer sources.
    pub fn with_images(name: impl Into<String>, images: Vec<String>) -> Self {
        Self {
            name: name.into(),
            images,
        }
    }

    /// Uppercase header symbol for this face.
    pub fn symbol(&self) -> String {
        face_symbol(&self.name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
/// A directed transition allowance between two faces.
pub struct Link {
    /// Source face.
    pub from: FaceIndex,
    /// Destination face.
    pub to: FaceIndex,
    /// When set, the transition is also allowed from `to` back to `from`.
    #[serde(default, rename = "isBiDirectional")]
    pub is_bidirectional: bool,
}

impl Link {
    /// One-way link `from -> to`.
    pub fn one_way(from: usize, to: usize) -> Self {
        Self {
            from: FaceIndex(from),
            to: FaceIndex(to),
            is_bidirectional: false,
        }
    }

    /// Bidirectional link `from <-> to`.
    pub fn bidirectional(from: usize, to: usize) -> Self {
        Self {
            from: FaceIndex(from),
            to: FaceIndex(to),
            is_bidirectional: true,
        }
    }
}

/// Edge shape shared by resolved [`Link`]s and raw document link records.
///
/// [`crate::merge_link`] only needs endpoint comparison and the bidirectional flag.
pub trait DirectedEdge {
    /// Endpoint identity type.
    type Node: PartialEq;

    /// Edge origin.
    fn source(&self) -> &Self::Node;
    /// Edge destination.
    fn target(&self) -> &Self::Node;
    /// Whether the edge already allows the reverse transition.
    fn is_bidirectional(&self) -> bool;
    /// Mark the edge as (not) allowing the reverse transition.
    fn set_bidirectional(&mut self, value: bool);
}

impl DirectedEdge for Link {
    type Node = FaceIndex;

    fn source(&self) -> &FaceIndex {
        &self.from
    }

    fn target(&self) -> &FaceIndex {
        &self.to
    }

    fn is_bidirectional(&self) -> bool {
        self.is_bidirectional
    }

    fn set_bidirectional(&mut self, value: bool) {
        self.is_bidirectional = value;
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Immutable snapshot of faces and links consumed by the compiler and the packer.
///
/// Face order is significant: a face's position is its numeric index in every emitted table.
pub struct FaceGraph {
    faces: Vec<Face>,
    links: Vec<Link>,
}

impl FaceGraph {
    /// Build a validated snapshot.
    ///
    /// Face names must be valid, distinct header symbols and every link endpoint must index
    /// into `faces`.
    pub fn new(faces: Vec<Face>, links: Vec<Link>) -> FacemapResult<Self> {
        let mut seen: HashMap<String, &str> = HashMap::with_capacity(faces.len());
        for face in &faces {
            let symbol = validate_face_name(&face.name)?;
            if let Some(prev) = seen.insert(symbol.clone(), &face.name) {
                return Err(FacemapError::validation(format!(
                    "faces '{prev}' and '{}' share header symbol '{symbol}'",
                    face.name
                )));
            }
        }
        for link in &links {
            if link.from.0 >= faces.len() || link.to.0 >= faces.len() {
                return Err(FacemapError::validation(format!(
                    "link {} -> {} references a face outside 0..{}",
                    link.from,
                    link.to,
                    faces.len()
                )));
            }
        }
        Ok(Self { faces, links })
    }

    /// Snapshot with no faces and no links.
    pub fn empty() -> Self {
        Self {
            faces: Vec::new(),
            links: Vec::new(),
        }
    }

    /// Faces in index order.
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Links (already folded, at most one per unordered pair when built by ingestion).
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Number of faces.
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Return `true` when no faces are loaded.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Lookup a face index by exact name.
    pub fn face_index(&self, name: &str) -> Option<FaceIndex> {
        self.faces
            .iter()
            .position(|f| f.name == name)
            .map(FaceIndex)
    }

    /// Every allowed `(from, to)` transition as header symbols, with bidirectional links
    /// expanded into both directions.
    pub fn transitions(&self) -> BTreeSet<(String, String)> {
        let mut out = BTreeSet::new();
        for link in &self.links {
            let from = self.faces[link.from.0].symbol();
            let to = self.faces[link.to.0].symbol();
            if link.is_bidirectional {
                out.insert((to.clone(), from.clone()));
            }
            out.insert((from, to));
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/graph/model.rs"]
mod tests;
