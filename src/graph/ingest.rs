use std::collections::HashMap;

use crate::foundation::core::{FaceIndex, cmp_face_names};
use crate::foundation::error::{FacemapError, FacemapResult};
use crate::graph::{
    document::{Cell, GraphDocument},
    merge::merge_link,
    model::{Face, FaceGraph, Link},
};
use crate::project::images::ImageSet;

/// Resolve a graph document into a [`FaceGraph`] snapshot.
///
/// Faces are sorted by name (case-insensitive). Links whose endpoints do not resolve to a
/// node are dropped; resolved links are folded with [`merge_link`].
#[tracing::instrument(skip(doc), fields(cells = doc.cells.len()))]
pub fn ingest(doc: &GraphDocument) -> FacemapResult<FaceGraph> {
    let mut name_by_id: HashMap<&str, &str> = HashMap::new();
    for node in doc.nodes() {
        if name_by_id.insert(&node.id, &node.name).is_some() {
            return Err(FacemapError::validation(format!(
                "duplicate node id '{}'",
                node.id
            )));
        }
    }

    let mut faces: Vec<Face> = doc
        .nodes()
        .map(|n| Face::with_images(n.name.clone(), n.images.clone()))
        .collect();
    faces.sort_by(|a, b| cmp_face_names(&a.name, &b.name));

    let index_by_name: HashMap<&str, FaceIndex> = faces
        .iter()
        .enumerate()
        .map(|(i, f)| (f.name.as_str(), FaceIndex(i)))
        .collect();
    let resolve = |id: Option<&String>| -> Option<FaceIndex> {
        let name = name_by_id.get(id?.as_str())?;
        index_by_name.get(name).copied()
    };

    let mut links: Vec<Link> = Vec::new();
    let mut dropped = 0usize;
    for rec in doc.links() {
        let (Some(from), Some(to)) = (resolve(rec.source.id.as_ref()), resolve(rec.target.id.as_ref()))
        else {
            tracing::debug!(link = ?rec.id, "dropping link with unresolved endpoint");
            dropped += 1;
            continue;
        };
        links = merge_link(
            links,
            Link {
                from,
                to,
                is_bidirectional: rec.is_bidirectional,
            },
        );
    }

    tracing::debug!(faces = faces.len(), links = links.len(), dropped, "graph ingested");
    FaceGraph::new(faces, links)
}

/// Restrict a saved document to the faces present in `images`.
///
/// Nodes naming an unknown face are removed together with the links touching them; the
/// remaining nodes receive the layer sources of their face. Unmatched nodes never fail the
/// import.
#[tracing::instrument(skip(doc, images), fields(faces = images.len()))]
pub fn import_graph(doc: &GraphDocument, images: &ImageSet) -> GraphDocument {
    let mut dropped_ids: Vec<&str> = Vec::new();
    let mut cells = Vec::with_capacity(doc.cells.len());

    for cell in &doc.cells {
        match cell {
            Cell::Node(node) => match images.get(&node.name) {
                Some(layers) => {
                    let mut node = node.clone();
                    node.images = layers.to_vec();
                    cells.push(Cell::Node(node));
                }
                None => dropped_ids.push(&node.id),
            },
            other => cells.push(other.clone()),
        }
    }

    if !dropped_ids.is_empty() {
        tracing::warn!(
            dropped = dropped_ids.len(),
            "imported graph references faces that are not loaded"
        );
        cells.retain(|cell| match cell {
            Cell::Link(rec) => ![&rec.source.id, &rec.target.id]
                .iter()
                .any(|id| id.as_deref().is_some_and(|id| dropped_ids.contains(&id))),
            _ => true,
        });
    }

    GraphDocument { cells }
}

#[cfg(test)]
#[path = "../../tests/unit/graph/ingest.rs"]
mod tests;
