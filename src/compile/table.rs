use std::collections::{BTreeMap, BTreeSet};

use crate::foundation::core::INVALID_FACE;
use crate::graph::model::FaceGraph;

#[derive(Clone, Debug, PartialEq, Eq)]
/// Compiled per-face transition table.
///
/// Row `i` lists the targets of face `i` as uppercase symbols, sorted ascending and padded
/// on the right with [`INVALID_FACE`] to `max_links` tokens.
pub struct MappingTable {
    symbols: Vec<String>,
    rows: Vec<Vec<String>>,
    max_links: usize,
}

impl MappingTable {
    /// Assemble a table from raw parts, e.g. when reading an emitted header back.
    ///
    /// Callers guarantee `rows.len() == symbols.len()` and every row has `max_links` tokens.
    pub(crate) fn from_parts(
        symbols: Vec<String>,
        rows: Vec<Vec<String>>,
        max_links: usize,
    ) -> Self {
        Self {
            symbols,
            rows,
            max_links,
        }
    }

    /// Face symbols in index order.
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// Padded rows in face-index order.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Common row width: the maximum out-degree over all faces.
    pub fn max_links(&self) -> usize {
        self.max_links
    }

    /// Number of rows (one per face).
    pub fn face_count(&self) -> usize {
        self.rows.len()
    }

    /// Re-derive each face's outgoing targets, ignoring padding.
    pub fn adjacency(&self) -> BTreeMap<String, BTreeSet<String>> {
        self.symbols
            .iter()
            .zip(&self.rows)
            .map(|(symbol, row)| {
                let targets = row
                    .iter()
                    .filter(|t| t.as_str() != INVALID_FACE)
                    .cloned()
                    .collect();
                (symbol.clone(), targets)
            })
            .collect()
    }

    /// Every `(from, to)` transition encoded in the table.
    pub fn transitions(&self) -> BTreeSet<(String, String)> {
        self.adjacency()
            .into_iter()
            .flat_map(|(from, targets)| targets.into_iter().map(move |to| (from.clone(), to)))
            .collect()
    }
}

/// Compile the transition table of `graph`.
///
/// Bidirectional links contribute to both endpoints. Repeated targets within one row are
/// collapsed so each partner appears once.
#[tracing::instrument(skip(graph), fields(faces = graph.face_count(), links = graph.links().len()))]
pub fn compile_mapping(graph: &FaceGraph) -> MappingTable {
    let symbols: Vec<String> = graph.faces().iter().map(|f| f.symbol()).collect();
    let mut out_sets: Vec<BTreeSet<&str>> = vec![BTreeSet::new(); symbols.len()];

    for link in graph.links() {
        out_sets[link.from.0].insert(&symbols[link.to.0]);
        if link.is_bidirectional {
            out_sets[link.to.0].insert(&symbols[link.from.0]);
        }
    }

    let max_links = out_sets.iter().map(BTreeSet::len).max().unwrap_or(0);
    let rows: Vec<Vec<String>> = out_sets
        .into_iter()
        .map(|targets| {
            let mut row: Vec<String> = targets.into_iter().map(str::to_string).collect();
            row.resize(max_links, INVALID_FACE.to_string());
            row
        })
        .collect();

    tracing::debug!(max_links, "mapping table compiled");
    MappingTable {
        symbols,
        rows,
        max_links,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compile/table.rs"]
mod tests;
