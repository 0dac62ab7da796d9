use crate::graph::model::DirectedEdge;

/// Fold a newly drawn edge into an existing edge list.
///
/// - A pre-existing reverse edge (`new.target -> new.source`) is promoted to bidirectional and
///   `new` is discarded.
/// - A pre-existing edge over the same ordered pair absorbs `new` (and picks up its
///   bidirectional flag).
/// - Otherwise `new` is appended.
///
/// Existing edges are never removed or reordered. With several parallel edges between the
/// same pair only the first match is touched.
pub fn merge_link<E: DirectedEdge>(mut edges: Vec<E>, new: E) -> Vec<E> {
    if let Some(reverse) = edges
        .iter_mut()
        .find(|e| e.source() == new.target() && e.target() == new.source())
    {
        reverse.set_bidirectional(true);
        return edges;
    }

    if let Some(same) = edges
        .iter_mut()
        .find(|e| e.source() == new.source() && e.target() == new.target())
    {
        if new.is_bidirectional() {
            same.set_bidirectional(true);
        }
        return edges;
    }

    edges.push(new);
    edges
}

#[cfg(test)]
#[path = "../../tests/unit/graph/merge.rs"]
mod tests;
