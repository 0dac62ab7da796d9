use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

use anyhow::Context as _;
use serde_json::{Map, Value};

use crate::foundation::error::{FacemapError, FacemapResult};
use crate::graph::{merge::merge_link, model::DirectedEdge};

/// Link `type` written for links drawn by this crate.
pub const STANDARD_LINK: &str = "standard.Link";

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Saved diagram model: a flat list of node and link cells.
///
/// Display data the compiler does not read (positions, styling, ...) is kept verbatim so a
/// load/save cycle does not lose editor state.
pub struct GraphDocument {
    /// Node and link cells in diagram order.
    #[serde(default)]
    pub cells: Vec<Cell>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
/// One diagram cell.
pub enum Cell {
    /// Transition between two nodes.
    Link(LinkRecord),
    /// Face node.
    Node(NodeRecord),
    /// Any other cell (annotations, decorations); ignored by the compiler.
    Other(Value),
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Face node as stored by the diagram.
pub struct NodeRecord {
    /// Diagram-unique node identifier.
    pub id: String,
    /// Face name.
    pub name: String,
    /// Layer image sources attached on import.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    /// Display data not interpreted here.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Link endpoint. Dangling endpoints (a free point instead of a node) have no `id`.
pub struct Endpoint {
    /// Referenced node id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display data not interpreted here.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Endpoint {
    /// Endpoint attached to node `id`.
    pub fn node(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            extra: Map::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Link as stored by the diagram.
pub struct LinkRecord {
    /// Diagram-unique link identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Diagram link type, usually [`STANDARD_LINK`].
    #[serde(rename = "type", default = "default_link_type")]
    pub kind: String,
    /// Origin endpoint.
    pub source: Endpoint,
    /// Destination endpoint.
    pub target: Endpoint,
    /// Reverse transition allowed as well.
    #[serde(rename = "isBiDirectional", default, skip_serializing_if = "is_false")]
    pub is_bidirectional: bool,
    /// Display data not interpreted here.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_link_type() -> String {
    STANDARD_LINK.to_string()
}

fn is_false(v: &bool) -> bool {
    !*v
}

impl LinkRecord {
    /// One-way link between two node ids.
    pub fn between(source_id: &str, target_id: &str) -> Self {
        Self {
            id: Some(format!("{source_id}->{target_id}")),
            kind: default_link_type(),
            source: Endpoint::node(source_id),
            target: Endpoint::node(target_id),
            is_bidirectional: false,
            extra: Map::new(),
        }
    }
}

impl DirectedEdge for LinkRecord {
    type Node = Option<String>;

    fn source(&self) -> &Option<String> {
        &self.source.id
    }

    fn target(&self) -> &Option<String> {
        &self.target.id
    }

    fn is_bidirectional(&self) -> bool {
        self.is_bidirectional
    }

    fn set_bidirectional(&mut self, value: bool) {
        self.is_bidirectional = value;
    }
}

impl GraphDocument {
    /// Parse a graph document from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> FacemapResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| FacemapError::validation(format!("parse graph JSON: {e}")))
    }

    /// Parse a graph document from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> FacemapResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            FacemapError::validation(format!("open graph JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Write the document as pretty-printed JSON.
    pub fn to_writer_pretty<W: std::io::Write>(&self, w: W) -> FacemapResult<()> {
        serde_json::to_writer_pretty(w, self)?;
        Ok(())
    }

    /// Save the document to `path`, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> FacemapResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        let f = File::create(path)
            .with_context(|| format!("create graph JSON '{}'", path.display()))?;
        self.to_writer_pretty(BufWriter::new(f))
    }

    /// Node cells in diagram order.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeRecord> {
        self.cells.iter().filter_map(|c| match c {
            Cell::Node(n) => Some(n),
            _ => None,
        })
    }

    /// Link cells in diagram order.
    pub fn links(&self) -> impl Iterator<Item = &LinkRecord> {
        self.cells.iter().filter_map(|c| match c {
            Cell::Link(l) => Some(l),
            _ => None,
        })
    }

    /// Lookup a node by face name.
    pub fn node_by_name(&self, name: &str) -> Option<&NodeRecord> {
        self.nodes().find(|n| n.name == name)
    }

    /// Draw a link between two named nodes, folding it into an existing reverse link.
    pub fn draw_link(&mut self, from_name: &str, to_name: &str) -> FacemapResult<()> {
        let from_id = self
            .node_by_name(from_name)
            .map(|n| n.id.clone())
            .ok_or_else(|| FacemapError::validation(format!("unknown face '{from_name}'")))?;
        let to_id = self
            .node_by_name(to_name)
            .map(|n| n.id.clone())
            .ok_or_else(|| FacemapError::validation(format!("unknown face '{to_name}'")))?;

        let existing: Vec<LinkRecord> = self.links().cloned().collect();
        let before = existing.len();
        let mut merged = merge_link(existing, LinkRecord::between(&from_id, &to_id)).into_iter();

        // merge_link only promotes or appends, so positions line up with the existing cells.
        for cell in &mut self.cells {
            if let Cell::Link(rec) = cell
                && let Some(updated) = merged.next()
            {
                *rec = updated;
            }
        }
        let appended: Vec<Cell> = merged.map(Cell::Link).collect();
        if appended.is_empty() {
            tracing::debug!(from = from_name, to = to_name, links = before, "link folded");
        } else {
            tracing::debug!(from = from_name, to = to_name, "link appended");
        }
        self.cells.extend(appended);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/graph/document.rs"]
mod tests;
