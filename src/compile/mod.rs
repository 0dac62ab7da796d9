//! Mapping table compiler: faces and links in, fixed-width adjacency rows out.

pub(crate) mod parse;
pub(crate) mod table;
