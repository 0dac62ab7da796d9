//! Face graph snapshot: the saved diagram document, the resolved face/link model and the
//! operations that turn one into the other.

pub(crate) mod document;
pub(crate) mod ingest;
pub(crate) mod merge;
pub(crate) mod model;
