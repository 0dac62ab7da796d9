//! C header emission for the mapping table and the packed face bitmaps.

pub(crate) mod header;
