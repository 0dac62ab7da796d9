//! Face bitmaps: decoding layer images into 32x16 pixel grids and packing them into bytes.

pub(crate) mod decode;
pub(crate) mod grid;
pub(crate) mod pack;
