//! Export configuration: the project file and the face image set it loads.

pub(crate) mod config;
pub(crate) mod images;
