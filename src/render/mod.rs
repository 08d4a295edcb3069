pub mod svg;
pub mod target;
