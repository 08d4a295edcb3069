pub mod curve;
pub mod kernel;
pub mod label;
