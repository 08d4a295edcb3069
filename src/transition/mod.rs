pub mod engine;
pub mod entry;
pub mod frame;
pub mod plan;
