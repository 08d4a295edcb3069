pub mod builder;
pub mod primitive;
pub mod snapshot;
