pub mod ease;
pub mod stagger;
