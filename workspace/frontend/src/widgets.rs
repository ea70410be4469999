pub mod pending;
pub mod reveal;
