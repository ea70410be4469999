pub mod particles;
pub mod stats;
pub mod view;
