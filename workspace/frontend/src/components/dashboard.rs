pub mod ticker;
pub mod view;
