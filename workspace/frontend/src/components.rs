pub mod dashboard;
pub mod hero;
pub mod layout;
pub mod models;
pub mod newsletter;
pub mod playground;
