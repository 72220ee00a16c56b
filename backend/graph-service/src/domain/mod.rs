pub mod edge;
pub mod user;
