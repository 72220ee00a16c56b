pub mod config;
pub mod domain;
pub mod handlers;
pub mod metrics;
pub mod repository;
pub mod services;
pub mod state;

pub use config::Config;
pub use state::{AppState, Stores};
