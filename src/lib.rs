pub mod api;
pub mod app;
pub mod auth;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod schema;
pub mod state;
pub mod store;

pub use app::{app, router};
pub use state::AppState;
