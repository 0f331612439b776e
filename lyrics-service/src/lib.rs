pub mod app;
pub mod auth_handlers;
pub mod config;
pub mod errors;
pub mod song_handlers;
pub mod store;
pub mod user_handlers;

pub use app::{build_router, AppState};
