pub mod api;
pub mod app;
pub mod calendar;
pub mod config;
pub mod controller;
pub mod errors;
pub mod handlers;
pub mod i18n;
pub mod models;
pub mod state;
pub mod storage;
pub mod summary;
pub mod ui;

pub use api::ApiClient;
pub use app::router;
pub use controller::{Controller, Screen};
pub use state::AppState;
pub use storage::{load_prefs, resolve_prefs_path};
