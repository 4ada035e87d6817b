pub mod api;
pub mod app;
pub mod errors;
pub mod format;
pub mod handlers;
pub mod models;
pub mod state;
pub mod ui;

pub use api::BackendClient;
pub use app::router;
pub use state::AppState;
