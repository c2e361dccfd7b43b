pub mod app;
pub mod errors;
pub mod forms;
pub mod handlers;
pub mod models;
pub mod session;
pub mod state;
pub mod stats;
pub mod storage;
pub mod store;
pub mod ui;

pub use app::router;
pub use errors::AppError;
pub use session::resolve_access_key;
pub use state::{App, AppState};
pub use storage::{Storage, resolve_data_path};
