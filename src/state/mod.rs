pub mod app_state;
pub mod viewport_state;

pub use app_state::AppState;
pub use viewport_state::ViewportState;
