pub mod cleanup;
pub mod engine;
pub mod tokens;
pub mod types;

pub use engine::DiffEngine;
pub use types::{DiffResult, DiffStats, DisplayRow, OpKind};
