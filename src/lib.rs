//! TaskFlow board core: task store, command palette, AI-assisted task
//! creation, and the single owning [`shell::Shell`] that wires them.

#![forbid(unsafe_code)]

pub mod ai;
pub mod board;
pub mod config;
pub mod errors;
pub mod input;
pub mod models;
pub mod notify;
pub mod palette;
pub mod shell;
pub mod store;
pub mod sync;
pub mod telemetry;

pub use config::GlobalConfig;
pub use errors::{AppError, Result};
pub use shell::Shell;
