//! Shared building blocks for the asl workspace: logging and small geometry types.

pub mod logging;
pub mod rect;
pub mod vec2;

pub use logging::{FileLogger, StdoutLogger, init_file_logger, init_stdout_logger};
pub use rect::Rect;
pub use vec2::Vec2;

// Re-export log crate so downstream crates can use asl_base::log::*
pub use log;
