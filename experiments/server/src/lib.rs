//! HTTP front end of the sign recognition stream.

pub mod config;
pub mod error;
pub mod mjpeg;
pub mod routes;
pub mod state;

pub use config::{Args, Mode};
pub use error::ServerError;
pub use routes::router;
pub use state::{AppState, build_pipeline};
