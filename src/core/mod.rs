//! Core host types and utilities

pub mod error;
pub mod logging;
pub mod time;

pub use error::Error;
pub use time::FrameTimer;

/// Convenience result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
