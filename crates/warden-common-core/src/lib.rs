//! Warden common core types and utilities.

pub mod error;
pub mod timestamp;

pub use error::{Error, Result};
pub use timestamp::Timestamp;
