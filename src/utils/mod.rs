//! Utility functions for the logging filter

pub mod http;
pub mod time;

pub use http::*;
pub use time::*;
