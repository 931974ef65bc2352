//! Error types for HTTP handlers.

mod http_error;

pub use crate::handler::error::http_error::{Error, ErrorKind, Result};
