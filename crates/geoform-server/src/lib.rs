#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

pub mod extract;
pub mod handler;
pub mod middleware;
pub mod pipeline;
pub mod service;

pub use crate::handler::{Error, ErrorKind, Result};

// Tracing target constants for consistent logging.
pub const TRACING_TARGET_AUTHENTICATION: &str = "geoform_server::authentication";
pub const TRACING_TARGET_HANDLER: &str = "geoform_server::handler";
