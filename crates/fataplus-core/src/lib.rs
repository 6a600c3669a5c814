#![allow(clippy::must_use_candidate)]

//! Shared request-level types for the Fataplus API
//!
//! Kept free of any web framework so the classifier and the config layer can
//! depend on it without pulling in axum.

mod context;
mod environment;
mod error;
pub mod headers;

pub use context::RequestContext;
pub use environment::Environment;
pub use error::HttpError;
