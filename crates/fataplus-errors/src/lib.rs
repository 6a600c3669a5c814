#![allow(clippy::must_use_candidate)]

//! Fault classification for the Fataplus API
//!
//! Turns any failure raised by a request handler into a JSON-ready
//! [`ErrorEnvelope`] and the HTTP status to send with it. Classification walks
//! an ordered rule table and stops at the first match, so the order of
//! [`rules::standard`] is part of the contract.

mod bucket;
mod classifier;
mod envelope;
mod fault;
mod logger;
pub mod rules;

pub use bucket::Bucket;
pub use classifier::{Classified, Classifier, ClassifierBuilder};
pub use envelope::{Draft, ErrorEnvelope};
pub use fault::{Fault, FaultKind};
pub use logger::{FaultLogger, NoopLogger, TracingLogger};
