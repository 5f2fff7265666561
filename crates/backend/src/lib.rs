//! An abstraction layer for generative backends.
//!
//! This crate establishes an unified protocol for the conversation
//! orchestrator to interact with various generation services, so that the
//! orchestrator can seamlessly switch between them without modifying the
//! core codebase.
//!
//! Types in this crate don't define any behavior, instead they are the
//! constraints that the implementors should adhere to.

#![deny(missing_docs)]

mod error;
mod generate;

pub use error::*;
pub use generate::*;
