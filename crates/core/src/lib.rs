//! Core logic including the input classifier, prompt construction, the
//! conversation log, and the generation orchestrator.

#![deny(missing_docs)]
#![deny(clippy::missing_safety_doc)]

#[macro_use]
extern crate tracing;

mod backend_client;
pub mod classify;
pub mod conversation;
pub mod dictation;
pub mod input;
mod orchestrator;
pub mod prompt;

pub use backend_client::BackendClient;
pub use orchestrator::{Orchestrator, OrchestratorBuilder, Phase};
