//! An out-of-the-box coding-problem assistant session.
//!
//! The crate includes a CLI demo for using in the terminal. And you can
//! also use it as a library to bring the assistant into your own host
//! apps: supply a backend and an optional speech recognizer, and render
//! the message stream however you like.

#![deny(missing_docs)]

mod session;

pub use session::{Session, SessionBuilder};

/// Re-exports of [`codegen_chat_core`] crate.
pub mod core {
    pub use codegen_chat_core::*;
}
