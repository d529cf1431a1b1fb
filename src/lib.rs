//! zplay - headless session engine for a browser coding playground.
//!
//! Modules:
//! - kernel: project files, editor, chat, preview pipeline and the store that ties them
//! - app: the `Session` host that runs effects and publishes snapshots

pub mod app;
pub mod kernel;
