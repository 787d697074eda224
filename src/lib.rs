//! Language dependency extraction dispatcher
//!
//! Takes a file already classified by language type, hands its content to the
//! matching ecosystem parser and normalizes the parser output into a detected
//! application.
//!
//! # Modules
//!
//! - [`parser`]: Parser trait, parser output types and language type tags
//! - [`analyzer`]: The dispatcher and its result envelope
//! - [`config`]: Deserializable analyzer and logging settings
//! - [`logging`]: Tracing subscriber setup

pub mod analyzer;
pub mod config;
pub mod logging;
pub mod parser;
