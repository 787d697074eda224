//! Shared test utilities

pub mod parser;

pub use parser::ScriptedParser;
