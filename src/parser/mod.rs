//! Parser layer
//! - traits.rs: Parser trait definition and ParseError
//! - types.rs: Parser output types (Library, Dependency) and LangType
//!
//! Concrete ecosystem parsers live outside this crate and implement [`Parser`].

pub mod traits;
pub mod types;

pub use traits::{ParseError, ParseOutput, Parser, ReadSeek};
pub use types::{Dependency, LangType, Library, Location, UnknownLangType};
