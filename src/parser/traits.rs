//! Parser trait definition

use std::io::{Read, Seek};

use crate::parser::types::{Dependency, Library};

/// Readable and seekable byte stream handed to parsers
pub trait ReadSeek: Read + Seek {}

impl<T: Read + Seek + ?Sized> ReadSeek for T {}

/// Libraries and dependency edges extracted from one file
pub type ParseOutput = (Vec<Library>, Vec<Dependency>);

/// Trait for parsing lock files, manifests and binaries of one ecosystem
pub trait Parser: Send + Sync {
    /// Parse the content and extract libraries and their dependency edges
    ///
    /// The stream is positioned at the start of the file content. Parsers may
    /// read it to the end and seek within it.
    fn parse(&self, content: &mut dyn ReadSeek) -> Result<ParseOutput, ParseError>;
}

/// Error type for parsing operations
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Failed to parse the file structure
    #[error("Failed to parse file: {0}")]
    ParseFailed(String),

    /// Invalid syntax in the file
    #[error("Invalid syntax: {0}")]
    InvalidSyntax(String),

    /// Reading the content failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error raised by a foreign parser implementation
    #[error(transparent)]
    Other(Box<dyn std::error::Error + Send + Sync>),
}
