//! Dispatcher for language-specific parsers
//!
//! Runs a parser over the content of a single file and turns its output into
//! an [`Analysis`]:
//!
//! - empty content → [`Analysis::Absence`], the parser is not invoked
//! - parser error → [`AnalyzeError::Parse`]
//! - no libraries → [`Analysis::Absence`]
//! - otherwise → [`Analysis::Detection`] holding exactly one [`Application`]

use std::io::{self, Read, Seek, SeekFrom};

use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::analyzer::error::AnalyzeError;
use crate::analyzer::result::{Analysis, Application};
use crate::config::AnalyzerOptions;
use crate::parser::traits::Parser;
use crate::parser::types::LangType;

/// Analyze a lock file or manifest with the given parser using default options
pub fn analyze<R, P>(
    lang_type: LangType,
    file_path: &str,
    content: &mut R,
    parser: &P,
) -> Result<Analysis, AnalyzeError>
where
    R: Read + Seek,
    P: Parser + ?Sized,
{
    Analyzer::default().analyze(lang_type, file_path, content, parser)
}

/// Analyze a file that is itself a package (JAR, Go binary, ...) using default options
pub fn analyze_package<R, P>(
    lang_type: LangType,
    file_path: &str,
    content: &mut R,
    parser: &P,
) -> Result<Analysis, AnalyzeError>
where
    R: Read + Seek,
    P: Parser + ?Sized,
{
    Analyzer::default().analyze_package(lang_type, file_path, content, parser)
}

/// Stateless dispatcher configured with [`AnalyzerOptions`]
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    options: AnalyzerOptions,
}

impl Analyzer {
    pub fn new(options: AnalyzerOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &AnalyzerOptions {
        &self.options
    }

    /// Analyze a file listing many libraries, such as a lock file
    pub fn analyze<R, P>(
        &self,
        lang_type: LangType,
        file_path: &str,
        content: &mut R,
        parser: &P,
    ) -> Result<Analysis, AnalyzeError>
    where
        R: Read + Seek,
        P: Parser + ?Sized,
    {
        match self.parse(lang_type, file_path, content, parser)? {
            Some(app) => Ok(Analysis::detected(app)),
            None => Ok(Analysis::Absence),
        }
    }

    /// Analyze a file that is itself a package
    ///
    /// Every detected library is attributed to `file_path`. With
    /// `file_checksum` enabled, each library also carries the SHA-256 digest
    /// of the content.
    pub fn analyze_package<R, P>(
        &self,
        lang_type: LangType,
        file_path: &str,
        content: &mut R,
        parser: &P,
    ) -> Result<Analysis, AnalyzeError>
    where
        R: Read + Seek,
        P: Parser + ?Sized,
    {
        let start = if self.options.file_checksum {
            Some(
                content
                    .stream_position()
                    .map_err(|source| digest_error(file_path, source))?,
            )
        } else {
            None
        };

        let Some(mut app) = self.parse(lang_type, file_path, content, parser)? else {
            return Ok(Analysis::Absence);
        };

        let digest = match start {
            Some(start) => Some(
                calculate_digest(content, start)
                    .map_err(|source| digest_error(file_path, source))?,
            ),
            None => None,
        };

        for lib in &mut app.libraries {
            lib.file_path = Some(file_path.to_string());
            lib.digest = digest.clone();
        }

        Ok(Analysis::detected(app))
    }

    fn parse<R, P>(
        &self,
        lang_type: LangType,
        file_path: &str,
        content: &mut R,
        parser: &P,
    ) -> Result<Option<Application>, AnalyzeError>
    where
        R: Read + Seek,
        P: Parser + ?Sized,
    {
        if is_empty(content) {
            debug!("Skipping empty {} file: {}", lang_type, file_path);
            return Ok(None);
        }

        let (mut libraries, dependencies) = parser.parse(content).map_err(|source| {
            warn!("Failed to parse {} file {}: {}", lang_type, file_path, source);
            AnalyzeError::Parse {
                file_path: file_path.to_string(),
                source,
            }
        })?;

        if !self.options.include_dev_deps {
            libraries.retain(|lib| !lib.dev);
        }

        if libraries.is_empty() {
            if !dependencies.is_empty() {
                debug!(
                    "Discarding {} dependency edges without libraries in {}",
                    dependencies.len(),
                    file_path
                );
            }
            debug!("No libraries found in {} file: {}", lang_type, file_path);
            return Ok(None);
        }

        debug!(
            "Detected {} libraries in {} file: {}",
            libraries.len(),
            lang_type,
            file_path
        );

        Ok(Some(Application {
            lang_type,
            file_path: file_path.to_string(),
            libraries,
            dependencies,
        }))
    }
}

/// Whether no bytes remain between the current position and the end of the stream
///
/// A stream whose length cannot be probed is handed to the parser as is.
fn is_empty<S: Seek>(content: &mut S) -> bool {
    match remaining_len(content) {
        Ok(len) => len == 0,
        Err(e) => {
            warn!("Failed to probe content length: {}", e);
            false
        }
    }
}

fn remaining_len<S: Seek>(content: &mut S) -> io::Result<u64> {
    let current = content.stream_position()?;
    let end = content.seek(SeekFrom::End(0))?;
    content.seek(SeekFrom::Start(current))?;
    Ok(end.saturating_sub(current))
}

/// SHA-256 of everything from `start` to the end, leaving the stream at `start`
fn calculate_digest<R: Read + Seek>(content: &mut R, start: u64) -> io::Result<String> {
    content.seek(SeekFrom::Start(start))?;
    let mut hasher = Sha256::new();
    io::copy(content, &mut hasher)?;
    content.seek(SeekFrom::Start(start))?;
    Ok(format!("sha256:{}", hex::encode(hasher.finalize())))
}

fn digest_error(file_path: &str, source: io::Error) -> AnalyzeError {
    AnalyzeError::Digest {
        file_path: file_path.to_string(),
        source,
    }
}
