use thiserror::Error;

use crate::parser::ParseError;

#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("Failed to analyze {file_path}: {source}")]
    Parse {
        file_path: String,
        #[source]
        source: ParseError,
    },

    #[error("Failed to calculate digest of {file_path}: {source}")]
    Digest {
        file_path: String,
        #[source]
        source: std::io::Error,
    },
}
