//! Analysis layer turning parser output into detected applications
//!
//! # Modules
//!
//! - [`language`]: The dispatcher running a parser over one file's content
//! - [`result`]: `Application`, `AnalysisResult` and the `Analysis` outcome
//! - [`error`]: Error type for analysis operations

pub mod error;
pub mod language;
pub mod result;

pub use error::AnalyzeError;
pub use language::{Analyzer, analyze, analyze_package};
pub use result::{Analysis, AnalysisResult, Application};
