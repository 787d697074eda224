//! Result types produced by the dispatcher

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::parser::types::{Dependency, LangType, Library};

/// Libraries and dependency edges detected in a single file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    /// Language type the file was classified as
    #[serde(rename = "type")]
    pub lang_type: LangType,
    /// Path of the analyzed file, exactly as given by the caller
    pub file_path: String,
    /// Libraries in the order the parser reported them
    pub libraries: Vec<Library>,
    /// Dependency edges as the parser reported them
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<Dependency>,
}

impl Application {
    /// Map each library id to the ids it depends on
    ///
    /// Keeps the order in which edges were reported. When an id appears in
    /// several edges, the last one wins.
    pub fn dependency_graph(&self) -> IndexMap<&str, &[String]> {
        self.dependencies
            .iter()
            .map(|dep| (dep.id.as_str(), dep.depends_on.as_slice()))
            .collect()
    }
}

/// Envelope for applications detected across one or more files
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default)]
    pub applications: Vec<Application>,
}

impl AnalysisResult {
    pub fn new(applications: Vec<Application>) -> Self {
        Self { applications }
    }

    pub fn is_empty(&self) -> bool {
        self.applications.is_empty()
    }

    /// Append the applications of another result
    ///
    /// Libraries are not deduplicated across applications.
    pub fn merge(&mut self, other: AnalysisResult) {
        self.applications.extend(other.applications);
    }

    /// Sort applications by file path and type, and libraries by name and version
    pub fn sort(&mut self) {
        self.applications.sort_by(|a, b| {
            a.file_path
                .cmp(&b.file_path)
                .then_with(|| a.lang_type.as_str().cmp(b.lang_type.as_str()))
        });
        for app in &mut self.applications {
            app.libraries
                .sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.version.cmp(&b.version)));
        }
    }
}

/// Outcome of analyzing one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Analysis {
    /// Nothing to report: the content was empty or the parser found no libraries
    Absence,
    /// The parser found at least one library
    Detection(AnalysisResult),
}

impl Analysis {
    pub(crate) fn detected(app: Application) -> Self {
        Analysis::Detection(AnalysisResult::new(vec![app]))
    }

    pub fn is_absence(&self) -> bool {
        matches!(self, Analysis::Absence)
    }

    /// Convert into an optional result, `None` meaning absence
    pub fn into_result(self) -> Option<AnalysisResult> {
        match self {
            Analysis::Absence => None,
            Analysis::Detection(result) => Some(result),
        }
    }
}
