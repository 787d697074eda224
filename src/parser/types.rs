//! Common types for parsers

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Type of language-specific file a parser understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "&'static str", try_from = "String")]
pub enum LangType {
    /// Gemfile.lock
    Bundler,
    /// *.gemspec
    GemSpec,
    /// Cargo.lock
    Cargo,
    /// Rust binary built with cargo-auditable
    RustBinary,
    /// composer.lock
    Composer,
    /// package-lock.json
    Npm,
    /// yarn.lock
    Yarn,
    /// pnpm-lock.yaml
    Pnpm,
    /// bun.lock
    Bun,
    /// package.json inside node_modules
    NodePkg,
    /// JAR, WAR, EAR and PAR archives
    Jar,
    /// pom.xml
    Pom,
    /// gradle.lockfile
    Gradle,
    /// build.sbt.lock
    Sbt,
    /// Go binary with embedded build info
    GoBinary,
    /// go.mod
    GoModule,
    /// requirements.txt
    Pip,
    /// Pipfile.lock
    Pipenv,
    /// poetry.lock
    Poetry,
    /// uv.lock
    Uv,
    /// Installed Python package metadata (METADATA, PKG-INFO)
    PythonPkg,
    /// Conda package metadata
    CondaPkg,
    /// Conda environment.yml
    CondaEnv,
    /// packages.lock.json and packages.config
    NuGet,
    /// *.deps.json
    DotNetCore,
    /// Directory.Packages.props
    PackagesProps,
    /// conan.lock
    Conan,
    /// Podfile.lock
    CocoaPods,
    /// Package.resolved
    Swift,
    /// pubspec.lock
    Pub,
    /// mix.lock
    Hex,
    /// Manifest.toml
    Julia,
}

impl LangType {
    /// Every supported language type, in declaration order
    pub const ALL: [LangType; 32] = [
        LangType::Bundler,
        LangType::GemSpec,
        LangType::Cargo,
        LangType::RustBinary,
        LangType::Composer,
        LangType::Npm,
        LangType::Yarn,
        LangType::Pnpm,
        LangType::Bun,
        LangType::NodePkg,
        LangType::Jar,
        LangType::Pom,
        LangType::Gradle,
        LangType::Sbt,
        LangType::GoBinary,
        LangType::GoModule,
        LangType::Pip,
        LangType::Pipenv,
        LangType::Poetry,
        LangType::Uv,
        LangType::PythonPkg,
        LangType::CondaPkg,
        LangType::CondaEnv,
        LangType::NuGet,
        LangType::DotNetCore,
        LangType::PackagesProps,
        LangType::Conan,
        LangType::CocoaPods,
        LangType::Swift,
        LangType::Pub,
        LangType::Hex,
        LangType::Julia,
    ];

    /// Returns the canonical tag of the language type
    pub fn as_str(&self) -> &'static str {
        match self {
            LangType::Bundler => "bundler",
            LangType::GemSpec => "gemspec",
            LangType::Cargo => "cargo",
            LangType::RustBinary => "rustbinary",
            LangType::Composer => "composer",
            LangType::Npm => "npm",
            LangType::Yarn => "yarn",
            LangType::Pnpm => "pnpm",
            LangType::Bun => "bun",
            LangType::NodePkg => "node-pkg",
            LangType::Jar => "jar",
            LangType::Pom => "pom",
            LangType::Gradle => "gradle",
            LangType::Sbt => "sbt",
            LangType::GoBinary => "gobinary",
            LangType::GoModule => "gomod",
            LangType::Pip => "pip",
            LangType::Pipenv => "pipenv",
            LangType::Poetry => "poetry",
            LangType::Uv => "uv",
            LangType::PythonPkg => "python-pkg",
            LangType::CondaPkg => "conda-pkg",
            LangType::CondaEnv => "conda-environment",
            LangType::NuGet => "nuget",
            LangType::DotNetCore => "dotnet-core",
            LangType::PackagesProps => "packages-props",
            LangType::Conan => "conan",
            LangType::CocoaPods => "cocoapods",
            LangType::Swift => "swift",
            LangType::Pub => "pub",
            LangType::Hex => "hex",
            LangType::Julia => "julia",
        }
    }
}

impl std::fmt::Display for LangType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a tag does not name a known language type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown language type: {0}")]
pub struct UnknownLangType(pub String);

impl std::str::FromStr for LangType {
    type Err = UnknownLangType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LangType::ALL
            .into_iter()
            .find(|lang_type| lang_type.as_str() == s)
            .ok_or_else(|| UnknownLangType(s.to_string()))
    }
}

impl From<LangType> for &'static str {
    fn from(lang_type: LangType) -> Self {
        lang_type.as_str()
    }
}

impl TryFrom<String> for LangType {
    type Error = UnknownLangType;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Line range of a library declaration inside the parsed file (1-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub start_line: usize,
    pub end_line: usize,
}

/// A package found by a parser
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Library {
    /// Key used by dependency edges to refer to this library (e.g., "serde@1.0.0")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Package name (e.g., "serde", "@types/node", "golang.org/x/text")
    pub name: String,
    /// Resolved version in the ecosystem's own format, empty when unresolved
    #[serde(default)]
    pub version: String,
    /// Only needed for development
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub dev: bool,
    /// Pulled in transitively rather than declared directly
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub indirect: bool,
    /// License as declared in the file, possibly several joined together
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<Location>,
    /// File the library was found in, when it differs per library
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    /// Checksum of the file the library was found in (e.g., "sha256:...")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
}

static LICENSE_SEPARATOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s*(?:,|\s+or\s+|\s+and\s+)\s*")
        .expect("license separator regex is valid")
});

/// Whether a fragment continues the previous license, as in "Apache License, Version 2.0"
fn is_version_fragment(fragment: &str) -> bool {
    fragment
        .split_whitespace()
        .next()
        .map(|word| word.trim_end_matches('.').to_ascii_lowercase())
        .is_some_and(|word| word == "ver" || word == "version")
}

impl Library {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            ..Default::default()
        }
    }

    /// Split the declared license into individual license names
    ///
    /// Splits on `,` and on whitespace-delimited `or`/`and`. A fragment
    /// starting with `ver`/`version` is joined back onto the license before it.
    pub fn licenses(&self) -> Vec<String> {
        let Some(license) = self.license.as_deref() else {
            return Vec::new();
        };

        let mut licenses: Vec<String> = Vec::new();
        for fragment in LICENSE_SEPARATOR_RE.split(license).map(str::trim) {
            if fragment.is_empty() {
                continue;
            }
            if is_version_fragment(fragment) {
                if let Some(previous) = licenses.last_mut() {
                    previous.push_str(", ");
                    previous.push_str(fragment);
                    continue;
                }
            }
            licenses.push(fragment.to_string());
        }
        licenses
    }
}

/// Directed dependency edge: library `id` depends on every id in `depends_on`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    pub id: String,
    #[serde(default)]
    pub depends_on: Vec<String>,
}

impl Dependency {
    pub fn new(id: impl Into<String>, depends_on: Vec<String>) -> Self {
        Self {
            id: id.into(),
            depends_on,
        }
    }
}
