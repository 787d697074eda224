//! Parser test utilities

use std::collections::HashMap;
use std::io::Read;
use std::sync::atomic::{AtomicUsize, Ordering};

use lang_analyzer::parser::{Dependency, Library, ParseError, ParseOutput, Parser, ReadSeek};

enum Script {
    Output(Vec<Library>, Vec<Dependency>),
    Fail(String),
}

/// Parser that answers with a scripted result for each exact content
///
/// Content without a script yields no libraries and no error.
#[derive(Default)]
pub struct ScriptedParser {
    scripts: HashMap<String, Script>,
    calls: AtomicUsize,
}

impl ScriptedParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_libraries(mut self, content: &str, libraries: Vec<Library>) -> Self {
        self.scripts
            .insert(content.to_string(), Script::Output(libraries, vec![]));
        self
    }

    pub fn with_output(
        mut self,
        content: &str,
        libraries: Vec<Library>,
        dependencies: Vec<Dependency>,
    ) -> Self {
        self.scripts
            .insert(content.to_string(), Script::Output(libraries, dependencies));
        self
    }

    pub fn with_error(mut self, content: &str, message: &str) -> Self {
        self.scripts
            .insert(content.to_string(), Script::Fail(message.to_string()));
        self
    }

    /// Number of times `parse` was invoked
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Parser for ScriptedParser {
    fn parse(&self, content: &mut dyn ReadSeek) -> Result<ParseOutput, ParseError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let mut buf = String::new();
        content.read_to_string(&mut buf)?;

        match self.scripts.get(&buf) {
            Some(Script::Output(libraries, dependencies)) => {
                Ok((libraries.clone(), dependencies.clone()))
            }
            Some(Script::Fail(message)) => Err(ParseError::ParseFailed(message.clone())),
            None => Ok((vec![], vec![])),
        }
    }
}
