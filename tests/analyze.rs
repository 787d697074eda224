//! Dispatcher tests against a scripted parser

mod helper;

use std::fs::File;
use std::io::{Cursor, Write};

use rstest::rstest;
use tempfile::NamedTempFile;

use helper::ScriptedParser;
use lang_analyzer::analyzer::{
    Analysis, AnalysisResult, Analyzer, Application, analyze, analyze_package,
};
use lang_analyzer::config::AnalyzerConfig;
use lang_analyzer::parser::{Dependency, LangType, Library};

fn scripted_parser() -> ScriptedParser {
    ScriptedParser::new()
        .with_libraries("happy", vec![Library::new("test", "1.2.3")])
        .with_error("sad", "unexpected error")
}

#[rstest]
#[case::happy_path(
    LangType::GoBinary,
    "happy",
    Ok(Some(AnalysisResult {
        applications: vec![Application {
            lang_type: LangType::GoBinary,
            file_path: "app/myweb".to_string(),
            libraries: vec![Library::new("test", "1.2.3")],
            dependencies: vec![],
        }],
    }))
)]
#[case::empty(LangType::GoBinary, "", Ok(None))]
#[case::sad_path(LangType::Jar, "sad", Err("unexpected error"))]
fn analyze_returns_expected_outcome(
    #[case] lang_type: LangType,
    #[case] input: &str,
    #[case] expected: Result<Option<AnalysisResult>, &str>,
) {
    let parser = scripted_parser();
    let mut content = Cursor::new(input);

    let got = analyze(lang_type, "app/myweb", &mut content, &parser);

    match expected {
        Ok(want) => assert_eq!(got.unwrap().into_result(), want),
        Err(want_err) => {
            let err = got.unwrap_err();
            assert!(err.to_string().contains(want_err), "{err}");
        }
    }
}

#[test]
fn empty_content_never_reaches_parser() {
    let parser = scripted_parser();

    for lang_type in LangType::ALL {
        let got = analyze(lang_type, "any/path", &mut Cursor::new(""), &parser).unwrap();
        assert_eq!(got, Analysis::Absence);
    }

    assert_eq!(parser.calls(), 0);
}

#[test]
fn analyze_preserves_library_order_and_edges() {
    let libraries = vec![
        Library {
            id: Some("web@1.0.0".to_string()),
            ..Library::new("web", "1.0.0")
        },
        Library {
            id: Some("lodash@4.17.21".to_string()),
            indirect: true,
            license: Some("MIT".to_string()),
            ..Library::new("lodash", "4.17.21")
        },
        Library {
            id: Some("ansi@0.1.0".to_string()),
            ..Library::new("ansi", "0.1.0")
        },
    ];
    let dependencies = vec![Dependency::new(
        "web@1.0.0",
        vec!["lodash@4.17.21".to_string(), "ansi@0.1.0".to_string()],
    )];
    let parser = ScriptedParser::new().with_output("lock", libraries.clone(), dependencies.clone());

    let result = analyze(LangType::Yarn, "web/yarn.lock", &mut Cursor::new("lock"), &parser)
        .unwrap()
        .into_result()
        .unwrap();

    assert_eq!(result.applications.len(), 1);
    let app = &result.applications[0];
    assert_eq!(app.lang_type, LangType::Yarn);
    assert_eq!(app.file_path, "web/yarn.lock");
    assert_eq!(app.libraries, libraries);
    assert_eq!(app.dependencies, dependencies);
    assert_eq!(app.dependency_graph()["web@1.0.0"].len(), 2);
}

#[test]
fn analyze_reads_file_backed_content() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "happy").unwrap();
    let parser = scripted_parser();

    let mut content = File::open(file.path()).unwrap();
    let got = analyze(LangType::GoBinary, "app/myweb", &mut content, &parser).unwrap();

    assert!(!got.is_absence());
    assert_eq!(parser.calls(), 1);
}

#[test]
fn analyze_runs_concurrently_with_shared_parser() {
    let parser = scripted_parser();
    let analyzer = Analyzer::default();

    let outcomes: Vec<Analysis> = std::thread::scope(|s| {
        let handles: Vec<_> = ["happy", "", "other", "happy"]
            .into_iter()
            .enumerate()
            .map(|(i, input)| {
                let parser = &parser;
                let analyzer = &analyzer;
                s.spawn(move || {
                    let path = format!("app/{i}");
                    analyzer
                        .analyze(LangType::GoBinary, &path, &mut Cursor::new(input), parser)
                        .unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let detected: Vec<_> = outcomes.iter().map(|o| !o.is_absence()).collect();
    assert_eq!(detected, vec![true, false, false, true]);
    assert_eq!(parser.calls(), 3);
}

#[test]
fn results_from_many_files_merge_and_serialize() {
    let parser = scripted_parser();
    let mut merged = AnalysisResult::default();

    for path in ["b/myweb", "a/myweb", "c/empty"] {
        let input = if path.ends_with("empty") { "" } else { "happy" };
        if let Some(result) = analyze(LangType::GoBinary, path, &mut Cursor::new(input), &parser)
            .unwrap()
            .into_result()
        {
            merged.merge(result);
        }
    }
    merged.sort();

    let json = serde_json::to_value(&merged).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "applications": [
                {
                    "type": "gobinary",
                    "file_path": "a/myweb",
                    "libraries": [{ "name": "test", "version": "1.2.3" }]
                },
                {
                    "type": "gobinary",
                    "file_path": "b/myweb",
                    "libraries": [{ "name": "test", "version": "1.2.3" }]
                }
            ]
        })
    );
    assert_eq!(serde_json::from_value::<AnalysisResult>(json).unwrap(), merged);
}

#[test]
fn analyzer_built_from_config_applies_options() {
    let config = AnalyzerConfig::from_json(
        r#"{ "analyzer": { "includeDevDeps": false, "fileChecksum": true } }"#,
    )
    .unwrap();
    let analyzer = Analyzer::new(config.analyzer);
    let parser = ScriptedParser::new().with_libraries(
        "jar",
        vec![
            Library::new("commons-io", "2.11.0"),
            Library {
                dev: true,
                ..Library::new("junit", "4.13.2")
            },
        ],
    );

    let result = analyzer
        .analyze_package(LangType::Jar, "lib/app.jar", &mut Cursor::new("jar"), &parser)
        .unwrap()
        .into_result()
        .unwrap();

    let libraries = &result.applications[0].libraries;
    assert_eq!(libraries.len(), 1);
    assert_eq!(libraries[0].name, "commons-io");
    assert_eq!(libraries[0].file_path.as_deref(), Some("lib/app.jar"));
    assert!(
        libraries[0]
            .digest
            .as_deref()
            .is_some_and(|d| d.starts_with("sha256:") && d.len() == "sha256:".len() + 64)
    );
}

#[test]
fn analyze_package_without_libraries_is_absence() {
    let parser = scripted_parser();

    let got = analyze_package(
        LangType::RustBinary,
        "bin/tool",
        &mut Cursor::new("unknown"),
        &parser,
    )
    .unwrap();

    assert_eq!(got, Analysis::Absence);
    assert_eq!(parser.calls(), 1);
}
