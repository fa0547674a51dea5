// crates/locale-merge-core/tests/runner.rs
// ============================================================================
// Module: Merge Runner Tests
// Description: End-to-end tests of the merge step over temporary locale trees.
// Purpose: Verify discovery, output layout, check mode, and fatal failures.
// Dependencies: locale-merge-core, serde_json, tempfile
// ============================================================================

//! ## Overview
//! Builds base/override/output trees in a temporary directory and runs
//! [`MergeRunner`] over them:
//! - Only override-tree languages produce output.
//! - Missing base catalogs, invalid JSON, and missing output directories abort.
//! - Check mode reports drift without writing.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use locale_merge_core::ErrorClass;
use locale_merge_core::JsonLinesObserver;
use locale_merge_core::LanguageCode;
use locale_merge_core::LocaleLayout;
use locale_merge_core::MergeError;
use locale_merge_core::MergeOptions;
use locale_merge_core::MergeRunner;
use locale_merge_core::NoopObserver;
use locale_merge_core::OutputStatus;
use locale_merge_core::RunMode;
use serde_json::Value;
use tempfile::TempDir;
use tempfile::tempdir;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Temporary source and build trees in the conventional layout.
struct Fixture {
    /// Keeps the temporary directory alive.
    _root: TempDir,
    /// Source root containing `src/_locales` and `src/_locales_findx`.
    source: PathBuf,
    /// Build directory containing `_locales`.
    build: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let root = tempdir().expect("tempdir");
        let source = root.path().join("source");
        let build = root.path().join("build");
        fs::create_dir_all(source.join("src/_locales")).expect("base tree");
        fs::create_dir_all(source.join("src/_locales_findx")).expect("override tree");
        fs::create_dir_all(build.join("_locales")).expect("output tree");
        Self {
            _root: root,
            source,
            build,
        }
    }

    fn write_base(&self, lang: &str, body: &str) {
        write_catalog_file(&self.source.join("src/_locales"), lang, body);
    }

    fn write_override(&self, lang: &str, body: &str) {
        write_catalog_file(&self.source.join("src/_locales_findx"), lang, body);
    }

    fn create_output_dir(&self, lang: &str) {
        fs::create_dir_all(self.build.join("_locales").join(lang)).expect("output dir");
    }

    fn output_path(&self, lang: &str) -> PathBuf {
        self.build.join("_locales").join(lang).join("messages.json")
    }

    fn read_output(&self, lang: &str) -> String {
        fs::read_to_string(self.output_path(lang)).expect("read output")
    }

    fn runner(&self, mode: RunMode) -> MergeRunner {
        MergeRunner::new(
            LocaleLayout::standard(&self.source, &self.build),
            MergeOptions {
                mode,
                ..MergeOptions::default()
            },
        )
    }
}

fn write_catalog_file(tree: &Path, lang: &str, body: &str) {
    let dir = tree.join(lang);
    fs::create_dir_all(&dir).expect("language dir");
    fs::write(dir.join("messages.json"), body).expect("write catalog");
}

// ============================================================================
// SECTION: Write Mode
// ============================================================================

#[test]
fn run_writes_merged_catalog_for_each_override_language() {
    let fixture = Fixture::new();
    fixture.write_base("en", r#"{"a": {"message": "Hello"}, "b": {"message": "World"}}"#);
    fixture.write_override("en", r#"{"b": {"message": "Mundo"}, "c": {"message": "Nuevo"}}"#);
    fixture.write_base("da", r#"{"a": {"message": "Hej"}}"#);
    fixture.write_override("da", r#"{"a": {"message": "Hej"}}"#);
    fixture.create_output_dir("en");
    fixture.create_output_dir("da");

    let report = fixture.runner(RunMode::Write).run(&NoopObserver).expect("run");

    let languages: Vec<&str> =
        report.languages.iter().map(|outcome| outcome.language.as_str()).collect();
    assert_eq!(languages, vec!["da", "en"]);
    assert!(report.languages.iter().all(|outcome| outcome.status == OutputStatus::Written));

    let expected_en = "{\n    \"a\": {\n        \"message\": \"Hello\"\n    },\n    \"b\": {\n        \
                       \"message\": \"Mundo\"\n    },\n    \"c\": {\n        \"message\": \
                       \"Nuevo\"\n    }\n}";
    assert_eq!(fixture.read_output("en"), expected_en);
    let da: Value = serde_json::from_str(&fixture.read_output("da")).expect("da json");
    assert_eq!(da, serde_json::json!({"a": {"message": "Hej"}}));
}

#[test]
fn run_skips_base_languages_without_override_directory() {
    let fixture = Fixture::new();
    fixture.write_base("en", r#"{"a": {"message": "A"}}"#);
    fixture.write_base("fr", r#"{"a": {"message": "Fr"}}"#);
    fixture.write_override("en", r#"{}"#);
    fixture.create_output_dir("en");
    fixture.create_output_dir("fr");

    let report = fixture.runner(RunMode::Write).run(&NoopObserver).expect("run");

    assert_eq!(report.languages.len(), 1);
    assert!(fixture.output_path("en").exists());
    assert!(!fixture.output_path("fr").exists());
}

#[test]
fn run_ignores_plain_files_and_hidden_directories_in_override_tree() {
    let fixture = Fixture::new();
    fixture.write_base("en", r#"{"a": {"message": "A"}}"#);
    fixture.write_override("en", r#"{"a": {"message": "B"}}"#);
    let override_tree = fixture.source.join("src/_locales_findx");
    fs::write(override_tree.join("README.md"), "notes").expect("plain file");
    fs::create_dir_all(override_tree.join(".git")).expect("hidden dir");
    fixture.create_output_dir("en");

    let report = fixture.runner(RunMode::Write).run(&NoopObserver).expect("run");

    assert_eq!(report.languages.len(), 1);
    assert_eq!(report.languages[0].summary.updated, 1);
}

#[test]
fn run_preserves_non_ascii_text_literally() {
    let fixture = Fixture::new();
    fixture.write_base("da", r#"{"title": {"message": "Indstillinger"}}"#);
    fixture.write_override("da", r#"{"title": {"message": "Privatlivsindstillinger for Æbleø"}}"#);
    fixture.create_output_dir("da");

    fixture.runner(RunMode::Write).run(&NoopObserver).expect("run");

    let text = fixture.read_output("da");
    assert!(text.contains("Privatlivsindstillinger for Æbleø"));
    assert!(!text.contains("\\u00c6"));
}

#[test]
fn run_keeps_large_integers_exactly_as_written() {
    let fixture = Fixture::new();
    fixture.write_base(
        "en",
        r#"{"a": {"message": "x", "max": 123456789012345678901234567890}}"#,
    );
    fixture.write_override("en", r#"{"a": {"message": "x"}}"#);
    fixture.create_output_dir("en");

    fixture.runner(RunMode::Write).run(&NoopObserver).expect("run");

    assert_eq!(
        fixture.read_output("en"),
        "{\n    \"a\": {\n        \"message\": \"x\",\n        \"max\": \
         123456789012345678901234567890\n    }\n}"
    );
}

#[test]
fn run_reports_progress_to_observer() {
    let fixture = Fixture::new();
    fixture.write_base("en", r#"{"a": {"message": "A"}}"#);
    fixture.write_override("en", r#"{"b": {"message": "B"}}"#);
    fixture.create_output_dir("en");
    let observer = JsonLinesObserver::new(Vec::new());

    fixture.runner(RunMode::Write).run(&observer).expect("run");

    let log = String::from_utf8(observer.into_inner().expect("writer")).expect("utf-8");
    let record: Value = serde_json::from_str(log.trim()).expect("json record");
    assert_eq!(record["language"], "en");
    assert_eq!(record["base_keys"], 1);
    assert_eq!(record["merged_keys"], 2);
    assert_eq!(record["added"], 1);
}

// ============================================================================
// SECTION: Failures
// ============================================================================

#[test]
fn run_fails_when_base_catalog_is_missing() {
    let fixture = Fixture::new();
    fixture.write_override("sv", r#"{"a": {"message": "A"}}"#);
    fixture.create_output_dir("sv");

    let err = fixture.runner(RunMode::Write).run(&NoopObserver).expect_err("missing base");

    assert!(matches!(err, MergeError::Read { .. }), "unexpected error: {err}");
    assert_eq!(err.class(), ErrorClass::Resource);
    assert!(!fixture.output_path("sv").exists());
}

#[test]
fn run_fails_when_override_catalog_file_is_missing() {
    let fixture = Fixture::new();
    fixture.write_base("en", r#"{"a": {"message": "A"}}"#);
    fs::create_dir_all(fixture.source.join("src/_locales_findx/en")).expect("override dir");
    fixture.create_output_dir("en");

    let err = fixture.runner(RunMode::Write).run(&NoopObserver).expect_err("missing override");

    match &err {
        MergeError::Read {
            path,
            ..
        } => assert!(path.ends_with("src/_locales_findx/en/messages.json")),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(err.class(), ErrorClass::Resource);
    assert!(!fixture.output_path("en").exists());
}

#[test]
fn run_fails_when_override_catalog_is_invalid_json() {
    let fixture = Fixture::new();
    fixture.write_base("en", r#"{"a": {"message": "A"}}"#);
    fixture.write_override("en", r#"{"a": {"message": "A"},}"#);
    fixture.create_output_dir("en");

    let err = fixture.runner(RunMode::Write).run(&NoopObserver).expect_err("bad json");

    assert!(matches!(err, MergeError::Parse { .. }), "unexpected error: {err}");
    assert_eq!(err.class(), ErrorClass::Format);
}

#[test]
fn run_fails_when_catalog_is_not_an_object() {
    let fixture = Fixture::new();
    fixture.write_base("en", r#"["a", "b"]"#);
    fixture.write_override("en", r#"{}"#);
    fixture.create_output_dir("en");

    let err = fixture.runner(RunMode::Write).run(&NoopObserver).expect_err("array catalog");

    assert!(matches!(err, MergeError::NotAnObject { .. }), "unexpected error: {err}");
}

#[test]
fn run_fails_when_output_directory_is_missing() {
    let fixture = Fixture::new();
    fixture.write_base("en", r#"{"a": {"message": "A"}}"#);
    fixture.write_override("en", r#"{"a": {"message": "B"}}"#);

    let err = fixture.runner(RunMode::Write).run(&NoopObserver).expect_err("no output dir");

    assert!(matches!(err, MergeError::Write { .. }), "unexpected error: {err}");
    assert!(!fixture.build.join("_locales").join("en").exists(), "directories are not created");
}

#[test]
fn run_failure_keeps_outputs_written_before_it() {
    let fixture = Fixture::new();
    fixture.write_base("da", r#"{"a": {"message": "A"}}"#);
    fixture.write_override("da", r#"{"a": {"message": "B"}}"#);
    fixture.write_override("en", r#"{"a": {"message": "B"}}"#);
    fixture.create_output_dir("da");
    fixture.create_output_dir("en");

    let err = fixture.runner(RunMode::Write).run(&NoopObserver).expect_err("missing en base");

    assert!(matches!(err, MergeError::Read { .. }), "unexpected error: {err}");
    assert!(fixture.output_path("da").exists());
    assert!(!fixture.output_path("en").exists());
}

#[test]
fn run_fails_when_shared_entry_has_no_message() {
    let fixture = Fixture::new();
    fixture.write_base("en", r#"{"a": {"description": "no message"}}"#);
    fixture.write_override("en", r#"{"a": {"message": "A"}}"#);
    fixture.create_output_dir("en");

    let err = fixture.runner(RunMode::Write).run(&NoopObserver).expect_err("entry shape");

    match err {
        MergeError::EntryShape {
            language,
            path,
            ..
        } => {
            assert_eq!(language, "en");
            assert!(path.ends_with("src/_locales_findx/en/messages.json"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn run_fails_when_override_tree_is_missing() {
    let fixture = Fixture::new();
    fs::remove_dir_all(fixture.source.join("src/_locales_findx")).expect("remove tree");

    let err = fixture.runner(RunMode::Write).run(&NoopObserver).expect_err("missing tree");

    assert!(matches!(err, MergeError::Discovery { .. }), "unexpected error: {err}");
}

#[test]
fn run_rejects_oversized_catalogs() {
    let fixture = Fixture::new();
    let large = format!(r#"{{"a": {{"message": "{}"}}}}"#, "x".repeat(4096));
    fixture.write_base("en", &large);
    fixture.write_override("en", r#"{}"#);
    fixture.create_output_dir("en");
    let runner = MergeRunner::new(
        LocaleLayout::standard(&fixture.source, &fixture.build),
        MergeOptions {
            max_catalog_bytes: 1024,
            ..MergeOptions::default()
        },
    );

    let err = runner.run(&NoopObserver).expect_err("too large");

    assert!(matches!(err, MergeError::TooLarge { limit: 1024, .. }), "unexpected error: {err}");
}

// ============================================================================
// SECTION: Check Mode
// ============================================================================

#[test]
fn check_mode_passes_after_write_and_detects_drift() {
    let fixture = Fixture::new();
    fixture.write_base("en", r#"{"a": {"message": "A"}}"#);
    fixture.write_override("en", r#"{"b": {"message": "B"}}"#);
    fixture.create_output_dir("en");

    fixture.runner(RunMode::Write).run(&NoopObserver).expect("write run");
    let report = fixture.runner(RunMode::Check).run(&NoopObserver).expect("check run");
    assert_eq!(report.languages[0].status, OutputStatus::Current);

    fs::write(fixture.output_path("en"), "{}").expect("tamper output");
    let err = fixture.runner(RunMode::Check).run(&NoopObserver).expect_err("drift");
    match err {
        MergeError::Drift {
            languages,
        } => assert_eq!(languages, vec!["en".to_string()]),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(fs::read_to_string(fixture.output_path("en")).expect("read"), "{}");
}

#[test]
fn check_mode_treats_missing_output_as_stale() {
    let fixture = Fixture::new();
    fixture.write_base("en", r#"{"a": {"message": "A"}}"#);
    fixture.write_override("en", r#"{}"#);

    let err = fixture.runner(RunMode::Check).run(&NoopObserver).expect_err("drift");

    assert_eq!(err.class(), ErrorClass::Drift);
}

// ============================================================================
// SECTION: Layered Trees
// ============================================================================

#[test]
fn run_applies_multiple_override_trees_in_order() {
    let fixture = Fixture::new();
    fixture.write_base("en", r#"{"title": {"message": "Base"}, "body": {"message": "Body"}}"#);
    fixture.write_override("en", r#"{"title": {"message": "Brand"}}"#);
    let campaign = fixture.source.join("src/_locales_campaign");
    write_catalog_file(&campaign, "en", r#"{"title": {"message": "Campaign"}}"#);
    write_catalog_file(&campaign, "de", r#"{"title": {"message": "Kampagne"}}"#);
    fixture.write_base("de", r#"{"title": {"message": "Titel"}}"#);
    fixture.create_output_dir("en");
    fixture.create_output_dir("de");
    let layout = LocaleLayout::new(
        fixture.source.join("src/_locales"),
        vec![fixture.source.join("src/_locales_findx"), campaign],
        fixture.build.join("_locales"),
        "messages.json",
    );

    let en = LanguageCode::parse("en").expect("en");
    assert_eq!(layout.overlay_catalogs(&en).len(), 2);

    let report =
        MergeRunner::new(layout, MergeOptions::default()).run(&NoopObserver).expect("run");

    let languages: Vec<&str> =
        report.languages.iter().map(|outcome| outcome.language.as_str()).collect();
    assert_eq!(languages, vec!["de", "en"]);
    let merged: Value = serde_json::from_str(&fixture.read_output("en")).expect("json");
    assert_eq!(merged["title"]["message"], "Campaign");
    assert_eq!(merged["body"]["message"], "Body");
    assert_eq!(report.languages[0].overlay_count, 1);
}
