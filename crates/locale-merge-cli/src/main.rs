// crates/locale-merge-cli/src/main.rs
// ============================================================================
// Module: Locale Merge CLI Entry Point
// Description: Command-line front end for the locale merge build step.
// Purpose: Resolve arguments and config, run the merge, and map failures.
// Dependencies: clap, locale-merge-config, locale-merge-core, thiserror
// ============================================================================

//! ## Overview
//! `locale-merge BUILD_DIR` merges `src/_locales` with `src/_locales_findx`
//! and writes `BUILD_DIR/_locales/<lang>/messages.json` for every override
//! language. Success is silent; failures print one localized diagnostic to
//! stderr and exit non-zero:
//! - `1` for unreadable, malformed, or unwritable catalogs.
//! - `2` for configuration problems, including a missing build directory.
//! - `3` when `--check` finds stale outputs.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::ffi::OsStr;
use std::ffi::OsString;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgAction;
use clap::Parser;
use clap::ValueEnum;
use locale_merge_cli::i18n::Locale;
use locale_merge_cli::i18n::set_locale;
use locale_merge_cli::t;
use locale_merge_config::LocaleMergeConfig;
use locale_merge_core::ErrorClass;
use locale_merge_core::JsonLinesObserver;
use locale_merge_core::MergeError;
use locale_merge_core::MergeRunner;
use locale_merge_core::NoopObserver;
use locale_merge_core::RunMode;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable for CLI locale selection.
const LANG_ENV: &str = "LOCALE_MERGE_LANG";
/// Exit status for unreadable, malformed, or unwritable catalogs.
const EXIT_FAILURE: u8 = 1;
/// Exit status for configuration errors.
const EXIT_CONFIG: u8 = 2;
/// Exit status when check mode finds stale outputs.
const EXIT_DRIFT: u8 = 3;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "locale-merge", disable_version_flag = true)]
struct Cli {
    /// Build output directory; merged catalogs go to `BUILD_DIR/_locales`.
    #[arg(value_name = "BUILD_DIR")]
    build_dir: Option<OsString>,
    /// Root of the locale source trees (defaults to the working directory).
    #[arg(long, value_name = "DIR")]
    source_root: Option<PathBuf>,
    /// Configuration file (overrides `LOCALE_MERGE_CONFIG`).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Verify merged outputs are current without writing them.
    #[arg(long, action = ArgAction::SetTrue)]
    check: bool,
    /// Emit one JSON progress record per language to stderr.
    #[arg(long, action = ArgAction::SetTrue)]
    verbose: bool,
    /// Preferred output language (overrides `LOCALE_MERGE_LANG`).
    #[arg(long, value_enum, value_name = "LANG")]
    lang: Option<LangArg>,
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue)]
    show_version: bool,
}

/// Supported CLI language selections.
#[derive(ValueEnum, Copy, Clone, Debug)]
enum LangArg {
    /// English.
    En,
    /// Catalan.
    Ca,
}

impl From<LangArg> for Locale {
    fn from(value: LangArg) -> Self {
        match value {
            LangArg::En => Self::En,
            LangArg::Ca => Self::Ca,
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for localized error messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
    /// Process exit status.
    exit_code: u8,
}

impl CliError {
    /// Constructs a general failure from a localized message.
    const fn new(message: String) -> Self {
        Self {
            message,
            exit_code: EXIT_FAILURE,
        }
    }

    /// Constructs a configuration failure from a localized message.
    const fn config(message: String) -> Self {
        Self {
            message,
            exit_code: EXIT_CONFIG,
        }
    }

    /// Maps a merge failure to its localized message and exit status.
    fn from_merge(error: &MergeError) -> Self {
        let exit_code = match error.class() {
            ErrorClass::Resource | ErrorClass::Format => EXIT_FAILURE,
            ErrorClass::Drift => EXIT_DRIFT,
        };
        Self {
            message: merge_error_message(error),
            exit_code,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string(), err.exit_code),
    }
}

/// Parses arguments, selects the locale, and runs the merge.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    let env_lang = std::env::var(LANG_ENV).ok();
    let locale = resolve_locale(cli.lang, env_lang.as_deref())?;
    set_locale(locale);
    if locale != Locale::En {
        write_stderr_line(&t!("i18n.disclaimer.machine_translated"))
            .map_err(|err| CliError::new(output_error("stderr", &err)))?;
    }

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&t!("main.version", version = version))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    command_merge(&cli)
}

// ============================================================================
// SECTION: Merge Command
// ============================================================================

/// Runs the merge step for the parsed arguments.
fn command_merge(cli: &Cli) -> CliResult<ExitCode> {
    let build_dir = resolve_build_dir(cli.build_dir.as_deref())?;
    let config = LocaleMergeConfig::load(cli.config.as_deref())
        .map_err(|err| CliError::config(t!("config.load_failed", error = err)))?;
    let source_root = config.effective_source_root(cli.source_root.as_deref());
    let mode = if cli.check { RunMode::Check } else { RunMode::Write };
    let runner = MergeRunner::new(config.layout(&source_root, build_dir), config.options(mode));
    let result = if cli.verbose {
        runner.run(&JsonLinesObserver::new(std::io::stderr()))
    } else {
        runner.run(&NoopObserver)
    };
    result.map_err(|err| CliError::from_merge(&err))?;
    Ok(ExitCode::SUCCESS)
}

/// Returns the build directory, rejecting a missing or empty argument.
fn resolve_build_dir(build_dir: Option<&OsStr>) -> CliResult<&Path> {
    build_dir
        .filter(|value| !value.is_empty())
        .map(Path::new)
        .ok_or_else(|| CliError::config(t!("main.build_dir_missing")))
}

/// Formats a localized diagnostic for a merge failure.
fn merge_error_message(err: &MergeError) -> String {
    match err {
        MergeError::Discovery {
            path,
            error,
        } => t!("merge.discovery_failed", path = path.display(), error = error),
        MergeError::InvalidLanguage {
            path,
            error,
        } => t!("merge.invalid_language", path = path.display(), error = error),
        MergeError::NonUtf8Language {
            path,
        } => t!("merge.non_utf8_language", path = path.display()),
        MergeError::Read {
            path,
            error,
        } => t!("merge.read_failed", path = path.display(), error = error),
        MergeError::TooLarge {
            path,
            size,
            limit,
        } => t!("merge.read_too_large", path = path.display(), size = size, limit = limit),
        MergeError::Parse {
            path,
            error,
        } => t!("merge.parse_failed", path = path.display(), error = error),
        MergeError::NotAnObject {
            path,
        } => t!("merge.not_an_object", path = path.display()),
        MergeError::EntryShape {
            language,
            path,
            error,
        } => t!("merge.entry_shape", language = language, path = path.display(), error = error),
        MergeError::Render {
            language,
            error,
        } => t!("merge.render_failed", language = language, error = error),
        MergeError::Write {
            path,
            error,
        } => t!("merge.write_failed", path = path.display(), error = error),
        MergeError::Drift {
            languages,
        } => t!("merge.drift", languages = languages.join(", ")),
        MergeError::Observer(error) => t!("merge.observer_failed", error = error),
    }
}

// ============================================================================
// SECTION: Locale
// ============================================================================

/// Resolves the CLI locale from flags or environment.
fn resolve_locale(lang: Option<LangArg>, env_lang: Option<&str>) -> CliResult<Locale> {
    if let Some(lang) = lang {
        return Ok(lang.into());
    }
    if let Some(value) = env_lang {
        return Locale::parse(value).ok_or_else(|| {
            CliError::config(t!("i18n.lang.invalid_env", env = LANG_ENV, value = value))
        });
    }
    Ok(Locale::En)
}

// ============================================================================
// SECTION: Output
// ============================================================================

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats a localized output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    let stream_label = match stream {
        "stdout" => t!("output.stream.stdout"),
        "stderr" => t!("output.stream.stderr"),
        _ => t!("output.stream.unknown"),
    };
    t!("output.write_failed", stream = stream_label, error = error)
}

/// Emits an error message to stderr and returns the given exit status.
fn emit_error(message: &str, exit_code: u8) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::from(exit_code)
}
