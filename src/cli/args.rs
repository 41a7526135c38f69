//! CLI argument definitions
//!
//! All Clap derive structs for `phrase-cycler` command-line parsing.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use crate::observability::LogFormat;

// ============================================================================
// Root CLI
// ============================================================================

/// Typewriter-style phrase animation for the terminal.
#[derive(Parser, Debug)]
#[command(name = "phrase-cycler", author, version, about)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-error output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output control.
    #[arg(long, default_value = "auto", global = true, env = "PHRASE_CYCLER_COLOR")]
    pub color: ColorChoice,

    /// Log output format.
    #[arg(long, default_value = "human", global = true)]
    pub log_format: LogFormat,
}

// ============================================================================
// Commands
// ============================================================================

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Animate the phrases on the terminal.
    Run(RunArgs),

    /// Print upcoming steps and their delays without waiting.
    Trace(TraceArgs),

    /// Compute the step that follows a progress snapshot.
    Step(StepArgs),

    /// Validate configuration files.
    Validate(ValidateArgs),

    /// Generate shell completion scripts.
    Completions(CompletionsArgs),
}

/// Where the phrases and speeds come from.
///
/// `--phrase` values replace the configuration file's phrase list.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Path to YAML configuration file.
    #[arg(short, long, env = "PHRASE_CYCLER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Phrase to cycle through (repeatable).
    #[arg(short, long = "phrase", value_name = "PHRASE")]
    pub phrases: Vec<String>,
}

/// Arguments for `run`.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Phrase and speed source.
    #[command(flatten)]
    pub source: SourceArgs,

    /// Stop after this many phrases have been typed and erased.
    #[arg(long)]
    pub cycles: Option<u64>,

    /// Stop after this long (e.g. `30s`, `2m`).
    #[arg(long = "for", value_name = "DURATION", value_parser = parse_duration)]
    pub duration: Option<Duration>,

    /// Cursor character drawn after the text.
    #[arg(long, default_value = "|")]
    pub cursor: char,
}

/// Arguments for `trace`.
#[derive(Args, Debug)]
pub struct TraceArgs {
    /// Phrase and speed source.
    #[command(flatten)]
    pub source: SourceArgs,

    /// Number of steps to print.
    #[arg(short = 'n', long, default_value_t = 20)]
    pub steps: usize,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

/// Arguments for `step`.
#[derive(Args, Debug)]
pub struct StepArgs {
    /// Phrase and speed source.
    #[command(flatten)]
    pub source: SourceArgs,

    /// Progress snapshot as JSON, e.g.
    /// `{"phrase":"h","phraseIdx":0,"status":"typing"}`.
    #[arg(long)]
    pub progress: String,
}

/// Arguments for `validate`.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Configuration files to validate.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Treat warnings as errors.
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for shell completion generation.
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell for completion script.
    pub shell: Shell,
}

// ============================================================================
// CLI-Local Enums
// ============================================================================

/// Color output choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal support.
    #[default]
    Auto,
    /// Always use color.
    Always,
    /// Never use color.
    Never,
}

impl ColorChoice {
    /// Whether ANSI escapes should be written to `stream`.
    ///
    /// `Auto` enables them for a terminal unless `NO_COLOR` is set.
    #[must_use]
    pub fn enabled_for(self, stream: &impl IsTerminal) -> bool {
        match self {
            Self::Auto => stream.is_terminal() && std::env::var_os("NO_COLOR").is_none(),
            Self::Always => true,
            Self::Never => false,
        }
    }
}

/// Output format for structured output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output.
    #[default]
    Human,
    /// JSON lines.
    Json,
}

/// Shell type for completion generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell.
    Bash,
    /// Zsh shell.
    Zsh,
    /// Fish shell.
    Fish,
    /// `PowerShell`.
    #[value(name = "powershell")]
    PowerShell,
    /// Elvish shell.
    Elvish,
}

fn parse_duration(s: &str) -> Result<Duration, humantime::DurationError> {
    humantime::parse_duration(s)
}

// ============================================================================
// Tests
// ============================================================================
