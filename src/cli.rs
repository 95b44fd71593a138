//! CLI argument definitions (build.rs compatible).
//!
//! This module contains only struct/enum definitions with no dependencies on
//! other crate modules, allowing it to be included from build.rs for man page
//! generation.

use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;

/// Translate text between languages from the terminal.
///
/// Without --text, --input or --list-languages an interactive TUI is started.
#[derive(Parser, Debug, Default, Serialize)]
#[command(name = "babelterm")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Translate this text once and print the result
    #[arg(short, long, conflicts_with = "input")]
    #[serde(skip)]
    pub text: Option<String>,

    /// Import a document (TXT or DOCX), translate it and print the result
    #[arg(short, long, value_name = "FILE")]
    #[serde(skip)]
    pub input: Option<PathBuf>,

    /// Source language code (e.g. en)
    #[arg(short, long, value_name = "CODE")]
    #[serde(rename = "source_lang", skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,

    /// Target language code (e.g. es)
    #[arg(long, value_name = "CODE")]
    #[serde(rename = "target_lang", skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,

    /// Also write the translation to translated-to-<CODE>.txt in the export directory
    #[arg(short, long)]
    #[serde(skip)]
    pub export: bool,

    /// Directory that exported translations are written to
    #[arg(long, value_name = "DIR")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,

    /// List the languages of the catalog and exit
    #[arg(short, long)]
    #[serde(skip)]
    pub list_languages: bool,

    /// Only list languages whose name or native name contains TERM
    #[arg(long, value_name = "TERM", requires = "list_languages")]
    #[serde(skip)]
    pub search: Option<String>,

    /// Translation endpoint URL
    #[arg(long, value_name = "URL")]
    #[serde(skip)]
    pub endpoint: Option<String>,

    /// Language catalog file (YAML or JSON) replacing the built-in one
    #[arg(long, value_name = "FILE")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,

    /// Start in dark mode
    #[arg(long, conflicts_with = "light")]
    #[serde(skip)]
    pub dark: bool,

    /// Start in light mode
    #[arg(long)]
    #[serde(skip)]
    pub light: bool,

    /// Load configuration from TOML file
    #[arg(long, value_name = "FILE")]
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Save the merged configuration to TOML file
    #[arg(long, value_name = "FILE")]
    #[serde(skip)]
    pub save_config: Option<PathBuf>,

    /// Log file path (default: babelterm.log)
    #[arg(long, value_name = "FILE")]
    #[serde(skip)]
    pub log_file: Option<PathBuf>,

    /// Log level: trace, debug, info, warn, error (default: info)
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    #[serde(skip)]
    pub log_level: String,

    /// Generate shell completions for the specified shell
    #[arg(long, value_enum, value_name = "SHELL")]
    #[serde(skip)]
    pub completions: Option<clap_complete::Shell>,
}

impl Cli {
    /// Whether this invocation translates once instead of starting the TUI.
    pub fn is_headless(&self) -> bool {
        self.text.is_some() || self.input.is_some()
    }

    /// Appearance requested on the command line, if any.
    pub fn dark_mode(&self) -> Option<bool> {
        match (self.dark, self.light) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}
