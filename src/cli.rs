//! Command-line argument parsing for the headless editor
//!
//! Supports:
//! - Loading a markup file as the initial value
//! - Replaying an editing script, or an interactive session on stdin
//! - Writing the final content to a file or stdout

use clap::Parser;
use std::path::PathBuf;

/// Headless rich-text editing session
#[derive(Parser, Debug)]
#[command(name = "richpad", version, about = "Headless rich-text editing session")]
pub struct CliArgs {
    /// Markup file to load as the initial value
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Replay a YAML or JSON editing script instead of reading stdin
    #[arg(short, long, value_name = "FILE")]
    pub script: Option<PathBuf>,

    /// Write the final content here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Print word count and reading time to stderr
    #[arg(long)]
    pub stats: bool,

    /// Placeholder shown while the document is empty
    #[arg(long, value_name = "TEXT")]
    pub placeholder: Option<String>,

    /// Use this config file instead of the user config
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Echo every change notification to stderr
    #[arg(short = 'n', long)]
    pub notifications: bool,
}

/// How the session is driven
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartupMode {
    /// Steps typed on stdin, prompts answered on stdin
    Interactive,
    /// Steps replayed from a file
    Script(PathBuf),
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub mode: StartupMode,
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub show_stats: bool,
    pub placeholder: Option<String>,
    pub config_path: Option<PathBuf>,
    pub echo_notifications: bool,
}

impl CliArgs {
    /// Convert parsed CLI args into startup configuration
    pub fn into_config(self) -> Result<StartupConfig, String> {
        if let (Some(script), Some(file)) = (&self.script, &self.file) {
            if script == file {
                return Err("The script and the input file must differ".to_string());
            }
        }
        if let (Some(output), Some(script)) = (&self.output, &self.script) {
            if output == script {
                return Err("Refusing to overwrite the script with the output".to_string());
            }
        }

        let mode = match self.script {
            Some(path) => StartupMode::Script(path),
            None => StartupMode::Interactive,
        };

        Ok(StartupConfig {
            mode,
            input: self.file,
            output: self.output,
            show_stats: self.stats,
            placeholder: self.placeholder,
            config_path: self.config,
            echo_notifications: self.notifications,
        })
    }
}
