//! Command-line interface definitions.
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::settings::{SETTINGS_FILE, SettingsStore};

/// Top-level CLI entry point for realize settings and resource files.
#[derive(Parser, Debug)]
#[command(
    name = "realize",
    about = "Manage realize settings and resource log files",
    version
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared by every subcommand.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    /// Project root holding the working directory
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Settings file name
    #[arg(long, global = true, default_value = SETTINGS_FILE)]
    pub config: String,
}

impl GlobalOpts {
    /// Return a settings store rooted at `--root`.
    #[must_use]
    pub fn store(&self) -> SettingsStore {
        SettingsStore::new(&self.root)
    }
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write default settings
    Init(InitOpts),
    /// Print the current settings
    Show,
    /// Delete the working directory
    Clean,
    /// Open the enabled resource files
    Open,
    /// Print a random token
    Token(TokenOpts),
    /// Print version information
    Version,
}

impl Command {
    /// Return the subcommand name as typed on the command line.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Init(_) => "init",
            Self::Show => "show",
            Self::Clean => "clean",
            Self::Open => "open",
            Self::Token(_) => "token",
            Self::Version => "version",
        }
    }
}

/// Options for the `init` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct InitOpts {
    /// Overwrite existing settings
    #[arg(long)]
    pub force: bool,
}

/// Options for the `token` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct TokenOpts {
    /// Number of letters
    #[arg(default_value_t = 8)]
    pub length: usize,
}
