//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum, ValueHint};

use crate::config::RawSettings;

/// Build a managed-bookmarks tree from a spreadsheet export and push it as Chrome policy
#[derive(Parser, Debug)]
#[command(name = "managed-bookmarks")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Config file layered over the global config
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Target org unit (orgunits/<id> or <id>)
    #[arg(long, global = true)]
    pub org_unit: Option<String>,

    /// Name of the managed bookmarks folder
    #[arg(long, global = true)]
    pub toplevel_name: Option<String>,

    /// Separator between folder names in the path column
    #[arg(long, global = true)]
    pub separator: Option<String>,

    /// Input cell delimiter ("," or "tab")
    #[arg(long, global = true)]
    pub delimiter: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Flag values as a settings overlay.
    pub fn overrides(&self) -> RawSettings {
        RawSettings {
            org_unit: self.org_unit.clone(),
            toplevel_name: self.toplevel_name.clone(),
            separator: self.separator.clone(),
            delimiter: self.delimiter.clone(),
            ..RawSettings::default()
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the bookmark structure built from the input
    Preview {
        /// Input file (path,name,url with header row), "-" for stdin
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = PreviewFormat::Json)]
        format: PreviewFormat,
        /// Show only the first N characters of the JSON
        #[arg(short, long)]
        truncate: Option<usize>,
    },

    /// Overwrite the org unit's managed bookmarks
    Push {
        /// Input file (path,name,url with header row), "-" for stdin
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
        /// Print the request instead of sending it
        #[arg(long)]
        dry_run: bool,
    },

    /// Print the policy API request without sending it
    Payload {
        /// Input file (path,name,url with header row), "-" for stdin
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PreviewFormat {
    /// Pretty-printed policy JSON
    Json,
    /// Indented folder tree
    Tree,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Show config paths
    Path,

    /// Create config template in the global location
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}
