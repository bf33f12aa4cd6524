//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// appsup - Install tools and projects into Application Support
#[derive(Parser, Debug)]
#[command(name = "appsup")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print failure details after each error line
    #[arg(long, global = true, env = "APPSUP_DEBUG")]
    pub debug: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Install the bundled tools and any projects
    ///
    /// Destination entries are symbolic links to their sources unless
    /// --copy is given. Entries that no longer exist in a source are removed.
    ///
    /// Examples:
    ///   appsup install                  # Link the bundled tools
    ///   appsup install ~/code/reports   # Also install a project
    ///   appsup install --copy           # Self-contained copies
    Install {
        /// Copy files instead of placing symbolic links
        #[arg(short, long)]
        copy: bool,

        #[command(flatten)]
        locations: Locations,

        /// Project directories to install under the projects directory
        projects: Vec<PathBuf>,
    },

    /// Remove the installation, or only the named projects
    Uninstall {
        #[command(flatten)]
        locations: Locations,

        /// Installed project names to remove
        #[arg(value_name = "PROJECT_NAME")]
        projects: Vec<String>,
    },

    /// Print the resolved source and install directories
    Paths {
        #[command(flatten)]
        locations: Locations,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Where sources, configuration and the install base live
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct Locations {
    /// Bundled source directory [default: app_support beside the executable]
    #[arg(long, env = "APPSUP_SOURCE", value_name = "DIR")]
    pub source: Option<PathBuf>,

    /// Config file [default: config.json beside the source directory]
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory the application support directory is created in
    /// [default: ~/Library/Application Support]
    #[arg(long, env = "APPSUP_BASE_DIR", value_name = "DIR")]
    pub base_dir: Option<PathBuf>,
}
