use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generates an epub-pack.toml config file
    Config,
    /// Appends documents to the end of the list
    Add {
        /// Text files to add, in order
        #[clap(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Removes the document at a position (as shown by `list`)
    Remove { position: usize },
    /// Moves the document at one position to another
    Move { from: usize, to: usize },
    /// Loads every document and shows the list with its status
    List,
    /// Exports the documents according to the contents of the epub-pack.toml config file
    Render,
}

#[derive(Parser, Debug)]
#[clap(author, version, about)]
pub struct Cli {
    /// Path to the project file
    #[clap(long, short, global = true, default_value = crate::config_wizard::CONFIG_FILE)]
    pub config: PathBuf,

    /// Increase logging verbosity (-v for info, -vv for debug)
    #[clap(long, short, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[clap(subcommand)]
    pub command: Commands,
}
