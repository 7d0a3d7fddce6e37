use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "invtxt", version)]
#[command(about = "Home inventory kept in a plain text file", long_about = None)]
#[command(after_help = "ITEM is either a line number or an alias (the * is optional).\n\
                        Use 'unset' as VALUE to clear a field.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Inventory directory, holding inv.txt and pics/
    #[arg(long, global = true, env = "INVTXT_DIR")]
    pub dir: Option<PathBuf>,

    /// Directory holding config.json
    #[arg(long, global = true, env = "INVTXT_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    /// Print raw lines instead of the colored listing
    #[arg(long, global = true)]
    pub plain: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show items, optionally only those containing FILTER (case-insensitive)
    Ls { filter: Option<String> },

    /// Show items whose amount is below the required amount
    #[command(alias = "lsdeficit")]
    Deficit,

    /// Print all known categories
    #[command(alias = "lscat")]
    Cats,

    /// Print all known tags
    #[command(alias = "lstag")]
    Tags,

    /// Print all known aliases
    #[command(alias = "lsals")]
    Aliases,

    /// Show the items referenced by ITEM
    #[command(alias = "lsref")]
    Refs { item: String },

    /// Add a record, e.g. "(2) *drill cordless drill -> @garage"
    Add { record: String },

    /// Remove an item
    Rm { item: String },

    /// Set the amount: absolute (5) or relative (+2, -1)
    Num {
        item: String,
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// Set the required amount
    Req { item: String, value: String },

    /// Set the alias
    Als { item: String, value: String },

    /// Replace the description text
    Text {
        item: String,
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// Replace the metadata, e.g. "@garage #power +4"
    Meta { item: String, value: String },

    /// Import, show and clean up item pictures
    Pics {
        #[command(subcommand)]
        action: PicsAction,
    },

    /// Print the effective configuration
    Config,
}

#[derive(Subcommand, Debug)]
pub enum PicsAction {
    /// Import pictures and attach them to ITEM
    Add {
        item: String,
        #[arg(required = true, num_args = 1..)]
        files: Vec<PathBuf>,
    },

    /// Open the pictures of ITEM in the viewer
    Show { item: String },

    /// Move pictures no item refers to into garbage/
    Clean,
}
