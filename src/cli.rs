use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "settle")]
#[command(version)]
#[command(about = "Declarative GNOME settings reconciler", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Apply the built-in preference profile to the live system
    Apply(ApplyArgs),

    /// Show current vs desired values for the profile
    Status(StatusArgs),

    /// Group installed applications into alphabetic app folders
    Folders(FoldersArgs),

    /// Set a single key in the live settings store
    Set(SetArgs),

    /// Read a single key from the live settings store
    Get(GetArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

// ============================================================================
// Apply
// ============================================================================

#[derive(Parser)]
pub struct ApplyArgs {
    /// Show what would be applied without writing
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Also apply the alphabetic app-folder grouping
    #[arg(long)]
    pub folders: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// Status
// ============================================================================

#[derive(Parser)]
pub struct StatusArgs {
    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// Folders
// ============================================================================

#[derive(Parser)]
pub struct FoldersArgs {
    /// Show the bucket layout without writing
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Extra directory to scan for application descriptors (repeatable)
    #[arg(long = "app-dir", value_name = "DIR")]
    pub app_dirs: Vec<String>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// Set / Get
// ============================================================================

#[derive(Parser)]
pub struct SetArgs {
    /// Schema id (e.g. org.gnome.desktop.interface)
    pub schema: String,

    /// Key name (e.g. color-scheme)
    pub key: String,

    /// Desired value
    pub value: String,

    /// Value type (autodetected when omitted)
    #[arg(short, long, value_enum)]
    pub r#type: Option<ValueType>,

    /// Relocation path for relocatable schemas
    #[arg(short, long)]
    pub path: Option<String>,
}

#[derive(Parser)]
pub struct GetArgs {
    /// Schema id
    pub schema: String,

    /// Key name
    pub key: String,

    /// Relocation path for relocatable schemas
    #[arg(short, long)]
    pub path: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ValueType {
    Bool,
    Int,
    String,
    List,
}
