use clap::{Args, Parser, Subcommand, ValueEnum};
use episcan::core::io::report::ReportFormat;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "EpiScan Developers",
    version,
    about = "EpiScan CLI - Predict linear epitope candidates in protein sequences and highlight them on 3D structures.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set the number of threads used for batch scoring.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Predict epitope candidates in one sequence and optionally overlay them on a structure.
    Predict(PredictArgs),
    /// Predict epitope candidates for every record of a FASTA file.
    Batch(BatchArgs),
    /// Manage locally cached structure files.
    Structure(StructureArgs),
    /// List known disease-associated epitopes.
    Known,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => ReportFormat::Text,
            OutputFormat::Json => ReportFormat::Json,
            OutputFormat::Csv => ReportFormat::Csv,
        }
    }
}

/// Scoring and output options shared by `predict` and `batch`.
#[derive(Args, Debug, Default, Clone)]
pub struct ScoringArgs {
    /// Peptide window length scanned at each position.
    #[arg(short, long, value_name = "INT")]
    pub window: Option<usize>,

    /// Minimum fraction of hydrophilic residues (0.1 to 1.0).
    #[arg(short, long, value_name = "FLOAT")]
    pub threshold: Option<f64>,

    /// Output format for the candidate listing.
    #[arg(long, value_enum, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Write the candidate listing to a file instead of stdout.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S scoring.window=7
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `predict` subcommand.
#[derive(Args, Debug)]
pub struct PredictArgs {
    /// Protein sequence in single-letter amino acid codes.
    #[arg(short, long, value_name = "SEQUENCE", conflicts_with = "input")]
    pub sequence: Option<String>,

    /// Read the sequence from a raw text or FASTA file (first record is used).
    #[arg(short, long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// PDB code of a structure to highlight the candidates on (e.g., 1TUP).
    #[arg(long, value_name = "PDB_ID")]
    pub pdb: Option<String>,

    /// Where to write the 3D viewer page. Defaults to '<PDB_ID>_epitopes.html'.
    #[arg(long, value_name = "PATH", requires = "pdb")]
    pub viewer_out: Option<PathBuf>,

    /// Skip the lookup of known disease-associated epitopes.
    #[arg(long)]
    pub no_known: bool,

    #[command(flatten)]
    pub scoring: ScoringArgs,
}

/// Arguments for the `batch` subcommand.
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// FASTA file with one or more protein sequences.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    #[command(flatten)]
    pub scoring: ScoringArgs,
}

/// Arguments for the `structure` subcommand.
#[derive(Args, Debug)]
pub struct StructureArgs {
    #[command(subcommand)]
    pub command: StructureCommands,
}

/// Available commands for structure cache management.
#[derive(Subcommand, Debug)]
pub enum StructureCommands {
    /// Download a structure into the local cache.
    Fetch {
        /// PDB code of the structure (e.g., 1TUP).
        #[arg(required = true)]
        id: String,
        /// Force re-download even if the structure is cached.
        #[arg(long)]
        force: bool,
    },
    /// Show the absolute path to the structure cache directory.
    Path,
    /// Set a custom absolute path for the structure cache directory.
    SetPath {
        /// The new directory to store structure files in.
        #[arg(required = true)]
        path: PathBuf,
    },
    /// Reset the cache path to its default, OS-specific location.
    ResetPath,
    /// Delete all cached structure files.
    Clear,
}
