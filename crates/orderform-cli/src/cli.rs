//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use orderform_gatekeeper::ValidationConfig;
use std::path::PathBuf;

/// Orderform CLI - Turn order-form text into sheet rows.
#[derive(Debug, Parser)]
#[command(name = "orderform")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "ORDERFORM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (minimal, script-friendly)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract a canonical record from order-form text
    Extract(ExtractArgs),

    /// Validate a canonical record JSON file
    Validate(ValidateArgs),

    /// Format a canonical record JSON file as a sheet row
    Row(RowArgs),

    /// Extract, validate, format and optionally append in one go
    Process(ProcessArgs),

    /// Print the sheet column layout
    Columns,
}

/// Arguments for the extract command.
#[derive(Debug, Parser)]
pub struct ExtractArgs {
    /// Text file holding the order form's extracted text
    #[arg(short = 'i', long)]
    pub file: Option<PathBuf>,

    /// Read the text from stdin
    #[arg(long, conflicts_with = "file")]
    pub stdin: bool,
}

/// Arguments for the validate command.
#[derive(Debug, Parser)]
pub struct ValidateArgs {
    /// Canonical record JSON file
    #[arg(short = 'i', long)]
    pub file: PathBuf,

    /// Validation preset (overrides the config file)
    #[arg(short, long, value_enum)]
    pub preset: Option<PresetArg>,
}

/// Arguments for the row command.
#[derive(Debug, Parser)]
pub struct RowArgs {
    /// Canonical record JSON file
    #[arg(short = 'i', long)]
    pub file: PathBuf,

    /// Append the row to the configured sheet
    #[arg(short, long)]
    pub append: bool,

    /// Validation preset (overrides the config file)
    #[arg(short, long, value_enum)]
    pub preset: Option<PresetArg>,
}

/// Arguments for the process command.
#[derive(Debug, Parser)]
pub struct ProcessArgs {
    /// Text file holding the order form's extracted text
    #[arg(short = 'i', long)]
    pub file: Option<PathBuf>,

    /// Read the text from stdin
    #[arg(long, conflicts_with = "file")]
    pub stdin: bool,

    /// Append the row to the configured sheet
    #[arg(short, long)]
    pub append: bool,

    /// Validation preset (overrides the config file)
    #[arg(short, long, value_enum)]
    pub preset: Option<PresetArg>,
}

/// Validation preset argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum PresetArg {
    /// Default checks
    Default,
    /// Only the sections formatting needs
    Permissive,
    /// Every check, including contact counts
    Strict,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<PresetArg> for ValidationConfig {
    fn from(preset: PresetArg) -> Self {
        match preset {
            PresetArg::Default => ValidationConfig::default(),
            PresetArg::Permissive => ValidationConfig::permissive(),
            PresetArg::Strict => ValidationConfig::strict(),
        }
    }
}
