mod commands;
mod output;

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "mastlift",
    version,
    about = "Telecom tower proposal analyzer: site summaries and lifting recommendations"
)]
struct Cli {
    /// Log progress to stderr (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one or more proposals (PDF, DOCX or TXT)
    Analyze(AnalyzeArgs),
    /// Print the linearized text of a proposal (without analyzing)
    Extract {
        /// Path to PDF, DOCX or TXT file
        input_file: PathBuf,

        /// Format tag (txt, docx, pdf). Default: from the file extension
        #[arg(short, long)]
        format: Option<String>,

        /// Output format: text (default) or json
        #[arg(short, long, default_value = "text")]
        output: String,
    },
    /// Manage and inspect keyword tables
    Keywords {
        #[command(subcommand)]
        action: KeywordsAction,
    },
    /// Inspect and validate lifting policies
    Policy {
        #[command(subcommand)]
        action: PolicyAction,
    },
}

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Paths to PDF, DOCX or TXT files
    #[arg(required = true)]
    pub input_files: Vec<PathBuf>,

    /// Format tag (txt, docx, pdf) for all inputs. Default: from each extension
    #[arg(short, long)]
    pub format: Option<String>,

    /// The structure has no climbing provisions
    #[arg(long)]
    pub no_climbing_access: bool,

    /// Recommend a skylift regardless of structure type
    #[arg(long)]
    pub force_skylift: bool,

    /// Recommend a mobile crane regardless of structure type
    #[arg(long)]
    pub force_crane: bool,

    /// Crane setback radius in meters (default 10)
    #[arg(long, value_name = "M")]
    pub setback_m: Option<Decimal>,

    /// Rooftop elevation in meters (default 25)
    #[arg(long, value_name = "M")]
    pub rooftop_elevation_m: Option<Decimal>,

    /// Site context JSON file; flags above take precedence
    #[arg(long, value_name = "FILE")]
    pub site: Option<PathBuf>,

    /// Builtin keyword table for the structure section (default: structure)
    #[arg(long, value_name = "PRESET", conflicts_with = "structure_keywords")]
    pub structure_preset: Option<String>,

    /// Custom keyword table for the structure section
    #[arg(long, value_name = "FILE")]
    pub structure_keywords: Option<PathBuf>,

    /// Builtin keyword table for the aerial/environment section (default: environment)
    #[arg(long, value_name = "PRESET", conflicts_with = "environment_keywords")]
    pub environment_preset: Option<String>,

    /// Custom keyword table for the aerial/environment section
    #[arg(long, value_name = "FILE")]
    pub environment_keywords: Option<PathBuf>,

    /// Custom lifting policy (height band, fallback weights, crane classes)
    #[arg(long, value_name = "FILE")]
    pub policy: Option<PathBuf>,

    /// Equipment/tower load before-after tables to include in the report
    #[arg(long, value_name = "FILE")]
    pub comparison: Option<PathBuf>,

    /// Output format: table (default) or json
    #[arg(short, long, default_value = "table")]
    pub output: String,

    /// Write the analysis as JSON to a file
    #[arg(short = 'O', long = "out", value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Show the matched lines under each category
    #[arg(long)]
    pub show_lines: bool,
}

#[derive(Subcommand)]
enum KeywordsAction {
    /// List predefined keyword tables
    List,
    /// Show the categories and keywords of a preset
    Show {
        /// Preset name (e.g., "structure")
        preset: String,
    },
    /// Validate a custom keyword table
    Validate {
        /// Path to JSON keyword table
        file: PathBuf,
    },
}

#[derive(Subcommand)]
enum PolicyAction {
    /// Show the builtin lifting policy
    Show,
    /// Validate a custom lifting policy
    Validate {
        /// Path to JSON policy file
        file: PathBuf,
    },
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Analyze(args) => commands::analyze::run(args),
        Commands::Extract {
            input_file,
            format,
            output,
        } => commands::extract::run(input_file, format.as_deref(), &output),
        Commands::Keywords { action } => match action {
            KeywordsAction::List => commands::keywords::list(),
            KeywordsAction::Show { preset } => commands::keywords::show(&preset),
            KeywordsAction::Validate { file } => commands::keywords::validate(&file),
        },
        Commands::Policy { action } => match action {
            PolicyAction::Show => commands::policy::show(),
            PolicyAction::Validate { file } => commands::policy::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
