//! CLI argument definitions using clap
//!
//! Commands:
//! - txnq summary <input>
//! - txnq revenue <input> [--start <ts>] [--end <ts>] [--per-row]
//! - txnq compare <input> --start1 --end1 --start2 --end2
//! - txnq filter <input> [--min-quantity] [--start] [--end] [--user] [--product]
//! - txnq top <input> [-n <count>]
//! - txnq mask <input>
//! - txnq reprice <input> --percent <pct>
//! - txnq convert <input> <output>
//! - txnq sample [--output <path>]

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// txnq - deterministic analytics over transaction tables
#[derive(Parser, Debug)]
#[command(name = "txnq")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to a JSON configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Minimum log severity (trace, info, warn, error, fatal)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Table file to read
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Input table file
    pub input: PathBuf,

    /// Input format (text, delimited, columnar); inferred from the extension if omitted
    #[arg(long = "input-format")]
    pub input_format: Option<String>,
}

/// Optional table file to write
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Write the resulting table here instead of printing its rows
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Output format; inferred from the extension if omitted
    #[arg(long = "output-format")]
    pub output_format: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Revenue, users, products and tiers of a table
    Summary {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Total revenue, optionally restricted to an inclusive time range
    Revenue {
        #[command(flatten)]
        input: InputArgs,

        /// Range start (inclusive)
        #[arg(long)]
        start: Option<String>,

        /// Range end (inclusive)
        #[arg(long)]
        end: Option<String>,

        /// Also print the revenue of every row
        #[arg(long)]
        per_row: bool,
    },

    /// Revenue of two independent periods
    Compare {
        #[command(flatten)]
        input: InputArgs,

        #[arg(long)]
        start1: String,

        #[arg(long)]
        end1: String,

        #[arg(long)]
        start2: String,

        #[arg(long)]
        end2: String,
    },

    /// Rows matching every given predicate
    Filter {
        #[command(flatten)]
        input: InputArgs,

        /// Keep rows with quantity strictly greater than this
        #[arg(long)]
        min_quantity: Option<u32>,

        #[arg(long)]
        start: Option<String>,

        #[arg(long)]
        end: Option<String>,

        #[arg(long)]
        user: Option<i64>,

        #[arg(long)]
        product: Option<i64>,

        /// Mask zero-quantity rows before filtering
        #[arg(long)]
        skip_zero_quantity: bool,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// All rows of the highest-revenue products
    Top {
        #[command(flatten)]
        input: InputArgs,

        /// Number of products (defaults to the configured top_n)
        #[arg(short = 'n', long)]
        count: Option<usize>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Soft-delete zero-quantity rows and report the masked aggregates
    Mask {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Scale every unit price by a percentage
    Reprice {
        #[command(flatten)]
        input: InputArgs,

        /// Percentage change, e.g. 5 or -12.5
        #[arg(long, allow_hyphen_values = true)]
        percent: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Rewrite a table file in another format
    Convert {
        #[command(flatten)]
        input: InputArgs,

        /// Destination file
        destination: PathBuf,

        /// Destination format; inferred from the extension if omitted
        #[arg(long = "output-format")]
        output_format: Option<String>,
    },

    /// Print or write the built-in eight-row sample
    Sample {
        #[command(flatten)]
        output: OutputArgs,
    },
}

impl Command {
    /// Name used in command logs
    pub fn name(&self) -> &'static str {
        match self {
            Command::Summary { .. } => "summary",
            Command::Revenue { .. } => "revenue",
            Command::Compare { .. } => "compare",
            Command::Filter { .. } => "filter",
            Command::Top { .. } => "top",
            Command::Mask { .. } => "mask",
            Command::Reprice { .. } => "reprice",
            Command::Convert { .. } => "convert",
            Command::Sample { .. } => "sample",
        }
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
