//! `tablift` CLI - Extract tables from positioned document text

mod cmd;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tablift::{ExtractConfig, GapMode, SinkFormat};

#[derive(Parser)]
#[command(name = "tablift")]
#[command(about = "Reconstruct tables from positioned document text")]
#[command(version)]
struct Cli {
    /// Config file (default: ~/.config/tablift/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verbose logging (repeat for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Threshold overrides shared by commands that run the table pipeline.
#[derive(Args, Debug, Default)]
struct ThresholdArgs {
    /// Row bucket height: tokens whose y rounds to the same multiple share a row
    #[arg(long)]
    bucket: Option<i64>,

    /// Maximum vertical distance between consecutive rows of one table
    #[arg(long)]
    gap: Option<i64>,

    /// Maximum cell-count change between consecutive rows of one table
    #[arg(long)]
    cell_delta: Option<usize>,

    /// Split tables on column-count changes only
    #[arg(long)]
    no_gap_check: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract tables from documents
    Extract {
        /// Input documents (.pdf with the `pdf` feature, .json token dumps, `-` for stdin)
        #[arg(required = true)]
        inputs: Vec<String>,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<SinkFormat>,

        /// Write artifacts into this directory instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Maximum documents processed at once
        #[arg(short, long, default_value = "4")]
        parallel: usize,

        #[command(flatten)]
        thresholds: ThresholdArgs,
    },

    /// Dump the positioned tokens of a document as JSON
    Tokens {
        /// Input document (`-` for stdin)
        input: String,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the effective configuration
    Config {
        #[command(flatten)]
        thresholds: ThresholdArgs,
    },
}

impl ThresholdArgs {
    fn apply(&self, config: &mut ExtractConfig) -> Result<()> {
        let t = &mut config.thresholds;
        if let Some(bucket) = self.bucket {
            t.row_bucket = bucket;
        }
        if let Some(gap) = self.gap {
            t.gap = gap;
        }
        if let Some(delta) = self.cell_delta {
            t.cell_delta = delta;
        }
        if self.no_gap_check {
            t.gap_mode = GapMode::Disabled;
        }
        t.validate()?;
        Ok(())
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn load_config(path: Option<&PathBuf>) -> Result<ExtractConfig> {
    Ok(match path {
        Some(path) => ExtractConfig::load_from(path)?,
        None => ExtractConfig::load()?,
    })
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = load_config(cli.config.as_ref())?;

    match cli.command {
        Commands::Extract {
            inputs,
            format,
            output,
            parallel,
            thresholds,
        } => {
            thresholds.apply(&mut config)?;
            let format = format.unwrap_or(config.output.format);
            cmd::extract::cmd_extract(&inputs, format, output, parallel, config.thresholds).await
        }
        Commands::Tokens { input, output } => {
            cmd::tokens::cmd_tokens(&input, output)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Config { thresholds } => {
            thresholds.apply(&mut config)?;
            cmd::config::cmd_config(&config)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
