use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint, builder::BoolishValueParser};

use crate::infra::documents::DocumentFormat;

/// Command-line arguments for the tilecard binary.
#[derive(Debug, Parser)]
#[command(name = "tilecard", version, about = "Render tile card HTML fragments")]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(long = "config-file", env = "TILECARD_CONFIG_FILE", value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Render every tile of a document to HTML fragments.
    Render(RenderArgs),
    /// Decode and validate a document without rendering it.
    Check(CheckArgs),
}

#[derive(Debug, Args, Default, Clone)]
pub struct InputArgs {
    /// Tile document to read; `-` or no value reads stdin.
    #[arg(long = "input", short = 'i', value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub input: Option<PathBuf>,

    /// Document format; inferred from the file extension when omitted.
    #[arg(long = "format", value_enum, value_name = "FORMAT")]
    pub format: Option<DocumentFormat>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct LoggingOverrides {
    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub log_json: Option<bool>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct RenderArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub logging: LoggingOverrides,

    /// File to write the rendered fragments to; stdout when omitted.
    #[arg(long = "output", short = 'o', value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct CheckArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub logging: LoggingOverrides,
}
