use clap::{Parser, Subcommand};
use std::path::PathBuf;

use spm_depgraph::application::dto::OutputFormat;

/// Resolve Swift package dependency trees from GitHub and analyze the graph
#[derive(Parser, Debug)]
#[command(name = "spm-depgraph")]
#[command(version)]
#[command(about = "Resolve Swift package dependency trees from GitHub and analyze the graph", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch every seed's Package.swift closure, archive it and report on the graph
    Resolve(ResolveArgs),
    /// Rebuild and report on the graph from a previously written archive (offline)
    Analyze(AnalyzeArgs),
}

#[derive(clap::Args, Debug)]
pub struct ResolveArgs {
    /// CSV seed table with a 'url' column (and optional 'repo' column)
    #[arg(short, long, value_name = "CSV")]
    pub seeds: PathBuf,

    /// Directory receiving the archived manifests [default: all_dependencies_tree]
    #[arg(short = 'd', long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    #[command(flatten)]
    pub report: ReportArgs,

    /// Fetch without a token (60 requests per hour)
    #[arg(long)]
    pub anonymous: bool,

    /// Validate the seed list without contacting GitHub
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(clap::Args, Debug)]
pub struct AnalyzeArgs {
    /// Archive directory written by 'resolve' [default: all_dependencies_tree]
    #[arg(short = 'd', long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    #[command(flatten)]
    pub report: ReportArgs,
}

/// Options shared by both subcommands
#[derive(clap::Args, Debug)]
pub struct ReportArgs {
    /// Output format: json or markdown [default: json]
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Path to a config file (defaults to ./spm-depgraph.config.yml if present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
