mod cli;

use cli::{AnalyzeArgs, Args, Command, ReportArgs, ResolveArgs};
use spm_depgraph::adapters::outbound::console::StderrProgressReporter;
use spm_depgraph::adapters::outbound::filesystem::{CsvSeedReader, FileSystemManifestArchive};
use spm_depgraph::adapters::outbound::network::GitHubManifestRepository;
use spm_depgraph::application::dto::{
    AnalysisResponse, AnalyzeRequest, OutputFormat, ResolveRequest,
};
use spm_depgraph::application::factories::{FormatterFactory, PresenterFactory, PresenterType};
use spm_depgraph::application::read_models::GraphReportBuilder;
use spm_depgraph::application::use_cases::{AnalyzeArchiveUseCase, ResolveDependenciesUseCase};
use spm_depgraph::config::{self, ConfigFile, DEFAULT_OUTPUT_DIR};
use spm_depgraph::shared::error::{DepGraphError, ExitCode};
use spm_depgraph::shared::Result;
use std::env;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() {
    init_tracing();

    // clap exits with code 2 on invalid arguments
    let args = Args::parse_args();

    if let Err(e) = run(args).await {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        let mut source = e.source();
        while let Some(err) = source {
            eprintln!("\nCaused by: {}", err);
            source = err.source();
        }

        eprintln!();
        process::exit(ExitCode::ApplicationError.as_i32());
    }
}

/// Diagnostics go to stderr, filtered by SPM_DEPGRAPH_LOG
fn init_tracing() {
    let filter = EnvFilter::try_from_env("SPM_DEPGRAPH_LOG")
        .unwrap_or_else(|_| EnvFilter::new("spm_depgraph=warn"));
    let format = env::var("SPM_DEPGRAPH_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

async fn run(args: Args) -> Result<()> {
    match args.command {
        Command::Resolve(resolve) => run_resolve(resolve).await,
        Command::Analyze(analyze) => run_analyze(analyze),
    }
}

async fn run_resolve(args: ResolveArgs) -> Result<()> {
    let config = load_config(&args.report)?;
    let output_dir = archive_dir(args.output_dir, &config);

    let tokens = if args.anonymous || args.dry_run {
        Vec::new()
    } else {
        let variables = config.token_variables();
        let tokens = GitHubManifestRepository::tokens_from_env(&variables);
        if tokens.is_empty() {
            return Err(DepGraphError::MissingCredentials {
                variables: variables.join(", "),
            }
            .into());
        }
        tokens
    };

    let mut repository = GitHubManifestRepository::new(tokens)?;
    if let Some(ref base_url) = config.api_base_url {
        repository = repository.with_api_base_url(base_url)?;
    }
    if let Some(ref branches) = config.branches {
        repository = repository.with_fallback_branches(branches.clone());
    }
    tracing::debug!(tokens = repository.token_count(), archive = %output_dir.display(), "starting resolution");

    let use_case = ResolveDependenciesUseCase::new(
        CsvSeedReader::new(),
        repository,
        FileSystemManifestArchive::new(&output_dir),
        StderrProgressReporter::new(),
    );

    let request = ResolveRequest::new(args.seeds)
        .with_dry_run(args.dry_run)
        .with_fetch_delay(Duration::from_millis(config.fetch_delay_ms.unwrap_or(0)))
        .with_seed_delay(Duration::from_millis(config.seed_delay_ms.unwrap_or(0)));

    let response = use_case.execute(request).await?;
    if response.dry_run {
        return Ok(());
    }

    eprintln!("📦 Manifests archived under: {}", output_dir.display());
    present_report(&response, &args.report, &config)
}

fn run_analyze(args: AnalyzeArgs) -> Result<()> {
    let config = load_config(&args.report)?;
    let archive_dir = archive_dir(args.dir, &config);

    let use_case = AnalyzeArchiveUseCase::new(
        FileSystemManifestArchive::new(&archive_dir),
        StderrProgressReporter::new(),
    );
    let response = use_case.execute(AnalyzeRequest::new(archive_dir))?;

    present_report(&response, &args.report, &config)
}

/// Explicit --config wins; otherwise look for a config in the working directory
fn load_config(args: &ReportArgs) -> Result<ConfigFile> {
    match args.config {
        Some(ref path) => config::load_config_from_path(path),
        None => Ok(config::discover_config(&env::current_dir()?)?.unwrap_or_default()),
    }
}

fn archive_dir(cli_dir: Option<PathBuf>, config: &ConfigFile) -> PathBuf {
    cli_dir
        .or_else(|| config.output_dir.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR))
}

fn present_report(response: &AnalysisResponse, args: &ReportArgs, config: &ConfigFile) -> Result<()> {
    let format = match args.format {
        Some(format) => format,
        None => config.output_format()?.unwrap_or_default(),
    };

    eprintln!("{}", FormatterFactory::progress_message(format));

    let report = GraphReportBuilder::build(response);
    let formatter = FormatterFactory::create(format);
    let formatted_output = formatter.format(&report)?;

    let destination = args
        .output
        .as_deref()
        .map(|path| output_path(path, format));
    let presenter = PresenterFactory::create(PresenterType::from(destination));
    presenter.present(&formatted_output)?;

    Ok(())
}

/// A directory given as --output receives the format's default file name
fn output_path(path: &Path, format: OutputFormat) -> PathBuf {
    if path.is_dir() {
        path.join(FormatterFactory::default_file_name(format))
    } else {
        path.to_path_buf()
    }
}
