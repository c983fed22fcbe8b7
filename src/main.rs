use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{fmt, EnvFilter};

mod config;
mod error;
mod figma;
mod utils;

use config::FetchConfig;
use figma::credentials::{self, Credential};
use error::RunError;
use utils::images::DownloadReport;

/// Download rendered design assets from the Figma API
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render the configured nodes as PNG and save them locally
    Fetch(FetchArgs),
    /// Print instructions for saving the assets by hand
    Guide {
        /// Directory where images should be saved
        #[arg(short, long, default_value = config::DEFAULT_OUTPUT_DIR)]
        output: PathBuf,

        /// JSON file listing {nodeId, filename, description} entries
        #[arg(short, long)]
        manifest: Option<PathBuf>,
    },
}

#[derive(clap::Args, Debug)]
struct FetchArgs {
    /// Figma file key the nodes belong to
    #[arg(long, default_value = config::DEFAULT_FILE_KEY)]
    file_key: String,

    /// Directory where images are saved
    #[arg(short, long, default_value = config::DEFAULT_OUTPUT_DIR)]
    output: PathBuf,

    /// JSON file listing {nodeId, filename} pairs (defaults to the built-in list)
    #[arg(short, long)]
    manifest: Option<PathBuf>,

    /// Extra config file to search for a token before the default locations
    #[arg(long)]
    credentials: Option<PathBuf>,

    /// Figma API root
    #[arg(long, default_value = config::DEFAULT_API_BASE, hide = true)]
    api_base: String,
}

/// Fetch the URL map, then download every asset. Only the batch fetch and
/// directory creation are fatal.
async fn run_fetch(
    config: &FetchConfig,
    credential: &Credential,
) -> Result<DownloadReport, RunError> {
    let client = utils::http::build_client();

    println!("Fetching image URLs from Figma...");
    let urls = figma::images::fetch_image_urls(&client, config, credential).await?;
    println!("✓ Got {} image URLs\n", urls.len());

    utils::images::download_assets(&client, config, &urls)
        .await
        .map_err(|source| RunError::OutputDir {
            path: config.output_dir.clone(),
            source,
        })
}

/// Resolve the token, build the config and run the pipeline
async fn fetch_command(
    args: FetchArgs,
    env: impl Fn(&str) -> Option<String> + Copy,
) -> Result<DownloadReport, RunError> {
    let mut candidates: Vec<PathBuf> = args.credentials.into_iter().collect();
    candidates.extend(credentials::default_candidates(env));

    let credential = credentials::resolve_token(env, &candidates)?;

    let assets = config::load_assets(args.manifest.as_deref())?;
    let config = FetchConfig::new(args.file_key, args.output, assets)?.with_api_base(args.api_base);

    println!("Starting download of Figma images...\n");
    run_fetch(&config, &credential).await
}

/// Report the run outcome and map it to the process exit status.
///
/// Per-asset failures still exit 0; any fatal error exits 1.
fn finish_fetch(result: &Result<DownloadReport, RunError>) -> ExitCode {
    match result {
        Ok(report) => {
            println!(
                "\nDownload complete! {} saved ({} bytes), {} skipped, {} failed",
                report.saved(),
                utils::files::format_bytes(report.total_bytes()),
                report.skipped(),
                report.failed()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("✗ {}", e);
            if matches!(e, RunError::Credential(_)) {
                eprintln!(
                    "Please set FIGMA_ACCESS_TOKEN environment variable or configure Figma MCP server"
                );
            }
            ExitCode::FAILURE
        }
    }
}

fn run_guide(output: &Path, manifest: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let assets = config::load_assets(manifest)?;

    utils::files::ensure_output_dir(output)?;
    println!("Output directory: {}\n", output.display());

    println!("Images to save:");
    for (i, asset) in assets.iter().enumerate() {
        match &asset.description {
            Some(description) => println!("{}. {} - {}", i + 1, asset.filename, description),
            None => println!("{}. {}", i + 1, asset.filename),
        }
    }

    println!("\nSave each screenshot to: {}", output.display());
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match args.command {
        Commands::Fetch(fetch_args) => {
            let result = fetch_command(fetch_args, |name| std::env::var(name).ok()).await;
            finish_fetch(&result)
        }
        Commands::Guide { output, manifest } => {
            if let Err(e) = run_guide(&output, manifest.as_deref()) {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
    }
}
