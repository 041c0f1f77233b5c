use clap::Parser;
use ghmirror::config::ConfigOverrides;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;

#[derive(Parser)]
#[command(name = "ghmirror")]
#[command(about = "Mirror GitHub repositories, wikis and release assets to local disk")]
#[command(version)]
struct Cli {
    /// Read repository URLs from the URL list file
    #[arg(long, conflicts_with_all = ["url", "update"])]
    use_text_file: bool,

    /// Mirror a single repository URL without prompting
    #[arg(long, conflicts_with = "update")]
    url: Option<String>,

    /// Update existing repositories and download new releases
    #[arg(short, long)]
    update: bool,

    /// Root folder holding one workspace per repository
    #[arg(long)]
    base_folder: Option<PathBuf>,

    /// GitHub token for authentication
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    github_token: Option<String>,

    /// Number of latest releases to fetch
    #[arg(long)]
    releases: Option<u32>,

    /// Number of latest prereleases to fetch
    #[arg(long)]
    prereleases: Option<u32>,

    /// Path to the text file with URLs
    #[arg(long)]
    urls_file: Option<PathBuf>,

    /// GitHub API base URL
    #[arg(long)]
    api_url: Option<String>,

    /// Alternate config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Do not draw download progress bars
    #[arg(long)]
    no_progress: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ghmirror=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();

    let overrides = ConfigOverrides {
        base_folder: args.base_folder,
        github_token: args.github_token,
        releases: args.releases,
        prereleases: args.prereleases,
        urls_file: args.urls_file,
        api_url: args.api_url,
        no_progress: args.no_progress,
    };

    let result = match cli::load_config(args.config.as_deref(), overrides) {
        Ok(config) => {
            if args.update {
                cli::update::run(config).await
            } else if args.use_text_file {
                let urls_file = config.urls_file.clone();
                cli::download::run(config, cli::download::UrlSource::File(urls_file)).await
            } else if let Some(url) = args.url {
                cli::download::run(config, cli::download::UrlSource::Single(url)).await
            } else {
                cli::download::run(config, cli::download::UrlSource::Prompt).await
            }
        }
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\nError: {}", e);
            ExitCode::FAILURE
        }
    }
}
