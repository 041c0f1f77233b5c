use dialoguer::Input;
use ghmirror::config::MirrorConfig;
use ghmirror::core::path::ensure_dir;
use ghmirror::core::{MirrorError, MirrorResult};
use ghmirror::di::ServiceContainer;
use ghmirror::mirror::{read_url_list, BatchDriver};
use std::path::PathBuf;

/// Where the repository URLs come from
pub enum UrlSource {
    /// Newline-delimited file
    File(PathBuf),
    /// One URL given on the command line
    Single(String),
    /// Ask on the terminal
    Prompt,
}

pub async fn run(config: MirrorConfig, source: UrlSource) -> MirrorResult<()> {
    let urls = match source {
        UrlSource::File(path) => read_url_list(&path)?,
        UrlSource::Single(url) => vec![url],
        UrlSource::Prompt => vec![prompt_for_url()?],
    };

    ensure_dir(&config.base_folder)?;
    let services = ServiceContainer::new(&config)?;

    let summary = BatchDriver::new(&services, &config).sync_urls(&urls).await;
    super::print_summary(&summary);

    Ok(())
}

fn prompt_for_url() -> MirrorResult<String> {
    let url: String = Input::new()
        .with_prompt("Enter the GitHub repository URL (e.g., 'https://github.com/author/repository')")
        .interact_text()
        .map_err(|e| MirrorError::Prompt(format!("Failed to read repository URL: {}", e)))?;
    Ok(url.trim().to_string())
}
