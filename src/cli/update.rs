use ghmirror::config::MirrorConfig;
use ghmirror::core::MirrorResult;
use ghmirror::di::ServiceContainer;
use ghmirror::mirror::BatchDriver;

pub async fn run(config: MirrorConfig) -> MirrorResult<()> {
    println!("Updating repositories in {}", config.base_folder.display());

    let services = ServiceContainer::new(&config)?;
    let summary = BatchDriver::new(&services, &config).update_all().await?;
    super::print_summary(&summary);

    Ok(())
}
