use anime_data_tools::{citations, config::Config, dataset, logging};
use anyhow::{Context, Result};

fn main() -> Result<()> {
    logging::init();
    let config = Config::default();
    let path = &config.data_path;

    let mut records = dataset::load(path)
        .with_context(|| format!("Failed to load {}", path.display()))?;
    log::info!("Loaded {} records from {}", records.len(), path.display());

    let stats = citations::clean_records(&mut records);
    log::info!(
        "Cleaned {} fields across {} records, dropped {} empty genres",
        stats.fields_changed, stats.records, stats.genres_dropped
    );

    dataset::save(path, &records, &config)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    log::info!("Saved {}", path.display());

    Ok(())
}
