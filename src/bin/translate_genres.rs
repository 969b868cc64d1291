use anime_data_tools::{config::Config, dataset, genres, logging};
use anyhow::{Context, Result};

fn main() -> Result<()> {
    logging::init();
    let config = Config::default();
    let path = &config.data_path;

    let mut records = dataset::load(path)
        .with_context(|| format!("Failed to load {}", path.display()))?;
    log::info!("Loaded {} records from {}", records.len(), path.display());

    let stats = genres::translate_records(&mut records);
    log::info!(
        "Translated {} genres across {} records, replaced {} ongoing markers",
        stats.genres_translated, stats.records, stats.sentinels_replaced
    );

    dataset::save(path, &records, &config)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("Translation completed.");
    Ok(())
}
