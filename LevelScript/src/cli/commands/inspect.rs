//! CLI commands for inspecting levels and assets without writing scripts

use std::path::Path;

use crate::config::PipelineConfig;
use crate::dialogue::read_asset_dialogues;
use crate::level::LevelPipeline;

fn level_pipeline(extension: &str) -> LevelPipeline {
    LevelPipeline::new(PipelineConfig {
        asset_extension: extension.to_string(),
        ..PipelineConfig::default()
    })
}

/// List level folders that `generate` would process
pub fn levels(config: &PipelineConfig) -> anyhow::Result<()> {
    let pipeline = LevelPipeline::new(config.clone());
    let folders = pipeline.level_folders()?;

    if folders.is_empty() {
        println!("No level folders found in: {}", config.levels_dir.display());
    } else {
        println!("Found {} level folders:", folders.len());
        for folder in &folders {
            let display = folder
                .strip_prefix(&config.levels_dir)
                .unwrap_or(folder.as_path())
                .display();
            println!("  {display}");
        }
    }

    if !config.excluded_levels.is_empty() {
        let excluded: Vec<_> = config.excluded_levels.iter().map(String::as_str).collect();
        println!("Excluded: {}", excluded.join(", "));
    }

    Ok(())
}

/// Print a level's candidate assets in processing order
pub fn order(level: &Path, extension: &str) -> anyhow::Result<()> {
    let assets = level_pipeline(extension).candidate_assets(level)?;

    if assets.is_empty() {
        println!("No candidate assets in: {}", level.display());
        return Ok(());
    }

    println!("Processing order for {}:", level.display());
    for (i, name) in assets.iter().enumerate() {
        println!("  {:>3}. {name}", i + 1);
    }

    Ok(())
}

/// Print the dialogue ids of one asset
pub fn extract(asset: &Path) -> anyhow::Result<()> {
    let dialogues = read_asset_dialogues(asset)?;

    if dialogues.is_empty() {
        println!("No dialogue fields in: {}", asset.display());
        return Ok(());
    }

    for id in &dialogues {
        println!("{id}");
    }

    Ok(())
}

/// Print the script a level folder would produce
pub fn preview(level: &Path, extension: &str) -> anyhow::Result<()> {
    let script = level_pipeline(extension).build_level(level)?;

    for source in &script.sources {
        eprintln!("{}: {} dialogue(s)", source.file_name, source.dialogue_count);
    }
    for skipped in &script.skipped {
        eprintln!("Skipped {}: {}", skipped.path.display(), skipped.reason);
    }

    print!("{}", script.render());
    Ok(())
}
