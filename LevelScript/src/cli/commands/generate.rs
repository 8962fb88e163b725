//! CLI command for script generation

use std::time::Instant;

use crate::cli::progress::{DOCUMENT, GEAR, LOOKING_GLASS, print_done, print_step, simple_bar};
use crate::config::PipelineConfig;
use crate::level::{LevelPipeline, ScriptPhase};

/// Generate scripts for every level folder
pub fn execute(config: PipelineConfig, show_progress: bool) -> anyhow::Result<()> {
    let start = Instant::now();
    let pipeline = LevelPipeline::new(config);
    let writer = pipeline.directory_writer();

    print_step(
        1,
        3,
        LOOKING_GLASS,
        &format!("Reading levels from {}", pipeline.config().levels_dir.display()),
    );
    print_step(2, 3, GEAR, "Extracting dialogues...");

    let pb = show_progress.then(|| simple_bar(0, ScriptPhase::Discovering.as_str()));
    let result = pipeline.run_with_progress(&writer, &|progress| {
        let Some(pb) = &pb else {
            return;
        };
        match progress.phase {
            ScriptPhase::Generating => {
                pb.set_length(progress.total as u64);
                pb.set_position(progress.current as u64);
                if let Some(ref name) = progress.current_file {
                    pb.set_message(format!("{}: {name}", progress.phase.as_str()));
                }
            }
            ScriptPhase::Discovering | ScriptPhase::Complete => {
                pb.set_message(progress.phase.as_str());
            }
        }
    });
    if let Some(pb) = &pb {
        pb.finish_and_clear();
    }
    let result = result?;

    print_step(
        3,
        3,
        DOCUMENT,
        &format!("Wrote scripts to {}", writer.output_dir().display()),
    );
    for msg in result.results.iter().filter(|m| m.starts_with("Generated")) {
        println!("  {msg}");
    }

    println!();
    println!("Generation complete:");
    println!("  Success: {}", result.success_count);
    println!("  Failed: {}", result.fail_count);
    println!("  Skipped assets: {}", result.skipped_asset_count());

    if result.fail_count > 0 {
        println!();
        println!("Failures:");
        for msg in result.results.iter().filter(|m| m.starts_with("Failed")) {
            println!("  {msg}");
        }
    }

    print_done(start.elapsed());
    Ok(())
}
