use levelscript::prelude::*;
use pretty_assertions::assert_eq;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::tempdir;

const HEADER: &str = "%YAML 1.1\n%TAG !u! tag:unity3d.com,2011:\n--- !u!114 &11400000\n";

fn write_asset(dir: &Path, name: &str, body: &str) {
    std::fs::create_dir_all(dir).unwrap();
    std::fs::write(dir.join(name), format!("{HEADER}{body}")).unwrap();
}

fn config_for(root: &Path) -> PipelineConfig {
    PipelineConfig {
        levels_dir: root.join("Levels"),
        output_dir: root.join("Scripts"),
        ..PipelineConfig::default()
    }
}

/// A level with every kind of asset, written out of processing order.
fn build_case_level(levels: &Path) {
    let case = levels.join("Case01");
    write_asset(&case, "Proof10.asset", "MonoBehaviour:\n  proofDialogue: P10\n");
    write_asset(&case, "Topic10.asset", "MonoBehaviour:\n  topicDialogue: T10\n");
    write_asset(
        &case,
        "Topic2.asset",
        "MonoBehaviour:\n  topicDialogue: T2\n  branches:\n  - answerDialogue: [T2_A, T2_B]\n",
    );
    write_asset(&case, "Proof2.asset", "MonoBehaviour:\n  proofDialogue: P2\n");
    write_asset(
        &case,
        "level.asset",
        "MonoBehaviour:\n  m_Name: level\n  openingDialogue: Opening\n",
    );
    // Not candidates: wrong keyword case, wrong extension, unrelated name.
    write_asset(&case, "topic3.asset", "MonoBehaviour:\n  topicDialogue: NOPE\n");
    write_asset(&case, "Topic4.asset.meta", "guid: 123\n");
    write_asset(&case, "Characters.asset", "MonoBehaviour:\n  nameDialogue: NOPE\n");
}

fn labels(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(|l| l.strip_prefix("@<| label '"))
        .filter_map(|l| l.strip_suffix("' |>"))
        .map(str::to_string)
        .collect()
}

#[test]
fn test_end_to_end_order() {
    let dir = tempdir().unwrap();
    build_case_level(&dir.path().join("Levels"));

    let result = LevelPipeline::new(config_for(dir.path())).run().unwrap();
    assert_eq!(result.success_count, 1);
    assert_eq!(result.fail_count, 0);

    let text = std::fs::read_to_string(dir.path().join("Scripts/Case01_Script.txt")).unwrap();
    assert_eq!(
        labels(&text),
        ["Opening", "T2", "T2_A", "T2_B", "T10", "P2", "P10"]
    );
    assert!(!text.contains("NOPE"));
}

#[test]
fn test_script_block_format() {
    let dir = tempdir().unwrap();
    let levels = dir.path().join("Levels");
    write_asset(&levels.join("Solo"), "level.asset", "MonoBehaviour:\n  introDialogue: Line1\n");

    LevelPipeline::new(config_for(dir.path())).run().unwrap();

    let text = std::fs::read_to_string(dir.path().join("Scripts/Solo_Script.txt")).unwrap();
    assert_eq!(
        text,
        "@<| label 'Line1' |>\n这里放对话\n\n<| __Nova.deductionManager:DialogueFinished('Line1') |>\n@<| is_end() |>\n"
    );
}

#[test]
fn test_empty_level_writes_empty_file() {
    let dir = tempdir().unwrap();
    let levels = dir.path().join("Levels");
    std::fs::create_dir_all(levels.join("Empty")).unwrap();
    write_asset(&levels.join("NoCandidates"), "Notes.asset", "MonoBehaviour:\n  aDialogue: x\n");

    let result = LevelPipeline::new(config_for(dir.path())).run().unwrap();
    assert_eq!(result.success_count, 2);

    for level in ["Empty", "NoCandidates"] {
        let path = dir.path().join("Scripts").join(format!("{level}_Script.txt"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "");
    }
}

#[test]
fn test_excluded_levels_are_skipped() {
    let dir = tempdir().unwrap();
    let levels = dir.path().join("Levels");
    write_asset(&levels.join("TestLevel"), "level.asset", "MonoBehaviour:\n  aDialogue: x\n");
    write_asset(&levels.join("Sandbox"), "level.asset", "MonoBehaviour:\n  aDialogue: y\n");
    write_asset(&levels.join("Case02"), "level.asset", "MonoBehaviour:\n  aDialogue: z\n");
    std::fs::write(levels.join("readme.asset"), "not a level").unwrap();

    let mut config = config_for(dir.path());
    config.excluded_levels.insert("Sandbox".to_string());
    let pipeline = LevelPipeline::new(config);

    let folders = pipeline.level_folders().unwrap();
    assert_eq!(folders, vec![levels.join("Case02")]);

    pipeline.run().unwrap();
    assert!(dir.path().join("Scripts/Case02_Script.txt").is_file());
    assert!(!dir.path().join("Scripts/TestLevel_Script.txt").exists());
    assert!(!dir.path().join("Scripts/Sandbox_Script.txt").exists());
}

#[test]
fn test_parse_error_skips_asset() {
    let dir = tempdir().unwrap();
    let levels = dir.path().join("Levels");
    write_asset(&levels.join("Broken"), "level.asset", "MonoBehaviour:\n  aDialogue: Kept\n");
    write_asset(&levels.join("Broken"), "Topic1.asset", "MonoBehaviour:\n  bad: [unclosed\n");
    write_asset(&levels.join("Fine"), "level.asset", "MonoBehaviour:\n  aDialogue: Fine\n");

    let pipeline = LevelPipeline::new(config_for(dir.path()));
    let script = pipeline.build_level(&levels.join("Broken")).unwrap();
    assert_eq!(script.dialogues, ["Kept"]);
    assert_eq!(script.skipped.len(), 1);
    assert!(script.skipped[0].path.ends_with("Topic1.asset"));

    let result = pipeline.run().unwrap();
    assert_eq!(result.success_count, 2);
    assert_eq!(result.skipped_asset_count(), 1);
}

#[test]
fn test_parse_error_aborts_level() {
    let dir = tempdir().unwrap();
    let levels = dir.path().join("Levels");
    write_asset(&levels.join("Broken"), "level.asset", "MonoBehaviour:\n  aDialogue: Kept\n");
    write_asset(&levels.join("Broken"), "Topic1.asset", "MonoBehaviour:\n  bad: [unclosed\n");
    write_asset(&levels.join("Fine"), "level.asset", "MonoBehaviour:\n  aDialogue: Fine\n");

    let mut config = config_for(dir.path());
    config.on_parse_error = ParseErrorPolicy::AbortLevel;
    let pipeline = LevelPipeline::new(config);

    let err = pipeline.build_level(&levels.join("Broken")).unwrap_err();
    assert!(matches!(err, Error::AssetParse { .. }));

    // The other level is still generated.
    let result = pipeline.run().unwrap();
    assert_eq!(result.success_count, 1);
    assert_eq!(result.fail_count, 1);
    assert!(result.results.iter().any(|m| m.starts_with("Failed Broken")));
    assert!(!dir.path().join("Scripts/Broken_Script.txt").exists());
    assert!(dir.path().join("Scripts/Fine_Script.txt").is_file());
}

#[test]
fn test_missing_level_directory() {
    let dir = tempdir().unwrap();
    let pipeline = LevelPipeline::new(config_for(dir.path()));
    let err = pipeline.run().unwrap_err();
    assert!(matches!(err, Error::MissingDirectory { .. }));
}

#[test]
fn test_rerun_is_byte_identical() {
    let dir = tempdir().unwrap();
    build_case_level(&dir.path().join("Levels"));
    let pipeline = LevelPipeline::new(config_for(dir.path()));
    let output = dir.path().join("Scripts/Case01_Script.txt");

    pipeline.run().unwrap();
    let first = std::fs::read(&output).unwrap();
    pipeline.run().unwrap();
    let second = std::fs::read(&output).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_existing_script_is_replaced() {
    let dir = tempdir().unwrap();
    let levels = dir.path().join("Levels");
    std::fs::create_dir_all(levels.join("Case03")).unwrap();
    std::fs::create_dir_all(dir.path().join("Scripts")).unwrap();
    std::fs::write(dir.path().join("Scripts/Case03_Script.txt"), "hand-written").unwrap();

    LevelPipeline::new(config_for(dir.path())).run().unwrap();
    assert_eq!(
        std::fs::read_to_string(dir.path().join("Scripts/Case03_Script.txt")).unwrap(),
        ""
    );
}

/// Collects scripts in memory instead of writing files.
#[derive(Default)]
struct MemoryWriter {
    scripts: Mutex<Vec<(String, String)>>,
}

impl ScriptWriter for MemoryWriter {
    fn write_script(&self, script: &LevelScript) -> Result<PathBuf> {
        self.scripts
            .lock()
            .unwrap()
            .push((script.name(), script.render()));
        Ok(PathBuf::from(script.file_name()))
    }
}

#[test]
fn test_custom_writer_and_progress() {
    let dir = tempdir().unwrap();
    let levels = dir.path().join("Levels");
    for level in ["B", "A", "C"] {
        write_asset(&levels.join(level), "level.asset", &format!("root:\n  aDialogue: {level}\n"));
    }

    let writer = MemoryWriter::default();
    let phases = Mutex::new(Vec::new());
    let pipeline = LevelPipeline::new(config_for(dir.path()));
    let result = pipeline
        .run_with_progress(&writer, &|p| phases.lock().unwrap().push(p.phase))
        .unwrap();

    let names: BTreeSet<String> = writer
        .scripts
        .lock()
        .unwrap()
        .iter()
        .map(|(name, _)| name.clone())
        .collect();
    assert_eq!(
        names,
        BTreeSet::from(["A_Script".to_string(), "B_Script".to_string(), "C_Script".to_string()])
    );

    let outcome_levels: Vec<&str> = result.outcomes.iter().map(|o| o.level.as_str()).collect();
    assert_eq!(outcome_levels, ["A", "B", "C"]);
    assert!(!dir.path().join("Scripts").exists());

    let phases = phases.into_inner().unwrap();
    assert_eq!(phases.first(), Some(&ScriptPhase::Discovering));
    assert_eq!(phases.last(), Some(&ScriptPhase::Complete));
    assert_eq!(
        phases.iter().filter(|p| **p == ScriptPhase::Generating).count(),
        3
    );
}

/// Refuses to write one level's script.
struct FailingWriter {
    inner: MemoryWriter,
    failing_level: &'static str,
}

impl ScriptWriter for FailingWriter {
    fn write_script(&self, script: &LevelScript) -> Result<PathBuf> {
        if script.level == self.failing_level {
            return Err(Error::ScriptWrite {
                path: PathBuf::from(script.file_name()),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            });
        }
        self.inner.write_script(script)
    }
}

#[test]
fn test_write_failure_does_not_stop_other_levels() {
    let dir = tempdir().unwrap();
    let levels = dir.path().join("Levels");
    for level in ["A", "B", "C"] {
        write_asset(&levels.join(level), "level.asset", &format!("root:\n  aDialogue: {level}\n"));
    }

    let writer = FailingWriter {
        inner: MemoryWriter::default(),
        failing_level: "B",
    };
    let result = LevelPipeline::new(config_for(dir.path()))
        .run_with_progress(&writer, &|_| {})
        .unwrap();

    assert_eq!(result.success_count, 2);
    assert_eq!(result.fail_count, 1);
    assert!(result.results.iter().any(|m| m.starts_with("Failed B")));

    let names: Vec<String> = writer
        .inner
        .scripts
        .lock()
        .unwrap()
        .iter()
        .map(|(name, _)| name.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    assert_eq!(names, ["A_Script", "C_Script"]);
}

#[test]
fn test_multi_object_asset() {
    let dir = tempdir().unwrap();
    let levels = dir.path().join("Levels");
    write_asset(
        &levels.join("Case04"),
        "level.asset",
        "MonoBehaviour:\n  aDialogue: One\n--- !u!114 &2\nMonoBehaviour:\n  aDialogue: Two\n",
    );

    let result = LevelPipeline::new(config_for(dir.path())).run().unwrap();
    assert_eq!(result.skipped_asset_count(), 0);

    let text = std::fs::read_to_string(dir.path().join("Scripts/Case04_Script.txt")).unwrap();
    assert_eq!(labels(&text), ["One", "Two"]);
}

#[cfg(unix)]
#[test]
fn test_dangling_level_link_is_skipped() {
    use std::os::unix::fs::symlink;

    let dir = tempdir().unwrap();
    let levels = dir.path().join("Levels");
    write_asset(&levels.join("Case01"), "level.asset", "MonoBehaviour:\n  aDialogue: Kept\n");
    symlink(dir.path().join("missing"), levels.join("Stale")).unwrap();

    let result = LevelPipeline::new(config_for(dir.path())).run().unwrap();
    assert_eq!(result.success_count, 1);
    assert_eq!(result.fail_count, 0);
    assert!(dir.path().join("Scripts/Case01_Script.txt").is_file());
}

#[cfg(unix)]
#[test]
fn test_dangling_asset_link_follows_policy() {
    use std::os::unix::fs::symlink;

    let dir = tempdir().unwrap();
    let levels = dir.path().join("Levels");
    write_asset(&levels.join("Case02"), "level.asset", "MonoBehaviour:\n  aDialogue: Kept\n");
    symlink(dir.path().join("missing.asset"), levels.join("Case02/Topic1.asset")).unwrap();

    let pipeline = LevelPipeline::new(config_for(dir.path()));
    let script = pipeline.build_level(&levels.join("Case02")).unwrap();
    assert_eq!(script.dialogues, ["Kept"]);
    assert_eq!(script.skipped.len(), 1);
    assert!(script.skipped[0].path.ends_with("Topic1.asset"));

    let mut config = config_for(dir.path());
    config.on_parse_error = ParseErrorPolicy::AbortLevel;
    let err = LevelPipeline::new(config)
        .build_level(&levels.join("Case02"))
        .unwrap_err();
    assert!(matches!(err, Error::AssetRead { .. }));
}
