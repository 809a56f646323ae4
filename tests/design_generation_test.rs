use anyhow::Result;
use glm_design::config::GeneratorConfig;
use glm_design::{DesignError, DesignGenerator, LocalStorage, Markers};
use std::fs;
use tempfile::TempDir;

const SUBJECTS: &str = "A001\nA002\nB001\nB002\n";

fn generator_in(temp_dir: &TempDir, config: GeneratorConfig) -> DesignGenerator<LocalStorage, GeneratorConfig> {
    DesignGenerator::new(LocalStorage::new(temp_dir.path()), config)
}

fn read(temp_dir: &TempDir, name: &str) -> String {
    fs::read_to_string(temp_dir.path().join(name)).unwrap()
}

#[test]
fn test_end_to_end_generates_all_design_files() -> Result<()> {
    let temp_dir = TempDir::new()?;
    fs::write(temp_dir.path().join("subs_excl325"), SUBJECTS)?;

    let report = generator_in(&temp_dir, GeneratorConfig::default()).run()?;
    assert_eq!(report.subjects, 4);
    assert_eq!(report.files().count(), 7);

    assert_eq!(
        read(&temp_dir, "LLSS.mat"),
        "/NumWaves 2\n/NumPoints 4\n\n/Matrix \n1 0\n1 0\n0 1\n0 1\n"
    );
    assert_eq!(
        read(&temp_dir, "LLSS.con"),
        "/NumWaves 2\n/NumContrasts 2\n\n/Matrix \n1 -1\n-1 1\n"
    );
    assert_eq!(
        read(&temp_dir, "CANoCA.mat"),
        "/NumWaves 2\n/NumPoints 4\n\n/Matrix \n1 0\n0 1\n1 0\n0 1\n"
    );
    assert_eq!(
        read(&temp_dir, "CANoCA.con"),
        "/NumWaves 2\n/NumContrasts 2\n\n/Matrix \n1 -1\n-1 1\n"
    );
    assert_eq!(
        read(&temp_dir, "Anova_AlleleCA.mat"),
        "/NumWaves 4\n/NumPoints 4\n\n/Matrix \n1 0 0 0\n0 1 0 0\n0 0 1 0\n0 0 0 1\n"
    );
    assert_eq!(
        read(&temp_dir, "Anova_AlleleCA.con"),
        "/NumWaves 4\n/NumContrasts 4\n\n/Matrix \n1 1 -1 -1\n1 -1 1 -1\n1 -1 -1 1\n-1 1 1 -1\n"
    );
    assert_eq!(
        read(&temp_dir, "Anova_AlleleCA.fts"),
        "/NumWaves 4\n/NumContrasts 3\n\n/Matrix \n1 0 0 0\n0 1 0 0\n0 0 1 0\n"
    );

    assert!(!temp_dir.path().join("LLSS.fts").exists());
    assert!(!temp_dir.path().join("CANoCA.fts").exists());
    Ok(())
}

#[test]
fn test_rerun_produces_identical_bytes() -> Result<()> {
    let temp_dir = TempDir::new()?;
    fs::write(temp_dir.path().join("subs_excl325"), "A001\nB002\nAB01\nC\n\nB11\n")?;
    let generator = generator_in(&temp_dir, GeneratorConfig::default());

    let first = generator.run()?;
    let snapshot: Vec<Vec<u8>> = first
        .files()
        .map(|f| fs::read(temp_dir.path().join(f)))
        .collect::<std::io::Result<_>>()?;

    let second = generator.run()?;
    let rerun: Vec<Vec<u8>> = second
        .files()
        .map(|f| fs::read(temp_dir.path().join(f)))
        .collect::<std::io::Result<_>>()?;

    assert_eq!(snapshot, rerun);
    Ok(())
}

#[test]
fn test_outputs_go_to_configured_directory() -> Result<()> {
    let temp_dir = TempDir::new()?;
    fs::create_dir(temp_dir.path().join("lists"))?;
    fs::write(temp_dir.path().join("lists/subs"), SUBJECTS)?;

    let config = GeneratorConfig {
        subjects_file: "lists/subs".to_string(),
        output_dir: "glm".to_string(),
        indicator_table: Some("glm/indicators.csv".to_string()),
        ..GeneratorConfig::default()
    };
    generator_in(&temp_dir, config).run()?;

    assert!(temp_dir.path().join("glm/LLSS.mat").exists());
    assert!(temp_dir.path().join("glm/Anova_AlleleCA.fts").exists());
    assert!(!temp_dir.path().join("LLSS.mat").exists());

    let table = read(&temp_dir, "glm/indicators.csv");
    assert_eq!(table.lines().count(), 5);
    assert!(table.starts_with("subject,LL,SS,CA,NoCA,LLCA,LLNoCA,SSCA,SSNoCA\n"));
    Ok(())
}

#[test]
fn test_custom_markers_change_group_membership() -> Result<()> {
    let temp_dir = TempDir::new()?;
    fs::write(temp_dir.path().join("subs_excl325"), "sub-LL01-ca\nsub-SS02-noca\n")?;

    let config = GeneratorConfig {
        markers: Markers {
            factor_a: "LL".to_string(),
            factor_b: "SS".to_string(),
            condition_x_suffix: "-ca".to_string(),
            condition_y_suffix: "-noca".to_string(),
        },
        ..GeneratorConfig::default()
    };
    generator_in(&temp_dir, config).run()?;

    assert_eq!(
        read(&temp_dir, "Anova_AlleleCA.mat"),
        "/NumWaves 4\n/NumPoints 2\n\n/Matrix \n1 0 0 0\n0 0 0 1\n"
    );
    Ok(())
}

#[test]
fn test_empty_subject_list_writes_headers_only() -> Result<()> {
    let temp_dir = TempDir::new()?;
    fs::write(temp_dir.path().join("subs_excl325"), "")?;

    let report = generator_in(&temp_dir, GeneratorConfig::default()).run()?;
    assert_eq!(report.subjects, 0);
    assert_eq!(
        read(&temp_dir, "LLSS.mat"),
        "/NumWaves 2\n/NumPoints 0\n\n/Matrix \n"
    );
    Ok(())
}

#[test]
fn test_missing_subject_list_is_fatal() {
    let temp_dir = TempDir::new().unwrap();

    let result = generator_in(&temp_dir, GeneratorConfig::default()).run();
    assert!(matches!(result, Err(DesignError::ReadError { .. })));
    assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
}

#[test]
fn test_dry_run_writes_nothing() -> Result<()> {
    let temp_dir = TempDir::new()?;
    fs::write(temp_dir.path().join("subs_excl325"), SUBJECTS)?;

    let report = generator_in(&temp_dir, GeneratorConfig::default()).plan()?;
    assert!(report.dry_run);
    assert_eq!(report.designs.len(), 3);
    assert_eq!(fs::read_dir(temp_dir.path())?.count(), 1);

    let json = serde_json::to_value(&report)?;
    assert_eq!(json["designs"][2]["label"], "Anova_AlleleCA");
    assert_eq!(json["designs"][2]["scheme"], "two_by_two");
    Ok(())
}

#[test]
fn test_output_dir_that_is_a_file_is_fatal() -> Result<()> {
    let temp_dir = TempDir::new()?;
    fs::write(temp_dir.path().join("subs_excl325"), SUBJECTS)?;
    fs::write(temp_dir.path().join("blocker"), "not a directory")?;

    let config = GeneratorConfig {
        output_dir: "blocker".to_string(),
        ..GeneratorConfig::default()
    };
    let result = generator_in(&temp_dir, config).run();

    match result {
        Err(DesignError::WriteError { path, .. }) => assert!(path.contains("blocker")),
        other => panic!("expected WriteError, got {:?}", other),
    }
    assert_eq!(fs::read_to_string(temp_dir.path().join("blocker"))?, "not a directory");
    Ok(())
}

#[test]
fn test_failed_write_keeps_earlier_files() -> Result<()> {
    let temp_dir = TempDir::new()?;
    fs::write(temp_dir.path().join("subs_excl325"), SUBJECTS)?;
    // A directory where the contrast file should go makes that write fail.
    fs::create_dir(temp_dir.path().join("LLSS.con"))?;

    let result = generator_in(&temp_dir, GeneratorConfig::default()).run();

    match result {
        Err(DesignError::WriteError { path, .. }) => assert!(path.ends_with("LLSS.con")),
        other => panic!("expected WriteError, got {:?}", other),
    }
    assert_eq!(
        read(&temp_dir, "LLSS.mat"),
        "/NumWaves 2\n/NumPoints 4\n\n/Matrix \n1 0\n1 0\n0 1\n0 1\n"
    );
    assert!(!temp_dir.path().join("CANoCA.mat").exists());
    Ok(())
}

#[test]
fn test_non_utf8_subject_list_reports_full_path() -> Result<()> {
    let temp_dir = TempDir::new()?;
    fs::write(temp_dir.path().join("subs_excl325"), b"A\xff\xfe\n")?;

    let result = generator_in(&temp_dir, GeneratorConfig::default()).run();

    let expected = temp_dir.path().join("subs_excl325").display().to_string();
    match result {
        Err(DesignError::ReadError { path, .. }) => assert_eq!(path, expected),
        other => panic!("expected ReadError, got {:?}", other),
    }
    Ok(())
}
