use esprober::utils::validation::Validate;
use esprober::{Catalog, ProberConfig, ProberError, Workspace};
use std::fs;
use tempfile::TempDir;

fn config_with_workspace(root: std::path::PathBuf) -> ProberConfig {
    ProberConfig::from_lookup(move |key| match key {
        "ESPROBER_WORKSPACE" => Some(root.to_string_lossy().to_string()),
        _ => None,
    })
}

#[test]
fn test_ensure_then_ensure_is_a_no_op() {
    let temp = TempDir::new().unwrap();
    let config = config_with_workspace(temp.path().join("ws"));
    let workspace = Workspace::from_config(&config);

    let first = workspace.ensure().unwrap();
    fs::write(&first.csv_file, "timestamp,name,duration\nt,a,0.1\n").unwrap();

    // 第二次 ensure 不得動到既有內容
    let second = workspace.ensure().unwrap();
    assert_eq!(first.csv_file, second.csv_file);
    assert_eq!(
        fs::read_to_string(&second.csv_file).unwrap(),
        "timestamp,name,duration\nt,a,0.1\n"
    );
}

#[test]
fn test_clean_leaves_nothing_behind() {
    let temp = TempDir::new().unwrap();
    let config = config_with_workspace(temp.path().join("ws"));
    let workspace = Workspace::from_config(&config);

    let paths = workspace.ensure().unwrap();
    fs::write(paths.csv_file, "data").unwrap();
    fs::create_dir_all(paths.root.join("nested")).unwrap();

    workspace.clean().unwrap();
    assert!(!temp.path().join("ws").exists());
}

#[test]
fn test_clean_without_workspace_succeeds() {
    let temp = TempDir::new().unwrap();
    let config = config_with_workspace(temp.path().join("ws"));
    let workspace = Workspace::from_config(&config);

    assert!(!workspace.exists());
    assert!(workspace.clean().is_ok());
}

#[test]
fn test_clean_then_ensure_round_trip() {
    let temp = TempDir::new().unwrap();
    let config = config_with_workspace(temp.path().join("ws"));
    let workspace = Workspace::from_config(&config);

    workspace.ensure().unwrap();
    workspace.clean().unwrap();
    let paths = workspace.ensure().unwrap();

    assert!(workspace.exists());
    assert!(!paths.csv_file.exists());
}

#[test]
fn test_invalid_configuration_fails_deterministically_and_informatively() {
    let mut config = ProberConfig::from_lookup(|_| None);
    config.api_url = "not-a-url".to_string();

    let err = config.validate().unwrap_err();
    match &err {
        ProberError::InvalidConfigValueError { field, .. } => assert_eq!(field, "api_url"),
        other => panic!("unexpected error: {other}"),
    }
    assert!(!err.recovery_suggestion().is_empty());
}

#[test]
fn test_missing_catalog_file_is_informative() {
    let temp = TempDir::new().unwrap();
    let err = Catalog::load(&temp.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ProberError::IoError(_)));
    assert!(!err.recovery_suggestion().is_empty());
}
