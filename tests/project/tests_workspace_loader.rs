//! Workspace loading from disk.

use std::fs;
use std::path::Path;

use groovy_lsp::ide::AnalysisHost;
use groovy_lsp::project::{AnalysisConfig, LoadError, WorkspaceLoader, path_to_uri};
use tempfile::TempDir;

use crate::helpers::source_fixtures::CALCULATOR;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[test]
fn test_load_directory_indexes_groovy_files() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "src/Calculator.groovy", CALCULATOR);
    write(dir.path(), "build.gradle", "println 'build'\n");
    write(dir.path(), "README.md", "# readme\n");
    write(dir.path(), "src/.groovy", "class Hidden {}\n");

    let host = AnalysisHost::new();
    let loaded = WorkspaceLoader::new()
        .load_directory_into_host(dir.path(), &host)
        .unwrap();

    assert_eq!(loaded, 2);
    assert_eq!(host.file_count(), 2);
    assert!(host.has_file(&path_to_uri(&dir.path().join("src/Calculator.groovy"))));
    assert!(
        host.analysis()
            .symbol_table()
            .find_by_qualified_name("Calculator.add")
            .is_some()
    );
    assert!(host.analysis().symbol_table().find_by_name("Hidden").is_empty());
}

#[test]
fn test_exclude_patterns_skip_files() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "src/Keep.groovy", "class Keep {}\n");
    write(dir.path(), "build/generated/Skip.groovy", "class Skip {}\n");

    let config = AnalysisConfig::default().with_exclude_patterns(["build/"]);
    let host = AnalysisHost::new();
    let loaded = WorkspaceLoader::with_config(config)
        .load_directory_into_host(dir.path(), &host)
        .unwrap();

    assert_eq!(loaded, 1);
    let analysis = host.analysis();
    assert!(analysis.symbol_table().find_by_qualified_name("Keep").is_some());
    assert!(analysis.symbol_table().find_by_qualified_name("Skip").is_none());
}

#[test]
fn test_syntax_errors_do_not_fail_loading() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "Broken.groovy", "class Broken {\n  int x = )\n  void ok() {}\n}\n");

    let host = AnalysisHost::new();
    let loaded = WorkspaceLoader::new()
        .load_directory_into_host(dir.path(), &host)
        .unwrap();
    assert_eq!(loaded, 1);
    assert!(host.analysis().symbol_table().find_by_qualified_name("Broken.ok").is_some());
}

#[test]
fn test_missing_directory() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope");
    let result = WorkspaceLoader::new().load_directory_into_host(&missing, &AnalysisHost::new());
    assert!(matches!(result, Err(LoadError::DirectoryNotFound(path)) if path == missing));
}

#[test]
fn test_custom_extensions() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "deploy.gsh", "def run() { 1 }\n");
    write(dir.path(), "App.groovy", "class App {}\n");

    let config = AnalysisConfig {
        enabled_extensions: vec![".gsh".to_string()],
        ..AnalysisConfig::default()
    };
    let host = AnalysisHost::new();
    let loaded = WorkspaceLoader::with_config(config)
        .load_directory_into_host(dir.path(), &host)
        .unwrap();

    assert_eq!(loaded, 1);
    assert!(host.has_file(&path_to_uri(&dir.path().join("deploy.gsh"))));
}

#[test]
fn test_uppercase_extension_loads() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "Legacy.GROOVY", "class Legacy {}\n");

    let host = AnalysisHost::new();
    let loaded = WorkspaceLoader::new()
        .load_directory_into_host(dir.path(), &host)
        .unwrap();

    assert_eq!(loaded, 1);
    assert!(host.analysis().symbol_table().find_by_qualified_name("Legacy").is_some());
}
