//! Tests for the config module

use super::loader::apply_overrides_for_test;
use super::types::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

#[test]
fn test_options_default() {
    let options = Options::default();

    assert!(!options.features.production_mode);
    assert!(options.features.packages_update);
    assert!(options.features.imports_update);
    assert!(!options.features.run_package_install);
    assert!(options.validation.enabled);
    assert!(!options.validation.fail_on_mismatch);
    assert_eq!(options.install.command, "npm");
}

#[test]
fn test_options_parse_toml() {
    let toml = r#"
frontend_dir = "frontend"
build_dir = "build"

[features]
production_mode = true
commercial_banner = true

[scan]
imports = ["@vaadin/button", "./views/main.ts"]
theme = "my-theme"

[scan.packages]
"@vaadin/button" = "24.4.0"

[validation]
fail_on_mismatch = true
"#;

    let options: Options = toml::from_str(toml).unwrap();

    assert_eq!(options.frontend_dir, PathBuf::from("frontend"));
    assert!(options.features.production_mode);
    assert!(options.features.commercial_banner);
    assert!(options.features.packages_update);
    assert_eq!(options.scan.imports.len(), 2);
    assert_eq!(options.scan.theme.as_deref(), Some("my-theme"));
    assert_eq!(options.scan.packages["@vaadin/button"], "24.4.0");
    assert!(options.validation.fail_on_mismatch);
}

#[test]
fn test_directory_accessors_resolve_against_project() {
    let options = Options::for_project("/work/app");

    assert_eq!(
        options.frontend_directory(),
        Path::new("/work/app/src/main/frontend")
    );
    assert_eq!(
        options.generated_directory(),
        Path::new("/work/app/src/main/frontend/generated")
    );
    assert_eq!(
        options.webapp_directory(),
        Path::new("/work/app/target/classes/META-INF/VAADIN/webapp")
    );
    assert_eq!(
        options.prod_bundle_file(),
        Path::new("/work/app/src/main/bundles/prod.bundle")
    );
}

#[test]
fn test_absolute_directories_are_kept() {
    let mut options = Options::for_project("/work/app");
    options.generated_dir = Some(PathBuf::from("/tmp/generated"));

    assert_eq!(options.generated_directory(), Path::new("/tmp/generated"));
}

#[test]
fn test_load_with_warnings_reports_unknown_keys() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("frontgen.toml");
    fs::write(
        &path,
        r#"
[features]
production_mod = true
"#,
    )
    .unwrap();

    let (options, warnings) = Options::load_with_warnings(&path).unwrap();

    assert!(!options.features.production_mode);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].key, "production_mod");
    assert_eq!(warnings[0].line, Some(3));
    assert_eq!(warnings[0].suggestion.as_deref(), Some("production_mode"));
}

#[test]
fn test_load_invalid_toml_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("frontgen.toml");
    fs::write(&path, "[features\nproduction_mode = yes").unwrap();

    let err = Options::load(&path).unwrap_err();
    assert!(err.to_string().contains("invalid configuration"));
}

#[test]
fn test_load_or_default_roots_options_at_project() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("frontgen.toml"),
        "frontend_dir = \"web\"\n",
    )
    .unwrap();

    let (options, warnings) = Options::load_or_default(dir.path()).unwrap();

    assert!(warnings.is_empty());
    assert_eq!(options.project_dir, dir.path());
    assert_eq!(options.frontend_directory(), dir.path().join("web"));
}

#[test]
fn test_load_for_project_uses_explicit_file() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("ci.toml");
    fs::write(&config, "[features]\nproduction_mode = true\n").unwrap();
    let project = dir.path().join("app");

    let (options, _) = Options::load_for_project(&config, &project).unwrap();

    assert!(options.features.production_mode);
    assert_eq!(options.project_dir, project);
}

#[test]
fn test_env_overrides() {
    let options = apply_overrides_for_test(
        Options::default(),
        &[
            ("FRONTGEN_PRODUCTION_MODE", "true"),
            ("FRONTGEN_BUNDLE_BUILD", "1"),
            ("FRONTGEN_RUN_PACKAGE_INSTALL", "false"),
        ],
    );

    assert!(options.features.production_mode);
    assert!(options.features.bundle_build);
    assert!(!options.features.run_package_install);
    assert!(!options.features.commercial_banner);
}
