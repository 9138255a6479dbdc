//! Self-bootstrap (`--dev`) behavior tests

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const SETUP_TEMPLATE: &str = "\
from setuptools import setup

setup(
    name='project_name',
    py_modules=['project_name'],
)
";

/// Template checkout fixture; dev mode never stages, so no git index needed
fn scaffold_template(root: &Path) {
    fs::write(root.join("yourproject.py"), "\"\"\"Placeholder module.\"\"\"\n").unwrap();
    fs::create_dir(root.join("submodule")).unwrap();
    fs::write(root.join("submodule").join("__init__.py"), "").unwrap();
    fs::write(root.join("setup.py.template"), SETUP_TEMPLATE).unwrap();
    fs::write(root.join(".gitignore"), "setup.py\n.venv/\n").unwrap();
}

fn write_pipenv_stub(dir: &Path) -> PathBuf {
    let bin = dir.join("stub-bin");
    fs::create_dir(&bin).unwrap();
    let stub = bin.join("pipenv");
    fs::write(&stub, "#!/bin/sh\nexit 1\n").unwrap();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&stub, fs::Permissions::from_mode(0o755)).unwrap();
    }
    bin
}

fn sprig_dev(template: &Path, stub_bin: &Path) -> Command {
    let mut paths = vec![stub_bin.to_path_buf()];
    paths.extend(std::env::split_paths(
        &std::env::var_os("PATH").unwrap_or_default(),
    ));

    let mut cmd = Command::cargo_bin("sprig").unwrap();
    cmd.current_dir(template)
        .arg("--dev")
        .env_remove("VIRTUAL_ENV")
        .env_remove("RUST_LOG")
        .env("PATH", std::env::join_paths(paths).unwrap());
    cmd
}

#[test]
fn test_dev_renders_manifest_with_placeholder_name() {
    let template = TempDir::new().unwrap();
    let stub_home = TempDir::new().unwrap();
    scaffold_template(template.path());
    let stub = write_pipenv_stub(stub_home.path());

    sprig_dev(template.path(), &stub).assert().success();

    let manifest = fs::read_to_string(template.path().join("setup.py")).unwrap();
    assert!(manifest.contains("name='yourproject'"));
    assert!(!manifest.contains("project_name"));

    // the checkout itself survives: template file, ignore list, placeholders
    assert!(template.path().join("setup.py.template").is_file());
    let ignores = fs::read_to_string(template.path().join(".gitignore")).unwrap();
    assert_eq!(ignores, "setup.py\n.venv/\n");
    assert!(template.path().join("yourproject.py").is_file());
    assert!(template.path().join("submodule").is_dir());
    // and no repository is initialized over it
    assert!(!template.path().join(".git").exists());
}

#[test]
fn test_dev_mode_is_repeatable() {
    let template = TempDir::new().unwrap();
    let stub_home = TempDir::new().unwrap();
    scaffold_template(template.path());
    let stub = write_pipenv_stub(stub_home.path());

    sprig_dev(template.path(), &stub).assert().success();
    sprig_dev(template.path(), &stub).assert().success();

    let manifest = fs::read_to_string(template.path().join("setup.py")).unwrap();
    assert!(manifest.contains("name='yourproject'"));
    assert!(template.path().join("setup.py.template").is_file());
}

#[test]
fn test_dev_ignores_project_argument() {
    let template = TempDir::new().unwrap();
    let stub_home = TempDir::new().unwrap();
    scaffold_template(template.path());
    let stub = write_pipenv_stub(stub_home.path());

    sprig_dev(template.path(), &stub)
        .arg("demo")
        .assert()
        .success();

    assert!(!template.path().join("demo").exists());
    assert!(template.path().join("setup.py").is_file());
}

#[test]
fn test_dev_without_manifest_template_exits_two() {
    let template = TempDir::new().unwrap();
    let stub_home = TempDir::new().unwrap();
    let stub = write_pipenv_stub(stub_home.path());

    sprig_dev(template.path(), &stub)
        .assert()
        .failure()
        .code(2) // template integrity error
        .stdout(predicate::str::contains("Template error"));
}
