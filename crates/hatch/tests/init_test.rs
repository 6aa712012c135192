//! Integration tests for `hatch init`

use assert_cmd::assert::OutputAssertExt;
use assert_cmd::cargo_bin;
use hatch_testkit::{temp_dir_in_workspace, with_isolated_env, write_template_dir};
use predicates::prelude::*;
use std::fs;
use std::process::Command;

#[test]
fn test_init_builtin_defaults() {
    with_isolated_env(|| {
        let temp = temp_dir_in_workspace();
        let root = temp.path();

        Command::new(cargo_bin!("hatch"))
            .current_dir(root)
            .arg("init")
            .assert()
            .success()
            .stdout(predicate::str::contains("Created"));

        let project = root.join("sam-app");
        assert!(project.join("template.yaml").is_file());
        assert!(project.join(".gitignore").is_file());
        assert!(!project.join("hatch.toml").exists());

        let tests =
            fs::read_to_string(project.join("hello_world/tests/unit/test_handler.js")).unwrap();
        assert!(tests.contains("describe('Tests index', function () {"));
        assert!(!tests.contains("describe('Tests Handler'"));
    });
}

#[test]
fn test_init_with_name_and_legacy_runtime() {
    with_isolated_env(|| {
        let temp = temp_dir_in_workspace();
        let root = temp.path();

        Command::new(cargo_bin!("hatch"))
            .current_dir(root)
            .args(["init", "--name", "orders-api", "--runtime", "nodejs4.3"])
            .assert()
            .success();

        let project = root.join("orders-api");
        let index = fs::read_to_string(project.join("hello_world/index.js")).unwrap();
        assert!(index.contains("callback(null, response);"));

        let tests =
            fs::read_to_string(project.join("hello_world/tests/unit/test_handler.js")).unwrap();
        assert!(tests.contains("describe('Tests Handler', function () {"));
        assert!(!tests.contains("async"));

        let package = fs::read_to_string(project.join("hello_world/package.json")).unwrap();
        assert!(package.contains("hello world sample for nodejs4.3"));
    });
}

#[test]
fn test_init_output_directory() {
    with_isolated_env(|| {
        let temp = temp_dir_in_workspace();
        let output = temp.path().join("nested/out");

        Command::new(cargo_bin!("hatch"))
            .arg("init")
            .arg("--output")
            .arg(&output)
            .assert()
            .success();

        assert!(output.join("sam-app/hello_world/index.js").is_file());
    });
}

#[test]
fn test_init_rejects_unknown_runtime() {
    with_isolated_env(|| {
        let temp = temp_dir_in_workspace();

        Command::new(cargo_bin!("hatch"))
            .current_dir(temp.path())
            .args(["init", "--runtime", "python3.6"])
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("INVALID_CHOICE"))
            .stderr(predicate::str::contains("python3.6"));

        assert!(!temp.path().join("sam-app").exists());
    });
}

#[test]
fn test_init_rejects_unknown_variable() {
    with_isolated_env(|| {
        let temp = temp_dir_in_workspace();

        Command::new(cargo_bin!("hatch"))
            .current_dir(temp.path())
            .args(["init", "--var", "colour=blue"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("UNKNOWN_VARIABLE"));
    });
}

#[test]
fn test_init_rejects_invalid_name() {
    with_isolated_env(|| {
        let temp = temp_dir_in_workspace();

        Command::new(cargo_bin!("hatch"))
            .current_dir(temp.path())
            .args(["init", "--name", "../escape"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Project name"));

        Command::new(cargo_bin!("hatch"))
            .current_dir(temp.path())
            .args(["init", "--var", "project_name=a/b"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("single directory name"));
    });
}

#[test]
fn test_init_refuses_existing_project() {
    with_isolated_env(|| {
        let temp = temp_dir_in_workspace();
        let root = temp.path();
        fs::create_dir(root.join("sam-app")).unwrap();
        fs::write(root.join("sam-app/notes.txt"), "keep me").unwrap();

        Command::new(cargo_bin!("hatch"))
            .current_dir(root)
            .arg("init")
            .assert()
            .failure()
            .stderr(predicate::str::contains("OUTPUT_EXISTS"));
        assert!(root.join("sam-app/notes.txt").exists());

        Command::new(cargo_bin!("hatch"))
            .current_dir(root)
            .args(["init", "--overwrite"])
            .assert()
            .success();
        assert!(!root.join("sam-app/notes.txt").exists());
        assert!(root.join("sam-app/template.yaml").exists());
    });
}

#[test]
fn test_init_json_report() {
    with_isolated_env(|| {
        let temp = temp_dir_in_workspace();

        let output = Command::new(cargo_bin!("hatch"))
            .current_dir(temp.path())
            .args(["init", "--json", "--name", "report-app"])
            .output()
            .unwrap();
        assert!(output.status.success());

        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(json["roots"][0], "report-app");
        assert_eq!(json["written"].as_array().unwrap().len(), 6);
        assert!(json["skipped"].as_array().unwrap().is_empty());
    });
}

#[test]
fn test_init_directory_template_with_skip_errors() {
    with_isolated_env(|| {
        let temp = temp_dir_in_workspace();
        let template_dir = temp.path().join("my-template");
        write_template_dir(
            &template_dir,
            "[template]\nname = \"mine\"\n\n[variables.project_name]\ndefault = \"svc\"\n",
            &[
                ("{{cookiecutter.project_name}}/main.txt", "{{ cookiecutter.project_name }}"),
                ("{{cookiecutter.project_name}}/bad.txt", "{% if %}"),
            ],
        );
        let out = temp.path().join("out");

        Command::new(cargo_bin!("hatch"))
            .arg("init")
            .arg("--template")
            .arg(&template_dir)
            .arg("--output")
            .arg(&out)
            .assert()
            .failure()
            .stderr(predicate::str::contains("TEMPLATE_RENDER_FAILED"));
        assert!(!out.exists());

        Command::new(cargo_bin!("hatch"))
            .arg("init")
            .arg("--template")
            .arg(&template_dir)
            .arg("--output")
            .arg(&out)
            .arg("--skip-errors")
            .assert()
            .success()
            .stdout(predicate::str::contains("Skipped"));

        assert_eq!(fs::read_to_string(out.join("svc/main.txt")).unwrap(), "svc");
        assert!(!out.join("svc/bad.txt").exists());
    });
}

#[test]
fn test_init_template_from_env() {
    with_isolated_env(|| {
        let temp = temp_dir_in_workspace();
        let template_dir = temp.path().join("env-template");
        write_template_dir(
            &template_dir,
            "[template]\nname = \"from-env\"\n",
            &[("hello.txt", "hi")],
        );
        let out = temp.path().join("out");

        Command::new(cargo_bin!("hatch"))
            .env("HATCH_TEMPLATE", &template_dir)
            .arg("init")
            .arg("--output")
            .arg(&out)
            .assert()
            .success();

        assert_eq!(fs::read_to_string(out.join("hello.txt")).unwrap(), "hi");
    });
}

#[test]
fn test_init_unknown_template() {
    with_isolated_env(|| {
        let temp = temp_dir_in_workspace();

        Command::new(cargo_bin!("hatch"))
            .current_dir(temp.path())
            .args(["init", "--template", "rust-hello"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("TEMPLATE_NOT_FOUND"));
    });
}
