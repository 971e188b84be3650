//! End-to-end tests for the `esrun` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn esrun(project: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("esrun").unwrap();
    cmd.current_dir(project.path())
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_lists_subcommands() {
    Command::cargo_bin("esrun")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("build"))
        .stdout(predicate::str::contains("serve"));
}

#[test]
fn unknown_preset_is_rejected() {
    let project = TempDir::new().unwrap();
    esrun(&project)
        .args(["build", "--preset", "svelte"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("svelte"));
}

#[test]
fn electron_build_without_entries_fails_before_esbuild_runs() {
    let project = TempDir::new().unwrap();
    esrun(&project)
        .env("ESBUILD_BINARY_PATH", "/nonexistent/esbuild")
        .args(["build", "--preset", "electron"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "must be called with an override config containing the following fields: entryPoints",
        ));
}

#[test]
fn electron_serve_without_entries_fails_before_esbuild_runs() {
    let project = TempDir::new().unwrap();
    esrun(&project)
        .env("ESBUILD_BINARY_PATH", "/nonexistent/esbuild")
        .args(["serve", "--preset", "electron"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("entryPoints"));
}

#[test]
fn missing_config_file_is_reported() {
    let project = TempDir::new().unwrap();
    esrun(&project)
        .env("ESBUILD_BINARY_PATH", "/nonexistent/esbuild")
        .args(["build", "-p", "electron", "--config", "missing.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.json"));
}

#[cfg(unix)]
mod with_fake_esbuild {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::PathBuf;

    fn fake_esbuild(project: &TempDir, body: &str) -> PathBuf {
        let path = project.path().join("fake-esbuild");
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[test]
    fn electron_build_passes_merged_options() {
        let project = TempDir::new().unwrap();
        let binary = fake_esbuild(&project, r#"echo "$@" > args.txt"#);

        esrun(&project)
            .env("ESBUILD_BINARY_PATH", &binary)
            .args(["build", "-p", "electron", "src/main.ts", "--outdir", "out"])
            .assert()
            .success()
            .stderr(predicate::str::contains("Build completed in"));

        let args = fs::read_to_string(project.path().join("args.txt")).unwrap();
        assert!(args.starts_with("src/main.ts"));
        assert!(args.contains("--outdir=out"));
        assert!(args.contains("--platform=node"));
        assert!(args.contains("--external:electron"));
    }

    #[test]
    fn config_file_supplies_entries() {
        let project = TempDir::new().unwrap();
        let binary = fake_esbuild(&project, r#"echo "$@" > args.txt"#);
        fs::write(
            project.path().join("esrun.config.json"),
            r#"{ "entryPoints": ["src/preload.ts"] }"#,
        )
        .unwrap();

        esrun(&project)
            .env("ESBUILD_BINARY_PATH", &binary)
            .args(["build", "-p", "electron"])
            .assert()
            .success();

        let args = fs::read_to_string(project.path().join("args.txt")).unwrap();
        assert!(args.starts_with("src/preload.ts"));
    }

    #[test]
    fn esbuild_failure_is_reported() {
        let project = TempDir::new().unwrap();
        let binary = fake_esbuild(&project, r#"echo "✘ [ERROR] Could not resolve \"x\"" >&2; exit 1"#);

        esrun(&project)
            .env("ESBUILD_BINARY_PATH", &binary)
            .args(["build", "-p", "electron", "src/main.ts"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Could not resolve"));
    }
}
