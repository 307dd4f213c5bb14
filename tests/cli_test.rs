//! Integration tests for the rbdiag binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const MISSING_RUBY: &str = "/nonexistent/rbdiag-test/ruby";

/// A command isolated from the user's config and Ruby.
fn rbdiag(home: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("rbdiag"));
    cmd.env("HOME", home.path())
        .env("RBDIAG_RUBY", MISSING_RUBY)
        .env_remove("RBDIAG_GEM")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    rbdiag(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Diagnostic reports for Ruby installations"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    rbdiag(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn report_path_section() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    rbdiag(&home)
        .args(["report", "path", "--offline"])
        .env("PATH", "/opt/rbdiag-test/bin:/usr/bin:/bin")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "rbdiag v{}",
            env!("CARGO_PKG_VERSION")
        )))
        .stdout(predicate::str::contains(" Path\n"))
        .stdout(predicate::str::contains("/opt/rbdiag-test/bin\n"))
        .stdout(predicate::str::contains(" ENV\n").not());
    Ok(())
}

#[test]
fn report_without_ruby_degrades_to_placeholders() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    rbdiag(&home)
        .args(["report", "libs", "--offline"])
        .assert()
        .success()
        .stdout(predicate::str::contains(" Libraries\n"))
        .stdout(predicate::str::contains("NOT FOUND!"));
    Ok(())
}

#[test]
fn report_sections_from_config_file() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    let config = home.path().join("rbdiag.yml");
    fs::write(&config, "sections: [env]\noffline: true\n")?;

    rbdiag(&home)
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains(" ENV\n"))
        .stdout(predicate::str::contains(" Path\n").not());
    Ok(())
}

#[test]
fn invalid_config_fails() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    let config = home.path().join("rbdiag.yml");
    fs::write(&config, "timeout_secs: [1, 2")?;

    rbdiag(&home)
        .arg("--config")
        .arg(&config)
        .arg("report")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config"));
    Ok(())
}

#[test]
fn gems_lists_inventory() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    let bundled = TempDir::new()?;
    let installed = TempDir::new()?;
    fs::write(bundled.path().join("foo-1.0.gemspec"), "")?;
    fs::write(installed.path().join("foo-2.0.gemspec"), "")?;
    fs::write(installed.path().join("bar-0.1.gemspec"), "")?;

    rbdiag(&home)
        .arg("gems")
        .arg("--spec-dir")
        .arg(format!("bundled={}", bundled.path().display()))
        .arg("--spec-dir")
        .arg(installed.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Bundled Gems"))
        .stdout(predicate::str::contains("Installed Gems"))
        .stdout(predicate::str::is_match(r"B  foo\s+\* 1\.0")?)
        .stdout(predicate::str::is_match(r"I  foo\s+\* 2\.0")?)
        .stdout(predicate::str::is_match(r"I  bar\s+  0\.1")?);
    Ok(())
}

#[test]
fn gem_rejects_unknown_command() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    rbdiag(&home)
        .args(["gem", "instal", "rake"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("instal is not a valid gem command!"));
    Ok(())
}

#[cfg(unix)]
#[test]
fn gem_rewrites_dependency_error() -> Result<(), Box<dyn std::error::Error>> {
    use std::os::unix::fs::PermissionsExt;

    let home = TempDir::new()?;
    let gem = home.path().join("gem");
    fs::write(
        &gem,
        "#!/bin/sh\necho 'ERROR:  While executing gem ... (Gem::DependencyRemovalException)' >&2\nexit 1\n",
    )?;
    fs::set_permissions(&gem, fs::Permissions::from_mode(0o755))?;

    rbdiag(&home)
        .arg("--gem")
        .arg(&gem)
        .args(["gem", "uninstall", "racc"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "ERROR: Gem 'racc' cannot be uninstalled because another gem depends on it.",
        ))
        .stderr(predicate::str::contains("Use the '-I' argument to force uninstall."));
    Ok(())
}

#[test]
fn completions_bash() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    rbdiag(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("rbdiag"));
    Ok(())
}
