//! envguard CLI integration tests
//!
//! ## Exit Codes
//! - 0: check/probes succeeded
//! - 2: envguard itself failed (configuration, unreadable probes)
//! - 3: startup blocked (default `block.exit_code`)
//! - otherwise: the gated program's own status

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::Value as JsonValue;
use tempfile::TempDir;

const EMULATOR_PROBES: &str = r#"{
  "userAgent": "Mozilla/5.0 (Linux; Android 14; sdk_gphone64_x86_64) AppleWebKit/537.36 Mobile Safari/537.36",
  "platform": "Linux x86_64",
  "screenWidth": 1080,
  "screenHeight": 1920,
  "devicePixelRatio": 2.625,
  "hardwareConcurrency": 4,
  "touchSupported": true,
  "maxTouchPoints": 1,
  "gpuRenderer": "Android Emulator (google) (llvmpipe)",
  "gpuVendor": "Mesa"
}"#;

const DESKTOP_PROBES: &str = r#"{
  "userAgent": "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_0) AppleWebKit/605.1.15 Safari/605.1.15",
  "platform": "MacIntel",
  "screenWidth": 1920,
  "screenHeight": 1080,
  "devicePixelRatio": 1,
  "hardwareConcurrency": 8,
  "deviceMemory": 16,
  "touchSupported": false,
  "maxTouchPoints": 0,
  "gpuRenderer": "Apple M2",
  "gpuVendor": "Apple"
}"#;

/// Create an envguard command isolated from the caller's config files
fn envguard_command(home: &Path) -> Result<assert_cmd::Command> {
    let mut cmd = assert_cmd::Command::cargo_bin("envguard")?;
    cmd.current_dir(home)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("RUST_LOG")
        .env_remove("ENVGUARD_LOCALE")
        .env_remove("ENVGUARD_BLOCK__HOLD")
        .env_remove("ENVGUARD_BLOCK__EXIT_CODE");
    Ok(cmd)
}

fn write_probes(dir: &Path, name: &str, json: &str) -> std::io::Result<PathBuf> {
    let path = dir.join(name);
    fs::write(&path, json)?;
    Ok(path)
}

// =============================================================================
// check / probes
// =============================================================================

#[test]
fn check_json_flags_the_emulator() -> Result<()> {
    let home = TempDir::new()?;
    let probes = write_probes(home.path(), "emulator.json", EMULATOR_PROBES)?;

    let output = envguard_command(home.path())?
        .args(["--locale", "en", "check", "--json", "--probes"])
        .arg(&probes)
        .output()?;
    assert!(output.status.success());

    let verdict: JsonValue = serde_json::from_slice(&output.stdout)?;
    assert_eq!(verdict["score"], 62);
    assert_eq!(verdict["isEmulator"], true);
    assert_eq!(verdict["reasons"][0], "Suspicious User-Agent keyword: sdk");
    assert_eq!(verdict["groups"].as_array().map(Vec::len), Some(6));
    Ok(())
}

#[test]
fn check_report_uses_the_configured_russian_locale() -> Result<()> {
    let home = TempDir::new()?;
    let probes = write_probes(home.path(), "desktop.json", DESKTOP_PROBES)?;
    fs::write(home.path().join("envguard.toml"), "locale = \"ru\"\n")?;

    envguard_command(home.path())?
        .args(["check", "--probes"])
        .arg(&probes)
        .assert()
        .success()
        .stdout(predicate::str::contains("score:   0/100"))
        .stdout(predicate::str::contains("verdict: physical"))
        .stdout(predicate::str::contains(
            "Не обнаружено явных признаков эмулятора",
        ));
    Ok(())
}

#[test]
fn probes_prints_the_bundle_with_browser_keys() -> Result<()> {
    let home = TempDir::new()?;
    let probes = write_probes(home.path(), "desktop.json", DESKTOP_PROBES)?;

    let output = envguard_command(home.path())?
        .args(["probes", "--probes"])
        .arg(&probes)
        .output()?;
    assert!(output.status.success());

    let bundle: JsonValue = serde_json::from_slice(&output.stdout)?;
    assert_eq!(bundle["platform"], "MacIntel");
    assert_eq!(bundle["deviceMemory"], 16.0);
    assert_eq!(bundle["gpuRenderer"], "Apple M2");
    Ok(())
}

// =============================================================================
// gate
// =============================================================================

#[cfg(unix)]
#[test]
fn gate_blocks_without_starting_the_program() -> Result<()> {
    let home = TempDir::new()?;
    let probes = write_probes(home.path(), "emulator.json", EMULATOR_PROBES)?;
    let marker = home.path().join("started");

    envguard_command(home.path())?
        .args(["--locale", "en", "gate", "--probes"])
        .arg(&probes)
        .arg("--")
        .arg("touch")
        .arg(&marker)
        .assert()
        .code(3)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Access blocked"))
        .stderr(predicate::str::contains("62").not());

    assert!(!marker.exists());
    Ok(())
}

#[cfg(unix)]
#[test]
fn gate_exit_code_comes_from_the_environment() -> Result<()> {
    let home = TempDir::new()?;
    let probes = write_probes(home.path(), "emulator.json", EMULATOR_PROBES)?;

    envguard_command(home.path())?
        .env("ENVGUARD_BLOCK__EXIT_CODE", "42")
        .args(["gate", "--probes"])
        .arg(&probes)
        .args(["--", "true"])
        .assert()
        .code(42);
    Ok(())
}

#[cfg(unix)]
#[test]
fn gate_runs_the_program_when_admitted() -> Result<()> {
    let home = TempDir::new()?;
    let probes = write_probes(home.path(), "desktop.json", DESKTOP_PROBES)?;

    envguard_command(home.path())?
        .args(["gate", "--probes"])
        .arg(&probes)
        .args(["--", "sh", "-c", "echo admitted; exit 7"])
        .assert()
        .code(7)
        .stdout("admitted\n");
    Ok(())
}

// =============================================================================
// failures
// =============================================================================

#[test]
fn invalid_config_exits_2() -> Result<()> {
    let home = TempDir::new()?;
    let config = home.path().join("bad.toml");
    fs::write(&config, "[block]\nexit_code = 0\n")?;

    envguard_command(home.path())?
        .arg("--config")
        .arg(&config)
        .args(["check"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("exit_code"));
    Ok(())
}

#[test]
fn unreadable_probes_exit_2() -> Result<()> {
    let home = TempDir::new()?;

    envguard_command(home.path())?
        .args(["check", "--probes"])
        .arg(home.path().join("missing.json"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("failed to load probes"));
    Ok(())
}
