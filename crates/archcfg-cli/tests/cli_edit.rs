use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[allow(deprecated)]
fn archcfg_cmd(tmp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("archcfg").unwrap();
    cmd.current_dir(tmp.path())
        .env("HOME", tmp.path())
        .env_remove("ARCHCFG_PATH")
        .env_remove("ARCHCFG_PROFILE")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_new_blank_profile() {
    let tmp = TempDir::new().unwrap();

    archcfg_cmd(&tmp)
        .args(["--profile-dir", "profiles", "new", "laptop"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Created"));

    let content = fs::read_to_string(tmp.path().join("profiles").join("laptop.toml")).unwrap();
    assert!(content.contains("Build profile `laptop`"));
    assert!(content.contains("is_valid = 0"));
}

#[test]
fn test_new_without_directory_fails() {
    let tmp = TempDir::new().unwrap();

    archcfg_cmd(&tmp)
        .args(["new", "laptop"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No profile directory configured"));
}

#[test]
fn test_new_from_set_and_show() {
    let tmp = TempDir::new().unwrap();

    archcfg_cmd(&tmp)
        .args(["--profile-dir", "p", "new", "cluster", "--from", "triton_pgi"])
        .assert()
        .success();

    archcfg_cmd(&tmp)
        .args(["--profile-dir", "p", "set", "cluster", "paths.hdf5", "/site/hdf5"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Updated"));

    archcfg_cmd(&tmp)
        .args(["--profile-dir", "p", "set", "cluster", "paths.papi", "--unset"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Removed"));

    archcfg_cmd(&tmp)
        .args(["--profile-dir", "p", "show", "cluster"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/site/hdf5"))
        .stdout(predicate::str::contains("papi").not());
}

#[test]
fn test_set_builtin_refused() {
    let tmp = TempDir::new().unwrap();

    archcfg_cmd(&tmp)
        .args(["set", "linux_gnu", "arch_flags", "-O2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("built-in"));
}

#[test]
fn test_set_value_and_unset_conflict() {
    let tmp = TempDir::new().unwrap();

    archcfg_cmd(&tmp)
        .args(["set", "linux_gnu", "paths.png", "/usr", "--unset"])
        .assert()
        .failure();
}

#[test]
fn test_doctor_reports_missing_compiler() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("ghost.toml"),
        r#"
is_valid = 1
[compilers]
cc = "no-such-compiler-archcfg"
[paths]
hdf5 = "/no/such/hdf5"
"#,
    )
    .unwrap();

    archcfg_cmd(&tmp)
        .args(["--profile-dir", ".", "doctor", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing"))
        .stderr(predicate::str::contains("not usable"));
}
