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
fn test_env_mpi_wrappers() {
    let tmp = TempDir::new().unwrap();

    archcfg_cmd(&tmp)
        .args(["env", "triton_pgi", "--variant", "mpi"])
        .assert()
        .success()
        .stdout(predicate::str::contains("export CC='mpicc'"))
        .stdout(predicate::str::contains("export CXX='mpicxx'"))
        .stdout(predicate::str::contains("export LINK_FLAGS='-pgf90libs'"));
}

#[test]
fn test_env_charm_link_flags() {
    let tmp = TempDir::new().unwrap();

    archcfg_cmd(&tmp)
        .args(["--home", "/h", "env", "linux_gnu", "--variant", "charm"])
        .assert()
        .success()
        .stdout(predicate::str::contains("export LINK_FLAGS='-rdynamic'"))
        .stdout(predicate::str::contains("export CHARM_PATH='/h/Charm/charm'"));
}

#[test]
fn test_env_precision() {
    let tmp = TempDir::new().unwrap();

    archcfg_cmd(&tmp)
        .args([
            "env",
            "mf_gnu_debug",
            "--variant",
            "serial",
            "--precision",
            "single",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "export PREC_FLAGS='-fdefault-real-4 -fdefault-double-8'",
        ));
}

#[test]
fn test_env_json() {
    let tmp = TempDir::new().unwrap();

    archcfg_cmd(&tmp)
        .args(["env", "linux_gnu", "--variant", "serial", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"CC\": \"gcc\""));
}

#[test]
fn test_env_requires_variant() {
    let tmp = TempDir::new().unwrap();

    archcfg_cmd(&tmp)
        .args(["env", "linux_gnu"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--variant"));
}

#[test]
fn test_env_file_overrides_home_for_directory_profiles() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("profiles");
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("site.toml"),
        "is_valid = 1\n[paths]\ncharm = \"${env:CHARM_ROOT}/charm\"\nhdf5 = \"/usr\"\n",
    )
    .unwrap();
    fs::write(dir.join(".archcfg.env"), "CHARM_ROOT=/opt/site\n").unwrap();

    archcfg_cmd(&tmp)
        .args(["--profile-dir", "profiles", "env", "site", "--variant", "charm"])
        .assert()
        .success()
        .stdout(predicate::str::contains("export CHARM_PATH='/opt/site/charm'"));
}

#[test]
fn test_home_flag_beats_env_file() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("profiles");
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("site.toml"),
        "is_valid = 1\n[paths]\ncharm = \"${env:HOME}/charm\"\nhdf5 = \"/usr\"\n",
    )
    .unwrap();
    fs::write(dir.join(".archcfg.env"), "HOME=/from/file\n").unwrap();

    archcfg_cmd(&tmp)
        .args(["--profile-dir", "profiles", "--home", "/from/flag"])
        .args(["env", "site", "--variant", "charm"])
        .assert()
        .success()
        .stdout(predicate::str::contains("export CHARM_PATH='/from/flag/charm'"));

    archcfg_cmd(&tmp)
        .args(["--profile-dir", "profiles", "env", "site", "--variant", "charm"])
        .assert()
        .success()
        .stdout(predicate::str::contains("export CHARM_PATH='/from/file/charm'"));
}

#[cfg(unix)]
#[test]
fn test_non_utf8_environment_variable_is_ignored() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let tmp = TempDir::new().unwrap();

    archcfg_cmd(&tmp)
        .env("ARCHCFG_TEST_BYTES", OsStr::from_bytes(b"f\xffo"))
        .args(["--home", "/h", "env", "linux_gnu", "--variant", "serial"])
        .assert()
        .success()
        .stdout(predicate::str::contains("export CHARM_PATH='/h/Charm/charm'"));

    archcfg_cmd(&tmp)
        .env("ARCHCFG_TEST_BYTES", OsStr::from_bytes(b"f\xffo"))
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("linux_gnu"));
}
