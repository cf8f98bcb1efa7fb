use archcfg_util::process::{probe_version, CommandBuilder};

#[cfg(unix)]
#[test]
fn test_builder_multiple_args() {
    let output = CommandBuilder::new("echo")
        .args(["-O3", "-g"])
        .exec()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "-O3 -g");
}

#[cfg(unix)]
#[test]
fn test_builder_with_env() {
    let output = CommandBuilder::new("sh")
        .arg("-c")
        .arg("echo $ARCHCFG_TEST_VAR")
        .env("ARCHCFG_TEST_VAR", "mpicc")
        .exec()
        .unwrap();
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "mpicc");
}

#[test]
fn test_builder_nonexistent_program() {
    let result = CommandBuilder::new("nonexistent_compiler_xyz_123").exec();
    assert!(result.is_err());
}

#[test]
fn test_probe_version_missing_program() {
    assert_eq!(probe_version("nonexistent_compiler_xyz_123"), None);
}

#[test]
fn test_probe_version_empty_command() {
    assert_eq!(probe_version("   "), None);
}

#[cfg(unix)]
#[test]
fn test_probe_version_reads_first_line() {
    // `echo --version` prints "--version" on most systems.
    let line = probe_version("echo").unwrap();
    assert!(!line.is_empty());
}
