use archcfg_core::properties::Environment;
use archcfg_core::store::{validate_name, Origin, ProfileStore};
use archcfg_util::errors::ArchError;
use std::fs;
use tempfile::TempDir;

const LOCAL: &str = r#"
is_valid = 1
arch_flags = "-O2"
[compilers]
cc = "clang"
[paths]
charm = "${env:HOME}/charm"
hdf5 = "/opt/hdf5"
"#;

#[test]
fn load_from_directory() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("laptop.toml"), LOCAL).unwrap();
    let store = ProfileStore::new([tmp.path().to_path_buf()]);
    let env = Environment::empty().with_home("/home/bob");

    let profile = store.load("laptop", &env).unwrap();
    assert_eq!(profile.arch_flags, "-O2");
    assert_eq!(profile.dependency_paths.charm.as_deref(), Some("/home/bob/charm"));
    assert_eq!(profile.origin, Origin::File(tmp.path().join("laptop.toml")));
}

#[test]
fn directory_profile_shadows_builtin() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("linux_gnu.toml"), LOCAL).unwrap();
    let store = ProfileStore::new([tmp.path().to_path_buf()]);
    let profile = store
        .load("linux_gnu", &Environment::empty().with_home("/h"))
        .unwrap();
    assert_eq!(profile.arch_flags, "-O2");
    assert!(!profile.origin.is_builtin());
}

#[test]
fn first_directory_wins() {
    let a = TempDir::new().unwrap();
    let b = TempDir::new().unwrap();
    fs::write(a.path().join("p.toml"), "is_valid = 1\narch_flags = \"-A\"").unwrap();
    fs::write(b.path().join("p.toml"), "is_valid = 1\narch_flags = \"-B\"").unwrap();
    let store = ProfileStore::new([a.path().to_path_buf(), b.path().to_path_buf()]);
    assert_eq!(store.load("p", &Environment::empty()).unwrap().arch_flags, "-A");
}

#[test]
fn missing_profile_reports_search_path() {
    let tmp = TempDir::new().unwrap();
    let store = ProfileStore::new([tmp.path().to_path_buf()]);
    let err = store.load("cray_xt5", &Environment::empty()).unwrap_err();
    match err {
        ArchError::ProfileNotFound { name, searched } => {
            assert_eq!(name, "cray_xt5");
            assert!(searched.contains(&tmp.path().display().to_string()));
            assert!(searched.contains("<built-in>"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn builtins_can_be_disabled() {
    let store = ProfileStore::builtin_only().with_builtins(false);
    assert!(matches!(
        store.load("linux_gnu", &Environment::empty()),
        Err(ArchError::ProfileNotFound { .. })
    ));
}

#[test]
fn malformed_profile_is_a_parse_error() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("broken.toml"), "is_valid = [").unwrap();
    let store = ProfileStore::new([tmp.path().to_path_buf()]);
    let err = store.load("broken", &Environment::empty()).unwrap_err();
    assert!(matches!(err, ArchError::Parse { ref profile, .. } if profile == "broken"));
}

#[test]
fn env_file_overrides_injected_environment() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("laptop.toml"), LOCAL).unwrap();
    fs::write(tmp.path().join(".archcfg.env"), "HOME=/scratch\n").unwrap();
    let store = ProfileStore::new([tmp.path().to_path_buf()]);
    let profile = store.load("laptop", &Environment::empty()).unwrap();
    assert_eq!(profile.dependency_paths.charm.as_deref(), Some("/scratch/charm"));
}

#[test]
fn injected_home_beats_env_file() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("laptop.toml"), LOCAL).unwrap();
    fs::write(tmp.path().join(".archcfg.env"), "HOME=/scratch\n").unwrap();
    let store = ProfileStore::new([tmp.path().to_path_buf()]);
    let profile = store
        .load("laptop", &Environment::empty().with_home("/home/flag"))
        .unwrap();
    assert_eq!(profile.dependency_paths.charm.as_deref(), Some("/home/flag/charm"));
}

#[test]
fn unreadable_profile_is_a_read_error() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("bad.toml"), [0xff, 0xfe, 0x00]).unwrap();
    let store = ProfileStore::new([tmp.path().to_path_buf()]);
    let err = store.load("bad", &Environment::empty()).unwrap_err();
    assert!(matches!(err, ArchError::ReadProfile { ref profile, .. } if profile == "bad"));
}

#[test]
fn repeated_loads_are_identical() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("laptop.toml"), LOCAL).unwrap();
    let store = ProfileStore::new([tmp.path().to_path_buf()]);
    let env = Environment::empty().with_home("/h");
    let first = store.load("laptop", &env).unwrap();
    let second = store.load("laptop", &env).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.fingerprint().unwrap(), second.fingerprint().unwrap());
}

#[test]
fn list_merges_directories_and_builtins() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("laptop.toml"), LOCAL).unwrap();
    fs::write(tmp.path().join("linux_gnu.toml"), LOCAL).unwrap();
    fs::write(tmp.path().join("notes.txt"), "not a profile").unwrap();
    let store = ProfileStore::new([tmp.path().to_path_buf()]);

    let entries = store.list().unwrap();
    let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["laptop", "linux_gnu", "mf_gnu_debug", "triton_pgi"]);
    let linux = entries.iter().find(|e| e.name == "linux_gnu").unwrap();
    assert!(!linux.origin.is_builtin());
}

#[test]
fn list_skips_missing_directories() {
    let store = ProfileStore::new([std::path::PathBuf::from("/nonexistent/archcfg/profiles")]);
    assert_eq!(store.list().unwrap().len(), 3);
}

#[test]
fn load_all_keeps_individual_failures() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("broken.toml"), "nope").unwrap();
    let store = ProfileStore::new([tmp.path().to_path_buf()]).with_builtins(false);
    let results = store.load_all(&Environment::empty()).unwrap();
    assert_eq!(results.len(), 1);
    assert!(results[0].1.is_err());
}

#[test]
fn invalid_names_are_rejected() {
    assert!(validate_name("linux_gnu").is_ok());
    assert!(validate_name("ncsa-bw.cray").is_ok());
    assert!(validate_name("../etc/passwd").is_err());
    assert!(validate_name("a/b").is_err());
    assert!(validate_name("").is_err());
    assert!(validate_name(".hidden").is_err());
}
