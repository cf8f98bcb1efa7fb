use archcfg_core::properties::{interpolate, load_env_file, Environment, InterpolationError};
use std::collections::BTreeMap;
use std::fs;
use tempfile::TempDir;

#[test]
fn interpolate_replaces_known_variable() {
    let env = Environment::empty().with_home("/home/alice");
    assert_eq!(
        interpolate("${env:HOME}/Charm/charm", &env).unwrap(),
        "/home/alice/Charm/charm"
    );
}

#[test]
fn interpolate_multiple_references() {
    let env = Environment::from_pairs([("A", "x"), ("B", "y")]);
    assert_eq!(interpolate("${env:A}-${env:B}-${env:A}", &env).unwrap(), "x-y-x");
}

#[test]
fn interpolate_unset_variable_is_an_error() {
    let env = Environment::empty();
    assert_eq!(
        interpolate("${env:HOME}/sw", &env),
        Err(InterpolationError::Unset("HOME".to_string()))
    );
}

#[test]
fn interpolate_unterminated_reference() {
    let env = Environment::empty().with_home("/h");
    assert_eq!(
        interpolate("${env:HOME/sw", &env),
        Err(InterpolationError::Unterminated)
    );
}

#[test]
fn interpolate_does_not_rescan_substituted_values() {
    let env = Environment::from_pairs([("A", "${env:A}")]);
    assert_eq!(interpolate("${env:A}", &env).unwrap(), "${env:A}");
}

#[test]
fn interpolate_plain_text_unchanged() {
    let env = Environment::empty();
    assert_eq!(interpolate("-Wall -O3", &env).unwrap(), "-Wall -O3");
}

#[test]
fn with_home_overrides_inherited_home() {
    let env = Environment::from_pairs([("HOME", "/old")]).with_home("/new");
    assert_eq!(env.get("HOME"), Some("/new"));
    assert_eq!(env.home().unwrap().to_str(), Some("/new"));
}

#[test]
fn empty_home_is_treated_as_unknown() {
    let env = Environment::from_pairs([("HOME", "")]);
    assert!(env.home().is_none());
}

#[test]
fn overlay_prefers_overrides() {
    let env = Environment::from_pairs([("HOME", "/a"), ("X", "1")]);
    let mut overrides = BTreeMap::new();
    overrides.insert("HOME".to_string(), "/b".to_string());
    let merged = env.overlay(&overrides);
    assert_eq!(merged.get("HOME"), Some("/b"));
    assert_eq!(merged.get("X"), Some("1"));
}

#[test]
fn overlay_keeps_injected_home() {
    let env = Environment::from_pairs([("X", "1")]).with_home("/flag");
    let mut overrides = BTreeMap::new();
    overrides.insert("HOME".to_string(), "/file".to_string());
    overrides.insert("X".to_string(), "2".to_string());
    let merged = env.overlay(&overrides);
    assert_eq!(merged.get("HOME"), Some("/flag"));
    assert_eq!(merged.get("X"), Some("2"));
}

#[test]
fn from_process_sees_utf8_variables() {
    let env = Environment::from_process();
    if let Ok(path) = std::env::var("PATH") {
        assert_eq!(env.get("PATH"), Some(path.as_str()));
    }
}

#[test]
fn load_env_file_parses_entries() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join(".archcfg.env");
    fs::write(
        &path,
        "# comment\n\nHOME=/scratch/me\nexport GRACKLE_ROOT=\"/opt/grackle\"\nQUOTED='a b'\n",
    )
    .unwrap();
    let map = load_env_file(&path).unwrap();
    assert_eq!(map.len(), 3);
    assert_eq!(map["HOME"], "/scratch/me");
    assert_eq!(map["GRACKLE_ROOT"], "/opt/grackle");
    assert_eq!(map["QUOTED"], "a b");
}

#[test]
fn load_env_file_missing_is_empty() {
    let tmp = TempDir::new().unwrap();
    let map = load_env_file(&tmp.path().join(".archcfg.env")).unwrap();
    assert!(map.is_empty());
}
