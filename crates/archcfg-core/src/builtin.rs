//! Platform profiles compiled into the binary via `include_str!`.

const BUILTIN_PROFILES: &[(&str, &str)] = &[
    ("linux_gnu", include_str!("../profiles/linux_gnu.toml")),
    ("mf_gnu_debug", include_str!("../profiles/mf_gnu_debug.toml")),
    ("triton_pgi", include_str!("../profiles/triton_pgi.toml")),
];

/// Raw TOML of a built-in profile.
pub fn get(name: &str) -> Option<&'static str> {
    BUILTIN_PROFILES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, src)| *src)
}

pub fn names() -> impl Iterator<Item = &'static str> {
    BUILTIN_PROFILES.iter().map(|(n, _)| *n)
}

pub fn contains(name: &str) -> bool {
    get(name).is_some()
}
