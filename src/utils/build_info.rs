//! Compile-time build information, set by `build.rs`.

pub const BUILD_COMMIT: &str = env!("SKYFLAP_BUILD_COMMIT");
pub const BUILD_DATE: &str = env!("SKYFLAP_BUILD_DATE");

/// One-line version string for `--version`.
pub fn version_line() -> String {
    format!(
        "skyflap {} ({} built {})",
        env!("CARGO_PKG_VERSION"),
        BUILD_COMMIT,
        BUILD_DATE
    )
}
