//! Stamps `skyflap --version` with the commit and build date.
//!
//! `SKYFLAP_BUILD_COMMIT` and `SKYFLAP_BUILD_DATE` override the values, so
//! release builds outside a git checkout still carry them.

use std::env;
use std::process::Command;

const COMMIT_VAR: &str = "SKYFLAP_BUILD_COMMIT";
const DATE_VAR: &str = "SKYFLAP_BUILD_DATE";

/// Run git and return its trimmed stdout, or None when git is missing,
/// fails, or prints nothing.
fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8(output.stdout).ok()?;
    Some(text.trim().to_string()).filter(|s| !s.is_empty())
}

fn commit() -> String {
    if let Ok(commit) = env::var(COMMIT_VAR) {
        return commit;
    }
    match git(&["rev-parse", "--short=7", "HEAD"]) {
        Some(hash) if git(&["status", "--porcelain"]).is_some() => format!("{}-dirty", hash),
        Some(hash) => hash,
        None => "unknown".to_string(),
    }
}

fn main() {
    let date =
        env::var(DATE_VAR).unwrap_or_else(|_| chrono::Utc::now().format("%Y-%m-%d").to_string());

    println!("cargo:rustc-env={}={}", COMMIT_VAR, commit());
    println!("cargo:rustc-env={}={}", DATE_VAR, date);
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/index");
    println!("cargo:rerun-if-env-changed={}", COMMIT_VAR);
    println!("cargo:rerun-if-env-changed={}", DATE_VAR);
}
