//! Stamps `tally --version` with the source revision.
//!
//! `TALLY_BUILD_SHA` in the build environment wins (release tarballs have no
//! `.git`); otherwise `git describe` is asked, and a tree with neither
//! reports `unknown`.

use std::process::Command;

const OVERRIDE: &str = "TALLY_BUILD_SHA";

fn git_describe(repo_root: &str) -> Option<String> {
    let out = Command::new("git")
        .args(["-C", repo_root, "describe", "--always", "--dirty", "--abbrev=8"])
        .output()
        .ok()?;
    if !out.status.success() {
        return None;
    }
    let rev = String::from_utf8_lossy(&out.stdout).trim().to_string();
    (!rev.is_empty()).then_some(rev)
}

fn main() {
    println!("cargo:rerun-if-env-changed={OVERRIDE}");

    let revision = match std::env::var(OVERRIDE) {
        Ok(rev) if !rev.trim().is_empty() => rev.trim().to_string(),
        _ => {
            let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".into());
            git_describe(&format!("{manifest_dir}/..")).unwrap_or_else(|| "unknown".into())
        }
    };

    println!("cargo:rustc-env={OVERRIDE}={revision}");
}
