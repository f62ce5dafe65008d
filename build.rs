//! Build script for slfit
//!
//! Embeds a persistent build counter, the build timestamp, and the cargo
//! profile so `slfit_status` can tell which binary is serving.

use std::env;
use std::fs;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-changed=src");
    println!("cargo:rerun-if-changed=build.rs");

    let counter = counter_path();
    let build = read_counter(&counter) + 1;
    if let Err(e) = fs::write(&counter, build.to_string()) {
        // counter stays at its old value; the build itself is fine
        println!("cargo:warning=could not persist build counter at {}: {}", counter.display(), e);
    }

    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();
    let profile = env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string());

    println!("cargo:rustc-env=SLFIT_BUILD_NUMBER={}", build);
    println!("cargo:rustc-env=SLFIT_BUILD_TIMESTAMP={}", timestamp);
    println!("cargo:rustc-env=SLFIT_BUILD_PROFILE={}", profile);
}

/// Counter lives next to Cargo.toml so it survives `cargo clean`
fn counter_path() -> PathBuf {
    let root = env::var_os("CARGO_MANIFEST_DIR").map(PathBuf::from).unwrap_or_default();
    root.join("build_number.txt")
}

fn read_counter(path: &PathBuf) -> u64 {
    fs::read_to_string(path)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0)
}
