use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Version string from a repo-root `VERSION` file, if it looks like one.
fn version_file(repo_root: &Path) -> Option<(String, PathBuf)> {
    let path = repo_root.join("VERSION");
    let content = fs::read_to_string(&path).ok()?;
    let version = content.trim();
    starts_with_digit(version).then(|| (version.to_string(), path))
}

/// Root package version from `.release-please-manifest.json` (`{ ".": "0.1.0" }`).
fn release_manifest(repo_root: &Path) -> Option<(String, PathBuf)> {
    const KEY: &str = r#"".": ""#;
    let path = repo_root.join(".release-please-manifest.json");
    let content = fs::read_to_string(&path).ok()?;
    let start = content.find(KEY)? + KEY.len();
    let end = content[start..].find('"')? + start;
    let version = content[start..end].trim();
    starts_with_digit(version).then(|| (version.to_string(), path))
}

fn starts_with_digit(version: &str) -> bool {
    version.chars().next().is_some_and(|c| c.is_ascii_digit())
}

fn main() {
    let cargo_version = env::var("CARGO_PKG_VERSION").unwrap_or_else(|_| "0.0.0".to_string());

    let repo_root = env::var("CARGO_MANIFEST_DIR")
        .ok()
        .map(PathBuf::from)
        .and_then(|dir| dir.parent().and_then(Path::parent).map(Path::to_path_buf));

    let found = repo_root
        .as_deref()
        .and_then(|root| version_file(root).or_else(|| release_manifest(root)));

    let version = match found {
        Some((version, source)) => {
            println!("cargo:rerun-if-changed={}", source.display());
            if version != cargo_version {
                println!(
                    "cargo:warning=Using version {version} from {} (Cargo.toml has {cargo_version})",
                    source.display()
                );
            }
            version
        }
        None => cargo_version,
    };

    println!("cargo:rustc-env=EDGECTL_VERSION={version}");
}
