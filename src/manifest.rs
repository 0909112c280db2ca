//! Manifest parsing for CocoaPods and Carthage
//!
//! Handles:
//! - Podfile declarations: `pod 'Name'` / `pod "Name", '~> 1.0'`
//! - Cartfile declarations: `github "org/repo"`
//! - Discovery of the default manifests in a project directory
//!
//! Which patterns apply is decided per file from its name, so a single line
//! never yields more than one library:
//! - `Podfile`, `*.podfile`: pod pattern only
//! - `Cartfile`, `Cartfile.private`, `Cartfile.resolved`: cart pattern only
//! - anything else: pod pattern first, then cart pattern

mod discover;

pub use discover::{DEFAULT_MANIFESTS, discover};

use crate::library::Library;
use regex::Regex;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;

/// `pod 'Name'`
///
/// A subspec declaration (`pod 'Firebase/Analytics'`) yields its base name
/// `Firebase`, the name the index lists, instead of being skipped as a
/// strict `<name>` match would do.
static POD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*pod\s+["']([A-Za-z0-9_.+-]+)(?:/[^"']*)?["']"#)
        .expect("POD_PATTERN must compile")
});

/// `github "org/repo"`
static CART_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*github\s+["']([A-Za-z0-9_.-]+/[A-Za-z0-9_.-]+)["']"#)
        .expect("CART_PATTERN must compile")
});

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Failed to open manifest at {path}, make sure the file exists")]
    NotFound { path: PathBuf },

    #[error("Failed to read manifest {path}: {source}")]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Declaration syntax a manifest is parsed with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flavor {
    Podfile,
    Cartfile,
    /// Unrecognized file name: try both patterns, pod first
    Mixed,
}

impl Flavor {
    pub fn from_path(path: &Path) -> Self {
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            return Flavor::Mixed;
        };

        if file_name == "Podfile" || file_name.ends_with(".podfile") {
            Flavor::Podfile
        } else if file_name.starts_with("Cartfile") {
            Flavor::Cartfile
        } else {
            Flavor::Mixed
        }
    }
}

/// Parse the libraries declared in a manifest file
///
/// `github_url` is the hosting base that Carthage `github` shorthands expand to.
pub fn parse(path: &Path, github_url: &str) -> Result<Vec<Library>, ManifestError> {
    let content = fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => ManifestError::NotFound {
            path: path.to_path_buf(),
        },
        _ => ManifestError::Unreadable {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let flavor = Flavor::from_path(path);
    let libraries = parse_content(&content, flavor, github_url);
    tracing::debug!(
        path = %path.display(),
        ?flavor,
        count = libraries.len(),
        "parsed manifest"
    );
    Ok(libraries)
}

/// Parse manifest content line by line, keeping order and duplicates
pub fn parse_content(content: &str, flavor: Flavor, github_url: &str) -> Vec<Library> {
    content
        .lines()
        .filter_map(|line| parse_line(line, flavor, github_url))
        .collect()
}

/// Parse a single manifest line
pub fn parse_line(line: &str, flavor: Flavor, github_url: &str) -> Option<Library> {
    let pod = || find_pod_name(line).map(Library::pod);
    let cart = || {
        find_cart_repo(line).map(|repo| Library::cart(repo, github_repo_url(github_url, repo)))
    };

    match flavor {
        Flavor::Podfile => pod(),
        Flavor::Cartfile => cart(),
        Flavor::Mixed => pod().or_else(cart),
    }
}

/// Extract the pod name from a `pod '<name>'` declaration
pub fn find_pod_name(line: &str) -> Option<&str> {
    POD_PATTERN
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Extract `org/repo` from a `github "<org/repo>"` declaration
pub fn find_cart_repo(line: &str) -> Option<&str> {
    CART_PATTERN
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Expand an `org/repo` shorthand against the hosting base URL
pub fn github_repo_url(github_url: &str, repo: &str) -> String {
    format!("{}/{}", github_url.trim_end_matches('/'), repo)
}
