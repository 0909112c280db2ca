//! Package manifest probe
//!
//! Checks whether a repository has a `Package.swift` by requesting its
//! file-browsing page on the default branch and looking at the status code.
//!
//! Known limitation: the branch is configured, not detected. A repository
//! whose default branch differs (e.g. `main` while probing `master`) is
//! reported as not ready even when it ships a package manifest.

use crate::fetch::Fetch;

/// Branch assumed to hold the package manifest
pub const DEFAULT_BRANCH: &str = "master";

/// Package manifest file name
pub const DEFAULT_MANIFEST_FILE: &str = "Package.swift";

/// Build the URL of the package manifest inside a repository
///
/// Trailing slashes and a trailing `.git` are dropped first:
/// `https://github.com/org/repo.git` -> `https://github.com/org/repo/blob/master/Package.swift`
pub fn manifest_url(repository: &str, branch: &str, manifest_file: &str) -> String {
    let base = repository.trim().trim_end_matches('/');
    let base = base.strip_suffix(".git").unwrap_or(base);
    format!("{}/blob/{}/{}", base, branch, manifest_file)
}

/// Probes repositories for a package manifest
pub struct Prober<'a> {
    fetcher: &'a dyn Fetch,
    branch: String,
    manifest_file: String,
}

impl<'a> Prober<'a> {
    pub fn new(fetcher: &'a dyn Fetch, branch: &str, manifest_file: &str) -> Self {
        Self {
            fetcher,
            branch: branch.to_string(),
            manifest_file: manifest_file.to_string(),
        }
    }

    /// Whether the repository's package manifest answers 200 OK
    pub fn probe(&self, repository: &str) -> bool {
        let url = manifest_url(repository, &self.branch, &self.manifest_file);

        match self.fetcher.get(&url) {
            Ok(response) => {
                tracing::debug!(url = %url, status = response.status, "probed package manifest");
                response.is_ok()
            }
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "package manifest probe failed");
                false
            }
        }
    }
}
