//! CocoaPods index integration
//!
//! Fetches a pod's detail page and scrapes the repository link out of it.
//!
//! Page URL: https://cocoapods.org/pods/{name}
//!
//! The page has no API contract; the link we want currently looks like
//! `<a href="https://github.com/Alamofire/Alamofire">GitHub Repo</a>`.

use super::{Resolve, ResolveError};
use crate::fetch::Fetch;
use regex::Regex;
use std::sync::LazyLock;

/// Default package index
pub const DEFAULT_INDEX_URL: &str = "https://cocoapods.org";

/// `href` of the anchor whose text is "GitHub Repo"
static REPO_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"href\s*=\s*["'](https?://[^"'\s<>]+)["'][^>]*>\s*GitHub Repo\s*</a>"#)
        .expect("REPO_LINK must compile")
});

/// Resolves repositories by scraping the package index website
pub struct IndexResolver<'a> {
    fetcher: &'a dyn Fetch,
    base_url: String,
}

impl<'a> IndexResolver<'a> {
    pub fn new(fetcher: &'a dyn Fetch, base_url: &str) -> Self {
        Self {
            fetcher,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Detail page URL for a pod
    pub fn page_url(&self, package: &str) -> String {
        format!("{}/pods/{}", self.base_url, package)
    }
}

impl Resolve for IndexResolver<'_> {
    fn resolve(&self, package: &str) -> Result<String, ResolveError> {
        let url = self.page_url(package);

        let response = self
            .fetcher
            .get(&url)
            .map_err(|source| ResolveError::Fetch {
                package: package.to_string(),
                source,
            })?;

        let Some(page) = response.text() else {
            return Err(ResolveError::EmptyPage {
                package: package.to_string(),
                status: response.status,
            });
        };

        extract_repo_url(page)
            .map(str::to_string)
            .ok_or_else(|| ResolveError::RepoNotFound {
                package: package.to_string(),
            })
    }
}

/// Extract the "GitHub Repo" link from an index page
pub fn extract_repo_url(page: &str) -> Option<&str> {
    REPO_LINK
        .captures(page)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
