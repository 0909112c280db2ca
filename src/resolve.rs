//! Repository resolution for libraries declared without a source URL
//!
//! Handles:
//! - Package index lookup: scrape the CocoaPods detail page for its
//!   "GitHub Repo" link
//! - Local lookup: run `pod search` and read the `Source:` line
//!
//! Both are heuristics over output nobody promises to keep stable, which is
//! why callers only see the `Resolve` trait.

mod index;
mod pod_search;

pub use index::{DEFAULT_INDEX_URL, IndexResolver};
pub use pod_search::{DEFAULT_POD_COMMAND, PodSearchResolver};

use crate::fetch::FetchError;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("Failed to fetch index page for '{package}': {source}")]
    Fetch {
        package: String,
        source: FetchError,
    },

    #[error("Index page for '{package}' returned no readable content (HTTP {status})")]
    EmptyPage { package: String, status: u16 },

    #[error(
        "Repository URL not found for '{package}'. Add override to ~/.config/spmready/config.json"
    )]
    RepoNotFound { package: String },

    #[error("Failed to execute '{command}': {source}")]
    Exec {
        command: String,
        source: std::io::Error,
    },

    #[error("'{command}' failed: {message}")]
    CommandFailed { command: String, message: String },
}

/// Find the source repository of a library by name
pub trait Resolve {
    fn resolve(&self, package: &str) -> Result<String, ResolveError>;
}

/// Resolver selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolverKind {
    /// Scrape the package index website
    #[default]
    Index,
    /// Ask the locally installed CocoaPods CLI
    PodSearch,
}

impl fmt::Display for ResolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolverKind::Index => write!(f, "index"),
            ResolverKind::PodSearch => write!(f, "pod-search"),
        }
    }
}

impl FromStr for ResolverKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "index" | "cocoapods" => Ok(ResolverKind::Index),
            "pod-search" | "pod" => Ok(ResolverKind::PodSearch),
            _ => Err(format!(
                "Unknown resolver '{}'. Supported: index, pod-search",
                s
            )),
        }
    }
}
