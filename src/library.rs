//! The dependency record threaded through the pipeline
//!
//! A `Library` is owned by exactly one pipeline stage at a time. Each stage
//! consumes it and hands back an updated value, so the repository can only go
//! from absent to present and readiness can only go from false to true.

use serde::Serialize;
use std::fmt;

/// Which kind of manifest declared a library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// `pod '<name>'` in a Podfile
    Pod,
    /// `github "<org/repo>"` in a Cartfile
    Cart,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Pod => write!(f, "pod"),
            Source::Cart => write!(f, "cart"),
        }
    }
}

/// One declared third-party dependency
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Library {
    name: String,
    source: Source,
    repository: Option<String>,
    ready: bool,
}

impl Library {
    /// A pod declaration; its repository still has to be resolved
    pub fn pod(name: &str) -> Self {
        Self {
            name: name.to_string(),
            source: Source::Pod,
            repository: None,
            ready: false,
        }
    }

    /// A Carthage declaration, whose repository is known up front
    pub fn cart(name: &str, repository: String) -> Self {
        Self {
            name: name.to_string(),
            source: Source::Cart,
            repository: Some(repository),
            ready: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> Source {
        self.source
    }

    pub fn repository(&self) -> Option<&str> {
        self.repository.as_deref()
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Set the repository if none is known yet
    ///
    /// A repository that is already set is never replaced.
    pub fn with_repository(mut self, repository: String) -> Self {
        if self.repository.is_none() {
            self.repository = Some(repository);
        }
        self
    }

    /// Mark the library as ready
    ///
    /// Has no effect without a repository.
    pub fn mark_ready(mut self) -> Self {
        if self.repository.is_some() {
            self.ready = true;
        }
        self
    }
}
