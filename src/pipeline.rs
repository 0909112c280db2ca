//! Readiness pipeline
//!
//! Runs every library through parse -> resolve -> probe, one at a time:
//!
//! 1. `collect` parses each manifest in the order given. A manifest that cannot
//!    be read is recorded and skipped; only an empty result is fatal.
//! 2. `classify` fills in a missing repository (config override first, then
//!    the resolver) and probes it. A library whose repository never resolves
//!    is not ready and is never probed.
//!
//! `run` composes both for callers that do not need per-library progress.

use crate::config::Config;
use crate::fetch::Fetch;
use crate::library::Library;
use crate::manifest::{self, ManifestError};
use crate::probe::Prober;
use crate::resolve::Resolve;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("No dependencies found{}", describe_searched(.manifests))]
    NoLibrariesFound { manifests: Vec<ManifestReport> },
}

fn describe_searched(manifests: &[ManifestReport]) -> String {
    if manifests.is_empty() {
        " (no Podfile, Cartfile or Cartfile.private)".to_string()
    } else {
        let paths: Vec<String> = manifests
            .iter()
            .map(|m| m.path.display().to_string())
            .collect();
        format!(" in {}", paths.join(", "))
    }
}

/// What happened to one manifest path
#[derive(Debug)]
pub enum ManifestOutcome {
    Parsed { count: usize },
    Failed(ManifestError),
}

#[derive(Debug)]
pub struct ManifestReport {
    pub path: PathBuf,
    pub outcome: ManifestOutcome,
}

impl ManifestReport {
    pub fn error(&self) -> Option<&ManifestError> {
        match &self.outcome {
            ManifestOutcome::Failed(e) => Some(e),
            ManifestOutcome::Parsed { .. } => None,
        }
    }
}

/// Libraries parsed from all manifests, not yet classified
#[derive(Debug)]
pub struct Inventory {
    pub manifests: Vec<ManifestReport>,
    pub libraries: Vec<Library>,
}

/// Final classification of a run
#[derive(Debug)]
pub struct Report {
    pub manifests: Vec<ManifestReport>,
    pub libraries: Vec<Library>,
}

impl Report {
    pub fn new(manifests: Vec<ManifestReport>, libraries: Vec<Library>) -> Self {
        Self {
            manifests,
            libraries,
        }
    }

    pub fn total(&self) -> usize {
        self.libraries.len()
    }

    pub fn ready_count(&self) -> usize {
        self.libraries.iter().filter(|l| l.is_ready()).count()
    }

    pub fn not_ready_count(&self) -> usize {
        self.libraries.iter().filter(|l| !l.is_ready()).count()
    }

    pub fn all_ready(&self) -> bool {
        self.ready_count() == self.total()
    }
}

pub struct Pipeline<'a> {
    config: &'a Config,
    resolver: &'a dyn Resolve,
    prober: Prober<'a>,
}

impl<'a> Pipeline<'a> {
    pub fn new(config: &'a Config, fetcher: &'a dyn Fetch, resolver: &'a dyn Resolve) -> Self {
        Self {
            config,
            resolver,
            prober: Prober::new(fetcher, &config.branch, &config.manifest_file),
        }
    }

    /// Parse every manifest, in order
    pub fn collect(&self, paths: &[PathBuf]) -> Result<Inventory, PipelineError> {
        let mut manifests = Vec::with_capacity(paths.len());
        let mut libraries = Vec::new();

        for path in paths {
            manifests.push(self.collect_one(path, &mut libraries));
        }

        if libraries.is_empty() {
            return Err(PipelineError::NoLibrariesFound { manifests });
        }

        Ok(Inventory {
            manifests,
            libraries,
        })
    }

    fn collect_one(&self, path: &Path, libraries: &mut Vec<Library>) -> ManifestReport {
        let outcome = match manifest::parse(path, &self.config.github_url) {
            Ok(parsed) => {
                let count = parsed.len();
                libraries.extend(parsed);
                ManifestOutcome::Parsed { count }
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping manifest");
                ManifestOutcome::Failed(e)
            }
        };

        ManifestReport {
            path: path.to_path_buf(),
            outcome,
        }
    }

    /// Resolve and probe a single library
    pub fn classify(&self, library: Library) -> Library {
        let library = self.locate(library);

        let Some(repository) = library.repository() else {
            tracing::debug!(library = library.name(), "no repository, not ready");
            return library;
        };

        if self.prober.probe(repository) {
            library.mark_ready()
        } else {
            library
        }
    }

    /// Fill in the repository of a library declared without one
    fn locate(&self, library: Library) -> Library {
        if library.repository().is_some() {
            return library;
        }

        if let Some(repo) = self.config.repo_override(library.name()) {
            tracing::debug!(library = library.name(), repo, "using configured override");
            let repo = repo.to_string();
            return library.with_repository(repo);
        }

        match self.resolver.resolve(library.name()) {
            Ok(repo) => {
                tracing::debug!(library = library.name(), repo = %repo, "resolved repository");
                library.with_repository(repo)
            }
            Err(e) => {
                tracing::warn!(library = library.name(), error = %e, "repository not resolved");
                library
            }
        }
    }

    /// Parse, resolve and probe everything
    pub fn run(&self, paths: &[PathBuf]) -> Result<Report, PipelineError> {
        let inventory = self.collect(paths)?;
        let libraries = inventory
            .libraries
            .into_iter()
            .map(|library| self.classify(library))
            .collect();

        Ok(Report::new(inventory.manifests, libraries))
    }
}
