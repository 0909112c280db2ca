use crate::config::Config;
use crate::manifest;
use crate::resolve::ResolverKind;
use clap::Parser;
use std::path::PathBuf;

/// Check whether CocoaPods and Carthage dependencies are ready for Swift Package Manager
#[derive(Parser, Debug)]
#[command(name = "spmready")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Manifest files to check [default: Podfile, Cartfile and Cartfile.private in --dir]
    pub paths: Vec<PathBuf>,

    /// Project directory searched for manifests (cannot be combined with manifest files)
    #[arg(long, default_value = ".", conflicts_with = "paths")]
    pub dir: PathBuf,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// How to find repositories of pods: index, pod-search
    #[arg(long, default_value_t = ResolverKind::Index)]
    pub resolver: ResolverKind,

    /// Package index base URL
    #[arg(long, value_name = "URL")]
    pub index_url: Option<String>,

    /// Branch probed for Package.swift
    #[arg(long, value_name = "NAME")]
    pub branch: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Log every request to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Manifest paths to process, in order
    ///
    /// Explicit paths are used as given, even if they do not exist, so a
    /// missing manifest is reported rather than silently skipped.
    pub fn manifest_paths(&self) -> Vec<PathBuf> {
        if self.paths.is_empty() {
            manifest::discover(&self.dir)
        } else {
            self.paths.clone()
        }
    }

    /// Apply command-line overrides on top of the loaded configuration
    pub fn apply(&self, config: &mut Config) {
        if let Some(index_url) = &self.index_url {
            config.index_url = index_url.clone();
        }
        if let Some(branch) = &self.branch {
            config.branch = branch.clone();
        }
        if let Some(timeout) = self.timeout {
            config.timeout_secs = timeout;
        }
    }
}
