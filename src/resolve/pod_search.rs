//! Repository lookup through the local CocoaPods CLI
//!
//! Runs `pod search --simple <name>` and takes the first `Source:` line:
//!
//! ```text
//! -> Alamofire (5.9.1)
//!    Elegant HTTP Networking in Swift
//!    pod 'Alamofire', '~> 5.9.1'
//!    - Homepage: https://github.com/Alamofire/Alamofire
//!    - Source:   https://github.com/Alamofire/Alamofire.git
//! ```
//!
//! Search results are ranked by CocoaPods, so the first hit is not guaranteed
//! to be the exact pod that was asked for.

use super::{Resolve, ResolveError};
use regex::Regex;
use std::process::Command;
use std::sync::LazyLock;

/// Default CocoaPods executable
pub const DEFAULT_POD_COMMAND: &str = "pod";

static SOURCE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*(?:-\s*)?Source:\s*(\S+)\s*$").expect("SOURCE_LINE must compile")
});

/// Resolves repositories with `pod search`
pub struct PodSearchResolver {
    command: String,
}

impl PodSearchResolver {
    pub fn new(command: &str) -> Self {
        Self {
            command: command.to_string(),
        }
    }
}

impl Default for PodSearchResolver {
    fn default() -> Self {
        Self::new(DEFAULT_POD_COMMAND)
    }
}

impl Resolve for PodSearchResolver {
    fn resolve(&self, package: &str) -> Result<String, ResolveError> {
        tracing::debug!(command = %self.command, package, "running pod search");

        let output = Command::new(&self.command)
            .args(["search", "--simple", "--no-ansi", package])
            .output()
            .map_err(|source| ResolveError::Exec {
                command: self.command.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ResolveError::CommandFailed {
                command: format!("{} search {}", self.command, package),
                message: stderr.trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_source(&stdout)
            .map(str::to_string)
            .ok_or_else(|| ResolveError::RepoNotFound {
                package: package.to_string(),
            })
    }
}

/// Extract the first `Source:` URL from `pod search` output
pub fn parse_source(output: &str) -> Option<&str> {
    SOURCE_LINE
        .captures(output)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
