//! Default manifest discovery
//!
//! Looks for the well-known CocoaPods and Carthage manifests directly inside
//! a project directory. Unlike lockfile lookups this does not walk up the tree:
//! a Podfile in a parent directory belongs to a different project.

use std::path::{Path, PathBuf};

/// Manifests probed when no paths are given, in processing order
pub const DEFAULT_MANIFESTS: [&str; 3] = ["Podfile", "Cartfile", "Cartfile.private"];

/// Return the default manifests that exist in `dir`
pub fn discover(dir: &Path) -> Vec<PathBuf> {
    DEFAULT_MANIFESTS
        .iter()
        .map(|name| dir.join(name))
        .filter(|path| path.is_file())
        .collect()
}
