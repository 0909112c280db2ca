//! Output formatting for JSON and text modes
//!
//! Provides types for structured output that can be serialized to JSON
//! for machine-readable output, or displayed as text for human consumption.

use crate::library::{Library, Source};
use crate::pipeline::{ManifestOutcome, ManifestReport, Report};
use serde::Serialize;

const READY: &str = "✅";
const NOT_READY: &str = "❌";

/// Whole-run result for `--json`
#[derive(Debug, Serialize)]
pub struct ReportOutput {
    pub manifests: Vec<ManifestEntry>,
    pub libraries: Vec<LibraryEntry>,
    pub summary: Summary,
}

/// A single manifest in the JSON output
#[derive(Debug, Serialize)]
pub struct ManifestEntry {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub libraries: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A single library in the JSON output
#[derive(Debug, Serialize)]
pub struct LibraryEntry {
    pub name: String,
    pub source: Source,
    pub repository: Option<String>,
    pub ready: bool,
}

#[derive(Debug, Serialize)]
pub struct Summary {
    pub total: usize,
    pub ready: usize,
    pub not_ready: usize,
    pub all_ready: bool,
}

impl From<&ManifestReport> for ManifestEntry {
    fn from(report: &ManifestReport) -> Self {
        let (libraries, error) = match &report.outcome {
            ManifestOutcome::Parsed { count } => (Some(*count), None),
            ManifestOutcome::Failed(e) => (None, Some(e.to_string())),
        };

        Self {
            path: report.path.display().to_string(),
            libraries,
            error,
        }
    }
}

impl From<&Library> for LibraryEntry {
    fn from(library: &Library) -> Self {
        Self {
            name: library.name().to_string(),
            source: library.source(),
            repository: library.repository().map(str::to_string),
            ready: library.is_ready(),
        }
    }
}

impl From<&Report> for ReportOutput {
    fn from(report: &Report) -> Self {
        Self {
            manifests: report.manifests.iter().map(ManifestEntry::from).collect(),
            libraries: report.libraries.iter().map(LibraryEntry::from).collect(),
            summary: Summary {
                total: report.total(),
                ready: report.ready_count(),
                not_ready: report.not_ready_count(),
                all_ready: report.all_ready(),
            },
        }
    }
}

/// `Found <n> dependencies`
pub fn format_found(count: usize) -> String {
    format!("Found {} dependencies", count)
}

/// `<glyph> | <name> : <repository or "not found">`
pub fn format_library(library: &Library) -> String {
    let glyph = if library.is_ready() { READY } else { NOT_READY };
    format!(
        "{} | {} : {}",
        glyph,
        library.name(),
        library.repository().unwrap_or("not found")
    )
}

/// Closing lines of the text report
pub fn summary_lines(report: &Report) -> Vec<String> {
    if report.all_ready() {
        vec!["🎊 you are ready for Swift Package Manager".to_string()]
    } else {
        vec![
            format!(
                "Sorry 😢 - {} {} | {} {}",
                READY,
                report.ready_count(),
                NOT_READY,
                report.not_ready_count()
            ),
            "Help to improve SPM capability by opening an issue or contributing a pull request"
                .to_string(),
        ]
    }
}

/// Print manifests that could not be read to stderr
pub fn print_manifest_failures(manifests: &[ManifestReport]) {
    for error in manifests.iter().filter_map(ManifestReport::error) {
        eprintln!("{}", error);
    }
}

/// Print JSON output to stdout
pub fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing JSON: {}", e);
            std::process::exit(1);
        }
    }
}
