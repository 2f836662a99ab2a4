//! Report assembly and file output.
//!
//! Reports are rendered once with the terminal color scheme for display and once
//! with a plain scheme for the files written under the configured output directory.

mod generator;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::ReportOptions;
use crate::error::ParkError;

pub use generator::{
    generate_district_parks_report, generate_district_report, generate_ranking_report,
    generate_type_report,
};

/// Writes rendered reports below the configured output directory.
pub struct ReportWriter {
    options: ReportOptions,
    dataset_name: String,
}

impl ReportWriter {
    pub fn new(options: ReportOptions, dataset_name: impl Into<String>) -> Self {
        Self {
            options,
            dataset_name: dataset_name.into(),
        }
    }

    pub fn options(&self) -> &ReportOptions {
        &self.options
    }

    /// Title for a report, from the configured template.
    pub fn title(&self, report: &str) -> String {
        self.options.title(&self.dataset_name, report)
    }

    /// Destination file for `report` inside `section` (a subdirectory of the output directory).
    pub fn path_for(&self, section: &str, report: &str, extension: &str) -> PathBuf {
        self.options
            .output_directory
            .join(slug(section))
            .join(format!("{}.{extension}", slug(report)))
    }

    /// Write `body` to the file for `report`, creating directories as needed.
    pub fn write(&self, section: &str, report: &str, body: &str) -> Result<PathBuf, ParkError> {
        let path = self.path_for(section, report, "txt");
        ensure_parent(&path)?;
        std::fs::write(&path, body)?;
        tracing::info!("wrote {}", path.display());
        Ok(path)
    }

    /// Serialize `value` as pretty JSON next to the text reports.
    pub fn write_json<T: Serialize>(
        &self,
        section: &str,
        report: &str,
        value: &T,
    ) -> Result<PathBuf, ParkError> {
        let path = self.path_for(section, report, "json");
        ensure_parent(&path)?;
        std::fs::write(&path, serde_json::to_string_pretty(value)?)?;
        tracing::info!("wrote {}", path.display());
        Ok(path)
    }
}

fn ensure_parent(path: &Path) -> Result<(), ParkError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// File-system friendly form of a report name: separators and whitespace become `_`.
///
/// # Examples
///
/// ```
/// use park_inventory_analyzer::report::slug;
///
/// assert_eq!(slug("Top 5 Largest Parks"), "Top_5_Largest_Parks");
/// assert_eq!(slug("a/b\\c: d"), "a_b_c_d");
/// ```
pub fn slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_underscore = false;
    for ch in name.trim().chars() {
        let bad = ch.is_whitespace() || matches!(ch, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|');
        if bad {
            if !last_underscore {
                out.push('_');
            }
            last_underscore = true;
        } else {
            out.push(ch);
            last_underscore = false;
        }
    }
    if out.is_empty() {
        out.push_str("report");
    }
    // `.` and `..` would resolve outside the report directory
    if out.chars().all(|c| c == '.') {
        out = "_".repeat(out.len());
    }
    out
}

/// Slugs for a list of names, with `_2`, `_3`, ... appended where two names share a slug.
///
/// # Examples
///
/// ```
/// use park_inventory_analyzer::report::unique_slugs;
///
/// assert_eq!(unique_slugs(["Mapo gu", "Mapo/gu", "Jung-gu"]), ["Mapo_gu", "Mapo_gu_2", "Jung-gu"]);
/// ```
pub fn unique_slugs<'a, I>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut used = HashSet::new();
    let mut out = Vec::new();
    for name in names {
        let base = slug(name);
        let mut candidate = base.clone();
        let mut n = 2;
        while used.contains(&candidate) {
            candidate = format!("{base}_{n}");
            n += 1;
        }
        if candidate != base {
            tracing::warn!("'{name}' shares the file name '{base}'; using '{candidate}'");
        }
        used.insert(candidate.clone());
        out.push(candidate);
    }
    out
}
