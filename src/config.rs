//! Configuration file handling.
//!
//! Settings are read from `park-analyzer.toml`: which dataset columns hold the park
//! name, district, type and area, and how reports are titled, colored and stored.

use std::path::{Path, PathBuf};

use colored::Color;
use serde::{Deserialize, Serialize};

use crate::error::ParkError;

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "park-analyzer.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Dataset column names.
    #[serde(default)]
    pub columns: ColumnConfig,

    /// Report presentation settings.
    #[serde(default)]
    pub report: ReportOptions,
}

/// Names of the dataset columns each report reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnConfig {
    /// Park name; also labels records in error messages.
    #[serde(default = "default_name_column")]
    pub name: String,

    /// Administrative district.
    #[serde(default = "default_district_column")]
    pub district: String,

    /// Park type (neighborhood, children's, cultural, ...).
    #[serde(default = "default_type_column")]
    pub park_type: String,

    /// Area in square meters.
    #[serde(default = "default_area_column")]
    pub area: String,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            name: default_name_column(),
            district: default_district_column(),
            park_type: default_type_column(),
            area: default_area_column(),
        }
    }
}

fn default_name_column() -> String {
    "공원명".to_string()
}

fn default_district_column() -> String {
    "소재지(구)".to_string()
}

fn default_type_column() -> String {
    "공원유형".to_string()
}

fn default_area_column() -> String {
    "면적(㎡)".to_string()
}

/// Presentation options shared by every report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportOptions {
    /// Directory report files are written under.
    #[serde(default = "default_output_directory")]
    pub output_directory: PathBuf,

    /// Title template; `{dataset}` and `{report}` are substituted.
    #[serde(default = "default_title_template")]
    pub title_template: String,

    /// Terminal colors.
    #[serde(default)]
    pub color_scheme: ColorScheme,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            output_directory: default_output_directory(),
            title_template: default_title_template(),
            color_scheme: ColorScheme::default(),
        }
    }
}

fn default_output_directory() -> PathBuf {
    PathBuf::from("output")
}

fn default_title_template() -> String {
    "{report} ({dataset})".to_string()
}

impl ReportOptions {
    /// Render the title template for a report over a dataset.
    ///
    /// # Examples
    ///
    /// ```
    /// use park_inventory_analyzer::config::ReportOptions;
    ///
    /// let opts = ReportOptions::default();
    /// assert_eq!(opts.title("seoul", "District Summary"), "District Summary (seoul)");
    /// ```
    pub fn title(&self, dataset: &str, report: &str) -> String {
        self.title_template
            .replace("{dataset}", dataset)
            .replace("{report}", report)
    }
}

/// Named colors for terminal output; `enabled = false` renders plain text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorScheme {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Section headers and primary bars.
    #[serde(default = "default_primary")]
    pub primary: String,

    /// Secondary bars (totals, shares).
    #[serde(default = "default_secondary")]
    pub secondary: String,

    /// Highlights and the hottest heatmap cells.
    #[serde(default = "default_accent")]
    pub accent: String,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            enabled: true,
            primary: default_primary(),
            secondary: default_secondary(),
            accent: default_accent(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_primary() -> String {
    "cyan".to_string()
}

fn default_secondary() -> String {
    "green".to_string()
}

fn default_accent() -> String {
    "yellow".to_string()
}

impl ColorScheme {
    /// A scheme that emits no ANSI codes.
    pub fn plain() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub fn primary(&self) -> Option<Color> {
        self.color(&self.primary)
    }

    pub fn secondary(&self) -> Option<Color> {
        self.color(&self.secondary)
    }

    pub fn accent(&self) -> Option<Color> {
        self.color(&self.accent)
    }

    fn color(&self, name: &str) -> Option<Color> {
        if !self.enabled {
            return None;
        }
        name.parse().ok()
    }

    fn validate(&self) -> Result<(), ParkError> {
        for name in [&self.primary, &self.secondary, &self.accent] {
            if name.parse::<Color>().is_err() {
                return Err(ParkError::Config(format!("Unknown color name '{name}'")));
            }
        }
        Ok(())
    }
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self, ParkError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ParkError::Config(format!("Failed to read {}: {e}", path.display()))
        })?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        tracing::debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load from `dir/park-analyzer.toml` if it exists.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>, ParkError> {
        let path = dir.join(DEFAULT_CONFIG_FILE);
        if path.exists() {
            Ok(Some(Self::load(&path)?))
        } else {
            Ok(None)
        }
    }

    /// Reject settings no report could run with.
    pub fn validate(&self) -> Result<(), ParkError> {
        let columns = [
            ("name", &self.columns.name),
            ("district", &self.columns.district),
            ("park_type", &self.columns.park_type),
            ("area", &self.columns.area),
        ];
        for (key, value) in columns {
            if value.trim().is_empty() {
                return Err(ParkError::Config(format!(
                    "columns.{key} must not be empty"
                )));
            }
        }
        if self.report.output_directory.as_os_str().is_empty() {
            return Err(ParkError::Config(
                "report.output_directory must not be empty".to_string(),
            ));
        }
        self.report.color_scheme.validate()
    }

    /// Serialize the default configuration as TOML.
    pub fn default_toml() -> Result<String, ParkError> {
        let body = toml::to_string_pretty(&Config::default())?;
        Ok(format!(
            "# park-analyzer configuration\n# Title placeholders: {{dataset}}, {{report}}\n\n{body}"
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_source_headers() {
        let cfg = Config::default();
        assert_eq!(cfg.columns.name, "공원명");
        assert_eq!(cfg.columns.district, "소재지(구)");
        assert_eq!(cfg.columns.park_type, "공원유형");
        assert_eq!(cfg.columns.area, "면적(㎡)");
        assert_eq!(cfg.report.output_directory, PathBuf::from("output"));
        assert!(cfg.report.color_scheme.enabled);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let cfg: Config = toml::from_str(
            r#"
            [columns]
            area = "area_m2"

            [report]
            output_directory = "reports"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.columns.area, "area_m2");
        assert_eq!(cfg.columns.district, "소재지(구)");
        assert_eq!(cfg.report.output_directory, PathBuf::from("reports"));
        assert_eq!(cfg.report.title_template, "{report} ({dataset})");
    }

    #[test]
    fn test_default_toml_roundtrip() {
        let text = Config::default_toml().unwrap();
        assert!(text.contains("[columns]"));
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn test_validate_rejects_empty_column() {
        let mut cfg = Config::default();
        cfg.columns.district = " ".to_string();
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("columns.district"));
    }

    #[test]
    fn test_validate_rejects_unknown_color() {
        let mut cfg = Config::default();
        cfg.report.color_scheme.accent = "chartreuse-ish".to_string();
        assert!(matches!(cfg.validate(), Err(ParkError::Config(_))));
    }

    #[test]
    fn test_title_template() {
        let opts = ReportOptions {
            title_template: "[{dataset}] {report}".to_string(),
            ..ReportOptions::default()
        };
        assert_eq!(opts.title("parks", "Top 5"), "[parks] Top 5");
    }

    #[test]
    fn test_plain_scheme_has_no_colors() {
        let scheme = ColorScheme::plain();
        assert!(scheme.primary().is_none());
        assert!(scheme.accent().is_none());
        assert_eq!(ColorScheme::default().primary(), Some(Color::Cyan));
    }

    #[test]
    fn test_load_and_load_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load_from_dir(dir.path()).unwrap().is_none());

        std::fs::write(
            dir.path().join(DEFAULT_CONFIG_FILE),
            "[report]\ntitle_template = \"{report}\"\n",
        )
        .unwrap();
        let cfg = Config::load_from_dir(dir.path()).unwrap().unwrap();
        assert_eq!(cfg.report.title_template, "{report}");
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[columns\nname = 1").unwrap();
        assert!(matches!(Config::load(&path), Err(ParkError::Config(_))));
    }
}
