//! # Settings
//!
//! Tuning constants for layout, label placement, sampling and reports.
//! Every group has defaults matching the stock diagrams, and a partial JSON
//! file can override individual keys:
//!
//! ```rust
//! use epure_core::settings::Settings;
//!
//! let settings: Settings = serde_json::from_str(r#"{ "layout": { "maxTotalWidth": 1200.0 } }"#).unwrap();
//! assert_eq!(settings.layout.max_total_width, 1200.0);
//! assert_eq!(settings.layout.min_total_width, 400.0);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{EpureError, EpureResult};

/// All tuning groups.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub layout: LayoutSettings,
    pub labels: LabelSettings,
    pub sampling: SamplingSettings,
    pub report: ReportSettings,
}

impl Settings {
    /// Load overrides from a JSON file; absent keys keep their defaults.
    pub fn from_json_file(path: &Path) -> EpureResult<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| EpureError::file_error("read settings", path.display().to_string(), e.to_string()))?;
        serde_json::from_str(&contents).map_err(|e| EpureError::SerializationError {
            reason: format!("Invalid settings in {}: {}", path.display(), e),
        })
    }
}

/// Pixel bounds for the rod schematic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutSettings {
    /// Pixels per metre before any adjustment
    pub base_length_scale: f64,
    pub min_rod_width: f64,
    pub max_rod_width: f64,
    pub min_total_width: f64,
    pub max_total_width: f64,
    pub min_rod_height: f64,
    pub max_rod_height: f64,
    /// Length of concentrated force arrows
    pub arrow_length: f64,
    /// Horizontal room reserved on each side for arrows and supports
    pub node_offset_x: f64,
    /// Area ratio above which heights map logarithmically
    pub log_area_ratio_threshold: f64,
    /// Vertical centre line of the rods
    pub centerline_y: f64,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        let arrow_length = 25.0;
        LayoutSettings {
            base_length_scale: 80.0,
            min_rod_width: 30.0,
            max_rod_width: 200.0,
            min_total_width: 400.0,
            max_total_width: 1000.0,
            min_rod_height: 12.0,
            max_rod_height: 25.0,
            arrow_length,
            node_offset_x: arrow_length + 15.0,
            log_area_ratio_threshold: 10.0,
            centerline_y: 100.0,
        }
    }
}

/// Node label levels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LabelSettings {
    pub baseline_y: f64,
    /// Second level used to stagger crowded labels
    pub alternate_y: f64,
    pub min_label_distance: f64,
    /// Horizontal shift away from a force arrow
    pub force_offset: f64,
}

impl Default for LabelSettings {
    fn default() -> Self {
        LabelSettings {
            baseline_y: 150.0,
            alternate_y: 130.0,
            min_label_distance: 60.0,
            force_offset: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SamplingSettings {
    /// Subdivisions per rod for the stacked epures
    pub samples_per_rod: usize,
    /// Subdivisions per rod for the standalone field plots
    pub plot_samples_per_rod: usize,
    /// Pixel height of one epure band
    pub epure_height: f64,
    /// Step used for the uniform table when none is given
    pub default_step: f64,
}

impl Default for SamplingSettings {
    fn default() -> Self {
        SamplingSettings {
            samples_per_rod: 30,
            plot_samples_per_rod: 50,
            epure_height: 100.0,
            default_step: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReportSettings {
    pub title: String,
    pub subtitle: String,
    pub footer: String,
    /// `lang` attribute of the HTML document
    pub language: String,
}

impl Default for ReportSettings {
    fn default() -> Self {
        ReportSettings {
            title: "Rod Structure Analysis".to_string(),
            subtitle: "Stress-strain state report".to_string(),
            footer: "Generated by Epure".to_string(),
            language: "en".to_string(),
        }
    }
}
