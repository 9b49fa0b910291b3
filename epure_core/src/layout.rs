//! # Rod Geometry Layout
//!
//! Maps a chain of rods with very different lengths and cross-sections onto
//! a bounded pixel strip while keeping every rod legible.
//!
//! ## Algorithm
//!
//! 1. **Length scale**: start from the base scale and cap it so the shortest
//!    rod reaches the minimum width and the longest stays under the maximum
//!    width (tighter cap wins, never above twice the base scale).
//! 2. **Total width**: if `total_length · scale + 2 · offset` falls outside
//!    the total-width bounds, re-derive the scale so it lands on the bound.
//! 3. **Heights**: map areas linearly, or logarithmically when the max/min
//!    area ratio exceeds the configured threshold; clamp to the height bounds.
//! 4. **Placement**: rods left to right without gaps, starting at the offset.
//!    Node `i` sits at the offset plus the widths of the first `i` rods.
//!
//! ## Example
//!
//! ```rust
//! use epure_core::layout::compute_layout;
//! use epure_core::model::RodSpec;
//! use epure_core::settings::LayoutSettings;
//!
//! let rod = |id, length, area| RodSpec {
//!     id, length, area,
//!     elastic_modulus: 2e11, allowable_stress: 1.6e8, distributed_load: 0.0,
//! };
//! let layout = compute_layout(&[rod(0, 1.0, 0.01), rod(1, 2.0, 0.02)], &LayoutSettings::default());
//! assert_eq!(layout.node_x.len(), 3);
//! assert_eq!(layout.rods[1].x, layout.node_x[1]);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::RodDimensions;
use crate::settings::LayoutSettings;

/// Pixel rectangle of one rod.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RodGeometry {
    pub x: f64,
    pub width: f64,
    pub height: f64,
    /// Top edge; the rod is centred on the layout centre line
    pub y: f64,
}

impl RodGeometry {
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }
}

/// How cross-section areas were turned into pixel heights.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeightMapping {
    /// `height = min + area · scale`
    #[default]
    Linear,
    /// `height = min + ln(area / min_area + 1) · scale`
    Logarithmic,
}

/// Static layout of one structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutGeometry {
    pub rods: Vec<RodGeometry>,
    /// `rods.len() + 1` node positions
    pub node_x: Vec<f64>,
    /// Pixels per metre actually applied
    pub length_scale: f64,
    pub height_mapping: HeightMapping,
    pub area_scale: f64,
    /// Canvas width needed to show the whole chain with its end offsets
    pub diagram_width: f64,
    /// Rods whose scaled width fell below the minimum and were widened
    pub widened: Vec<bool>,
}

impl LayoutGeometry {
    /// Map a rod-local coordinate into the rod's pixel span.
    ///
    /// Rods with zero length map everything onto their left edge.
    pub fn map_local_x(&self, rod_index: usize, local_x: f64, length: f64) -> f64 {
        let rod = &self.rods[rod_index];
        if length > 0.0 {
            rod.x + (local_x / length) * rod.width
        } else {
            rod.x
        }
    }

    pub fn rod_count(&self) -> usize {
        self.rods.len()
    }

    /// Whether the chain needed more than the base scale or widened a rod.
    pub fn is_rescaled(&self, settings: &LayoutSettings) -> bool {
        self.length_scale != settings.base_length_scale || self.widened.iter().any(|w| *w)
    }
}

/// Compute the layout for an ordered rod chain.
///
/// Degenerate input never fails: zero total length skips the width
/// adjustment, equal areas skip the logarithmic mapping, and an empty chain
/// yields a single node at the offset.
pub fn compute_layout<R: RodDimensions>(rods: &[R], settings: &LayoutSettings) -> LayoutGeometry {
    let lengths: Vec<f64> = rods.iter().map(|r| r.length()).collect();
    let areas: Vec<f64> = rods.iter().map(|r| r.area()).collect();

    let (length_scale, required_width) = compute_length_scale(&lengths, settings);
    let (height_mapping, area_scale) = choose_height_mapping(&areas, settings);
    let min_area = areas.iter().copied().fold(f64::INFINITY, f64::min);

    let mut placed = Vec::with_capacity(rods.len());
    let mut widened = Vec::with_capacity(rods.len());
    let mut node_x = Vec::with_capacity(rods.len() + 1);
    let mut current_x = settings.node_offset_x;
    node_x.push(current_x);

    for (&length, &area) in lengths.iter().zip(&areas) {
        let scaled = length * length_scale;
        let width = scaled.max(settings.min_rod_width);
        let height = rod_height(area, min_area, height_mapping, area_scale, settings);

        placed.push(RodGeometry {
            x: current_x,
            width,
            height,
            y: settings.centerline_y - height / 2.0,
        });
        widened.push(!(scaled >= settings.min_rod_width));
        current_x += width;
        node_x.push(current_x);
    }

    let clamped_width = required_width.max(settings.min_total_width).min(settings.max_total_width);
    let diagram_width = clamped_width.max(current_x + settings.node_offset_x);

    debug!(
        rods = rods.len(),
        length_scale,
        ?height_mapping,
        diagram_width,
        "Computed rod layout"
    );

    LayoutGeometry {
        rods: placed,
        node_x,
        length_scale,
        height_mapping,
        area_scale,
        diagram_width,
        widened,
    }
}

/// Returns the applied scale and the total width the unadjusted scale required.
fn compute_length_scale(lengths: &[f64], settings: &LayoutSettings) -> (f64, f64) {
    let mut scale = settings.base_length_scale;

    let min_length = lengths.iter().copied().fold(f64::INFINITY, f64::min);
    let max_length = lengths.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !lengths.is_empty() && min_length > 0.0 {
        let min_required = settings.min_rod_width / min_length;
        let max_allowed = settings.max_rod_width / max_length;
        scale = min_required.min(max_allowed).min(settings.base_length_scale * 2.0);
    }

    let total_length: f64 = lengths.iter().sum();
    let reserved = 2.0 * settings.node_offset_x;
    let required_width = total_length * scale + reserved;

    if total_length > 0.0 {
        if required_width < settings.min_total_width {
            scale = (settings.min_total_width - reserved) / total_length;
        } else if required_width > settings.max_total_width {
            scale = (settings.max_total_width - reserved) / total_length;
        }
    }

    (scale, required_width)
}

fn choose_height_mapping(areas: &[f64], settings: &LayoutSettings) -> (HeightMapping, f64) {
    let max_area = areas.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min_area = areas.iter().copied().fold(f64::INFINITY, f64::min);
    let span = settings.max_rod_height - settings.min_rod_height;

    if !(max_area > 0.0) {
        return (HeightMapping::Linear, 1.0);
    }

    if min_area > 0.0 && max_area / min_area > settings.log_area_ratio_threshold {
        (HeightMapping::Logarithmic, span / (max_area / min_area + 1.0).ln())
    } else {
        (HeightMapping::Linear, span / max_area)
    }
}

fn rod_height(
    area: f64,
    min_area: f64,
    mapping: HeightMapping,
    area_scale: f64,
    settings: &LayoutSettings,
) -> f64 {
    let raw = match mapping {
        HeightMapping::Logarithmic => settings.min_rod_height + (area / min_area + 1.0).ln() * area_scale,
        HeightMapping::Linear => settings.min_rod_height + area * area_scale,
    };
    // f64::max discards NaN, so malformed areas still land in bounds
    raw.max(settings.min_rod_height).min(settings.max_rod_height)
}
