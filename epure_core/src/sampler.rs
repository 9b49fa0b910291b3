//! # Diagram Sampling
//!
//! Produces the point sequence used to draw one field's epure across the
//! whole structure. Every rod is subdivided uniformly in its local
//! coordinate and each sample is mapped into the rod's pixel span from the
//! [`LayoutGeometry`]. Alongside the curve the sampler emits emphasis
//! markers: both rod ends, and for the displacement field the interior
//! extremum when the parabola's vertex lies strictly inside the rod.
//!
//! The value range always includes zero so the baseline stays visible.

use serde::{Deserialize, Serialize};

use crate::field::{find_interior_extremum, FieldKind};
use crate::layout::LayoutGeometry;
use crate::model::RodResult;

/// One evaluated sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiagramPoint {
    /// Pixel x within the layout
    pub px: f64,
    /// Physical coordinate along the whole structure
    pub position: f64,
    /// Coordinate within the rod
    pub local_x: f64,
    pub value: f64,
}

/// Samples of one rod, ordered by increasing `local_x`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RodCurve {
    pub rod_id: u32,
    pub points: Vec<DiagramPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkerKind {
    Boundary,
    Extremum,
}

/// A point drawn with emphasis and a value label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiagramMarker {
    pub rod_id: u32,
    pub kind: MarkerKind,
    pub point: DiagramPoint,
}

/// Closed value interval that always contains zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl Default for ValueRange {
    fn default() -> Self {
        ValueRange { min: 0.0, max: 0.0 }
    }
}

impl ValueRange {
    pub fn include(&mut self, value: f64) {
        if value.is_finite() {
            self.min = self.min.min(value);
            self.max = self.max.max(value);
        }
    }

    /// Largest magnitude, or 1 for an all-zero field
    pub fn max_abs(&self) -> f64 {
        let m = self.min.abs().max(self.max.abs());
        if m > 0.0 {
            m
        } else {
            1.0
        }
    }

    /// `max - min`, or 1 for an all-zero field
    pub fn span(&self) -> f64 {
        let s = self.max - self.min;
        if s > 0.0 {
            s
        } else {
            1.0
        }
    }

    /// Pixels per unit for a band of `height` centred on the zero line.
    pub fn symmetric_scale(&self, height: f64) -> f64 {
        height / (2.0 * self.max_abs())
    }
}

/// Sampled epure of one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDiagram {
    pub kind: FieldKind,
    pub curves: Vec<RodCurve>,
    pub markers: Vec<DiagramMarker>,
    pub range: ValueRange,
}

impl FieldDiagram {
    /// All curve samples, rod by rod.
    pub fn points(&self) -> impl Iterator<Item = &DiagramPoint> {
        self.curves.iter().flat_map(|c| c.points.iter())
    }

    pub fn extrema(&self) -> impl Iterator<Item = &DiagramMarker> {
        self.markers.iter().filter(|m| m.kind == MarkerKind::Extremum)
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }
}

/// Sample `kind` over every rod with `samples_per_rod` uniform subdivisions.
///
/// Rods without a matching layout entry are skipped.
pub fn sample_field(
    rods: &[RodResult],
    layout: &LayoutGeometry,
    kind: FieldKind,
    samples_per_rod: usize,
) -> FieldDiagram {
    let subdivisions = samples_per_rod.max(1);
    let mut curves = Vec::with_capacity(rods.len());
    let mut markers = Vec::new();
    let mut range = ValueRange::default();
    let mut rod_start = 0.0;

    for (index, rod) in rods.iter().enumerate().take(layout.rod_count()) {
        let point_at = |local_x: f64| DiagramPoint {
            px: layout.map_local_x(index, local_x, rod.length),
            position: rod_start + local_x,
            local_x,
            value: rod.value_at(kind, local_x),
        };

        let points: Vec<DiagramPoint> = (0..=subdivisions)
            .map(|k| point_at(rod.length * k as f64 / subdivisions as f64))
            .collect();
        for p in &points {
            range.include(p.value);
        }

        for local_x in [0.0, rod.length] {
            markers.push(DiagramMarker {
                rod_id: rod.rod_id,
                kind: MarkerKind::Boundary,
                point: point_at(local_x),
            });
        }

        if kind.is_quadratic() {
            if let Some(x) = find_interior_extremum(rod.field(kind), rod.length) {
                let point = point_at(x);
                range.include(point.value);
                markers.push(DiagramMarker {
                    rod_id: rod.rod_id,
                    kind: MarkerKind::Extremum,
                    point,
                });
            }
        }

        curves.push(RodCurve {
            rod_id: rod.rod_id,
            points,
        });
        rod_start += rod.length;
    }

    FieldDiagram {
        kind,
        curves,
        markers,
        range,
    }
}

/// Sample all three fields.
pub fn sample_all(rods: &[RodResult], layout: &LayoutGeometry, samples_per_rod: usize) -> Vec<FieldDiagram> {
    FieldKind::ALL
        .iter()
        .map(|&kind| sample_field(rods, layout, kind, samples_per_rod))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::PolynomialField;
    use crate::layout::compute_layout;
    use crate::model::fixtures::rod;
    use crate::settings::LayoutSettings;
    use approx::assert_relative_eq;

    fn two_rods() -> Vec<RodResult> {
        let mut a = rod(0, 1.0, 0.01, 100.0, 0.001);
        let mut b = rod(1, 3.0, 0.02, -50.0, 0.0);
        a.displacement_coeffs = PolynomialField::quadratic(0.0, 0.001, 0.0);
        // vertex at x = 1.5 on a 3 m rod
        b.displacement_coeffs = PolynomialField::quadratic(0.001, 0.003, -0.001);
        vec![a, b]
    }

    #[test]
    fn test_points_ordered_and_mapped_into_pixel_spans() {
        let rods = two_rods();
        let layout = compute_layout(&rods, &LayoutSettings::default());
        let diagram = sample_field(&rods, &layout, FieldKind::AxialForce, 30);

        assert_eq!(diagram.curves.len(), 2);
        assert!(diagram.curves.iter().all(|c| c.points.len() == 31));

        let pxs: Vec<f64> = diagram.points().map(|p| p.px).collect();
        assert!(pxs.windows(2).all(|w| w[1] >= w[0]));

        let first = &diagram.curves[1].points[0];
        let last = diagram.curves[1].points.last().unwrap();
        assert_relative_eq!(first.px, layout.rods[1].x);
        assert_relative_eq!(last.px, layout.rods[1].right());
        assert_relative_eq!(first.position, 1.0);
        assert_relative_eq!(last.position, 4.0);
    }

    #[test]
    fn test_boundary_markers_for_every_rod() {
        let rods = two_rods();
        let layout = compute_layout(&rods, &LayoutSettings::default());
        let diagram = sample_field(&rods, &layout, FieldKind::Stress, 30);

        let boundaries: Vec<_> = diagram
            .markers
            .iter()
            .filter(|m| m.kind == MarkerKind::Boundary)
            .collect();
        assert_eq!(boundaries.len(), 4);
        assert_eq!(diagram.extrema().count(), 0);
    }

    #[test]
    fn test_displacement_extremum_marker() {
        let rods = two_rods();
        let layout = compute_layout(&rods, &LayoutSettings::default());
        let diagram = sample_field(&rods, &layout, FieldKind::Displacement, 30);

        let extrema: Vec<_> = diagram.extrema().collect();
        assert_eq!(extrema.len(), 1);
        assert_eq!(extrema[0].rod_id, 1);
        assert_relative_eq!(extrema[0].point.local_x, 1.5);
        assert_relative_eq!(extrema[0].point.value, 0.00325, epsilon = 1e-12);
        assert_relative_eq!(diagram.range.max, 0.00325, epsilon = 1e-12);
    }

    #[test]
    fn test_range_includes_zero() {
        let rods = vec![rod(0, 2.0, 0.01, 100.0, 0.0)];
        let layout = compute_layout(&rods, &LayoutSettings::default());
        let diagram = sample_field(&rods, &layout, FieldKind::AxialForce, 10);

        assert_eq!(diagram.range.min, 0.0);
        assert_eq!(diagram.range.max, 100.0);
        assert_relative_eq!(diagram.range.symmetric_scale(100.0), 0.5);
    }

    #[test]
    fn test_all_zero_field_has_unit_range() {
        let rods = vec![rod(0, 2.0, 0.01, 0.0, 0.0)];
        let layout = compute_layout(&rods, &LayoutSettings::default());
        let diagram = sample_field(&rods, &layout, FieldKind::Displacement, 10);
        assert_eq!(diagram.range.max_abs(), 1.0);
        assert_eq!(diagram.range.span(), 1.0);
    }

    #[test]
    fn test_zero_samples_treated_as_one_subdivision() {
        let rods = vec![rod(0, 2.0, 0.01, 1.0, 0.0)];
        let layout = compute_layout(&rods, &LayoutSettings::default());
        let diagram = sample_field(&rods, &layout, FieldKind::AxialForce, 0);
        assert_eq!(diagram.curves[0].points.len(), 2);
    }

    #[test]
    fn test_sample_all_yields_three_fields() {
        let rods = two_rods();
        let layout = compute_layout(&rods, &LayoutSettings::default());
        let kinds: Vec<_> = sample_all(&rods, &layout, 30).iter().map(|d| d.kind).collect();
        assert_eq!(kinds, FieldKind::ALL.to_vec());
    }
}
