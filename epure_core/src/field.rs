//! # Polynomial Field Evaluation
//!
//! Each rod carries three closed-form fields over its local coordinate
//! `x ∈ [0, L]`:
//!
//! - axial force `N(x) = a0 + a1·x`
//! - stress `σ(x) = a0 + a1·x`
//! - displacement `u(x) = a0 + a1·x + a2·x²`
//!
//! Evaluation performs no bounds check: coordinates outside the rod
//! extrapolate.
//!
//! ## Example
//!
//! ```rust
//! use epure_core::field::{find_interior_extremum, FieldKind, PolynomialField};
//!
//! let u = PolynomialField::quadratic(0.0, 4.0, -1.0);
//! assert_eq!(FieldKind::Displacement.evaluate(&u, 2.0), 4.0);
//! assert_eq!(find_interior_extremum(&u, 3.0), Some(2.0));
//! ```

use serde::{Deserialize, Serialize};

/// Polynomial coefficients of one field.
///
/// `a2` is `null` in the solver JSON for the linear fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PolynomialField {
    pub a0: f64,
    pub a1: f64,
    #[serde(default)]
    pub a2: Option<f64>,
}

impl PolynomialField {
    pub fn linear(a0: f64, a1: f64) -> Self {
        PolynomialField { a0, a1, a2: None }
    }

    pub fn quadratic(a0: f64, a1: f64, a2: f64) -> Self {
        PolynomialField { a0, a1, a2: Some(a2) }
    }

    /// `a0 + a1·x`, ignoring any quadratic term
    pub fn linear_at(&self, x: f64) -> f64 {
        self.a0 + self.a1 * x
    }

    /// `a0 + a1·x + a2·x²`, a missing `a2` counts as zero
    pub fn quadratic_at(&self, x: f64) -> f64 {
        self.linear_at(x) + self.a2.unwrap_or(0.0) * x * x
    }
}

/// The three fields a rod result carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FieldKind {
    AxialForce,
    Stress,
    Displacement,
}

impl FieldKind {
    pub const ALL: [FieldKind; 3] = [FieldKind::AxialForce, FieldKind::Stress, FieldKind::Displacement];

    pub fn evaluate(self, field: &PolynomialField, x: f64) -> f64 {
        match self {
            FieldKind::AxialForce | FieldKind::Stress => field.linear_at(x),
            FieldKind::Displacement => field.quadratic_at(x),
        }
    }

    /// Only the displacement field has a quadratic term.
    pub fn is_quadratic(self) -> bool {
        matches!(self, FieldKind::Displacement)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            FieldKind::AxialForce => "N(x)",
            FieldKind::Stress => "σ(x)",
            FieldKind::Displacement => "u(x)",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            FieldKind::AxialForce => "N",
            FieldKind::Stress => "Pa",
            FieldKind::Displacement => "m",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            FieldKind::AxialForce => "Axial forces N(x)",
            FieldKind::Stress => "Normal stresses σ(x)",
            FieldKind::Displacement => "Displacements u(x)",
        }
    }

    /// Axis label such as `N(x), N`
    pub fn axis_label(self) -> String {
        format!("{}, {}", self.symbol(), self.unit())
    }

    /// Stroke colour used for this field's diagrams
    pub fn color(self) -> &'static str {
        match self {
            FieldKind::AxialForce => "#e53935",
            FieldKind::Stress => "#1e88e5",
            FieldKind::Displacement => "#43a047",
        }
    }
}

/// Vertex of the parabola when it lies strictly inside `(0, length)`.
///
/// Boundary extrema are already covered by the endpoint samples, so only
/// interior ones are reported. Linear fields (missing or zero `a2`) have none.
pub fn find_interior_extremum(field: &PolynomialField, length: f64) -> Option<f64> {
    let a2 = field.a2?;
    if a2 == 0.0 {
        return None;
    }
    let x = -field.a1 / (2.0 * a2);
    if x > 0.0 && x < length {
        Some(x)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linear_fields_ignore_quadratic_term() {
        let n = PolynomialField::quadratic(100.0, -10.0, 5.0);
        assert_eq!(FieldKind::AxialForce.evaluate(&n, 2.0), 80.0);
        assert_eq!(FieldKind::Stress.evaluate(&n, 2.0), 80.0);
        assert_eq!(FieldKind::Displacement.evaluate(&n, 2.0), 100.0);
    }

    #[test]
    fn test_evaluation_extrapolates() {
        let u = PolynomialField::quadratic(1.0, 1.0, 1.0);
        assert_eq!(FieldKind::Displacement.evaluate(&u, -1.0), 1.0);
        assert_eq!(FieldKind::Displacement.evaluate(&u, 3.0), 13.0);
    }

    #[test]
    fn test_no_extremum_without_quadratic_term() {
        assert_eq!(find_interior_extremum(&PolynomialField::quadratic(0.0, 0.002, 0.0), 2.0), None);
        assert_eq!(find_interior_extremum(&PolynomialField::linear(0.0, 1.0), 2.0), None);
    }

    #[test]
    fn test_extremum_must_be_strictly_interior() {
        // vertex at x = 2
        let u = PolynomialField::quadratic(0.0, 4.0, -1.0);
        assert_eq!(find_interior_extremum(&u, 3.0), Some(2.0));
        assert_eq!(find_interior_extremum(&u, 2.0), None);
        assert_eq!(find_interior_extremum(&u, 1.5), None);

        // vertex at x = 0
        let at_start = PolynomialField::quadratic(0.0, 0.0, 1.0);
        assert_eq!(find_interior_extremum(&at_start, 1.0), None);
    }

    #[test]
    fn test_extremum_is_local_min_or_max() {
        let fields = [
            PolynomialField::quadratic(0.0, 3.0e-4, -1.5e-4),
            PolynomialField::quadratic(1.0e-3, -2.0e-3, 8.0e-4),
            PolynomialField::quadratic(-5.0, 7.0, -3.0),
        ];
        let eps = 1.0e-3;
        for field in fields {
            let length = 4.0;
            let x = find_interior_extremum(&field, length).unwrap();
            assert!(x > 0.0 && x < length);

            let at = |x| FieldKind::Displacement.evaluate(&field, x);
            let left = at(x - eps) - at(x);
            let right = at(x + eps) - at(x);
            // both neighbours lie on the same side of the vertex value
            assert!(left * right > 0.0, "not an extremum at {x}");
            assert_eq!(left.signum(), field.a2.unwrap().signum());
        }
    }

    #[test]
    fn test_extremum_value() {
        let u = PolynomialField::quadratic(0.0, 0.003, -0.001);
        let x = find_interior_extremum(&u, 2.0).unwrap();
        assert_relative_eq!(x, 1.5);
        assert_relative_eq!(FieldKind::Displacement.evaluate(&u, x), 0.00225, epsilon = 1e-12);
    }

    #[test]
    fn test_null_a2_deserializes() {
        let field: PolynomialField = serde_json::from_str(r#"{"a0": 1.0, "a1": 2.0, "a2": null}"#).unwrap();
        assert_eq!(field, PolynomialField::linear(1.0, 2.0));
        let missing: PolynomialField = serde_json::from_str(r#"{"a0": 1.0, "a1": 2.0}"#).unwrap();
        assert_eq!(missing.a2, None);
    }
}
