//! # Uniform-Step Table
//!
//! Samples N, σ and u along every rod at a fixed local step. Coordinates
//! restart at zero on each rod, and each rod always contributes its two
//! boundary sections:
//!
//! ```text
//! {0, L} ∪ {step, 2·step, ...  < L}
//! ```
//!
//! A non-positive step yields an empty table rather than an error.
//!
//! ## Example
//!
//! ```rust
//! use epure_core::step_table::step_coordinates;
//!
//! assert_eq!(step_coordinates(2.0, 0.5), vec![0.0, 0.5, 1.0, 1.5, 2.0]);
//! assert_eq!(step_coordinates(2.0, 2.0), vec![0.0, 2.0]);
//! assert!(step_coordinates(2.0, 0.0).is_empty());
//! ```

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::field::FieldKind;
use crate::format::{exp, fixed};
use crate::model::RodResult;

/// Upper bound on interior samples per rod, protecting against tiny steps.
pub const MAX_SAMPLES_PER_ROD: usize = 100_000;

/// Relative distance below which a stepped coordinate counts as the rod end.
const END_TOLERANCE: f64 = 1e-9;

/// One table row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleRow {
    pub rod_id: u32,
    /// Local coordinate on the rod
    pub x: f64,
    #[serde(rename = "N")]
    pub n: f64,
    pub sigma: f64,
    pub u: f64,
    /// `x` is the rod's start or end
    pub is_boundary: bool,
}

/// Sorted, de-duplicated sample coordinates for one rod.
pub fn step_coordinates(length: f64, step: f64) -> Vec<f64> {
    if !(step > 0.0) || !step.is_finite() {
        return Vec::new();
    }

    let mut xs = vec![0.0, length];
    let mut k = 1usize;
    loop {
        let x = step * k as f64;
        // k·step may land a rounding error short of L (9 · 0.3 vs 2.7)
        if !(x < length) || length - x <= length * END_TOLERANCE {
            break;
        }
        if k > MAX_SAMPLES_PER_ROD {
            warn!(length, step, "Step too small, truncating rod samples");
            break;
        }
        xs.push(x);
        k += 1;
    }

    xs.sort_by(|a, b| a.total_cmp(b));
    xs.dedup();
    xs
}

/// Build the table for all rods, rod by rod in order.
pub fn build_step_table(rods: &[RodResult], step: f64) -> Vec<SampleRow> {
    rods.iter()
        .flat_map(|rod| {
            step_coordinates(rod.length, step).into_iter().map(move |x| SampleRow {
                rod_id: rod.rod_id,
                x,
                n: rod.value_at(FieldKind::AxialForce, x),
                sigma: rod.value_at(FieldKind::Stress, x),
                u: rod.value_at(FieldKind::Displacement, x),
                is_boundary: x == 0.0 || x == rod.length,
            })
        })
        .collect()
}

pub const CSV_HEADER: &str = "Rod,x,N(x),σ(x),u(x)";

/// Comma-separated export of the table.
pub fn to_csv(rows: &[SampleRow]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(CSV_HEADER.to_string());
    lines.extend(rows.iter().map(|r| {
        format!(
            "{},{},{},{},{}",
            r.rod_id,
            fixed(r.x, 4),
            exp(r.n, 4),
            exp(r.sigma, 4),
            exp(r.u, 6)
        )
    }));
    lines.join("\n")
}

/// Download name with the step embedded, e.g. `step_table_0.5m.csv`.
pub fn csv_file_name(step: f64) -> String {
    format!("step_table_{}m.csv", step)
}
