//! # Section Queries
//!
//! Append-only log of point evaluations the user asks for interactively.
//! Each query evaluates N, σ and u on one rod at a local coordinate, stamps
//! the record with a fresh id and the current time, and appends it to the
//! history. Timestamps never go backwards within one calculator even if the
//! wall clock does.
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut calc = SectionQueryCalculator::new(result.result_output.clone());
//! let record = calc.query(0, 1.0)?;
//! assert_eq!(calc.history().len(), 1);
//! println!("N = {} at x = {}", record.n, record.x);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::errors::{EpureError, EpureResult};
use crate::field::FieldKind;
use crate::model::RodResult;

/// One evaluated section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionQueryRecord {
    pub id: Uuid,
    pub rod_id: u32,
    pub x: f64,
    #[serde(rename = "N")]
    pub n: f64,
    pub sigma: f64,
    pub u: f64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct SectionQueryCalculator {
    rods: Vec<RodResult>,
    history: Vec<SectionQueryRecord>,
}

impl SectionQueryCalculator {
    pub fn new(rods: Vec<RodResult>) -> Self {
        SectionQueryCalculator {
            rods,
            history: Vec::new(),
        }
    }

    /// Swap in a new result set. History is kept until cleared.
    pub fn replace_rods(&mut self, rods: Vec<RodResult>) {
        self.rods = rods;
    }

    /// Evaluate rod `rod_id` at local coordinate `x` and record it.
    pub fn query(&mut self, rod_id: u32, x: f64) -> EpureResult<&SectionQueryRecord> {
        let rod = self
            .rods
            .iter()
            .find(|r| r.rod_id == rod_id)
            .ok_or_else(|| EpureError::rod_not_found(rod_id))?;

        if !x.is_finite() {
            return Err(EpureError::invalid_input("x", x.to_string(), "Coordinate must be a finite number"));
        }
        if x < 0.0 || x > rod.length {
            return Err(EpureError::invalid_input(
                "x",
                x.to_string(),
                format!("Coordinate must lie within [0, {}] on rod {}", rod.length, rod_id),
            ));
        }

        let now = Utc::now();
        let timestamp = match self.history.last() {
            Some(prev) if prev.timestamp > now => prev.timestamp,
            _ => now,
        };

        let record = SectionQueryRecord {
            id: Uuid::new_v4(),
            rod_id,
            x,
            n: rod.value_at(FieldKind::AxialForce, x),
            sigma: rod.value_at(FieldKind::Stress, x),
            u: rod.value_at(FieldKind::Displacement, x),
            timestamp,
        };
        debug!(rod_id, x, n = record.n, sigma = record.sigma, u = record.u, "Section query");

        self.history.push(record);
        let index = self.history.len() - 1;
        Ok(&self.history[index])
    }

    /// All records in insertion order.
    pub fn history(&self) -> &[SectionQueryRecord] {
        &self.history
    }

    /// Rod a record refers to, if it is still part of the current results.
    pub fn rod_for(&self, record: &SectionQueryRecord) -> Option<&RodResult> {
        self.rods.iter().find(|r| r.rod_id == record.rod_id)
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::rod;
    use approx::assert_relative_eq;

    fn calculator() -> SectionQueryCalculator {
        SectionQueryCalculator::new(vec![rod(0, 2.0, 0.01, 100.0, 0.002), rod(1, 1.0, 0.02, -40.0, 0.0)])
    }

    #[test]
    fn test_query_evaluates_all_fields() {
        let mut calc = calculator();
        let record = calc.query(0, 1.5).unwrap().clone();

        assert_eq!(record.rod_id, 0);
        assert_eq!(record.n, 100.0);
        assert_relative_eq!(record.sigma, 10000.0);
        assert_relative_eq!(record.u, 0.003, epsilon = 1e-15);
        assert_eq!(calc.history(), &[record]);
    }

    #[test]
    fn test_history_keeps_call_order() {
        let mut calc = calculator();
        calc.query(1, 0.5).unwrap();
        calc.query(0, 0.0).unwrap();
        calc.query(0, 2.0).unwrap();

        let ids: Vec<u32> = calc.history().iter().map(|r| r.rod_id).collect();
        assert_eq!(ids, vec![1, 0, 0]);
        assert!(calc.history().windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
        assert_ne!(calc.history()[1].id, calc.history()[2].id);
    }

    #[test]
    fn test_unknown_rod() {
        let mut calc = calculator();
        let err = calc.query(9, 0.0).unwrap_err();
        assert_eq!(err, EpureError::rod_not_found(9));
        assert!(calc.is_empty());
    }

    #[test]
    fn test_coordinate_outside_rod() {
        let mut calc = calculator();
        assert_eq!(calc.query(1, 1.5).unwrap_err().error_code(), "INVALID_INPUT");
        assert_eq!(calc.query(1, -0.1).unwrap_err().error_code(), "INVALID_INPUT");
        assert_eq!(calc.query(1, f64::NAN).unwrap_err().error_code(), "INVALID_INPUT");
        assert_eq!(calc.len(), 0);
    }

    #[test]
    fn test_clear_and_replace() {
        let mut calc = calculator();
        calc.query(0, 1.0).unwrap();
        calc.replace_rods(vec![rod(5, 3.0, 0.01, 1.0, 0.0)]);
        assert_eq!(calc.len(), 1);
        assert!(calc.rod_for(&calc.history()[0]).is_none());

        calc.clear();
        assert!(calc.is_empty());
        assert!(calc.query(5, 3.0).is_ok());
    }

    #[test]
    fn test_record_json_shape() {
        let mut calc = calculator();
        let record = calc.query(0, 1.0).unwrap();
        let json = serde_json::to_value(record).unwrap();
        assert_eq!(json["rodId"], 0);
        assert_eq!(json["N"], 100.0);
        assert!(json["timestamp"].is_string());
    }
}
