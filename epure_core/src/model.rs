//! # Structure and Result Data Model
//!
//! Input description of a rod chain (`StructureInput`) and the per-rod
//! polynomial fields delivered by the external solver (`FullResult`).
//! All types serialize with the camelCase JSON shape the solver speaks.
//!
//! ```text
//! node 0 ── rod 0 ── node 1 ── rod 1 ── node 2 ... rod n-1 ── node n
//! ```
//!
//! ## Example
//!
//! ```rust
//! use epure_core::model::FullResult;
//!
//! let json = r#"{ "displacements": [0.0, 0.004], "resultOutput": [] }"#;
//! let result: FullResult = serde_json::from_str(json).unwrap();
//! assert_eq!(result.displacements.len(), 2);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::field::{FieldKind, PolynomialField};

/// A junction between rods, or a chain end.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeSpec {
    pub id: u32,
    /// Rigid support; only allowed at the first or last node
    pub fixed: bool,
    /// >0 tension, <0 compression, 0 none
    pub external_force: f64,
}

impl NodeSpec {
    pub fn has_force(&self) -> bool {
        self.external_force != 0.0
    }
}

/// A prismatic bar as entered by the user.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RodSpec {
    pub id: u32,
    pub length: f64,
    pub area: f64,
    pub elastic_modulus: f64,
    pub allowable_stress: f64,
    /// >0 tension, <0 compression, 0 none
    pub distributed_load: f64,
}

/// Ordered rod chain with `nodes.len() == rods.len() + 1`.
///
/// This is also the on-disk save format (see [`crate::file_io`]).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructureInput {
    pub rods: Vec<RodSpec>,
    pub nodes: Vec<NodeSpec>,
}

impl StructureInput {
    /// Advisory shown instead of the schematic when the chain is malformed.
    pub fn shape_advisory(&self) -> Option<ShapeAdvisory> {
        ShapeAdvisory::check(self.rods.len(), self.nodes.len())
    }

    pub fn is_empty(&self) -> bool {
        self.rods.is_empty() && self.nodes.is_empty()
    }
}

/// Non-fatal notice that the node count does not match the rod count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeAdvisory {
    pub rod_count: usize,
    pub node_count: usize,
}

impl ShapeAdvisory {
    pub fn check(rod_count: usize, node_count: usize) -> Option<Self> {
        if node_count != rod_count + 1 {
            Some(ShapeAdvisory { rod_count, node_count })
        } else {
            None
        }
    }
}

impl fmt::Display for ShapeAdvisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Mismatch: there must be one more node than rods. Currently: rods - {}, nodes - {}.",
            self.rod_count, self.node_count
        )
    }
}

/// Solver output for one rod: its input fields plus the closed-form fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RodResult {
    pub rod_id: u32,
    pub length: f64,
    pub area: f64,
    pub elastic_modulus: f64,
    pub allowable_stress: f64,
    pub distributed_load: f64,
    /// Start and end node of this rod
    pub node_related_to: [NodeSpec; 2],
    pub axial_force_coeffs: PolynomialField,
    pub stress_coeffs: PolynomialField,
    pub displacement_coeffs: PolynomialField,
    pub max_stress_on_the_rod: f64,
}

impl RodResult {
    pub fn field(&self, kind: FieldKind) -> &PolynomialField {
        match kind {
            FieldKind::AxialForce => &self.axial_force_coeffs,
            FieldKind::Stress => &self.stress_coeffs,
            FieldKind::Displacement => &self.displacement_coeffs,
        }
    }

    /// Value of a field at local coordinate `x`.
    pub fn value_at(&self, kind: FieldKind, x: f64) -> f64 {
        kind.evaluate(self.field(kind), x)
    }

    pub fn start_node(&self) -> &NodeSpec {
        &self.node_related_to[0]
    }

    pub fn end_node(&self) -> &NodeSpec {
        &self.node_related_to[1]
    }

    /// N(0)
    pub fn start_axial_force(&self) -> f64 {
        self.value_at(FieldKind::AxialForce, 0.0)
    }

    /// N(L)
    pub fn end_axial_force(&self) -> f64 {
        self.value_at(FieldKind::AxialForce, self.length)
    }

    /// Strength check: `|max σ| <= [σ]`
    pub fn is_safe(&self) -> bool {
        self.max_stress_on_the_rod.abs() <= self.allowable_stress
    }

    /// Strength check for an arbitrary stress value on this rod.
    pub fn is_stress_safe(&self, sigma: f64) -> bool {
        sigma.abs() <= self.allowable_stress
    }
}

/// Complete solver response for one calculation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullResult {
    /// One nodal displacement per node, ordered by node id
    pub displacements: Vec<f64>,
    /// One entry per rod, ordered by rod id
    pub result_output: Vec<RodResult>,
}

impl FullResult {
    pub fn rods(&self) -> &[RodResult] {
        &self.result_output
    }

    pub fn rod(&self, rod_id: u32) -> Option<&RodResult> {
        self.result_output.iter().find(|r| r.rod_id == rod_id)
    }

    /// Ordered node list, see [`chain_nodes`].
    pub fn nodes(&self) -> Vec<NodeSpec> {
        chain_nodes(&self.result_output)
    }

    /// Advisory when the displacement vector does not cover rods + 1 nodes.
    pub fn shape_advisory(&self) -> Option<ShapeAdvisory> {
        ShapeAdvisory::check(self.result_output.len(), self.displacements.len())
    }
}

/// Ordered node list of a rod chain: node 0 is the first rod's start, node i the end of rod i-1.
pub fn chain_nodes(rods: &[RodResult]) -> Vec<NodeSpec> {
    let mut nodes = Vec::with_capacity(rods.len() + 1);
    if let Some(first) = rods.first() {
        nodes.push(*first.start_node());
    }
    nodes.extend(rods.iter().map(|r| *r.end_node()));
    nodes
}

/// Geometry the layout engine needs from a rod, whether input or result.
pub trait RodDimensions {
    fn length(&self) -> f64;
    fn area(&self) -> f64;
}

impl RodDimensions for RodSpec {
    fn length(&self) -> f64 {
        self.length
    }

    fn area(&self) -> f64 {
        self.area
    }
}

impl RodDimensions for RodResult {
    fn length(&self) -> f64 {
        self.length
    }

    fn area(&self) -> f64 {
        self.area
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::{node, rod};
    use super::*;

    const SOLVER_JSON: &str = r#"{
        "displacements": [0.0, 0.002],
        "resultOutput": [{
            "rodId": 0,
            "length": 2.0,
            "area": 0.01,
            "elasticModulus": 2e11,
            "allowableStress": 1.6e8,
            "distributedLoad": 0.0,
            "nodeRelatedTo": [
                { "id": 0, "fixed": true, "externalForce": 0.0 },
                { "id": 1, "fixed": false, "externalForce": 100.0 }
            ],
            "axialForceCoeffs": { "a0": 100.0, "a1": 0.0, "a2": null },
            "displacementCoeffs": { "a0": 0.0, "a1": 0.001, "a2": 0.0 },
            "stressCoeffs": { "a0": 10000.0, "a1": 0.0, "a2": null },
            "maxStressOnTheRod": 10000.0
        }]
    }"#;

    #[test]
    fn test_parse_solver_output() {
        let result: FullResult = serde_json::from_str(SOLVER_JSON).unwrap();
        assert_eq!(result.rods().len(), 1);
        let r = &result.result_output[0];
        assert_eq!(r.rod_id, 0);
        assert!(r.start_node().fixed);
        assert_eq!(r.end_node().external_force, 100.0);
        assert_eq!(r.axial_force_coeffs.a2, None);
        assert_eq!(r.displacement_coeffs.a2, Some(0.0));
        assert!(result.shape_advisory().is_none());
    }

    #[test]
    fn test_nodes_reconstructed_from_rods() {
        let mut a = rod(0, 1.0, 0.01, 10.0, 0.0);
        let mut b = rod(1, 1.0, 0.01, 10.0, 0.0);
        a.node_related_to = [node(0, true, 0.0), node(1, false, -5.0)];
        b.node_related_to = [node(1, false, -5.0), node(2, false, 20.0)];
        let result = FullResult {
            displacements: vec![0.0, 0.0, 0.0],
            result_output: vec![a, b],
        };

        let nodes = result.nodes();
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes.iter().map(|n| n.id).collect::<Vec<_>>(), vec![0, 1, 2]);
        assert!(nodes[0].fixed);
        assert_eq!(nodes[2].external_force, 20.0);
    }

    #[test]
    fn test_shape_advisory() {
        let input = StructureInput {
            rods: vec![RodSpec {
                id: 0,
                length: 1.0,
                area: 1.0,
                elastic_modulus: 1.0,
                allowable_stress: 1.0,
                distributed_load: 0.0,
            }],
            nodes: vec![node(0, true, 0.0)],
        };
        let advisory = input.shape_advisory().unwrap();
        assert_eq!(advisory.rod_count, 1);
        assert_eq!(advisory.node_count, 1);
        assert!(advisory.to_string().contains("rods - 1, nodes - 1"));
    }

    #[test]
    fn test_safety_flag_and_end_forces() {
        let mut r = rod(0, 2.0, 0.01, 100.0, 0.0);
        r.axial_force_coeffs = PolynomialField::linear(100.0, -10.0);
        assert_eq!(r.start_axial_force(), 100.0);
        assert_eq!(r.end_axial_force(), 80.0);

        r.max_stress_on_the_rod = -2.0e8;
        assert!(!r.is_safe());
        r.max_stress_on_the_rod = -1.6e8;
        assert!(r.is_safe());
    }
}
