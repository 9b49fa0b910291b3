//! Node label placement.
//!
//! Greedy, local de-collision: a label whose node sits closer than the
//! minimum distance to either neighbour is staggered between two vertical
//! levels by node parity, and a label on a loaded node is nudged away from
//! the force arrow. No global optimisation is attempted.

use serde::{Deserialize, Serialize};

use crate::model::NodeSpec;
use crate::settings::LabelSettings;

/// Where to draw one node's label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelPlacement {
    pub y: f64,
    /// Horizontal shift; nonzero only for nodes carrying an external force
    pub offset: f64,
}

/// Resolve label positions for nodes at `node_x`.
///
/// `nodes` is matched to `node_x` by index; missing nodes count as unloaded.
pub fn place_labels(node_x: &[f64], nodes: &[NodeSpec], settings: &LabelSettings) -> Vec<LabelPlacement> {
    let staggered = |i: usize| {
        if i % 2 == 0 {
            settings.alternate_y
        } else {
            settings.baseline_y
        }
    };

    node_x
        .iter()
        .enumerate()
        .map(|(i, &x)| {
            let crowded_left = i > 0 && x - node_x[i - 1] < settings.min_label_distance;
            let crowded_right = i + 1 < node_x.len() && node_x[i + 1] - x < settings.min_label_distance;
            let y = if crowded_left || crowded_right {
                staggered(i)
            } else {
                settings.baseline_y
            };

            let force = nodes.get(i).map_or(0.0, |n| n.external_force);
            let offset = if force > 0.0 {
                settings.force_offset
            } else if force < 0.0 {
                -settings.force_offset
            } else {
                0.0
            };

            LabelPlacement { y, offset }
        })
        .collect()
}
