//! # SVG Rendering
//!
//! Serializes layouts and sampled epures into self-contained SVG markup.
//!
//! - **Construction**: the rod chain with loads, supports and node labels,
//!   with the N, σ and u epures stacked underneath on the same pixel axis
//! - **Field plot**: one field against the physical coordinate, with ticks
//! - **Structure schematic**: the editable input chain, or an advisory when
//!   the node count does not match
//!
//! Report assembly does not search for rendered output. Anything that can
//! hand out markup implements [`DiagramSource`] and is asked by [`DiagramId`].

use std::collections::HashMap;

use crate::field::FieldKind;
use crate::format::{escape_html, exp, fixed};
use crate::labels::{place_labels, LabelPlacement};
use crate::layout::{compute_layout, LayoutGeometry};
use crate::model::{chain_nodes, NodeSpec, RodResult, StructureInput};
use crate::sampler::{sample_field, FieldDiagram, MarkerKind};
use crate::settings::Settings;

/// Append one formatted line of markup.
macro_rules! svg_line {
    ($out:expr, $($arg:tt)*) => {{
        $out.push_str(&format!($($arg)*));
        $out.push('\n');
    }};
}

const EPURE_GAP: f64 = 25.0;
/// Gap between the construction centre line and the first epure band
const BAND_OFFSET: f64 = 50.0;
const BASE_TOP_PADDING: f64 = 50.0;
const BOTTOM_MARGIN: f64 = 50.0;
const VALUE_LABEL_GAP: f64 = 12.0;
const EXTREMUM_LABEL_GAP: f64 = 15.0;

const ROD_FILL: &str = "#4a90e2";
const ROD_STROKE: &str = "#2c3e50";
const BACKGROUND: &str = "#fafafa";

const PLOT_WIDTH: f64 = 520.0;
const PLOT_HEIGHT: f64 = 220.0;
const PLOT_PADDING: f64 = 45.0;
const PLOT_Y_TICKS: usize = 5;
const SCHEMATIC_HEIGHT: f64 = 200.0;

/// Handle for one renderable diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagramId {
    /// Rod chain with the three stacked epures
    Construction,
    /// Standalone plot of one field
    Epure(FieldKind),
}

impl DiagramId {
    pub const ALL: [DiagramId; 4] = [
        DiagramId::Construction,
        DiagramId::Epure(FieldKind::AxialForce),
        DiagramId::Epure(FieldKind::Stress),
        DiagramId::Epure(FieldKind::Displacement),
    ];

    pub fn title(self) -> String {
        match self {
            DiagramId::Construction => "Construction and diagrams N(x), σ(x), u(x)".to_string(),
            DiagramId::Epure(kind) => {
                // "Axial forces N(x)" -> "Diagram of axial forces N(x)"
                let title = kind.title();
                let mut chars = title.chars();
                let first = chars.next().map(|c| c.to_lowercase().to_string()).unwrap_or_default();
                format!("Diagram of {}{}", first, chars.as_str())
            }
        }
    }

    /// File name used when the diagram is exported on its own
    pub fn file_name(self) -> &'static str {
        match self {
            DiagramId::Construction => "construction.svg",
            DiagramId::Epure(FieldKind::AxialForce) => "epure_N.svg",
            DiagramId::Epure(FieldKind::Stress) => "epure_sigma.svg",
            DiagramId::Epure(FieldKind::Displacement) => "epure_u.svg",
        }
    }
}

/// Anything that can hand out serialized diagram markup on request.
pub trait DiagramSource {
    /// Markup for `id`, or `None` when that diagram is not available.
    fn diagram_markup(&self, id: DiagramId) -> Option<String>;
}

impl DiagramSource for HashMap<DiagramId, String> {
    fn diagram_markup(&self, id: DiagramId) -> Option<String> {
        self.get(&id).cloned()
    }
}

/// All diagrams of one result set, rendered up front.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderedDiagrams {
    markup: HashMap<DiagramId, String>,
}

impl RenderedDiagrams {
    /// Render the construction composite from `epures` and resample each
    /// field for its standalone plot.
    pub fn render(
        rods: &[RodResult],
        layout: &LayoutGeometry,
        labels: &[LabelPlacement],
        epures: &[FieldDiagram],
        settings: &Settings,
    ) -> Self {
        let mut markup = HashMap::new();

        if let Some(svg) = render_construction(rods, layout, labels, epures, settings) {
            markup.insert(DiagramId::Construction, svg);
        }

        for kind in FieldKind::ALL {
            let plot = sample_field(rods, layout, kind, settings.sampling.plot_samples_per_rod);
            if let Some(svg) = render_field_plot(&plot, rods) {
                markup.insert(DiagramId::Epure(kind), svg);
            }
        }

        RenderedDiagrams { markup }
    }

    pub fn contains(&self, id: DiagramId) -> bool {
        self.markup.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.markup.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markup.is_empty()
    }
}

impl DiagramSource for RenderedDiagrams {
    fn diagram_markup(&self, id: DiagramId) -> Option<String> {
        self.markup.get(&id).cloned()
    }
}

/// Construction with the N, σ and u epures stacked below it.
///
/// Returns `None` for an empty chain or a layout built for a different number of rods.
pub fn render_construction(
    rods: &[RodResult],
    layout: &LayoutGeometry,
    labels: &[LabelPlacement],
    epures: &[FieldDiagram],
    settings: &Settings,
) -> Option<String> {
    if rods.is_empty() || layout.rod_count() != rods.len() {
        return None;
    }
    Some(construction_svg(rods, layout, labels, epures, settings))
}

/// Standalone plot of one sampled field over the physical coordinate.
///
/// For σ the ±[σ] levels of each rod are drawn over that rod's span.
/// Returns `None` when the structure has no length.
pub fn render_field_plot(diagram: &FieldDiagram, rods: &[RodResult]) -> Option<String> {
    let total_length: f64 = rods.iter().map(|r| r.length).sum();
    if !(total_length > 0.0) || diagram.is_empty() {
        return None;
    }
    Some(field_plot_svg(diagram, rods, total_length))
}

/// Schematic of an input structure.
///
/// A malformed chain yields the advisory text instead of a drawing, an
/// empty one a placeholder.
pub fn render_structure(input: &StructureInput, settings: &Settings) -> String {
    let width = settings.layout.min_total_width;

    if let Some(advisory) = input.shape_advisory() {
        message_svg(width, &advisory.to_string(), "#c62828")
    } else if input.rods.is_empty() {
        message_svg(width, "Add rods and nodes", "#888")
    } else {
        schematic_svg(input, settings)
    }
}

/// Extra space above the construction so value labels over positive points stay visible.
fn label_headroom(epures: &[FieldDiagram], band_height: f64) -> f64 {
    let mut headroom: f64 = 0.0;
    for diagram in epures {
        let scale = diagram.range.symmetric_scale(band_height);
        for marker in diagram.markers.iter().filter(|m| m.point.value >= 0.0) {
            let gap = match marker.kind {
                MarkerKind::Boundary => VALUE_LABEL_GAP,
                MarkerKind::Extremum => EXTREMUM_LABEL_GAP,
            };
            let text_y = band_height / 2.0 - marker.point.value * scale - gap;
            headroom = headroom.max(-text_y);
        }
    }
    headroom.ceil()
}

fn construction_svg(
    rods: &[RodResult],
    layout: &LayoutGeometry,
    labels: &[LabelPlacement],
    epures: &[FieldDiagram],
    settings: &Settings,
) -> String {
    let mut out = String::new();
    let band = settings.sampling.epure_height;
    let width = layout.diagram_width;
    let top = BASE_TOP_PADDING + label_headroom(epures, band);
    let guide_bottom = BAND_OFFSET + 3.0 * (band + EPURE_GAP) + band;
    let height = top + guide_bottom + BOTTOM_MARGIN;

    open_svg(&mut out, width, height);
    svg_line!(out, r#"<g transform="translate(0,{:.2})">"#, top);

    let nodes = chain_nodes(rods);
    draw_chain(&mut out, layout, 0.0, |i| {
        let rod = &rods[i];
        RodAnnotations {
            id: rod.rod_id,
            length: rod.length,
            area: None,
            distributed_load: rod.distributed_load,
        }
    });
    draw_nodes(&mut out, layout, &nodes, labels, 0.0, settings);

    svg_line!(out, r##"<g stroke="#999" stroke-dasharray="3,3" stroke-width="1">"##);
    for &x in &layout.node_x {
        svg_line!(out, r#"<line x1="{x:.2}" y1="-10" x2="{x:.2}" y2="{guide_bottom:.2}"/>"#);
    }
    svg_line!(out, "</g>");
    svg_line!(out, "</g>");

    for (index, kind) in FieldKind::ALL.iter().enumerate() {
        if let Some(diagram) = epures.iter().find(|d| d.kind == *kind) {
            let y_offset = top + BAND_OFFSET + (index as f64 + 1.0) * (band + EPURE_GAP);
            write_band(&mut out, diagram, width, band, y_offset);
        }
    }

    svg_line!(
        out,
        r##"<text x="{:.2}" y="{:.2}" text-anchor="middle" font-size="12" fill="#333">x, m</text>"##,
        width / 2.0,
        height - BOTTOM_MARGIN / 2.0
    );
    svg_line!(out, "</svg>");
    out
}

/// One epure band of the construction composite.
fn write_band(out: &mut String, diagram: &FieldDiagram, width: f64, band: f64, y_offset: f64) {
    let color = diagram.kind.color();
    let zero = band / 2.0;
    let scale = diagram.range.symmetric_scale(band);
    let sy = |value: f64| zero - value * scale;

    svg_line!(out, r#"<g transform="translate(0,{y_offset:.2})">"#);
    svg_line!(
        out,
        r#"<text x="15" y="{zero:.2}" transform="rotate(-90,15,{zero:.2})" text-anchor="middle" font-size="12" font-weight="bold" fill="{color}">{}</text>"#,
        escape_html(&diagram.kind.axis_label())
    );
    svg_line!(
        out,
        r##"<line x1="0" y1="{zero:.2}" x2="{width:.2}" y2="{zero:.2}" stroke="#666" stroke-width="1.5"/>"##
    );

    for curve in &diagram.curves {
        if curve.points.is_empty() {
            continue;
        }
        let line: Vec<String> = curve
            .points
            .iter()
            .map(|p| format!("{:.2},{:.2}", p.px, sy(p.value)))
            .collect();
        let baseline: Vec<String> = curve
            .points
            .iter()
            .rev()
            .map(|p| format!("{:.2},{:.2}", p.px, zero))
            .collect();
        svg_line!(
            out,
            r#"<path d="M{} L{} Z" fill="{color}20" stroke="none"/>"#,
            line.join(" "),
            baseline.join(" ")
        );
        svg_line!(
            out,
            r#"<polyline points="{}" fill="none" stroke="{color}" stroke-width="2"/>"#,
            line.join(" ")
        );
    }

    for marker in &diagram.markers {
        let p = marker.point;
        let y = sy(p.value);
        match marker.kind {
            MarkerKind::Boundary => {
                let label_y = if p.value >= 0.0 { y - VALUE_LABEL_GAP } else { y + VALUE_LABEL_GAP };
                svg_line!(out, r#"<circle cx="{:.2}" cy="{y:.2}" r="3.5" fill="{color}"/>"#, p.px);
                svg_line!(
                    out,
                    r#"<text x="{:.2}" y="{label_y:.2}" text-anchor="middle" font-size="9" fill="{color}">{}</text>"#,
                    p.px,
                    exp(p.value, 2)
                );
            }
            MarkerKind::Extremum => {
                let label_y = if p.value >= 0.0 { y - EXTREMUM_LABEL_GAP } else { y + EXTREMUM_LABEL_GAP };
                svg_line!(
                    out,
                    r##"<circle cx="{:.2}" cy="{y:.2}" r="4" fill="gold" stroke="#e65100" stroke-width="1.5"/>"##,
                    p.px
                );
                svg_line!(
                    out,
                    r##"<text x="{:.2}" y="{label_y:.2}" text-anchor="middle" font-size="9" font-weight="bold" fill="#e65100">{}</text>"##,
                    p.px,
                    exp(p.value, 2)
                );
            }
        }
    }

    svg_line!(out, "</g>");
}

fn field_plot_svg(diagram: &FieldDiagram, rods: &[RodResult], total_length: f64) -> String {
    let mut out = String::new();
    let color = diagram.kind.color();
    let (w, h, pad) = (PLOT_WIDTH, PLOT_HEIGHT, PLOT_PADDING);
    let x_scale = (w - 2.0 * pad) / total_length;
    let y_min = diagram.range.min;
    let y_span = diagram.range.span();
    let y_scale = (h - 2.0 * pad) / y_span;
    let sx = |position: f64| pad + position * x_scale;
    let sy = |value: f64| h - pad - (value - y_min) * y_scale;

    let mut node_positions = Vec::with_capacity(rods.len() + 1);
    let mut acc = 0.0;
    node_positions.push(acc);
    for rod in rods {
        acc += rod.length;
        node_positions.push(acc);
    }
    let ticks: Vec<f64> = (0..PLOT_Y_TICKS)
        .map(|i| y_min + y_span * i as f64 / (PLOT_Y_TICKS - 1) as f64)
        .collect();

    svg_line!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="100%" height="{h}" viewBox="0 0 {w} {h}" style="display:block">"#
    );

    // grid
    for &x in &node_positions {
        svg_line!(
            out,
            r##"<line x1="{0:.2}" y1="{pad}" x2="{0:.2}" y2="{1}" stroke="#f0f0f0"/>"##,
            sx(x),
            h - pad
        );
    }
    for &t in &ticks {
        svg_line!(
            out,
            r##"<line x1="{pad}" y1="{0:.2}" x2="{1}" y2="{0:.2}" stroke="#f0f0f0"/>"##,
            sy(t),
            w - pad
        );
    }

    let zero = sy(0.0);
    svg_line!(
        out,
        r##"<line x1="{pad}" y1="{zero:.2}" x2="{}" y2="{zero:.2}" stroke="#666" stroke-width="1.5"/>"##,
        w - pad
    );

    let points: Vec<(f64, f64)> = diagram.points().map(|p| (sx(p.position), sy(p.value))).collect();
    if let (Some(first), Some(last)) = (points.first(), points.last()) {
        let mut fill = format!("M{:.2},{:.2}", first.0, first.1);
        for (x, y) in &points[1..] {
            fill.push_str(&format!(" L{x:.2},{y:.2}"));
        }
        fill.push_str(&format!(" L{:.2},{zero:.2} L{pad},{zero:.2} Z", last.0));
        svg_line!(out, r#"<path d="{fill}" fill="{color}20" stroke="none"/>"#);
    }

    svg_line!(out, r##"<line x1="{pad}" y1="{0}" x2="{1}" y2="{0}" stroke="#333"/>"##, h - pad, w - pad);
    svg_line!(out, r##"<line x1="{pad}" y1="{pad}" x2="{pad}" y2="{}" stroke="#333"/>"##, h - pad);

    for &x in &node_positions {
        svg_line!(
            out,
            r##"<line x1="{0:.2}" y1="{pad}" x2="{0:.2}" y2="{1}" stroke="#999" stroke-dasharray="2,2"/>"##,
            sx(x),
            h - pad
        );
    }

    if diagram.kind == FieldKind::Stress {
        let y_max = y_min + y_span;
        for (rod, span) in rods.iter().zip(node_positions.windows(2)) {
            for level in [rod.allowable_stress, -rod.allowable_stress] {
                if level < y_min || level > y_max {
                    continue;
                }
                svg_line!(
                    out,
                    r##"<line x1="{0:.2}" y1="{1:.2}" x2="{2:.2}" y2="{1:.2}" stroke="#ff6d00" stroke-dasharray="4,2"/>"##,
                    sx(span[0]),
                    sy(level),
                    sx(span[1])
                );
            }
        }
    }

    let line: Vec<String> = points
        .iter()
        .enumerate()
        .map(|(i, (x, y))| format!("{}{x:.2} {y:.2}", if i == 0 { "M" } else { "L" }))
        .collect();
    svg_line!(
        out,
        r#"<path d="{}" fill="none" stroke="{color}" stroke-width="2.5"/>"#,
        line.join(" ")
    );

    for &x in &node_positions {
        svg_line!(
            out,
            r##"<text x="{:.2}" y="{}" text-anchor="middle" font-size="10" fill="#333">{}</text>"##,
            sx(x),
            h - pad + 20.0,
            fixed(x, 1)
        );
    }
    for &t in &ticks {
        svg_line!(
            out,
            r##"<text x="{}" y="{:.2}" text-anchor="end" font-size="10" fill="#333">{}</text>"##,
            pad - 10.0,
            sy(t) + 4.0,
            exp(t, 2)
        );
    }

    svg_line!(
        out,
        r##"<text x="{}" y="{}" text-anchor="middle" font-size="12" fill="#333">x, m</text>"##,
        w / 2.0,
        h - 5.0
    );
    svg_line!(
        out,
        r##"<text x="12" y="{0}" transform="rotate(-90,12,{0})" text-anchor="middle" font-size="12" fill="#333">{1}</text>"##,
        h / 2.0,
        escape_html(&diagram.kind.axis_label())
    );
    svg_line!(out, "</svg>");
    out
}

fn schematic_svg(input: &StructureInput, settings: &Settings) -> String {
    let mut out = String::new();
    let layout = compute_layout(&input.rods, &settings.layout);
    let labels = place_labels(&layout.node_x, &input.nodes, &settings.labels);
    let cy = settings.layout.centerline_y;
    let width = layout.diagram_width;

    open_svg(&mut out, width, SCHEMATIC_HEIGHT);
    draw_chain(&mut out, &layout, cy, |i| {
        let rod = &input.rods[i];
        RodAnnotations {
            id: rod.id,
            length: rod.length,
            area: Some(rod.area),
            distributed_load: rod.distributed_load,
        }
    });
    draw_nodes(&mut out, &layout, &input.nodes, &labels, cy, settings);

    if layout.is_rescaled(&settings.layout) {
        let note = if layout.widened.iter().any(|w| *w) {
            " (short rods enlarged)"
        } else {
            ""
        };
        svg_line!(
            out,
            r##"<text x="{:.2}" y="{:.2}" font-size="10" font-weight="bold" fill="#666">Scale: 1 m = {} px{note}</text>"##,
            settings.layout.node_offset_x,
            SCHEMATIC_HEIGHT - 15.0,
            fixed(layout.length_scale, 1)
        );
    }
    svg_line!(
        out,
        r##"<text x="{:.2}" y="{:.2}" font-size="10" text-anchor="end" fill="#888">Total: {} rods, {} nodes</text>"##,
        width - settings.layout.node_offset_x,
        SCHEMATIC_HEIGHT - 5.0,
        input.rods.len(),
        input.nodes.len()
    );
    svg_line!(out, "</svg>");
    out
}

fn message_svg(width: f64, message: &str, color: &str) -> String {
    let mut out = String::new();
    open_svg(&mut out, width, 60.0);
    svg_line!(
        out,
        r#"<text x="{:.2}" y="35" text-anchor="middle" font-size="13" fill="{color}">{}</text>"#,
        width / 2.0,
        escape_html(message)
    );
    svg_line!(out, "</svg>");
    out
}

fn open_svg(out: &mut String, width: f64, height: f64) {
    svg_line!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width:.0}" height="{height:.0}" viewBox="0 0 {width:.2} {height:.2}" style="background-color:{BACKGROUND}">"#
    );
}

/// Per-rod text and loads shown on the chain.
struct RodAnnotations {
    id: u32,
    length: f64,
    area: Option<f64>,
    distributed_load: f64,
}

/// Rod rectangles, badges and distributed loads around centre line `cy`.
fn draw_chain(
    out: &mut String,
    layout: &LayoutGeometry,
    cy: f64,
    annotations: impl Fn(usize) -> RodAnnotations,
) {
    for (i, pos) in layout.rods.iter().enumerate() {
        let rod = annotations(i);
        let cx = pos.center_x();
        svg_line!(
            out,
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{ROD_FILL}" stroke="{ROD_STROKE}" stroke-width="1"/>"#,
            pos.x,
            cy - pos.height / 2.0,
            pos.width,
            pos.height
        );

        if pos.width > 50.0 {
            svg_line!(
                out,
                r##"<circle cx="{cx:.2}" cy="{:.2}" r="12" fill="#fff" stroke="#333"/>"##,
                cy - 25.0
            );
            svg_line!(
                out,
                r#"<text x="{cx:.2}" y="{:.2}" text-anchor="middle" font-size="11" font-weight="bold">{}</text>"#,
                cy - 21.0,
                rod.id
            );
            svg_line!(
                out,
                r##"<text x="{cx:.2}" y="{:.2}" text-anchor="middle" font-size="9" fill="#666">L={} m</text>"##,
                cy - 42.0,
                fixed(rod.length, 2)
            );
            if let Some(area) = rod.area {
                svg_line!(
                    out,
                    r##"<text x="{cx:.2}" y="{:.2}" text-anchor="middle" font-size="8" fill="#888">A={} m²</text>"##,
                    cy - 53.0,
                    exp(area, 2)
                );
            }
        } else {
            svg_line!(
                out,
                r##"<circle cx="{cx:.2}" cy="{:.2}" r="8" fill="#fff" stroke="#333"/>"##,
                cy - 25.0
            );
            svg_line!(
                out,
                r#"<text x="{cx:.2}" y="{:.2}" text-anchor="middle" font-size="8" font-weight="bold">{}</text>"#,
                cy - 22.0,
                rod.id
            );
        }

        if rod.distributed_load != 0.0 {
            let direction = rod.distributed_load.signum();
            let color = if rod.distributed_load > 0.0 { "green" } else { "red" };
            if layout.widened.get(i).copied().unwrap_or(false) {
                draw_arrow(out, cx, cx + 10.0 * direction, cy, color, 2.0, 3.0);
            } else {
                let count = ((pos.width / 15.0).floor() as usize).max(2);
                let spacing = pos.width / (count as f64 + 1.0);
                for k in 1..=count {
                    let x = pos.x + spacing * k as f64;
                    draw_arrow(out, x, x + 8.0 * direction, cy, color, 1.5, 3.0);
                }
            }
        }
    }
}

/// Supports, concentrated forces, labels and node markers.
fn draw_nodes(
    out: &mut String,
    layout: &LayoutGeometry,
    nodes: &[NodeSpec],
    labels: &[LabelPlacement],
    cy: f64,
    settings: &Settings,
) {
    let last = layout.node_x.len().saturating_sub(1);
    for (i, (&x, node)) in layout.node_x.iter().zip(nodes).enumerate() {
        if node.fixed {
            svg_line!(
                out,
                r##"<line x1="{x:.2}" y1="{:.2}" x2="{x:.2}" y2="{:.2}" stroke="#000" stroke-width="3"/>"##,
                cy - 10.0,
                cy + 20.0
            );
            // hatching on the outside of the chain
            let start = if i == 0 && last > 0 { x - 8.0 } else { x };
            for k in 0..6 {
                let y = cy - 10.0 + k as f64 * 5.0;
                svg_line!(
                    out,
                    r##"<line x1="{start:.2}" y1="{y:.2}" x2="{:.2}" y2="{:.2}" stroke="#000" stroke-width="1.5"/>"##,
                    start + 8.0,
                    y + 4.0
                );
            }
        }

        if node.has_force() {
            let (dx, color) = if node.external_force > 0.0 {
                (settings.layout.arrow_length, "blue")
            } else {
                (-settings.layout.arrow_length, "orange")
            };
            draw_arrow(out, x, x + dx, cy, color, 2.0, 4.0);
        }

        let label = labels.get(i).copied().unwrap_or(LabelPlacement {
            y: settings.labels.baseline_y,
            offset: 0.0,
        });
        svg_line!(
            out,
            r##"<text x="{:.2}" y="{:.2}" text-anchor="middle" font-size="10" font-weight="bold" fill="#333">n{}</text>"##,
            x + label.offset,
            cy + label.y - settings.layout.centerline_y,
            node.id
        );
        svg_line!(
            out,
            r##"<circle cx="{x:.2}" cy="{cy:.2}" r="3" fill="#fff" stroke="#333" stroke-width="1.5"/>"##
        );
    }
}

/// Horizontal arrow from `x1` to `x2` with a filled head.
fn draw_arrow(out: &mut String, x1: f64, x2: f64, y: f64, color: &str, width: f64, head: f64) {
    let dir = (x2 - x1).signum();
    svg_line!(
        out,
        r#"<line x1="{x1:.2}" y1="{y:.2}" x2="{x2:.2}" y2="{y:.2}" stroke="{color}" stroke-width="{width}"/>"#
    );
    svg_line!(
        out,
        r#"<path d="M{:.2},{:.2} L{:.2},{:.2} L{x2:.2},{y:.2} Z" fill="{color}"/>"#,
        x2 - dir * head,
        y - head / 1.5,
        x2 - dir * head,
        y + head / 1.5
    );
}
