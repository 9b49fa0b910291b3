//! # Report Assembly
//!
//! Merges a user-selected subset of sections into one static HTML document.
//!
//! ## Architecture
//!
//! - The page skeleton is an embedded string template
//! - Data is injected with `{{PLACEHOLDER}}` replacement
//! - Diagrams are pulled from a [`DiagramSource`] and embedded verbatim
//! - Nothing is recomputed here; tables are read from finished artifacts
//!
//! A selected diagram the source cannot provide is left out with a warning.
//! Only a result set with no rods fails outright.
//!
//! ## Example
//!
//! ```rust,ignore
//! let input = ReportInput {
//!     rods: result.rods(),
//!     displacements: &result.displacements,
//!     history: calculator.history(),
//!     step_rows: &rows,
//!     diagrams: &rendered,
//! };
//! let sections = ReportSections::defaults_for(input.history.len(), input.step_rows.len());
//! let report = assemble_report(&input, &sections, &settings.report)?;
//! write_artifact(Path::new("."), &report.file_name, &report.html)?;
//! ```

use std::fmt::Write;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::{EpureError, EpureResult};
use crate::field::FieldKind;
use crate::format::{escape_html, exp, fixed};
use crate::model::RodResult;
use crate::render::{DiagramId, DiagramSource};
use crate::section_query::SectionQueryRecord;
use crate::settings::ReportSettings;
use crate::step_table::SampleRow;

// ============================================================================
// Section Selection
// ============================================================================

/// One optional block of the report, in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportSection {
    Displacements,
    Construction,
    EpureN,
    EpureSigma,
    EpureU,
    SummaryTable,
    SectionHistory,
    StepTable,
}

impl ReportSection {
    pub const ALL: [ReportSection; 8] = [
        ReportSection::Displacements,
        ReportSection::Construction,
        ReportSection::EpureN,
        ReportSection::EpureSigma,
        ReportSection::EpureU,
        ReportSection::SummaryTable,
        ReportSection::SectionHistory,
        ReportSection::StepTable,
    ];

    /// Name used on the command line and in JSON
    pub fn key(self) -> &'static str {
        match self {
            ReportSection::Displacements => "displacements",
            ReportSection::Construction => "construction",
            ReportSection::EpureN => "epure-n",
            ReportSection::EpureSigma => "epure-sigma",
            ReportSection::EpureU => "epure-u",
            ReportSection::SummaryTable => "summary-table",
            ReportSection::SectionHistory => "section-history",
            ReportSection::StepTable => "step-table",
        }
    }

    /// Diagram embedded by this section, if it is a diagram section
    pub fn diagram(self) -> Option<DiagramId> {
        match self {
            ReportSection::Construction => Some(DiagramId::Construction),
            ReportSection::EpureN => Some(DiagramId::Epure(FieldKind::AxialForce)),
            ReportSection::EpureSigma => Some(DiagramId::Epure(FieldKind::Stress)),
            ReportSection::EpureU => Some(DiagramId::Epure(FieldKind::Displacement)),
            _ => None,
        }
    }
}

impl FromStr for ReportSection {
    type Err = EpureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReportSection::ALL
            .iter()
            .copied()
            .find(|section| section.key() == s)
            .ok_or_else(|| {
                let known: Vec<&str> = ReportSection::ALL.iter().map(|s| s.key()).collect();
                EpureError::invalid_input("section", s, format!("Expected one of: {}", known.join(", ")))
            })
    }
}

/// Inclusion flag per section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSections {
    pub displacements: bool,
    pub construction: bool,
    pub epure_n: bool,
    pub epure_sigma: bool,
    pub epure_u: bool,
    pub summary_table: bool,
    pub section_history: bool,
    pub step_table: bool,
}

impl ReportSections {
    pub fn all() -> Self {
        ReportSections {
            displacements: true,
            construction: true,
            epure_n: true,
            epure_sigma: true,
            epure_u: true,
            summary_table: true,
            section_history: true,
            step_table: true,
        }
    }

    pub fn none() -> Self {
        let mut sections = Self::all();
        for section in ReportSection::ALL {
            sections.set(section, false);
        }
        sections
    }

    /// Everything on; the history and step table only when they have rows.
    pub fn defaults_for(history_len: usize, step_rows_len: usize) -> Self {
        ReportSections {
            section_history: history_len > 0,
            step_table: step_rows_len > 0,
            ..Self::all()
        }
    }

    pub fn includes(&self, section: ReportSection) -> bool {
        *self.flag(section)
    }

    pub fn set(&mut self, section: ReportSection, on: bool) {
        *self.flag_mut(section) = on;
    }

    pub fn without(mut self, section: ReportSection) -> Self {
        self.set(section, false);
        self
    }

    pub fn selected(&self) -> Vec<ReportSection> {
        ReportSection::ALL.iter().copied().filter(|s| self.includes(*s)).collect()
    }

    fn flag(&self, section: ReportSection) -> &bool {
        match section {
            ReportSection::Displacements => &self.displacements,
            ReportSection::Construction => &self.construction,
            ReportSection::EpureN => &self.epure_n,
            ReportSection::EpureSigma => &self.epure_sigma,
            ReportSection::EpureU => &self.epure_u,
            ReportSection::SummaryTable => &self.summary_table,
            ReportSection::SectionHistory => &self.section_history,
            ReportSection::StepTable => &self.step_table,
        }
    }

    fn flag_mut(&mut self, section: ReportSection) -> &mut bool {
        match section {
            ReportSection::Displacements => &mut self.displacements,
            ReportSection::Construction => &mut self.construction,
            ReportSection::EpureN => &mut self.epure_n,
            ReportSection::EpureSigma => &mut self.epure_sigma,
            ReportSection::EpureU => &mut self.epure_u,
            ReportSection::SummaryTable => &mut self.summary_table,
            ReportSection::SectionHistory => &mut self.section_history,
            ReportSection::StepTable => &mut self.step_table,
        }
    }
}

impl Default for ReportSections {
    fn default() -> Self {
        Self::all()
    }
}

// ============================================================================
// Template
// ============================================================================

const REPORT_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="{{LANG}}">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{{TITLE}}</title>
  <style>
    body { font-family: Arial, sans-serif; line-height: 1.6; color: #333; max-width: 1200px; margin: 0 auto; padding: 20px; }
    header { text-align: center; margin-bottom: 30px; border-bottom: 2px solid #4a90e2; padding-bottom: 15px; }
    h1 { color: #2c3e50; margin: 10px 0; }
    h2 { color: #3498db; margin: 25px 0 15px; }
    h3 { color: #2980b9; margin: 20px 0 12px; }
    .meta { background: #f8f9fa; padding: 10px; border-radius: 4px; margin: 15px 0; }
    .displacements { display: flex; flex-wrap: wrap; gap: 10px; }
    .disp-card { background: #e3f2fd; padding: 8px 16px; border-radius: 4px; min-width: 120px; text-align: center; }
    table { width: 100%; border-collapse: collapse; margin: 20px 0; }
    th, td { border: 1px solid #ddd; padding: 8px; text-align: center; }
    th { background-color: #4a90e2; color: white; }
    .epure-svg { margin: 20px 0; border: 1px solid #eee; border-radius: 4px; overflow: hidden; }
    .boundary { background-color: #e8f5e9; }
    .safe { color: #2e7d32; }
    .unsafe { color: #e53935; }
    footer { margin-top: 40px; padding-top: 20px; border-top: 1px solid #eee; text-align: center; color: #777; font-size: 0.9em; }
  </style>
</head>
<body>
  <header>
    <h1>{{TITLE}}</h1>
    <h2>{{SUBTITLE}}</h2>
    <div class="meta">
      <p><strong>Generated:</strong> {{GENERATED}}</p>
      <p><strong>Rods:</strong> {{ROD_COUNT}}, <strong>nodes:</strong> {{NODE_COUNT}}</p>
    </div>
  </header>
{{SECTIONS}}
  <footer>
    {{FOOTER}}
  </footer>
</body>
</html>
"##;

// ============================================================================
// Assembly
// ============================================================================

/// Finished artifacts a report is assembled from.
pub struct ReportInput<'a> {
    pub rods: &'a [RodResult],
    pub displacements: &'a [f64],
    pub history: &'a [SectionQueryRecord],
    pub step_rows: &'a [SampleRow],
    pub diagrams: &'a dyn DiagramSource,
}

/// One generated document.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// Download name, e.g. `epure_report_2025-01-31.html`
    pub file_name: String,
    pub html: String,
    pub generated_at: DateTime<Utc>,
    /// Sections that actually made it into the document
    pub included: Vec<ReportSection>,
}

/// Assemble a report stamped with the current time.
pub fn assemble_report(
    input: &ReportInput<'_>,
    sections: &ReportSections,
    settings: &ReportSettings,
) -> EpureResult<Report> {
    assemble_report_at(input, sections, settings, Utc::now())
}

/// Assemble a report stamped with `generated_at`.
///
/// Identical inputs and timestamp give byte-identical output.
pub fn assemble_report_at(
    input: &ReportInput<'_>,
    sections: &ReportSections,
    settings: &ReportSettings,
    generated_at: DateTime<Utc>,
) -> EpureResult<Report> {
    if input.rods.is_empty() {
        return Err(EpureError::report_failed("There are no rod results to report"));
    }

    let mut body = String::new();
    let mut included = Vec::new();

    for section in sections.selected() {
        let block = match section.diagram() {
            Some(id) => match input.diagrams.diagram_markup(id) {
                Some(svg) => Some(diagram_section(&id.title(), &svg)),
                None => {
                    warn!(section = section.key(), "Diagram markup unavailable, omitting section");
                    None
                }
            },
            None => table_section(section, input),
        };

        if let Some(block) = block {
            body.push_str(&block);
            included.push(section);
        }
    }

    let html = REPORT_TEMPLATE
        .replace("{{LANG}}", &template_text(&settings.language))
        .replace("{{TITLE}}", &template_text(&settings.title))
        .replace("{{SUBTITLE}}", &template_text(&settings.subtitle))
        .replace("{{GENERATED}}", &generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .replace("{{ROD_COUNT}}", &input.rods.len().to_string())
        .replace("{{NODE_COUNT}}", &(input.rods.len() + 1).to_string())
        .replace("{{FOOTER}}", &template_text(&settings.footer))
        .replace("{{SECTIONS}}", &body);

    let keys: Vec<&str> = included.iter().map(|s| s.key()).collect();
    info!(sections = ?keys, bytes = html.len(), "Assembled report");

    Ok(Report {
        file_name: report_file_name(generated_at),
        html,
        generated_at,
        included,
    })
}

/// Escaped settings text that can no longer form a `{{PLACEHOLDER}}`.
fn template_text(s: &str) -> String {
    escape_html(s).replace('{', "&#123;")
}

pub fn report_file_name(date: DateTime<Utc>) -> String {
    format!("epure_report_{}.html", date.format("%Y-%m-%d"))
}

/// Table-backed sections. Empty data omits the section.
fn table_section(section: ReportSection, input: &ReportInput<'_>) -> Option<String> {
    match section {
        ReportSection::Displacements if !input.displacements.is_empty() => {
            Some(displacements_section(input.displacements))
        }
        ReportSection::SummaryTable => Some(summary_section(input.rods)),
        ReportSection::SectionHistory if !input.history.is_empty() => {
            Some(history_section(input.history, input.rods))
        }
        ReportSection::StepTable if !input.step_rows.is_empty() => Some(step_section(input.step_rows)),
        _ => None,
    }
}

fn diagram_section(title: &str, svg: &str) -> String {
    format!(
        "  <section>\n    <h3>{}</h3>\n    <div class=\"epure-svg\">{}</div>\n  </section>\n",
        escape_html(title),
        svg
    )
}

fn displacements_section(displacements: &[f64]) -> String {
    let mut out = String::from("  <section>\n    <h3>Nodal displacements Δ, m</h3>\n    <div class=\"displacements\">\n");
    for (i, u) in displacements.iter().enumerate() {
        let _ = writeln!(
            out,
            "      <div class=\"disp-card\"><strong>Node {i}</strong><br>{}</div>",
            exp(*u, 4)
        );
    }
    out.push_str("    </div>\n  </section>\n");
    out
}

fn summary_section(rods: &[RodResult]) -> String {
    let mut out = String::from(
        "  <section>\n    <h3>Rod summary</h3>\n    <table>\n      <thead>\n        <tr><th>No.</th><th>L, m</th><th>A, m²</th><th>[σ], Pa</th><th>max|σ|, Pa</th><th>Strength</th><th>N₀, N</th><th>Nₗ, N</th></tr>\n      </thead>\n      <tbody>\n",
    );
    for rod in rods {
        let _ = writeln!(
            out,
            "        <tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td>{}<td>{}</td><td>{}</td></tr>",
            rod.rod_id,
            fixed(rod.length, 2),
            exp(rod.area, 1),
            exp(rod.allowable_stress, 1),
            exp(rod.max_stress_on_the_rod, 1),
            safety_cell(rod.is_safe()),
            fixed(rod.start_axial_force(), 0),
            fixed(rod.end_axial_force(), 0)
        );
    }
    out.push_str("      </tbody>\n    </table>\n  </section>\n");
    out
}

fn history_section(history: &[SectionQueryRecord], rods: &[RodResult]) -> String {
    let mut out = format!(
        "  <section>\n    <h3>Section query history ({})</h3>\n    <table>\n      <thead>\n        <tr><th>Rod</th><th>x, m</th><th>N(x), N</th><th>σ(x), Pa</th><th>u(x), m</th><th>Strength</th></tr>\n      </thead>\n      <tbody>\n",
        history.len()
    );
    for record in history {
        // rods that no longer exist are not flagged
        let safe = rods
            .iter()
            .find(|r| r.rod_id == record.rod_id)
            .map_or(true, |r| r.is_stress_safe(record.sigma));
        let _ = writeln!(
            out,
            "        <tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td>{}</tr>",
            record.rod_id,
            fixed(record.x, 3),
            exp(record.n, 4),
            exp(record.sigma, 4),
            exp(record.u, 6),
            safety_cell(safe)
        );
    }
    out.push_str("      </tbody>\n    </table>\n  </section>\n");
    out
}

fn step_section(rows: &[SampleRow]) -> String {
    let mut out = format!(
        "  <section>\n    <h3>Uniform step table ({} points)</h3>\n    <table>\n      <thead>\n        <tr><th>Rod</th><th>x, m</th><th>N(x), N</th><th>σ(x), Pa</th><th>u(x), m</th><th>Boundary</th></tr>\n      </thead>\n      <tbody>\n",
        rows.len()
    );
    for row in rows {
        let _ = writeln!(
            out,
            "        <tr{}><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            if row.is_boundary { " class=\"boundary\"" } else { "" },
            row.rod_id,
            fixed(row.x, 4),
            exp(row.n, 3),
            exp(row.sigma, 3),
            exp(row.u, 5),
            if row.is_boundary { "✓" } else { "" }
        );
    }
    out.push_str(
        "      </tbody>\n    </table>\n    <p style=\"font-size: 0.9em; color: #666;\">Highlighted rows are rod boundaries (x = 0 and x = L<sub>i</sub>). Coordinates restart at x = 0 on every rod.</p>\n  </section>\n",
    );
    out
}

fn safety_cell(safe: bool) -> &'static str {
    if safe {
        "<td class=\"safe\">✓</td>"
    } else {
        "<td class=\"unsafe\">✗</td>"
    }
}
