//! # Post-processing Session
//!
//! Owns one solver result and everything derived from it.
//!
//! ```text
//! Session
//! ├── result: FullResult (one calculation snapshot)
//! ├── settings: Settings
//! ├── layout, labels, epures, diagrams   <- rebuilt when the result changes
//! ├── step_rows                          <- rebuilt when the result or step changes
//! └── queries: SectionQueryCalculator   <- grows on user request only
//! ```
//!
//! Derived artifacts are always rebuilt in full from the current snapshot;
//! nothing is patched incrementally.
//!
//! ## Example
//!
//! ```rust
//! use epure_core::model::FullResult;
//! use epure_core::session::Session;
//! use epure_core::settings::Settings;
//!
//! let mut session = Session::new(FullResult::default(), Settings::default());
//! session.set_step(0.25);
//! assert!(session.step_rows().is_empty());
//! assert!(session.report(&session.default_sections()).is_err());
//! ```

use tracing::{debug, warn};

use crate::errors::EpureResult;
use crate::labels::{place_labels, LabelPlacement};
use crate::layout::{compute_layout, LayoutGeometry};
use crate::model::{FullResult, ShapeAdvisory};
use crate::render::RenderedDiagrams;
use crate::report::{assemble_report, Report, ReportInput, ReportSections};
use crate::sampler::{sample_all, FieldDiagram};
use crate::section_query::{SectionQueryCalculator, SectionQueryRecord};
use crate::settings::Settings;
use crate::step_table::{build_step_table, csv_file_name, to_csv, SampleRow};

#[derive(Debug, Clone)]
pub struct Session {
    settings: Settings,
    result: FullResult,
    step: f64,
    layout: LayoutGeometry,
    labels: Vec<LabelPlacement>,
    epures: Vec<FieldDiagram>,
    diagrams: RenderedDiagrams,
    step_rows: Vec<SampleRow>,
    queries: SectionQueryCalculator,
}

impl Session {
    /// Start a session; the step defaults to `settings.sampling.default_step`.
    pub fn new(result: FullResult, settings: Settings) -> Self {
        let step = settings.sampling.default_step;
        let mut session = Session {
            layout: LayoutGeometry::default(),
            labels: Vec::new(),
            epures: Vec::new(),
            diagrams: RenderedDiagrams::default(),
            step_rows: Vec::new(),
            queries: SectionQueryCalculator::new(result.result_output.clone()),
            settings,
            result,
            step,
        };
        session.rebuild();
        session
    }

    /// Swap in a new calculation and rebuild every derived artifact.
    ///
    /// Query history is kept; records for rods that no longer exist stay
    /// in the log unflagged.
    pub fn replace_results(&mut self, result: FullResult) {
        self.queries.replace_rods(result.result_output.clone());
        self.result = result;
        self.rebuild();
    }

    /// Change the uniform step; only the step table is rebuilt.
    pub fn set_step(&mut self, step: f64) {
        self.step = step;
        self.step_rows = build_step_table(self.result.rods(), step);
        debug!(step, rows = self.step_rows.len(), "Rebuilt step table");
    }

    fn rebuild(&mut self) {
        if let Some(advisory) = self.result.shape_advisory() {
            warn!(%advisory, "Result shape mismatch");
        }

        let rods = self.result.rods();
        self.layout = compute_layout(rods, &self.settings.layout);
        self.labels = place_labels(&self.layout.node_x, &self.result.nodes(), &self.settings.labels);
        self.epures = sample_all(rods, &self.layout, self.settings.sampling.samples_per_rod);
        self.diagrams = RenderedDiagrams::render(rods, &self.layout, &self.labels, &self.epures, &self.settings);
        self.step_rows = build_step_table(rods, self.step);

        debug!(
            rods = rods.len(),
            diagrams = self.diagrams.len(),
            rows = self.step_rows.len(),
            "Rebuilt session artifacts"
        );
    }

    /// Evaluate one section and append it to the history.
    pub fn query(&mut self, rod_id: u32, x: f64) -> EpureResult<SectionQueryRecord> {
        self.queries.query(rod_id, x).cloned()
    }

    pub fn clear_history(&mut self) {
        self.queries.clear();
    }

    pub fn history(&self) -> &[SectionQueryRecord] {
        self.queries.history()
    }

    /// Section selection offered before the user changes anything.
    pub fn default_sections(&self) -> ReportSections {
        ReportSections::defaults_for(self.queries.len(), self.step_rows.len())
    }

    /// Assemble a report from the current artifacts.
    pub fn report(&self, sections: &ReportSections) -> EpureResult<Report> {
        let input = ReportInput {
            rods: self.result.rods(),
            displacements: &self.result.displacements,
            history: self.queries.history(),
            step_rows: &self.step_rows,
            diagrams: &self.diagrams,
        };
        assemble_report(&input, sections, &self.settings.report)
    }

    /// Step table as CSV with its download name.
    pub fn step_csv(&self) -> (String, String) {
        (csv_file_name(self.step), to_csv(&self.step_rows))
    }

    pub fn shape_advisory(&self) -> Option<ShapeAdvisory> {
        self.result.shape_advisory()
    }

    pub fn result(&self) -> &FullResult {
        &self.result
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn layout(&self) -> &LayoutGeometry {
        &self.layout
    }

    pub fn labels(&self) -> &[LabelPlacement] {
        &self.labels
    }

    pub fn epures(&self) -> &[FieldDiagram] {
        &self.epures
    }

    pub fn diagrams(&self) -> &RenderedDiagrams {
        &self.diagrams
    }

    pub fn step_rows(&self) -> &[SampleRow] {
        &self.step_rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::rod;
    use crate::render::{DiagramId, DiagramSource};
    use crate::report::ReportSection;

    fn result() -> FullResult {
        FullResult {
            displacements: vec![0.0, 0.004, 0.004],
            result_output: vec![rod(0, 2.0, 0.01, 100.0, 0.002), rod(1, 1.0, 0.02, -40.0, 0.0)],
        }
    }

    #[test]
    fn test_new_session_derives_everything() {
        let session = Session::new(result(), Settings::default());
        assert_eq!(session.layout().rod_count(), 2);
        assert_eq!(session.labels().len(), 3);
        assert_eq!(session.epures().len(), 3);
        assert!(session.diagrams().contains(DiagramId::Construction));
        // step 0.5: 5 rows on the 2 m rod, 3 on the 1 m rod
        assert_eq!(session.step_rows().len(), 8);
        assert!(session.shape_advisory().is_none());
    }

    #[test]
    fn test_new_session_layout_matches_results() {
        let settings = Settings::default();
        let session = Session::new(result(), settings.clone());
        assert_eq!(session.layout(), &compute_layout(result().rods(), &settings.layout));

        let empty = Session::new(FullResult::default(), settings.clone());
        assert_eq!(empty.layout().rod_count(), 0);
        assert_eq!(empty.layout().node_x, vec![settings.layout.node_offset_x]);
    }

    #[test]
    fn test_set_step_rebuilds_only_the_table() {
        let mut session = Session::new(result(), Settings::default());
        let layout = session.layout().clone();
        let construction = session.diagrams().diagram_markup(DiagramId::Construction);

        session.set_step(1.0);
        assert_eq!(session.step_rows().len(), 5);
        assert_eq!(session.layout(), &layout);
        assert_eq!(session.diagrams().diagram_markup(DiagramId::Construction), construction);

        session.set_step(0.0);
        assert!(session.step_rows().is_empty());
        assert!(!session.default_sections().step_table);
    }

    #[test]
    fn test_replace_results_recomputes() {
        let mut session = Session::new(result(), Settings::default());
        session.query(0, 1.0).unwrap();

        session.replace_results(FullResult {
            displacements: vec![0.0, 0.1],
            result_output: vec![rod(7, 4.0, 0.05, 10.0, 0.0)],
        });

        assert_eq!(session.layout().rod_count(), 1);
        assert_eq!(session.step_rows().len(), 9);
        assert_eq!(session.history().len(), 1);
        assert!(session.query(0, 1.0).is_err());
        assert!(session.query(7, 4.0).is_ok());
    }

    #[test]
    fn test_report_uses_current_state() {
        let mut session = Session::new(result(), Settings::default());
        assert!(!session.default_sections().section_history);

        session.query(1, 0.5).unwrap();
        let sections = session.default_sections();
        assert!(sections.section_history);

        let report = session.report(&sections).unwrap();
        assert_eq!(report.included, ReportSection::ALL.to_vec());

        session.clear_history();
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_step_csv() {
        let mut session = Session::new(result(), Settings::default());
        session.set_step(1.0);
        let (name, csv) = session.step_csv();
        assert_eq!(name, "step_table_1m.csv");
        assert_eq!(csv.lines().count(), 6);
    }

    #[test]
    fn test_mismatched_displacements_are_advisory() {
        let mut broken = result();
        broken.displacements.pop();
        let session = Session::new(broken, Settings::default());
        let advisory = session.shape_advisory().unwrap();
        assert_eq!(advisory.node_count, 2);
        // still fully usable
        assert_eq!(session.epures().len(), 3);
    }
}
