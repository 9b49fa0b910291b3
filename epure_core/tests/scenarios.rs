//! End-to-end scenarios through the public API.

use std::env::temp_dir;
use std::fs;

use approx::assert_relative_eq;
use epure_core::layout::{compute_layout, HeightMapping};
use epure_core::model::{NodeSpec, RodResult, RodSpec, StructureInput};
use epure_core::report::{ReportSection, ReportSections};
use epure_core::sampler::MarkerKind;
use epure_core::step_table::build_step_table;
use epure_core::{load_structure, save_structure, FullResult, PolynomialField, Session, Settings};

fn node(id: u32, fixed: bool, external_force: f64) -> NodeSpec {
    NodeSpec {
        id,
        fixed,
        external_force,
    }
}

fn rod(rod_id: u32, length: f64, area: f64, n: f64, du: f64) -> RodResult {
    RodResult {
        rod_id,
        length,
        area,
        elastic_modulus: 2.0e11,
        allowable_stress: 1.6e8,
        distributed_load: 0.0,
        node_related_to: [node(rod_id, rod_id == 0, 0.0), node(rod_id + 1, false, n)],
        axial_force_coeffs: PolynomialField::linear(n, 0.0),
        stress_coeffs: PolynomialField::linear(n / area, 0.0),
        displacement_coeffs: PolynomialField::quadratic(0.0, du, 0.0),
        max_stress_on_the_rod: (n / area).abs(),
    }
}

fn spec(id: u32, length: f64, area: f64) -> RodSpec {
    RodSpec {
        id,
        length,
        area,
        elastic_modulus: 2.0e11,
        allowable_stress: 1.6e8,
        distributed_load: 0.0,
    }
}

#[test]
fn uniform_chain_has_identical_rods() {
    let rods: Vec<RodSpec> = (0..4).map(|i| spec(i, 1.0, 0.01)).collect();
    let layout = compute_layout(&rods, &Settings::default().layout);

    let first = layout.rods[0];
    for geometry in &layout.rods {
        assert_relative_eq!(geometry.width, first.width);
        assert_relative_eq!(geometry.height, first.height);
    }

    let spacing = layout.node_x[1] - layout.node_x[0];
    for pair in layout.node_x.windows(2) {
        assert_relative_eq!(pair[1] - pair[0], spacing, epsilon = 1e-9);
    }
}

#[test]
fn wide_area_spread_uses_log_heights() {
    let settings = Settings::default().layout;
    let rods = [spec(0, 1.0, 0.001), spec(1, 5.0, 0.05)];
    let layout = compute_layout(&rods, &settings);

    assert_eq!(layout.height_mapping, HeightMapping::Logarithmic);
    for geometry in &layout.rods {
        assert!(geometry.height >= settings.min_rod_height);
        assert!(geometry.height <= settings.max_rod_height);
    }
    assert!(layout.rods[1].height > layout.rods[0].height);
}

#[test]
fn step_table_of_a_linear_rod() {
    let rows = build_step_table(&[rod(0, 2.0, 0.01, 100.0, 0.002)], 1.0);

    let xs: Vec<f64> = rows.iter().map(|r| r.x).collect();
    let us: Vec<f64> = rows.iter().map(|r| r.u).collect();
    assert_eq!(xs, vec![0.0, 1.0, 2.0]);
    assert_relative_eq!(us[0], 0.0);
    assert_relative_eq!(us[1], 0.002);
    assert_relative_eq!(us[2], 0.004);
    assert!(rows.iter().all(|r| r.n == 100.0));

    let session = Session::new(
        FullResult {
            displacements: vec![0.0, 0.004],
            result_output: vec![rod(0, 2.0, 0.01, 100.0, 0.002)],
        },
        Settings::default(),
    );
    let extrema = session
        .epures()
        .iter()
        .flat_map(|d| d.markers.iter())
        .filter(|m| m.kind == MarkerKind::Extremum)
        .count();
    assert_eq!(extrema, 0);
}

#[test]
fn repeated_queries_get_unique_ids_in_order() {
    let mut session = Session::new(
        FullResult {
            displacements: vec![0.0, 0.004],
            result_output: vec![rod(0, 2.0, 0.01, 100.0, 0.002)],
        },
        Settings::default(),
    );

    let records: Vec<_> = [0.0, 1.0, 1.0]
        .iter()
        .map(|x| session.query(0, *x).unwrap())
        .collect();

    assert_ne!(records[0].id, records[1].id);
    assert_ne!(records[1].id, records[2].id);
    assert_ne!(records[0].id, records[2].id);
    assert!(records.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    assert_eq!(session.history().len(), 3);
}

#[test]
fn structure_survives_save_and_load() {
    let path = temp_dir().join("epure_scenario_structure.json");
    let structure = StructureInput {
        rods: vec![spec(0, 1.0, 0.01), spec(1, 2.5, 0.02)],
        nodes: vec![node(0, true, 0.0), node(1, false, -500.0), node(2, false, 250.0)],
    };

    save_structure(&structure, &path).unwrap();
    assert_eq!(load_structure(&path).unwrap(), structure);

    let _ = fs::remove_file(&path);
}

#[test]
fn report_contains_only_selected_sections() {
    let mut session = Session::new(
        FullResult {
            displacements: vec![0.0, 0.004, 0.005],
            result_output: vec![rod(0, 2.0, 0.01, 100.0, 0.002), rod(1, 1.0, 0.02, 50.0, 0.001)],
        },
        Settings::default(),
    );
    session.query(1, 0.5).unwrap();

    let sections = ReportSections::all()
        .without(ReportSection::EpureSigma)
        .without(ReportSection::StepTable);
    let report = session.report(&sections).unwrap();

    assert!(!report.included.contains(&ReportSection::EpureSigma));
    assert!(!report.included.contains(&ReportSection::StepTable));
    assert!(report.included.contains(&ReportSection::SectionHistory));
    assert!(!report.html.contains("Diagram of normal stresses"));
    assert!(report.html.contains("Diagram of axial forces"));
    assert!(report.file_name.starts_with("epure_report_"));
}
