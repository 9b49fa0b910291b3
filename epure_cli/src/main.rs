//! # Epure CLI Application
//!
//! Command-line front end over `epure_core`. Reads a solver result JSON and
//! prints or writes the derived artifacts.
//!
//! ## Commands
//!
//! - `epure layout <results>` - Pixel geometry of the rod chain
//! - `epure table <results> [--step S]` - Uniform-step table as CSV
//! - `epure query <results> --at ROD:X` - Point values at sections
//! - `epure diagrams <results> --out DIR` - Export the SVG diagrams
//! - `epure report <results>` - Self-contained HTML report
//! - `epure check <structure>` - Validate a structure and draw its schematic

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use epure_core::file_io::{load_results, load_structure, write_artifact};
use epure_core::input_field::{InputPolicy, NumericInput};
use epure_core::layout::compute_layout;
use epure_core::render::{render_structure, DiagramId, DiagramSource};
use epure_core::report::{ReportSection, ReportSections};
use epure_core::section_query::SectionQueryRecord;
use epure_core::{EpureError, EpureResult, Session, Settings};

/// Post-processing for solved axial rod structures
#[derive(Parser)]
#[command(name = "epure")]
#[command(about = "Diagrams, tables and reports for solved rod structures", long_about = None)]
#[command(version)]
struct Cli {
    /// JSON file overriding layout, sampling and report settings
    #[arg(long, global = true, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the pixel layout of the rod chain
    Layout {
        results: PathBuf,

        /// Print the full geometry as JSON
        #[arg(long)]
        json: bool,
    },

    /// Build the uniform-step table
    Table {
        results: PathBuf,

        /// Sampling step in metres
        #[arg(long)]
        step: Option<String>,

        /// Write the CSV into this directory instead of stdout
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
    },

    /// Evaluate N, σ and u at given sections
    Query {
        results: PathBuf,

        /// Section as rod id and local coordinate, e.g. `0:1.25`
        #[arg(long = "at", value_name = "ROD:X", required = true)]
        at: Vec<String>,
    },

    /// Export the construction and field plots as SVG files
    Diagrams {
        results: PathBuf,

        #[arg(long, value_name = "DIR", default_value = ".")]
        out: PathBuf,
    },

    /// Assemble the HTML report
    Report {
        results: PathBuf,

        /// Sampling step in metres for the step table
        #[arg(long)]
        step: Option<String>,

        /// Sections to record in the history, e.g. `0:1.25`
        #[arg(long = "at", value_name = "ROD:X")]
        at: Vec<String>,

        /// Leave a section out (e.g. `step-table`, `epure-sigma`)
        #[arg(long, value_name = "SECTION")]
        skip: Vec<String>,

        #[arg(long, value_name = "DIR", default_value = ".")]
        out: PathBuf,
    },

    /// Validate a structure description and optionally draw its schematic
    Check {
        structure: PathBuf,

        /// Write `structure.svg` into this directory
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> EpureResult<()> {
    let settings = match &cli.settings {
        Some(path) => Settings::from_json_file(path)?,
        None => Settings::default(),
    };

    match cli.command {
        Commands::Layout { results, json } => layout(&results, settings, json),
        Commands::Table { results, step, out } => table(&results, settings, step.as_deref(), out.as_deref()),
        Commands::Query { results, at } => query(&results, settings, &at),
        Commands::Diagrams { results, out } => diagrams(&results, settings, &out),
        Commands::Report {
            results,
            step,
            at,
            skip,
            out,
        } => report(&results, settings, step.as_deref(), &at, &skip, &out),
        Commands::Check { structure, out } => check(&structure, &settings, out.as_deref()),
    }
}

fn open_session(results: &Path, settings: Settings) -> EpureResult<Session> {
    let result = load_results(results)?;
    let session = Session::new(result, settings);
    if let Some(advisory) = session.shape_advisory() {
        eprintln!("Warning: {}", advisory);
    }
    Ok(session)
}

/// Parse a step the way the step field does: partial text falls back to the default.
fn parse_step(text: Option<&str>, default: f64) -> EpureResult<f64> {
    let Some(text) = text else {
        return Ok(default);
    };
    let mut input = NumericInput::new(InputPolicy::default());
    if !input.accept(text) {
        return Err(EpureError::invalid_input("step", text, "Expected a non-negative number"));
    }
    Ok(input.commit(default))
}

/// Parse `ROD:X` into a rod id and local coordinate.
fn parse_section(text: &str) -> EpureResult<(u32, f64)> {
    let invalid = |reason: &str| EpureError::invalid_input("at", text, reason);

    let (rod, x) = text.split_once(':').ok_or_else(|| invalid("Expected ROD:X"))?;
    let rod_id = rod.trim().parse::<u32>().map_err(|_| invalid("Rod id must be a whole number"))?;
    let x = x.trim().parse::<f64>().map_err(|_| invalid("Coordinate must be a number"))?;
    Ok((rod_id, x))
}

fn layout(results: &Path, settings: Settings, json: bool) -> EpureResult<()> {
    let result = load_results(results)?;
    let geometry = compute_layout(result.rods(), &settings.layout);

    if json {
        println!("{}", serde_json::to_string_pretty(&geometry)?);
        return Ok(());
    }

    println!("Scale:   {:.2} px/m", geometry.length_scale);
    println!("Heights: {:?}", geometry.height_mapping);
    println!("Width:   {:.1} px", geometry.diagram_width);
    println!();
    println!("{:>5} {:>10} {:>10} {:>10}", "Rod", "x, px", "width, px", "height, px");
    for (rod, rect) in result.rods().iter().zip(&geometry.rods) {
        println!("{:>5} {:>10.1} {:>10.1} {:>10.1}", rod.rod_id, rect.x, rect.width, rect.height);
    }
    println!();
    let nodes: Vec<String> = geometry.node_x.iter().map(|x| format!("{:.1}", x)).collect();
    println!("Nodes:   {}", nodes.join(", "));
    Ok(())
}

fn table(results: &Path, settings: Settings, step: Option<&str>, out: Option<&Path>) -> EpureResult<()> {
    let default_step = settings.sampling.default_step;
    let mut session = open_session(results, settings)?;
    session.set_step(parse_step(step, default_step)?);

    let (name, csv) = session.step_csv();
    match out {
        Some(dir) => {
            let path = write_artifact(dir, &name, &csv)?;
            info!(path = %path.display(), rows = session.step_rows().len(), "Wrote step table");
            println!("{}", path.display());
        }
        None => println!("{}", csv),
    }
    Ok(())
}

fn print_record(record: &SectionQueryRecord) {
    println!(
        "rod {:>3}  x = {:.4} m  N = {:.4e} N  σ = {:.4e} Pa  u = {:.6e} m",
        record.rod_id, record.x, record.n, record.sigma, record.u
    );
}

fn query(results: &Path, settings: Settings, at: &[String]) -> EpureResult<()> {
    let mut session = open_session(results, settings)?;
    for text in at {
        let (rod_id, x) = parse_section(text)?;
        let record = session.query(rod_id, x)?;
        print_record(&record);
    }

    println!();
    println!("JSON Output:");
    println!("{}", serde_json::to_string_pretty(session.history())?);
    Ok(())
}

fn diagrams(results: &Path, settings: Settings, out: &Path) -> EpureResult<()> {
    let session = open_session(results, settings)?;
    for id in DiagramId::ALL {
        let Some(svg) = session.diagrams().diagram_markup(id) else {
            eprintln!("Skipped: {}", id.title());
            continue;
        };
        let path = write_artifact(out, id.file_name(), &svg)?;
        println!("{}", path.display());
    }
    Ok(())
}

fn report(
    results: &Path,
    settings: Settings,
    step: Option<&str>,
    at: &[String],
    skip: &[String],
    out: &Path,
) -> EpureResult<()> {
    let default_step = settings.sampling.default_step;
    let mut session = open_session(results, settings)?;
    session.set_step(parse_step(step, default_step)?);

    for text in at {
        let (rod_id, x) = parse_section(text)?;
        session.query(rod_id, x)?;
    }

    let mut sections: ReportSections = session.default_sections();
    for key in skip {
        sections = sections.without(key.parse::<ReportSection>()?);
    }

    let report = session.report(&sections)?;
    let path = write_artifact(out, &report.file_name, &report.html)?;

    let included: Vec<&str> = report.included.iter().map(|s| s.key()).collect();
    info!(sections = %included.join(","), "Report assembled");
    println!("{}", path.display());
    Ok(())
}

fn check(structure: &Path, settings: &Settings, out: Option<&Path>) -> EpureResult<()> {
    let input = load_structure(structure)?;

    match input.shape_advisory() {
        Some(advisory) => println!("{}", advisory),
        None => println!("OK: {} rods, {} nodes", input.rods.len(), input.nodes.len()),
    }

    if let Some(dir) = out {
        let svg = render_structure(&input, settings);
        let path = write_artifact(dir, "structure.svg", &svg)?;
        println!("{}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_section() {
        assert_eq!(parse_section("0:1.25").unwrap(), (0, 1.25));
        assert_eq!(parse_section(" 3 : 0 ").unwrap(), (3, 0.0));
        assert!(parse_section("1.25").is_err());
        assert!(parse_section("-1:0").is_err());
        assert!(parse_section("a:b").is_err());
    }

    #[test]
    fn test_parse_step() {
        assert_eq!(parse_step(None, 0.5).unwrap(), 0.5);
        assert_eq!(parse_step(Some("0.25"), 0.5).unwrap(), 0.25);
        // partial text commits to the default
        assert_eq!(parse_step(Some("."), 0.5).unwrap(), 0.5);
        assert!(parse_step(Some("-1"), 0.5).is_err());
    }

    #[test]
    fn test_cli_parses_report_flags() {
        let cli = Cli::try_parse_from([
            "epure", "report", "out.json", "--at", "0:1", "--skip", "step-table", "-vv",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Report { at, skip, .. } => {
                assert_eq!(at, vec!["0:1"]);
                assert_eq!(skip, vec!["step-table"]);
            }
            _ => panic!("expected report"),
        }
    }
}
