//! # epure_core - Rod Structure Post-processing Engine
//!
//! `epure_core` turns the output of a 1-D axial rod solver into everything a
//! user looks at afterwards: a scaled drawing of the rod chain, sampled
//! epures of N(x), σ(x) and u(x), a uniform-step table, ad-hoc section
//! queries, and a self-contained HTML report.
//!
//! ## Design Philosophy
//!
//! - **Synchronous**: Every operation runs to completion on the caller's thread
//! - **JSON-First**: Solver input and all artifacts implement Serialize/Deserialize
//! - **Absorb, don't fail**: Layout and sampling fall back to safe defaults;
//!   only user-facing operations return errors
//! - **Rebuild in full**: Derived artifacts are recomputed from a snapshot,
//!   never patched in place
//!
//! ## Quick Start
//!
//! ```rust
//! use epure_core::{FullResult, Session, Settings};
//!
//! let json = r#"{
//!     "displacements": [0.0, 0.004],
//!     "resultOutput": [{
//!         "rodId": 0, "length": 2.0, "area": 0.01,
//!         "elasticModulus": 2e11, "allowableStress": 1.6e8, "distributedLoad": 0.0,
//!         "nodeRelatedTo": [
//!             { "id": 0, "fixed": true, "externalForce": 0.0 },
//!             { "id": 1, "fixed": false, "externalForce": 100.0 }
//!         ],
//!         "axialForceCoeffs": { "a0": 100.0, "a1": 0.0, "a2": null },
//!         "stressCoeffs": { "a0": 10000.0, "a1": 0.0, "a2": null },
//!         "displacementCoeffs": { "a0": 0.0, "a1": 0.002, "a2": 0.0 },
//!         "maxStressOnTheRod": 10000.0
//!     }]
//! }"#;
//!
//! let result: FullResult = serde_json::from_str(json).unwrap();
//! let mut session = Session::new(result, Settings::default());
//!
//! session.set_step(1.0);
//! assert_eq!(session.step_rows().len(), 3);
//!
//! let record = session.query(0, 1.0).unwrap();
//! assert_eq!(record.n, 100.0);
//!
//! let report = session.report(&session.default_sections()).unwrap();
//! assert!(report.html.contains("<svg"));
//! ```
//!
//! ## Modules
//!
//! - [`model`] - Structure input and solver result types
//! - [`field`] - Polynomial field evaluation and interior extrema
//! - [`layout`] - Pixel geometry of the rod chain
//! - [`labels`] - Node label de-collision
//! - [`sampler`] - Epure sampling with boundary and extremum markers
//! - [`step_table`] - Uniform-step table and CSV export
//! - [`section_query`] - Point query history
//! - [`render`] - SVG diagrams
//! - [`report`] - HTML report assembly
//! - [`session`] - Reactive container tying the above together
//! - [`input_field`] - Numeric text entry state machine
//! - [`settings`] - Tuning constants
//! - [`file_io`] - Atomic saves, structure and result loading
//! - [`errors`] - Structured error types

pub mod errors;
pub mod field;
pub mod file_io;
pub mod format;
pub mod input_field;
pub mod labels;
pub mod layout;
pub mod model;
pub mod render;
pub mod report;
pub mod sampler;
pub mod section_query;
pub mod session;
pub mod settings;
pub mod step_table;

// Re-export commonly used types at crate root for convenience
pub use errors::{EpureError, EpureResult};
pub use field::{FieldKind, PolynomialField};
pub use file_io::{load_results, load_structure, save_structure, write_artifact};
pub use model::{FullResult, NodeSpec, RodResult, RodSpec, ShapeAdvisory, StructureInput};
pub use report::{Report, ReportSection, ReportSections};
pub use session::Session;
pub use settings::Settings;
