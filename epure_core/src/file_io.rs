//! # File I/O Module
//!
//! Reading solver output and saving/loading rod structures. Every write goes
//! through [`write_artifact`], which is atomic:
//!
//! 1. Write to a temporary `<name>.tmp` next to the target
//! 2. Sync to disk (fsync)
//! 3. Rename over the target
//!
//! ## File Format
//!
//! Structures are saved as pretty-printed JSON `{"rods": [...], "nodes": [...]}`.
//! Solver results use the `{"displacements": [...], "resultOutput": [...]}` shape.
//!
//! ## Example
//!
//! ```rust,no_run
//! use epure_core::file_io::{load_structure, save_structure};
//! use epure_core::model::StructureInput;
//! use std::path::Path;
//!
//! let structure = StructureInput::default();
//! save_structure(&structure, Path::new("bridge.json"))?;
//! let loaded = load_structure(Path::new("bridge.json"))?;
//! assert_eq!(structure, loaded);
//! # Ok::<(), epure_core::errors::EpureError>(())
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::errors::{EpureError, EpureResult};
use crate::model::{FullResult, StructureInput};

/// Write `contents` to `dir/name` atomically and return the final path.
pub fn write_artifact(dir: &Path, name: &str, contents: &str) -> EpureResult<PathBuf> {
    let path = dir.join(name);
    write_atomic(&path, contents.as_bytes())?;
    Ok(path)
}

fn write_atomic(path: &Path, bytes: &[u8]) -> EpureResult<()> {
    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        EpureError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(bytes).map_err(|e| {
        EpureError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        EpureError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        EpureError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    debug!(path = %path.display(), bytes = bytes.len(), "Wrote file");
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> EpureResult<T> {
    let mut file = File::open(path)
        .map_err(|e| EpureError::file_error("open", path.display().to_string(), e.to_string()))?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| EpureError::file_error("read", path.display().to_string(), e.to_string()))?;

    debug!(path = %path.display(), bytes = contents.len(), "Read file");
    serde_json::from_str(&contents).map_err(|e| EpureError::SerializationError {
        reason: format!("Invalid JSON in {}: {}", path.display(), e),
    })
}

/// Save a structure description with atomic write semantics.
pub fn save_structure(structure: &StructureInput, path: &Path) -> EpureResult<()> {
    let json = serde_json::to_string_pretty(structure)?;
    write_atomic(path, json.as_bytes())
}

pub fn load_structure(path: &Path) -> EpureResult<StructureInput> {
    read_json(path)
}

/// Load a solver response.
pub fn load_results(path: &Path) -> EpureResult<FullResult> {
    read_json(path)
}
