//! Flat-text queue snapshots.
//!
//! A snapshot is a command file: one `add <severity-code> <name>` line per waiting patient.
//! Loading one is just replaying it through the interpreter, so the format needs no reader of
//! its own beyond [`read_lines`].
//!
//! Lines are written in arrival order rather than heap order. Replaying assigns fresh arrival
//! numbers in file order, so arrival order is what preserves the tie-break between patients
//! of equal severity and therefore the order in which patients are seen.
//!
//! A queue holding an unrecognised severity code is refused before the file is touched: the
//! interpreter would reject that `add` line on reload and silently drop the patient.

use crate::constants::SNAPSHOT_ADD_KEYWORD;
use crate::error::{TriageError, TriageResult};
use crate::patient::Patient;
use crate::queue::PatientQueue;
use crate::severity::Severity;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

/// The `add` command that recreates `patient`.
pub fn encode_line(patient: &Patient) -> String {
    format!(
        "{SNAPSHOT_ADD_KEYWORD} {} {}",
        patient.severity().as_str(),
        patient.name().as_str()
    )
}

/// Write every waiting patient of `queue` to `path`, replacing any existing file.
///
/// Returns the number of patients written.
///
/// # Errors
///
/// Returns [`TriageError::UnsavableSeverity`] if a patient's code cannot be replayed, and
/// [`TriageError::SnapshotWrite`] if the file cannot be created or written.
pub fn write_to(queue: &PatientQueue, path: &Path) -> TriageResult<usize> {
    let patients = queue.by_arrival();
    if let Some(patient) = patients
        .iter()
        .find(|patient| matches!(patient.severity(), Severity::Unrecognised(_)))
    {
        return Err(TriageError::UnsavableSeverity {
            arrival: patient.arrival(),
            code: patient.severity().as_str().to_owned(),
        });
    }

    let write_err = |source| TriageError::SnapshotWrite {
        path: path.to_path_buf(),
        source,
    };

    let file = fs::File::create(path).map_err(write_err)?;
    let mut writer = BufWriter::new(file);
    for patient in &patients {
        writeln!(writer, "{}", encode_line(patient)).map_err(write_err)?;
    }
    writer.flush().map_err(write_err)?;

    tracing::info!(path = %path.display(), patients = patients.len(), "snapshot written");
    Ok(patients.len())
}

/// Read a command file into its lines, with line terminators removed.
///
/// # Errors
///
/// Returns [`TriageError::SnapshotRead`] if the file cannot be opened or is not UTF-8.
pub fn read_lines(path: &Path) -> TriageResult<Vec<String>> {
    let contents = fs::read_to_string(path).map_err(|source| TriageError::SnapshotRead {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(contents.lines().map(str::to_owned).collect())
}
