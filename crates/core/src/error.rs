use crate::patient::ArrivalOrder;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum TriageError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid patient name: {0}")]
    InvalidName(#[from] triage_types::TextError),
    #[error("unrecognized priority code: {0}")]
    UnknownSeverity(String),

    #[error("the queue is empty")]
    EmptyQueue,
    #[error("no patient with arrival id {0} was found")]
    PatientNotFound(ArrivalOrder),

    #[error("failed to write snapshot file (path: {path}): {source}", path = path.display())]
    SnapshotWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read snapshot file (path: {path}): {source}", path = path.display())]
    SnapshotRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("patient {arrival} has priority code '{code}', which a snapshot cannot reload")]
    UnsavableSeverity { arrival: ArrivalOrder, code: String },
    #[error("load of {path} nested deeper than {limit} files", path = path.display())]
    LoadDepthExceeded { path: PathBuf, limit: usize },

    #[error("failed to write session output: {0}")]
    Output(#[from] std::io::Error),
}

pub type TriageResult<T> = std::result::Result<T, TriageError>;
