//! Patient records and the priority ordering between them.

use crate::error::{TriageError, TriageResult};
use crate::severity::Severity;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use triage_types::NonEmptyText;

/// Position of a patient in the arrival sequence of one queue.
///
/// Assigned by [`crate::PatientQueue::add`], starting at 1. It doubles as the handle used to
/// look a waiting patient up again (for example by the `change` command).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ArrivalOrder(u64);

impl ArrivalOrder {
    pub(crate) const FIRST: ArrivalOrder = ArrivalOrder(1);

    /// Wrap a raw arrival number.
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::InvalidInput`] for 0; arrival numbers start at 1.
    pub fn new(value: u64) -> TriageResult<Self> {
        if value == 0 {
            return Err(TriageError::InvalidInput(
                "arrival numbers start at 1".into(),
            ));
        }
        Ok(Self(value))
    }

    pub fn get(self) -> u64 {
        self.0
    }

    pub(crate) fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for ArrivalOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for ArrivalOrder {
    type Err = TriageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<u64>()
            .map_err(|_| TriageError::InvalidInput(format!("not an arrival number: '{s}'")))?;
        Self::new(value)
    }
}

/// One person waiting to be seen.
///
/// The name and arrival order never change once the patient is queued. The severity can only
/// be changed through [`crate::PatientQueue::change_priority`], which also repairs the heap.
///
/// Equality compares name and severity only; two arrivals of the same person with the same
/// code are equal even though they are distinct queue entries.
#[derive(Clone, Debug, Serialize)]
pub struct Patient {
    arrival: ArrivalOrder,
    severity: Severity,
    name: NonEmptyText,
}

impl Patient {
    pub(crate) fn new(name: NonEmptyText, severity: Severity, arrival: ArrivalOrder) -> Self {
        Self {
            arrival,
            severity,
            name,
        }
    }

    pub fn name(&self) -> &NonEmptyText {
        &self.name
    }

    pub fn severity(&self) -> &Severity {
        &self.severity
    }

    pub fn arrival(&self) -> ArrivalOrder {
        self.arrival
    }

    pub(crate) fn set_severity(&mut self, severity: Severity) {
        self.severity = severity;
    }

    /// Compare by triage priority: `Greater` means `self` should be seen first.
    ///
    /// Higher severity rank wins; on equal rank the earlier arrival wins. Arrival orders are
    /// unique within a queue, so two queued patients never compare `Equal`.
    pub fn priority_cmp(&self, other: &Patient) -> Ordering {
        self.severity
            .rank()
            .cmp(&other.severity.rank())
            .then_with(|| other.arrival.cmp(&self.arrival))
    }

    /// `true` when `self` is strictly higher priority than `other`.
    pub fn outranks(&self, other: &Patient) -> bool {
        self.priority_cmp(other) == Ordering::Greater
    }
}

impl PartialEq for Patient {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.severity == other.severity
    }
}

impl Eq for Patient {}

impl fmt::Display for Patient {
    /// One fixed-width listing row: arrival, severity, name.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use crate::constants::{ARRIVAL_COLUMN_WIDTH, NAME_COLUMN_WIDTH, SEVERITY_COLUMN_WIDTH};

        write!(
            f,
            "{:<aw$}{:<sw$}{:<nw$}",
            self.arrival,
            self.severity,
            self.name,
            aw = ARRIVAL_COLUMN_WIDTH,
            sw = SEVERITY_COLUMN_WIDTH,
            nw = NAME_COLUMN_WIDTH,
        )
    }
}
