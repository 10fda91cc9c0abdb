//! The patient priority queue.
//!
//! Patients live in a flat `Vec` laid out as a binary max-heap (`parent = (i - 1) / 2`,
//! `left = 2i + 1`, `right = 2i + 2`), ordered by [`Patient::priority_cmp`]. A side table maps
//! each arrival number to the patient's current index so that `change_priority` can find its
//! target without scanning; every swap keeps the table in step.
//!
//! Invariant, before and after every public method: no patient outranks its parent.

use crate::error::{TriageError, TriageResult};
use crate::patient::{ArrivalOrder, Patient};
use crate::severity::Severity;
use crate::snapshot;
use std::collections::HashMap;
use std::path::Path;
use triage_types::NonEmptyText;

/// Array-backed max-heap of waiting patients.
///
/// Arrival numbers are handed out by the queue itself, from 1 upwards, and are never reused
/// for the lifetime of the instance. Constructing a new queue is the only way to restart the
/// sequence.
#[derive(Debug, Clone)]
pub struct PatientQueue {
    patients: Vec<Patient>,
    positions: HashMap<ArrivalOrder, usize>,
    next_arrival: ArrivalOrder,
}

impl Default for PatientQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl PatientQueue {
    pub fn new() -> Self {
        Self {
            patients: Vec::new(),
            positions: HashMap::new(),
            next_arrival: ArrivalOrder::FIRST,
        }
    }

    /// Admit a patient and return the arrival number they were given.
    pub fn add(&mut self, name: NonEmptyText, severity: Severity) -> ArrivalOrder {
        let arrival = self.next_arrival;
        self.next_arrival = arrival.next();

        let index = self.patients.len();
        tracing::debug!(%arrival, severity = %severity, "admitting patient");
        self.patients.push(Patient::new(name, severity, arrival));
        self.positions.insert(arrival, index);
        self.sift_up(index);
        arrival
    }

    /// The patient who would be seen next.
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::EmptyQueue`] when nobody is waiting.
    pub fn peek(&self) -> TriageResult<&Patient> {
        self.patients.first().ok_or(TriageError::EmptyQueue)
    }

    /// Take the highest priority patient out of the queue.
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::EmptyQueue`] when nobody is waiting.
    pub fn remove(&mut self) -> TriageResult<Patient> {
        if self.patients.is_empty() {
            return Err(TriageError::EmptyQueue);
        }

        // Moves the last element into the root slot.
        let seen = self.patients.swap_remove(0);
        self.positions.remove(&seen.arrival());
        if let Some(root) = self.patients.first() {
            self.positions.insert(root.arrival(), 0);
            self.sift_down(0);
        }

        tracing::debug!(arrival = %seen.arrival(), remaining = self.patients.len(), "patient removed");
        Ok(seen)
    }

    pub fn size(&self) -> usize {
        self.patients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patients.is_empty()
    }

    /// Look up a waiting patient by arrival number.
    pub fn get(&self, arrival: ArrivalOrder) -> Option<&Patient> {
        self.positions.get(&arrival).map(|&index| &self.patients[index])
    }

    /// Change the severity of a waiting patient and return their name.
    ///
    /// The patient keeps their arrival number, so among equal severities they keep their
    /// original place in line.
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::PatientNotFound`] if no waiting patient has that arrival number.
    /// The queue is left untouched in that case.
    pub fn change_priority(
        &mut self,
        arrival: ArrivalOrder,
        severity: Severity,
    ) -> TriageResult<NonEmptyText> {
        let index = *self
            .positions
            .get(&arrival)
            .ok_or(TriageError::PatientNotFound(arrival))?;

        tracing::debug!(%arrival, from = %self.patients[index].severity(), to = %severity, "changing priority");
        self.patients[index].set_severity(severity);

        // At most one of these moves anything.
        let index = self.sift_up(index);
        let index = self.sift_down(index);
        Ok(self.patients[index].name().clone())
    }

    /// Patients in backing-array (heap) order.
    pub fn iter(&self) -> std::slice::Iter<'_, Patient> {
        self.patients.iter()
    }

    /// Patients sorted by arrival number.
    pub fn by_arrival(&self) -> Vec<&Patient> {
        let mut patients: Vec<&Patient> = self.patients.iter().collect();
        patients.sort_by_key(|patient| patient.arrival());
        patients
    }

    /// One fixed-width row per patient, in backing-array order.
    ///
    /// This is the heap layout, not a sorted report: only the first row is guaranteed to be
    /// the next patient to be seen.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for patient in &self.patients {
            out.push_str(&patient.to_string());
            out.push('\n');
        }
        out
    }

    /// Write the queue to `path` as replayable `add` commands; see [`snapshot::write_to`].
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::UnsavableSeverity`] if a patient's code cannot be replayed, and
    /// [`TriageError::SnapshotWrite`] if the file cannot be created or written.
    pub fn export_to(&self, path: &Path) -> TriageResult<usize> {
        snapshot::write_to(self, path)
    }

    /// Consume the queue, yielding patients in the order they would be seen.
    pub fn drain_ordered(mut self) -> impl Iterator<Item = Patient> {
        std::iter::from_fn(move || self.remove().ok())
    }

    /// Check that no patient outranks its parent and the position table matches the array.
    ///
    /// Walks the whole heap, so it is meant for tests rather than for every operation.
    pub fn satisfies_heap_invariant(&self) -> bool {
        (1..self.patients.len()).all(|i| !self.patients[i].outranks(&self.patients[(i - 1) / 2]))
            && self
                .patients
                .iter()
                .enumerate()
                .all(|(i, p)| self.positions.get(&p.arrival()) == Some(&i))
            && self.positions.len() == self.patients.len()
    }

    // ========================================================================
    // Heap repair
    // ========================================================================

    /// Move the patient at `index` towards the root while they outrank their parent.
    /// Returns where they ended up.
    fn sift_up(&mut self, mut index: usize) -> usize {
        while index > 0 {
            let parent = (index - 1) / 2;
            if !self.patients[index].outranks(&self.patients[parent]) {
                break;
            }
            self.swap(index, parent);
            index = parent;
        }
        index
    }

    /// Move the patient at `index` towards the leaves while a child outranks them.
    /// Returns where they ended up.
    fn sift_down(&mut self, mut index: usize) -> usize {
        let len = self.patients.len();
        loop {
            let left = 2 * index + 1;
            let right = left + 1;
            let mut highest = index;

            if left < len && self.patients[left].outranks(&self.patients[highest]) {
                highest = left;
            }
            if right < len && self.patients[right].outranks(&self.patients[highest]) {
                highest = right;
            }
            if highest == index {
                return index;
            }

            self.swap(index, highest);
            index = highest;
        }
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.patients.swap(a, b);
        self.positions.insert(self.patients[a].arrival(), a);
        self.positions.insert(self.patients[b].arrival(), b);
    }
}
