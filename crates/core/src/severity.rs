//! Triage severity codes and their ranking.
//!
//! The recognised vocabulary is `immediate`, `emergency`, `urgent` and `routine`. The older
//! token `minimal` is accepted as another spelling of `routine` and is always written back out
//! as `routine`.
//!
//! Two constructors exist because the two callers want different behaviour:
//! - [`Severity::parse`] (and `FromStr`) is strict and is what the command interpreter uses to
//!   reject bad input before it reaches the queue.
//! - [`Severity::from_code`] never fails. Codes outside the vocabulary are kept verbatim as
//!   [`Severity::Unrecognised`] and rank below everything else, so the comparator stays total.

use crate::error::{TriageError, TriageResult};
use std::fmt;
use std::str::FromStr;

/// A triage severity code.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Immediate,
    Emergency,
    Urgent,
    Routine,
    /// A code outside the vocabulary. Ranks lowest.
    Unrecognised(String),
}

impl Severity {
    /// Every recognised severity, most urgent first.
    pub const KNOWN: [Severity; 4] = [
        Severity::Immediate,
        Severity::Emergency,
        Severity::Urgent,
        Severity::Routine,
    ];

    /// Parse a code from the recognised vocabulary.
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::UnknownSeverity`] for anything else, including codes that differ
    /// only in case.
    pub fn parse(code: &str) -> TriageResult<Self> {
        match Self::from_code(code) {
            Severity::Unrecognised(code) => Err(TriageError::UnknownSeverity(code)),
            known => Ok(known),
        }
    }

    /// Map any code onto a severity, keeping unknown codes as [`Severity::Unrecognised`].
    pub fn from_code(code: &str) -> Self {
        match code {
            "immediate" => Severity::Immediate,
            "emergency" => Severity::Emergency,
            "urgent" => Severity::Urgent,
            "routine" | "minimal" => Severity::Routine,
            other => Severity::Unrecognised(other.to_owned()),
        }
    }

    /// Rank used for ordering; higher is more urgent.
    pub fn rank(&self) -> u8 {
        match self {
            Severity::Immediate => 4,
            Severity::Emergency => 3,
            Severity::Urgent => 2,
            Severity::Routine => 1,
            Severity::Unrecognised(_) => 0,
        }
    }

    /// The code as written in listings and snapshot files.
    pub fn as_str(&self) -> &str {
        match self {
            Severity::Immediate => "immediate",
            Severity::Emergency => "emergency",
            Severity::Urgent => "urgent",
            Severity::Routine => "routine",
            Severity::Unrecognised(code) => code,
        }
    }

    pub fn is_recognised(&self) -> bool {
        !matches!(self, Severity::Unrecognised(_))
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = TriageError;

    /// Strict parse; see [`Severity::parse`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Severity::parse(s)
    }
}

impl serde::Serialize for Severity {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}
