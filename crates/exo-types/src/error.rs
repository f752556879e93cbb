// ─────────────────────────────────────────────────────────────────────
// SCPN Exo Triage — Error
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use serde::Serialize;
use std::fmt;
use thiserror::Error;

use crate::specialist::Target;

#[derive(Error, Debug)]
pub enum ExoError {
    #[error("Malformed input: {0}")]
    Structural(String),

    #[error("Invalid features for {target}: {}", IssueList(.issues))]
    Validation {
        target: Target,
        issues: Vec<FieldIssue>,
    },

    #[error("Processing failed: {0}")]
    Processing(String),

    #[error("Failed to load {artifact}: {message}")]
    Load { artifact: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ExoResult<T> = Result<T, ExoError>;

/// Coarse classification a transport layer maps onto its own status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Structural,
    Validation,
    Processing,
    Load,
}

impl ExoError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExoError::Structural(_) => ErrorKind::Structural,
            ExoError::Validation { .. } => ErrorKind::Validation,
            ExoError::Processing(_) => ErrorKind::Processing,
            ExoError::Load { .. } | ExoError::Io(_) | ExoError::Json(_) => ErrorKind::Load,
        }
    }

    pub fn load(artifact: impl Into<String>, message: impl fmt::Display) -> Self {
        ExoError::Load {
            artifact: artifact.into(),
            message: message.to_string(),
        }
    }

    /// Offending fields of a validation failure; empty for every other kind.
    pub fn issues(&self) -> &[FieldIssue] {
        match self {
            ExoError::Validation { issues, .. } => issues,
            _ => &[],
        }
    }
}

/// One missing or invalid field found by the validator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldIssue {
    /// Feature group that required the field.
    pub group: &'static str,
    pub field: String,
    pub problem: IssueKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IssueKind {
    Missing,
    Null,
    NotNumeric { found: &'static str },
    /// `err1` must be >= 0 and `err2` must be <= 0.
    SignConvention { expected: &'static str, value: f64 },
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.problem {
            IssueKind::Missing => write!(f, "{} missing ({})", self.field, self.group),
            IssueKind::Null => write!(f, "{} is null ({})", self.field, self.group),
            IssueKind::NotNumeric { found } => {
                write!(f, "{} is {found}, expected a number ({})", self.field, self.group)
            }
            IssueKind::SignConvention { expected, value } => write!(
                f,
                "{} = {value} violates sign convention, expected {expected} ({})",
                self.field, self.group
            ),
        }
    }
}

struct IssueList<'a>(&'a [FieldIssue]);

impl fmt::Display for IssueList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, issue) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}
