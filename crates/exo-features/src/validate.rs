// ─────────────────────────────────────────────────────────────────────
// SCPN Exo Triage — Feature Validation
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Completeness and type checks per scoring target.
//!
//! A structural problem (no mapping at all) fails immediately. Feature-level
//! problems are accumulated across every group the target needs, so the
//! caller sees all of them in one report.

use exo_types::error::{ExoError, ExoResult, FieldIssue, IssueKind};
use exo_types::schema::{derived_fields, error_fields, FeatureGroup};
use exo_types::specialist::Target;
use serde::Serialize;
use serde_json::Value;

use crate::feature_set::{FeatureSet, FeatureValue};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    pub target: Target,
    pub issues: Vec<FieldIssue>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    /// Names of the offending fields, in report order.
    pub fn fields(&self) -> Vec<&str> {
        self.issues.iter().map(|i| i.field.as_str()).collect()
    }

    pub fn into_result(self) -> ExoResult<()> {
        if self.issues.is_empty() {
            Ok(())
        } else {
            Err(ExoError::Validation {
                target: self.target,
                issues: self.issues,
            })
        }
    }
}

/// Validate an untyped JSON input.
pub fn validate_json(input: &Value, target: Target) -> ExoResult<ValidationReport> {
    let features = FeatureSet::from_json(input)?;
    Ok(validate(&features, target))
}

/// Validate a raw or already-derived feature set for `target`.
pub fn validate(features: &FeatureSet, target: Target) -> ValidationReport {
    let mut issues = Vec::new();
    for specialist in target.specialists() {
        check_group(features, specialist.feature_group(), &mut issues);
    }
    ValidationReport { target, issues }
}

fn check_group(features: &FeatureSet, group: &FeatureGroup, issues: &mut Vec<FieldIssue>) {
    for base in group.base {
        check_numeric(features, group.name, base, issues);
    }

    for quantity in group.uncertain {
        // With the derived triple present the pair may be omitted, but any
        // bound that is sent still has to be numeric and correctly signed.
        let required = !already_derived(features, quantity);
        let (err1, err2) = error_fields(quantity);
        check_bound(features, group.name, err1, Bound::Upper, required, issues);
        check_bound(features, group.name, err2, Bound::Lower, required, issues);
    }
}

#[derive(Clone, Copy)]
enum Bound {
    /// `_err1`, must be >= 0.
    Upper,
    /// `_err2`, must be <= 0.
    Lower,
}

fn check_bound(
    features: &FeatureSet,
    group: &'static str,
    field: String,
    bound: Bound,
    required: bool,
    issues: &mut Vec<FieldIssue>,
) {
    if !required && !features.contains(&field) {
        return;
    }
    let Some(v) = check_numeric(features, group, &field, issues) else {
        return;
    };
    let (violates, expected) = match bound {
        Bound::Upper => (v < 0.0, ">= 0"),
        Bound::Lower => (v > 0.0, "<= 0"),
    };
    if violates {
        issues.push(FieldIssue {
            group,
            field,
            problem: IssueKind::SignConvention { expected, value: v },
        });
    }
}

/// A derived mapping carries the triple instead of the error pair.
fn already_derived(features: &FeatureSet, quantity: &str) -> bool {
    derived_fields(quantity)
        .iter()
        .all(|name| features.number(name).is_some_and(f64::is_finite))
}

fn check_numeric(
    features: &FeatureSet,
    group: &'static str,
    field: &str,
    issues: &mut Vec<FieldIssue>,
) -> Option<f64> {
    let problem = match features.get(field) {
        Some(FeatureValue::Number(v)) if v.is_finite() => return Some(*v),
        Some(FeatureValue::Number(_)) => IssueKind::NotNumeric {
            found: "non-finite number",
        },
        Some(FeatureValue::Null) => IssueKind::Null,
        Some(FeatureValue::Other(found)) => IssueKind::NotNumeric { found: *found },
        None => IssueKind::Missing,
    };
    issues.push(FieldIssue {
        group,
        field: field.to_string(),
        problem,
    });
    None
}
