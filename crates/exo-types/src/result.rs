// ─────────────────────────────────────────────────────────────────────
// SCPN Exo Triage — Results
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Structured decisions handed back to the transport layer.

use serde::Serialize;

use crate::constants::DECISION_THRESHOLD;
use crate::specialist::{Label, Specialist};

/// Distance of a probability from the decision boundary, rescaled to [0, 1].
pub fn confidence(score: f64) -> f64 {
    (score - DECISION_THRESHOLD).abs() * 2.0
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpecialistResult {
    pub model_name: Specialist,
    pub score: f64,
    pub label: Label,
    pub confidence: f64,
}

impl SpecialistResult {
    /// Build from a calibrated probability, labelled with the specialist's
    /// own polarity.
    pub fn from_score(model_name: Specialist, score: f64) -> Self {
        Self {
            model_name,
            score,
            label: model_name.polarity().label(score),
            confidence: confidence(score),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregator {
    Ensemble,
    Judge,
}

/// Per-label count of the specialists' own labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct VoteTally {
    #[serde(rename = "CONFIRMED")]
    pub confirmed: usize,
    #[serde(rename = "FALSE_POSITIVE")]
    pub false_positive: usize,
}

impl VoteTally {
    pub fn count(results: &[SpecialistResult]) -> Self {
        results.iter().fold(Self::default(), |mut tally, r| {
            match r.label {
                Label::Confirmed => tally.confirmed += 1,
                Label::FalsePositive => tally.false_positive += 1,
            }
            tally
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateResult {
    pub aggregator: Aggregator,
    pub label: Label,
    pub score: f64,
    pub confidence: f64,
    /// Only reported by the ensemble.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub votes: Option<VoteTally>,
    /// Contributing specialists in `Specialist::ALL` order.
    pub specialists: Vec<SpecialistResult>,
}

impl AggregateResult {
    pub fn specialist(&self, which: Specialist) -> Option<&SpecialistResult> {
        self.specialists.iter().find(|r| r.model_name == which)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ScoreOutcome {
    Specialist(SpecialistResult),
    Aggregate(AggregateResult),
}

impl ScoreOutcome {
    pub fn label(&self) -> Label {
        match self {
            ScoreOutcome::Specialist(r) => r.label,
            ScoreOutcome::Aggregate(r) => r.label,
        }
    }

    pub fn score(&self) -> f64 {
        match self {
            ScoreOutcome::Specialist(r) => r.score,
            ScoreOutcome::Aggregate(r) => r.score,
        }
    }

    pub fn confidence(&self) -> f64 {
        match self {
            ScoreOutcome::Specialist(r) => r.confidence,
            ScoreOutcome::Aggregate(r) => r.confidence,
        }
    }
}
