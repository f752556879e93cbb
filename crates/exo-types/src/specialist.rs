// ─────────────────────────────────────────────────────────────────────
// SCPN Exo Triage — Specialists and Targets
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Specialist identities, their score polarity, and scoring targets.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::DECISION_THRESHOLD;
use crate::error::ExoError;
use crate::schema::{FeatureGroup, FALSE_POSITIVE_FLAGS, ORBITAL, PHOTOMETRY, STELLAR};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Specialist {
    #[serde(rename = "fotometria")]
    Photometry,
    #[serde(rename = "orbital")]
    Orbital,
    #[serde(rename = "estelar")]
    Stellar,
    #[serde(rename = "falsos_positivos")]
    FalsePositiveFlags,
}

impl Specialist {
    /// Fixed order of the judge's input vector.
    pub const ALL: [Specialist; 4] = [
        Specialist::Photometry,
        Specialist::Orbital,
        Specialist::Stellar,
        Specialist::FalsePositiveFlags,
    ];

    pub fn name(self) -> &'static str {
        self.feature_group().name
    }

    /// Slot in `ALL`, and therefore in the judge's input vector.
    pub fn index(self) -> usize {
        match self {
            Specialist::Photometry => 0,
            Specialist::Orbital => 1,
            Specialist::Stellar => 2,
            Specialist::FalsePositiveFlags => 3,
        }
    }

    pub fn feature_group(self) -> &'static FeatureGroup {
        match self {
            Specialist::Photometry => &PHOTOMETRY,
            Specialist::Orbital => &ORBITAL,
            Specialist::Stellar => &STELLAR,
            Specialist::FalsePositiveFlags => &FALSE_POSITIVE_FLAGS,
        }
    }

    pub fn polarity(self) -> Polarity {
        match self {
            Specialist::FalsePositiveFlags => Polarity::HighMeansFalsePositive,
            _ => Polarity::HighMeansConfirmed,
        }
    }

    /// Whether the exported network ends in a logit or already in a probability.
    pub fn output(self) -> OutputActivation {
        match self {
            Specialist::FalsePositiveFlags => OutputActivation::Probability,
            _ => OutputActivation::Logit,
        }
    }
}

impl fmt::Display for Specialist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Specialist {
    type Err = ExoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Specialist::ALL
            .into_iter()
            .find(|sp| sp.name() == s)
            .ok_or_else(|| ExoError::Structural(format!("unknown specialist '{s}'")))
    }
}

/// Direction in which a specialist's probability points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    HighMeansConfirmed,
    HighMeansFalsePositive,
}

impl Polarity {
    /// The specialist's own label for its score.
    pub fn label(self, score: f64) -> Label {
        let high = score > DECISION_THRESHOLD;
        match (self, high) {
            (Polarity::HighMeansConfirmed, true) | (Polarity::HighMeansFalsePositive, false) => {
                Label::Confirmed
            }
            _ => Label::FalsePositive,
        }
    }

    /// Score re-expressed so that higher always means "real planet".
    pub fn planet_score(self, score: f64) -> f64 {
        match self {
            Polarity::HighMeansConfirmed => score,
            Polarity::HighMeansFalsePositive => 1.0 - score,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputActivation {
    /// Raw logit; the scorer applies the logistic function.
    Logit,
    /// The network's last layer is already a sigmoid.
    Probability,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    #[serde(rename = "CONFIRMED")]
    Confirmed,
    #[serde(rename = "FALSE_POSITIVE")]
    FalsePositive,
}

impl Label {
    pub fn from_threshold(score: f64) -> Self {
        if score > DECISION_THRESHOLD {
            Label::Confirmed
        } else {
            Label::FalsePositive
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Confirmed => f.write_str("CONFIRMED"),
            Label::FalsePositive => f.write_str("FALSE_POSITIVE"),
        }
    }
}

/// What a caller asks the pipeline to score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Target {
    Specialist(Specialist),
    Ensemble,
    Judge,
}

impl Target {
    /// Specialists whose feature groups the target needs.
    pub fn specialists(self) -> Vec<Specialist> {
        match self {
            Target::Specialist(s) => vec![s],
            Target::Ensemble | Target::Judge => Specialist::ALL.to_vec(),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Specialist(s) => write!(f, "{s}"),
            Target::Ensemble => f.write_str("ensemble"),
            Target::Judge => f.write_str("judge"),
        }
    }
}

impl FromStr for Target {
    type Err = ExoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ensemble" => Ok(Target::Ensemble),
            "judge" => Ok(Target::Judge),
            other => other
                .parse::<Specialist>()
                .map(Target::Specialist)
                .map_err(|_| ExoError::Structural(format!("unknown target '{other}'"))),
        }
    }
}

impl TryFrom<String> for Target {
    type Error = ExoError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Target> for String {
    fn from(value: Target) -> Self {
        value.to_string()
    }
}

impl From<Specialist> for Target {
    fn from(value: Specialist) -> Self {
        Target::Specialist(value)
    }
}
