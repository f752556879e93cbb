// ─────────────────────────────────────────────────────────────────────
// SCPN Exo Triage — Judge Aggregator
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Logistic-regression meta-classifier over the four raw specialist scores.
//!
//! Input order is fixed to `[photometry, orbital, stellar, false_positive]`.
//! The hard label comes from the decision function's sign, not from
//! thresholding the probability.

use crate::panel::SpecialistPanel;
use crate::specialist::sigmoid;
use exo_features::artifact::{expect_len, NpzArchive};
use exo_types::constants::JUDGE_INPUT_DIM;
use exo_types::error::{ExoError, ExoResult};
use exo_types::result::{confidence, AggregateResult, Aggregator};
use exo_types::specialist::Label;
use ndarray::Array1;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct JudgeModel {
    coef: [f64; JUDGE_INPUT_DIM],
    intercept: f64,
}

impl JudgeModel {
    pub fn new(coef: [f64; JUDGE_INPUT_DIM], intercept: f64) -> ExoResult<Self> {
        if coef.iter().chain([&intercept]).any(|v| !v.is_finite()) {
            return Err(ExoError::load("judge", "coefficients must be finite"));
        }
        Ok(Self { coef, intercept })
    }

    /// Load `coef (4,)` and `intercept (1,)` from a NumPy `.npz` archive.
    pub fn from_npz(path: &Path) -> ExoResult<Self> {
        let mut npz = NpzArchive::open(path)?;
        let coef = read_coef(&mut npz)?;
        let intercept = npz.array1("intercept")?;
        expect_len(npz.label(), "intercept", &intercept, 1)?;
        let model = Self::new(coef, intercept[0])?;
        info!(path = npz.label(), "judge loaded");
        Ok(model)
    }

    pub fn coef(&self) -> &[f64; JUDGE_INPUT_DIM] {
        &self.coef
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    pub fn decision(&self, scores: &[f64; JUDGE_INPUT_DIM]) -> f64 {
        self.coef
            .iter()
            .zip(scores)
            .map(|(c, x)| c * x)
            .sum::<f64>()
            + self.intercept
    }

    /// Probability of CONFIRMED.
    pub fn probability(&self, scores: &[f64; JUDGE_INPUT_DIM]) -> f64 {
        sigmoid(self.decision(scores))
    }

    pub fn predict(&self, scores: &[f64; JUDGE_INPUT_DIM]) -> Label {
        if self.decision(scores) > 0.0 {
            Label::Confirmed
        } else {
            Label::FalsePositive
        }
    }

    pub fn combine(&self, panel: &SpecialistPanel) -> AggregateResult {
        let features = panel.raw_scores();
        let score = self.probability(&features);
        let label = self.predict(&features);
        debug!(score, %label, "judge combined");
        AggregateResult {
            aggregator: Aggregator::Judge,
            label,
            score,
            confidence: confidence(score),
            votes: None,
            specialists: panel.results().to_vec(),
        }
    }
}

/// sklearn stores `coef_` as (1, 4); a flattened (4,) export is accepted too.
fn read_coef(npz: &mut NpzArchive) -> ExoResult<[f64; JUDGE_INPUT_DIM]> {
    let flat: Array1<f64> = match npz.array1("coef") {
        Ok(c) => c,
        Err(_) => npz.array2("coef")?.into_iter().collect(),
    };
    expect_len(npz.label(), "coef", &flat, JUDGE_INPUT_DIM)?;
    Ok([flat[0], flat[1], flat[2], flat[3]])
}
