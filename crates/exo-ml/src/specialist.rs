// ─────────────────────────────────────────────────────────────────────
// SCPN Exo Triage — Specialist Scorer
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Specialist MLP (group width -> 16 -> 8 -> 1), one instance per feature group.

use exo_features::artifact::{expect_dim, expect_len, NpzArchive};
use exo_types::constants::{HIDDEN1, HIDDEN2};
use exo_types::error::{ExoError, ExoResult};
use exo_types::result::SpecialistResult;
use exo_types::specialist::{OutputActivation, Specialist};
use ndarray::{Array1, Array2};
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone)]
pub struct SpecialistWeights {
    pub w1: Array2<f64>, // (in, 16)
    pub b1: Array1<f64>, // (16,)
    pub w2: Array2<f64>, // (16, 8)
    pub b2: Array1<f64>, // (8,)
    pub w3: Array2<f64>, // (8, 1)
    pub b3: Array1<f64>, // (1,)
}

#[derive(Debug, Clone)]
pub struct SpecialistModel {
    specialist: Specialist,
    weights: SpecialistWeights,
}

impl SpecialistModel {
    pub fn new(specialist: Specialist, weights: SpecialistWeights) -> ExoResult<Self> {
        validate_shapes(specialist, &weights)?;
        Ok(Self {
            specialist,
            weights,
        })
    }

    /// Load exported weights from a NumPy `.npz` archive.
    pub fn from_npz(specialist: Specialist, path: &Path) -> ExoResult<Self> {
        let mut npz = NpzArchive::open(path)?;
        let weights = SpecialistWeights {
            w1: npz.array2("w1")?,
            b1: npz.array1("b1")?,
            w2: npz.array2("w2")?,
            b2: npz.array1("b2")?,
            w3: npz.array2("w3")?,
            b3: npz.array1("b3")?,
        };
        let model = Self::new(specialist, weights)?;
        info!(
            specialist = specialist.name(),
            input_dim = model.input_dim(),
            path = npz.label(),
            "specialist loaded"
        );
        Ok(model)
    }

    pub fn specialist(&self) -> Specialist {
        self.specialist
    }

    pub fn input_dim(&self) -> usize {
        self.weights.w1.nrows()
    }

    /// Calibrated probability for `input`, which must follow the feature
    /// group's column order.
    pub fn probability(&self, input: &Array1<f64>) -> ExoResult<f64> {
        if input.len() != self.input_dim() {
            return Err(ExoError::Processing(format!(
                "{} expects {} features, got {}",
                self.specialist,
                self.input_dim(),
                input.len()
            )));
        }
        let out = forward(input, &self.weights, self.specialist.output());
        let p = match self.specialist.output() {
            OutputActivation::Logit => sigmoid(out),
            OutputActivation::Probability => out,
        };
        if !p.is_finite() {
            return Err(ExoError::Processing(format!(
                "{} produced a non-finite score",
                self.specialist
            )));
        }
        Ok(p)
    }

    pub fn score(&self, input: &Array1<f64>) -> ExoResult<SpecialistResult> {
        Ok(SpecialistResult::from_score(
            self.specialist,
            self.probability(input)?,
        ))
    }
}

fn validate_shapes(specialist: Specialist, w: &SpecialistWeights) -> ExoResult<()> {
    let label = specialist.name();
    let input_dim = specialist.feature_group().width();
    expect_dim(label, "w1", &w.w1, (input_dim, HIDDEN1))?;
    expect_len(label, "b1", &w.b1, HIDDEN1)?;
    expect_dim(label, "w2", &w.w2, (HIDDEN1, HIDDEN2))?;
    expect_len(label, "b2", &w.b2, HIDDEN2)?;
    expect_dim(label, "w3", &w.w3, (HIDDEN2, 1))?;
    expect_len(label, "b3", &w.b3, 1)?;
    let arrays = [&w.w1, &w.w2, &w.w3];
    let biases = [&w.b1, &w.b2, &w.b3];
    if arrays.iter().any(|a| a.iter().any(|v| !v.is_finite()))
        || biases.iter().any(|b| b.iter().any(|v| !v.is_finite()))
    {
        return Err(ExoError::load(label, "weights contain non-finite values"));
    }
    Ok(())
}

/// Networks exported with a sigmoid head return a probability here,
/// the others a logit.
fn forward(input: &Array1<f64>, w: &SpecialistWeights, head: OutputActivation) -> f64 {
    let h1 = (input.dot(&w.w1) + &w.b1).mapv(relu);
    let h2 = (h1.dot(&w.w2) + &w.b2).mapv(relu);
    let z = (h2.dot(&w.w3) + &w.b3)[0];
    match head {
        OutputActivation::Probability => sigmoid(z),
        OutputActivation::Logit => z,
    }
}

fn relu(x: f64) -> f64 {
    x.max(0.0)
}

/// Logistic function, split by sign to avoid overflow in `exp`.
pub fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}
