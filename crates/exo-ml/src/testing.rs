// ─────────────────────────────────────────────────────────────────────
// SCPN Exo Triage — Test Fixtures
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Synthetic models shared by the unit tests.

use crate::judge::JudgeModel;
use crate::specialist::{SpecialistModel, SpecialistWeights};
use exo_features::normalize::NormalizerSchema;
use exo_features::Normalizer;
use exo_types::config::SigmaFormula;
use exo_types::constants::{HIDDEN1, HIDDEN2};
use exo_types::specialist::Specialist;
use ndarray::{Array1, Array2};
use ndarray_npy::NpzWriter;
use serde_json::{json, Value};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Identity-scaled normalizer over the union of all specialist columns.
pub fn full_normalizer() -> Normalizer {
    let columns: Vec<String> = Specialist::ALL
        .iter()
        .flat_map(|sp| sp.feature_group().columns.iter().map(|c| c.to_string()))
        .collect();
    let n = columns.len();
    Normalizer::new(
        NormalizerSchema {
            version: 1,
            columns,
            n_neighbors: 3,
            sigma_formula: Some(SigmaFormula::MaxAbs),
        },
        Array1::zeros(n),
        Array1::ones(n),
        Array2::zeros((2, n)),
    )
    .unwrap()
}

/// Logit = gain * relu(sum of inputs) - 0.5 * gain.
pub fn specialist_weights(specialist: Specialist, gain: f64) -> SpecialistWeights {
    let n = specialist.feature_group().width();
    let mut w1 = Array2::zeros((n, HIDDEN1));
    w1.column_mut(0).fill(1.0);
    let mut w2 = Array2::zeros((HIDDEN1, HIDDEN2));
    w2[[0, 0]] = 1.0;
    let mut w3 = Array2::zeros((HIDDEN2, 1));
    w3[[0, 0]] = gain;
    SpecialistWeights {
        w1,
        b1: Array1::zeros(HIDDEN1),
        w2,
        b2: Array1::zeros(HIDDEN2),
        w3,
        b3: Array1::from_elem(1, -0.5 * gain),
    }
}

pub fn specialist_model(specialist: Specialist, gain: f64) -> SpecialistModel {
    SpecialistModel::new(specialist, specialist_weights(specialist, gain)).unwrap()
}

pub fn write_specialist_npz(path: &Path, specialist: Specialist, gain: f64) {
    let w = specialist_weights(specialist, gain);
    let mut writer = NpzWriter::new(File::create(path).unwrap());
    writer.add_array("w1", &w.w1).unwrap();
    writer.add_array("b1", &w.b1).unwrap();
    writer.add_array("w2", &w.w2).unwrap();
    writer.add_array("b2", &w.b2).unwrap();
    writer.add_array("w3", &w.w3).unwrap();
    writer.add_array("b3", &w.b3).unwrap();
    writer.finish().unwrap();
}

/// Fresh directory under `temp_dir()`, unique per process and call.
pub fn temp_artifact_dir(tag: &str) -> PathBuf {
    let epoch_ns = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("exo_{tag}_{}_{}", std::process::id(), epoch_ns));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

pub fn judge_model() -> JudgeModel {
    JudgeModel::new([1.5, 1.0, 0.8, -2.0], -0.4).unwrap()
}

/// A complete raw KOI row covering every specialist.
pub fn raw_candidate() -> Value {
    json!({
        "kepid": 10797460,
        "kepoi_name": "K00752.01",
        "koi_period": 9.488,
        "koi_period_err1": 2.775e-05,
        "koi_period_err2": -2.775e-05,
        "koi_time0bk": 170.539,
        "koi_time0bk_err1": 0.00216,
        "koi_time0bk_err2": -0.00216,
        "koi_duration": 2.9575,
        "koi_duration_err1": 0.0819,
        "koi_duration_err2": -0.0819,
        "koi_depth": 615.8,
        "koi_depth_err1": 19.5,
        "koi_depth_err2": -19.5,
        "koi_impact": 0.146,
        "koi_model_snr": 35.8,
        "koi_srad": 0.927,
        "koi_srad_err1": 0.105,
        "koi_srad_err2": -0.061,
        "koi_steff": 5455.0,
        "koi_steff_err1": 81.0,
        "koi_steff_err2": -81.0,
        "koi_slogg": 4.467,
        "koi_slogg_err1": 0.064,
        "koi_slogg_err2": -0.096,
        "koi_prad": 2.26,
        "koi_prad_err1": 0.26,
        "koi_prad_err2": -0.15,
        "koi_insol": 93.59,
        "koi_insol_err1": 29.45,
        "koi_insol_err2": -16.65,
        "koi_teq": 793.0,
        "koi_kepmag": 15.347,
        "koi_fpflag_nt": 0,
        "koi_fpflag_ss": 0,
        "koi_fpflag_co": 0,
        "koi_fpflag_ec": 0
    })
}
