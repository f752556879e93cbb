// ─────────────────────────────────────────────────────────────────────
// SCPN Exo Triage — Uncertainty Features
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Signal-quality features from asymmetric measurement uncertainties.
//!
//! For a quantity `q` with value `v` and bounds `err1 >= 0`, `err2 <= 0`:
//!
//! ```text
//! q_sigma   = max(|err1|, |err2|)      (or the mean, see SigmaFormula)
//! q_snr     = v / (q_sigma + ε)
//! q_rel_unc = q_sigma / (|v| + ε)
//! ```
//!
//! The raw `_err1` / `_err2` columns are dropped once the triple exists.

use exo_types::config::SigmaFormula;
use exo_types::constants::{EPSILON, UNCERTAIN_QUANTITIES};
use exo_types::schema::{derived_fields, error_fields};
use tracing::trace;

use crate::feature_set::FeatureSet;

#[derive(Debug, Clone, Copy)]
pub struct FeatureDeriver {
    formula: SigmaFormula,
    quantities: &'static [&'static str],
}

impl FeatureDeriver {
    /// Deriver over every uncertainty-bearing KOI quantity.
    pub fn new(formula: SigmaFormula) -> Self {
        Self {
            formula,
            quantities: &UNCERTAIN_QUANTITIES,
        }
    }

    /// Extend `raw` with the derived triple of every quantity whose value and
    /// both error bounds are numeric. Other quantities are left as they are.
    pub fn derive(&self, raw: &FeatureSet) -> FeatureSet {
        let mut out = raw.clone();
        for quantity in self.quantities {
            let (err1_name, err2_name) = error_fields(quantity);
            let (Some(value), Some(err1), Some(err2)) = (
                raw.number(quantity),
                raw.number(&err1_name),
                raw.number(&err2_name),
            ) else {
                continue;
            };

            let (sigma, snr, rel_unc) = uncertainty_triple(value, err1, err2, self.formula);
            let [sigma_name, snr_name, rel_name] = derived_fields(quantity);
            out.insert(sigma_name, sigma);
            out.insert(snr_name, snr);
            out.insert(rel_name, rel_unc);
            out.remove(&err1_name);
            out.remove(&err2_name);
            trace!(quantity = *quantity, sigma, snr, rel_unc, "derived uncertainty features");
        }
        out
    }
}

/// `(sigma, snr, rel_unc)` for one measurement.
pub fn uncertainty_triple(value: f64, err1: f64, err2: f64, formula: SigmaFormula) -> (f64, f64, f64) {
    let sigma = formula.sigma(err1, err2);
    let snr = value / (sigma + EPSILON);
    let rel_unc = sigma / (value.abs() + EPSILON);
    (sigma, snr, rel_unc)
}
