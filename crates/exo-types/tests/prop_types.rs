// ─────────────────────────────────────────────────────────────────────
// SCPN Exo Triage — Property-Based Tests (proptest) for exo-types
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for exo-types using proptest.
//!
//! Covers: sigma formulas, polarity folding, confidence.

use exo_types::config::SigmaFormula;
use exo_types::result::{confidence, SpecialistResult};
use exo_types::specialist::{Label, Specialist};
use proptest::prelude::*;

// ── Sigma Formulas ───────────────────────────────────────────────────

proptest! {
    /// Mean of absolute errors never exceeds their maximum; both non-negative.
    #[test]
    fn mean_abs_bounded_by_max_abs(e1 in -1e6f64..1e6, e2 in -1e6f64..1e6) {
        let max = SigmaFormula::MaxAbs.sigma(e1, e2);
        let mean = SigmaFormula::MeanAbs.sigma(e1, e2);
        prop_assert!(mean >= 0.0);
        prop_assert!(mean <= max + 1e-9);
    }

    /// Sigma ignores the sign of the error bounds.
    #[test]
    fn sigma_sign_invariant(e1 in 0.0f64..1e3, e2 in 0.0f64..1e3) {
        for f in [SigmaFormula::MaxAbs, SigmaFormula::MeanAbs] {
            prop_assert_eq!(f.sigma(e1, -e2), f.sigma(-e1, e2));
        }
    }
}

// ── Polarity and Confidence ──────────────────────────────────────────

proptest! {
    /// A specialist labels CONFIRMED exactly when its folded score is above 0.5,
    /// except at the boundary itself.
    #[test]
    fn label_agrees_with_planet_score(idx in 0usize..4, score in 0.0f64..=1.0) {
        prop_assume!(score != 0.5);
        let sp = Specialist::ALL[idx];
        let r = SpecialistResult::from_score(sp, score);
        let folded = sp.polarity().planet_score(score);
        prop_assert_eq!(r.label == Label::Confirmed, folded > 0.5);
    }

    /// Confidence lies in [0, 1] and is symmetric around the boundary.
    #[test]
    fn confidence_in_unit_interval(score in 0.0f64..=1.0) {
        let c = confidence(score);
        prop_assert!((0.0..=1.0 + 1e-12).contains(&c));
        prop_assert!((c - confidence(1.0 - score)).abs() < 1e-12);
    }
}
