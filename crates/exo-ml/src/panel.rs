// ─────────────────────────────────────────────────────────────────────
// SCPN Exo Triage — Specialist Panel
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! The four specialist verdicts, pinned to `Specialist::ALL` order.

use exo_types::constants::JUDGE_INPUT_DIM;
use exo_types::error::{ExoError, ExoResult};
use exo_types::result::{SpecialistResult, VoteTally};
use exo_types::specialist::Specialist;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpecialistPanel {
    results: [SpecialistResult; JUDGE_INPUT_DIM],
}

impl SpecialistPanel {
    /// Accepts the results in any order; each specialist exactly once.
    pub fn from_results(results: impl IntoIterator<Item = SpecialistResult>) -> ExoResult<Self> {
        let mut slots: [Option<SpecialistResult>; JUDGE_INPUT_DIM] = [None; JUDGE_INPUT_DIM];
        for r in results {
            let slot = &mut slots[r.model_name.index()];
            if slot.is_some() {
                return Err(ExoError::Processing(format!(
                    "duplicate result for {}",
                    r.model_name
                )));
            }
            *slot = Some(r);
        }
        let take = |sp: Specialist| {
            slots[sp.index()]
                .ok_or_else(|| ExoError::Processing(format!("no result for {sp}")))
        };
        Ok(Self {
            results: [
                take(Specialist::Photometry)?,
                take(Specialist::Orbital)?,
                take(Specialist::Stellar)?,
                take(Specialist::FalsePositiveFlags)?,
            ],
        })
    }

    pub fn results(&self) -> &[SpecialistResult; JUDGE_INPUT_DIM] {
        &self.results
    }

    /// Scores as each specialist reported them, false-positive not inverted.
    pub fn raw_scores(&self) -> [f64; JUDGE_INPUT_DIM] {
        self.results.map(|r| r.score)
    }

    /// Scores with every specialist's polarity folded so higher means planet.
    pub fn planet_scores(&self) -> [f64; JUDGE_INPUT_DIM] {
        self.results
            .map(|r| r.model_name.polarity().planet_score(r.score))
    }

    pub fn votes(&self) -> VoteTally {
        VoteTally::count(&self.results)
    }
}
