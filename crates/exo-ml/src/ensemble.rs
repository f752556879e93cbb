// ─────────────────────────────────────────────────────────────────────
// SCPN Exo Triage — Ensemble Aggregator
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Unweighted mean of the polarity-corrected specialist scores.

use crate::panel::SpecialistPanel;
use exo_types::result::{confidence, AggregateResult, Aggregator};
use exo_types::specialist::Label;
use tracing::debug;

pub fn ensemble(panel: &SpecialistPanel) -> AggregateResult {
    let scores = panel.planet_scores();
    let mean = scores.iter().sum::<f64>() / scores.len() as f64;
    let votes = panel.votes();
    debug!(
        score = mean,
        confirmed = votes.confirmed,
        false_positive = votes.false_positive,
        "ensemble combined"
    );
    AggregateResult {
        aggregator: Aggregator::Ensemble,
        label: Label::from_threshold(mean),
        score: mean,
        confidence: confidence(mean),
        votes: Some(votes),
        specialists: panel.results().to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exo_types::result::SpecialistResult;
    use exo_types::specialist::Specialist;

    fn panel(scores: [f64; 4]) -> SpecialistPanel {
        SpecialistPanel::from_results(
            Specialist::ALL
                .into_iter()
                .zip(scores)
                .map(|(sp, s)| SpecialistResult::from_score(sp, s)),
        )
        .unwrap()
    }

    #[test]
    fn test_false_positive_score_inverted_before_mean() {
        let r = ensemble(&panel([0.8, 0.6, 0.7, 0.1]));
        let expected = (0.8 + 0.6 + 0.7 + 0.9) / 4.0;
        assert!((r.score - expected).abs() < 1e-15);
        assert_eq!(r.label, Label::Confirmed);
        assert!((r.confidence - (expected - 0.5) * 2.0).abs() < 1e-12);
        assert_eq!(r.specialists.len(), 4);
    }

    #[test]
    fn test_exact_half_is_false_positive() {
        let r = ensemble(&panel([0.5, 0.5, 0.5, 0.5]));
        assert_eq!(r.score, 0.5);
        assert_eq!(r.label, Label::FalsePositive);
        assert_eq!(r.confidence, 0.0);
    }

    #[test]
    fn test_votes_can_disagree_with_mean() {
        // Three weak CONFIRMED votes, one confident false-positive flag.
        let r = ensemble(&panel([0.55, 0.55, 0.55, 0.99]));
        let votes = r.votes.unwrap();
        assert_eq!(votes.confirmed, 3);
        assert_eq!(votes.false_positive, 1);
        assert_eq!(r.label, Label::FalsePositive);
    }
}
