// ─────────────────────────────────────────────────────────────────────
// SCPN Exo Triage — Exo Ml
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Specialist scorers and the two aggregators built on them.
//!
//! Four MLP specialists, an unweighted ensemble, a logistic-regression judge,
//! and the `Classifier` facade that runs the full decision pipeline.

pub mod classifier;
pub mod ensemble;
pub mod judge;
pub mod panel;
pub mod registry;
pub mod specialist;

#[cfg(test)]
pub(crate) mod testing;

pub use classifier::{feature_catalog, Classifier, HealthReport};
pub use judge::JudgeModel;
pub use panel::SpecialistPanel;
pub use registry::ModelRegistry;
pub use specialist::{SpecialistModel, SpecialistWeights};
