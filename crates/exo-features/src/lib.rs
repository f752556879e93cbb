// ─────────────────────────────────────────────────────────────────────
// SCPN Exo Triage — Exo Features
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Feature preparation for the specialist scorers.
//!
//! Raw KOI mapping → uncertainty derivation → validation → KNN imputation and
//! standard scaling onto the normalizer's fitted column order.

pub mod artifact;
pub mod derive;
pub mod feature_set;
pub mod impute;
pub mod normalize;
pub mod validate;

pub use derive::FeatureDeriver;
pub use feature_set::{FeatureSet, FeatureValue};
pub use normalize::{NormalizedVector, Normalizer};
pub use validate::{validate, validate_json, ValidationReport};
