// ─────────────────────────────────────────────────────────────────────
// SCPN Exo Triage — Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
/// Guard added to denominators of the derived snr / rel_unc features.
pub const EPSILON: f64 = 1e-8;

/// Score boundary between the two labels for specialists and the ensemble.
pub const DECISION_THRESHOLD: f64 = 0.5;

/// Hidden layer widths shared by every specialist network.
pub const HIDDEN1: usize = 16;
pub const HIDDEN2: usize = 8;

/// Number of specialist scores fed to the judge.
pub const JUDGE_INPUT_DIM: usize = 4;

/// Neighbours used by the KNN imputer when the schema file does not say.
pub const DEFAULT_KNN_NEIGHBORS: usize = 5;

/// Version stamped on the static feature-group schemas.
pub const SCHEMA_VERSION: u32 = 1;

/// Upper (non-negative) uncertainty bound suffix.
pub const ERR_UPPER_SUFFIX: &str = "_err1";

/// Lower (non-positive) uncertainty bound suffix.
pub const ERR_LOWER_SUFFIX: &str = "_err2";

pub const SIGMA_SUFFIX: &str = "_sigma";
pub const SNR_SUFFIX: &str = "_snr";
pub const REL_UNC_SUFFIX: &str = "_rel_unc";

/// Every base quantity that carries an asymmetric `_err1` / `_err2` pair in
/// the KOI table. `koi_ror` is derived for the normalizer schema even though
/// no specialist reads it.
pub const UNCERTAIN_QUANTITIES: [&str; 10] = [
    "koi_period",
    "koi_time0bk",
    "koi_duration",
    "koi_depth",
    "koi_ror",
    "koi_srad",
    "koi_steff",
    "koi_slogg",
    "koi_prad",
    "koi_insol",
];
