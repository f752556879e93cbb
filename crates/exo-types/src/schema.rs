// ─────────────────────────────────────────────────────────────────────
// SCPN Exo Triage — Feature Groups
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Static, versioned input schemas of the four specialists.
//!
//! `columns` is the exact training-time order each network was fit on.
//! `base` lists the raw fields a caller must send; `uncertain` is the subset
//! of `base` that also needs an `_err1` / `_err2` pair, from which the
//! `_sigma`, `_snr` and `_rel_unc` columns are derived.

use serde::Serialize;

use crate::constants::{
    ERR_LOWER_SUFFIX, ERR_UPPER_SUFFIX, REL_UNC_SUFFIX, SCHEMA_VERSION, SIGMA_SUFFIX, SNR_SUFFIX,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureGroup {
    pub name: &'static str,
    pub version: u32,
    pub columns: &'static [&'static str],
    pub base: &'static [&'static str],
    pub uncertain: &'static [&'static str],
}

pub const PHOTOMETRY: FeatureGroup = FeatureGroup {
    name: "fotometria",
    version: SCHEMA_VERSION,
    columns: &[
        "koi_duration",
        "koi_duration_sigma",
        "koi_duration_snr",
        "koi_duration_rel_unc",
        "koi_depth",
        "koi_depth_sigma",
        "koi_depth_snr",
        "koi_depth_rel_unc",
        "koi_impact",
        "koi_model_snr",
    ],
    base: &["koi_duration", "koi_depth", "koi_impact", "koi_model_snr"],
    uncertain: &["koi_duration", "koi_depth"],
};

pub const ORBITAL: FeatureGroup = FeatureGroup {
    name: "orbital",
    version: SCHEMA_VERSION,
    columns: &[
        "koi_period",
        "koi_period_sigma",
        "koi_period_snr",
        "koi_period_rel_unc",
        "koi_time0bk",
        "koi_time0bk_sigma",
        "koi_time0bk_snr",
        "koi_time0bk_rel_unc",
    ],
    base: &["koi_period", "koi_time0bk"],
    uncertain: &["koi_period", "koi_time0bk"],
};

pub const STELLAR: FeatureGroup = FeatureGroup {
    name: "estelar",
    version: SCHEMA_VERSION,
    columns: &[
        "koi_srad",
        "koi_srad_sigma",
        "koi_srad_snr",
        "koi_srad_rel_unc",
        "koi_steff",
        "koi_steff_sigma",
        "koi_steff_snr",
        "koi_steff_rel_unc",
        "koi_slogg",
        "koi_slogg_sigma",
        "koi_slogg_snr",
        "koi_slogg_rel_unc",
        "koi_prad",
        "koi_prad_sigma",
        "koi_prad_snr",
        "koi_prad_rel_unc",
        "koi_insol",
        "koi_insol_sigma",
        "koi_insol_snr",
        "koi_insol_rel_unc",
        "koi_teq",
        "koi_kepmag",
    ],
    base: &[
        "koi_srad",
        "koi_steff",
        "koi_slogg",
        "koi_prad",
        "koi_insol",
        "koi_teq",
        "koi_kepmag",
    ],
    uncertain: &["koi_srad", "koi_steff", "koi_slogg", "koi_prad", "koi_insol"],
};

pub const FALSE_POSITIVE_FLAGS: FeatureGroup = FeatureGroup {
    name: "falsos_positivos",
    version: SCHEMA_VERSION,
    columns: &[
        "koi_fpflag_nt",
        "koi_fpflag_ss",
        "koi_fpflag_co",
        "koi_fpflag_ec",
    ],
    base: &[
        "koi_fpflag_nt",
        "koi_fpflag_ss",
        "koi_fpflag_co",
        "koi_fpflag_ec",
    ],
    uncertain: &[],
};

impl FeatureGroup {
    /// Input width of the specialist network fed by this group.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Columns computed by the deriver rather than sent by the caller.
    pub fn derived(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns
            .iter()
            .copied()
            .filter(|c| !self.base.contains(c))
    }

    pub fn catalog(&self) -> GroupCatalog {
        GroupCatalog {
            name: self.name,
            version: self.version,
            base_features: self.base.to_vec(),
            derived_features: self.derived().collect(),
            uncertain_quantities: self.uncertain.to_vec(),
        }
    }
}

/// Serializable description of one group, for callers that need to tell a
/// user what to send.
#[derive(Debug, Clone, Serialize)]
pub struct GroupCatalog {
    pub name: &'static str,
    pub version: u32,
    pub base_features: Vec<&'static str>,
    pub derived_features: Vec<&'static str>,
    pub uncertain_quantities: Vec<&'static str>,
}

/// Names of the raw uncertainty pair `(q_err1, q_err2)`.
pub fn error_fields(quantity: &str) -> (String, String) {
    (
        format!("{quantity}{ERR_UPPER_SUFFIX}"),
        format!("{quantity}{ERR_LOWER_SUFFIX}"),
    )
}

/// Names of the derived triple `(q_sigma, q_snr, q_rel_unc)`.
pub fn derived_fields(quantity: &str) -> [String; 3] {
    [
        format!("{quantity}{SIGMA_SUFFIX}"),
        format!("{quantity}{SNR_SUFFIX}"),
        format!("{quantity}{REL_UNC_SUFFIX}"),
    ]
}
