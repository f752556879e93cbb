// ─────────────────────────────────────────────────────────────────────
// SCPN Exo Triage — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::DEFAULT_KNN_NEIGHBORS;
use crate::error::{ExoError, ExoResult};
use crate::specialist::Specialist;

/// How `q_sigma` is built from the asymmetric error pair.
/// Must match the variant the normalizer artifact was fit with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SigmaFormula {
    /// `max(|err1|, |err2|)`
    #[default]
    MaxAbs,
    /// `(|err1| + |err2|) / 2`
    MeanAbs,
}

impl SigmaFormula {
    pub fn sigma(self, err1: f64, err2: f64) -> f64 {
        match self {
            SigmaFormula::MaxAbs => err1.abs().max(err2.abs()),
            SigmaFormula::MeanAbs => (err1.abs() + err2.abs()) / 2.0,
        }
    }
}

/// Pipeline configuration. Every field has a default so a partial JSON file
/// (or `{}`) is accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub artifact_dir: PathBuf,
    pub normalizer_schema: String,
    pub normalizer_arrays: String,
    pub judge_weights: String,
    pub photometry_weights: String,
    pub orbital_weights: String,
    pub stellar_weights: String,
    pub false_positive_weights: String,
    pub sigma_formula: SigmaFormula,
    /// Overrides `n_neighbors` from the normalizer schema when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub knn_neighbors: Option<usize>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            artifact_dir: PathBuf::from("artifacts"),
            normalizer_schema: "normalizer.json".to_string(),
            normalizer_arrays: "normalizer.npz".to_string(),
            judge_weights: "judge.npz".to_string(),
            photometry_weights: "fotometria_net.npz".to_string(),
            orbital_weights: "orbital_net.npz".to_string(),
            stellar_weights: "estelar_net.npz".to_string(),
            false_positive_weights: "falsos_positivos_net.npz".to_string(),
            sigma_formula: SigmaFormula::default(),
            knn_neighbors: None,
        }
    }
}

impl PipelineConfig {
    /// Load from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> ExoResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults rooted at `artifact_dir`.
    pub fn with_artifact_dir(artifact_dir: impl Into<PathBuf>) -> Self {
        Self {
            artifact_dir: artifact_dir.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> ExoResult<()> {
        if self.knn_neighbors == Some(0) {
            return Err(ExoError::load(
                "pipeline config",
                "knn_neighbors must be >= 1",
            ));
        }
        let names = [
            ("normalizer_schema", &self.normalizer_schema),
            ("normalizer_arrays", &self.normalizer_arrays),
            ("judge_weights", &self.judge_weights),
            ("photometry_weights", &self.photometry_weights),
            ("orbital_weights", &self.orbital_weights),
            ("stellar_weights", &self.stellar_weights),
            ("false_positive_weights", &self.false_positive_weights),
        ];
        for (field, name) in names {
            if name.trim().is_empty() {
                return Err(ExoError::load(
                    "pipeline config",
                    format!("{field} must not be empty"),
                ));
            }
        }
        Ok(())
    }

    pub fn artifact_paths(&self) -> ArtifactPaths {
        let dir = &self.artifact_dir;
        ArtifactPaths {
            normalizer_schema: dir.join(&self.normalizer_schema),
            normalizer_arrays: dir.join(&self.normalizer_arrays),
            judge: dir.join(&self.judge_weights),
            specialists: [
                dir.join(&self.photometry_weights),
                dir.join(&self.orbital_weights),
                dir.join(&self.stellar_weights),
                dir.join(&self.false_positive_weights),
            ],
        }
    }
}

/// Resolved locations of every fitted artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub normalizer_schema: PathBuf,
    pub normalizer_arrays: PathBuf,
    pub judge: PathBuf,
    /// Indexed by `Specialist::index()`.
    pub specialists: [PathBuf; 4],
}

impl ArtifactPaths {
    pub fn specialist(&self, which: Specialist) -> &Path {
        &self.specialists[which.index()]
    }

    pub fn all(&self) -> Vec<&Path> {
        let mut paths = vec![
            self.normalizer_schema.as_path(),
            self.normalizer_arrays.as_path(),
        ];
        paths.extend(self.specialists.iter().map(PathBuf::as_path));
        paths.push(self.judge.as_path());
        paths
    }

    /// Artifacts that do not exist on disk.
    pub fn missing(&self) -> Vec<PathBuf> {
        self.all()
            .into_iter()
            .filter(|p| !p.is_file())
            .map(Path::to_path_buf)
            .collect()
    }
}
