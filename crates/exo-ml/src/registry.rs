// ─────────────────────────────────────────────────────────────────────
// SCPN Exo Triage — Model Registry
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Lazily loaded, process-wide read-only models.
//!
//! Every slot is a `OnceCell`: racing first callers block on a single load,
//! a failed load leaves the slot empty for the next caller, and reads after
//! initialization take no lock.

use crate::judge::JudgeModel;
use crate::specialist::SpecialistModel;
use exo_features::Normalizer;
use exo_types::config::{ArtifactPaths, PipelineConfig, SigmaFormula};
use exo_types::error::{ExoError, ExoResult};
use exo_types::specialist::Specialist;
use once_cell::sync::OnceCell;
use serde::Serialize;
use tracing::{info, warn};

#[derive(Debug)]
pub struct ModelRegistry {
    paths: ArtifactPaths,
    sigma_formula: SigmaFormula,
    knn_neighbors: Option<usize>,
    normalizer: OnceCell<Normalizer>,
    specialists: [OnceCell<SpecialistModel>; 4],
    judge: OnceCell<JudgeModel>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentStatus {
    pub component: String,
    pub loaded: bool,
}

impl ModelRegistry {
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            paths: config.artifact_paths(),
            sigma_formula: config.sigma_formula,
            knn_neighbors: config.knn_neighbors,
            normalizer: OnceCell::new(),
            specialists: std::array::from_fn(|_| OnceCell::new()),
            judge: OnceCell::new(),
        }
    }

    pub fn paths(&self) -> &ArtifactPaths {
        &self.paths
    }

    pub fn normalizer(&self) -> ExoResult<&Normalizer> {
        self.normalizer.get_or_try_init(|| {
            let normalizer = Normalizer::from_files(
                &self.paths.normalizer_schema,
                &self.paths.normalizer_arrays,
                self.knn_neighbors,
            )
            .and_then(|n| self.check_normalizer(n))
            .map_err(|e| {
                warn!(error = %e, "normalizer load failed");
                e
            })?;
            info!(columns = normalizer.width(), "normalizer ready");
            Ok(normalizer)
        })
    }

    pub fn specialist(&self, which: Specialist) -> ExoResult<&SpecialistModel> {
        self.specialists[which.index()].get_or_try_init(|| {
            SpecialistModel::from_npz(which, self.paths.specialist(which)).map_err(|e| {
                warn!(specialist = which.name(), error = %e, "specialist load failed");
                e
            })
        })
    }

    pub fn judge(&self) -> ExoResult<&JudgeModel> {
        self.judge.get_or_try_init(|| {
            JudgeModel::from_npz(&self.paths.judge).map_err(|e| {
                warn!(error = %e, "judge load failed");
                e
            })
        })
    }

    /// Install an already-built normalizer instead of reading it from disk.
    pub fn install_normalizer(&self, normalizer: Normalizer) -> ExoResult<()> {
        let normalizer = self.check_normalizer(normalizer)?;
        self.normalizer
            .set(normalizer)
            .map_err(|_| ExoError::load("normalizer", "already loaded"))
    }

    pub fn install_specialist(&self, model: SpecialistModel) -> ExoResult<()> {
        let which = model.specialist();
        self.specialists[which.index()]
            .set(model)
            .map_err(|_| ExoError::load(which.name(), "already loaded"))
    }

    pub fn install_judge(&self, judge: JudgeModel) -> ExoResult<()> {
        self.judge
            .set(judge)
            .map_err(|_| ExoError::load("judge", "already loaded"))
    }

    /// Loaded state of every slot, without triggering any load.
    pub fn status(&self) -> Vec<ComponentStatus> {
        let mut out = vec![ComponentStatus {
            component: "normalizer".to_string(),
            loaded: self.normalizer.get().is_some(),
        }];
        out.extend(Specialist::ALL.iter().map(|sp| ComponentStatus {
            component: sp.name().to_string(),
            loaded: self.specialists[sp.index()].get().is_some(),
        }));
        out.push(ComponentStatus {
            component: "judge".to_string(),
            loaded: self.judge.get().is_some(),
        });
        out
    }

    /// The fitted schema must cover every specialist column and agree with
    /// the configured sigma formula when it records one.
    fn check_normalizer(&self, normalizer: Normalizer) -> ExoResult<Normalizer> {
        if let Some(fitted) = normalizer.sigma_formula() {
            if fitted != self.sigma_formula {
                return Err(ExoError::load(
                    "normalizer",
                    format!(
                        "fitted with sigma formula {fitted:?}, pipeline configured for {:?}",
                        self.sigma_formula
                    ),
                ));
            }
        }
        let missing: Vec<&str> = Specialist::ALL
            .iter()
            .flat_map(|sp| normalizer.missing_columns(sp.feature_group()))
            .collect();
        if !missing.is_empty() {
            return Err(ExoError::load(
                "normalizer",
                format!("fitted schema lacks columns {}", missing.join(", ")),
            ));
        }
        Ok(normalizer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{full_normalizer, specialist_model, temp_artifact_dir, write_specialist_npz};
    use exo_types::error::ErrorKind;
    use std::sync::{Arc, Barrier};

    fn registry() -> ModelRegistry {
        ModelRegistry::new(&PipelineConfig::with_artifact_dir("/nonexistent/exo"))
    }

    #[test]
    fn test_failed_load_leaves_slot_empty() {
        let reg = registry();
        let err = reg.specialist(Specialist::Orbital).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Load);
        assert!(err.to_string().contains("orbital_net.npz"));
        assert!(reg.status().iter().all(|s| !s.loaded));

        reg.install_specialist(specialist_model(Specialist::Orbital, 1.0))
            .unwrap();
        assert!(reg.specialist(Specialist::Orbital).is_ok());
    }

    #[test]
    fn test_install_twice_rejected() {
        let reg = registry();
        reg.install_judge(JudgeModel::new([1.0; 4], 0.0).unwrap()).unwrap();
        assert!(reg.install_judge(JudgeModel::new([2.0; 4], 0.0).unwrap()).is_err());
        assert_eq!(reg.judge().unwrap().coef(), &[1.0; 4]);
    }

    #[test]
    fn test_normalizer_must_cover_specialist_columns() {
        use exo_features::normalize::NormalizerSchema;
        use ndarray::{Array1, Array2};

        let partial = Normalizer::new(
            NormalizerSchema {
                version: 1,
                columns: vec!["koi_period".to_string()],
                n_neighbors: 1,
                sigma_formula: None,
            },
            Array1::zeros(1),
            Array1::ones(1),
            Array2::zeros((1, 1)),
        )
        .unwrap();
        let err = registry().install_normalizer(partial).unwrap_err();
        assert!(err.to_string().contains("koi_time0bk"));

        assert!(registry().install_normalizer(full_normalizer()).is_ok());
    }

    #[test]
    fn test_sigma_formula_mismatch_rejected() {
        let mut config = PipelineConfig::with_artifact_dir("/nonexistent/exo");
        config.sigma_formula = SigmaFormula::MeanAbs;
        let reg = ModelRegistry::new(&config);
        // full_normalizer records MaxAbs.
        let err = reg.install_normalizer(full_normalizer()).unwrap_err();
        assert!(err.to_string().contains("sigma formula"));
    }

    /// `threads` callers released together on a cold slot.
    fn race_specialist(reg: &Arc<ModelRegistry>, which: Specialist, threads: usize) -> Vec<Option<usize>> {
        let barrier = Arc::new(Barrier::new(threads));
        (0..threads)
            .map(|_| {
                let reg = Arc::clone(reg);
                let barrier = Arc::clone(&barrier);
                std::thread::spawn(move || {
                    barrier.wait();
                    reg.specialist(which)
                        .ok()
                        .map(|m| m as *const SpecialistModel as usize)
                })
            })
            .collect::<Vec<_>>()
            .into_iter()
            .map(|h| h.join().unwrap())
            .collect()
    }

    #[test]
    fn test_cold_start_race_loads_once() {
        let dir = temp_artifact_dir("registry_race");
        let config = PipelineConfig::with_artifact_dir(&dir);
        let reg = Arc::new(ModelRegistry::new(&config));

        // First wave: the file is absent, every racer fails and nothing sticks.
        let first = race_specialist(&reg, Specialist::Stellar, 8);
        assert!(first.iter().all(Option::is_none));
        assert!(reg.status().iter().all(|s| !s.loaded));

        // Second wave: one load, one shared instance.
        write_specialist_npz(reg.paths().specialist(Specialist::Stellar), Specialist::Stellar, 0.5);
        let second = race_specialist(&reg, Specialist::Stellar, 8);
        let first_ptr = second[0].unwrap();
        assert!(second.iter().all(|p| *p == Some(first_ptr)));
        let stellar = reg
            .status()
            .into_iter()
            .find(|s| s.component == "estelar")
            .unwrap();
        assert!(stellar.loaded);
        assert_eq!(
            reg.status().iter().filter(|s| s.loaded).count(),
            1,
            "only the raced slot is loaded"
        );

        std::fs::remove_dir_all(dir).ok();
    }
}
