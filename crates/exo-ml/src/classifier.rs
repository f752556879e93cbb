// ─────────────────────────────────────────────────────────────────────
// SCPN Exo Triage — Classifier
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! `score(raw, target)`: validate → derive → normalize → specialists →
//! optional ensemble or judge.

use crate::ensemble::ensemble;
use crate::panel::SpecialistPanel;
use crate::registry::{ComponentStatus, ModelRegistry};
use exo_features::{validate, FeatureDeriver, FeatureSet, NormalizedVector};
use exo_types::config::PipelineConfig;
use exo_types::error::ExoResult;
use exo_types::result::{ScoreOutcome, SpecialistResult};
use exo_types::schema::GroupCatalog;
use exo_types::specialist::{Specialist, Target};
use rayon::prelude::*;
use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Debug)]
pub struct Classifier {
    registry: ModelRegistry,
    deriver: FeatureDeriver,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    /// True once every component is loaded.
    pub ready: bool,
    pub components: Vec<ComponentStatus>,
    pub missing_artifacts: Vec<PathBuf>,
}

/// Input contract of every specialist, in judge order.
pub fn feature_catalog() -> Vec<GroupCatalog> {
    Specialist::ALL
        .iter()
        .map(|sp| sp.feature_group().catalog())
        .collect()
}

impl Classifier {
    pub fn new(config: PipelineConfig) -> ExoResult<Self> {
        config.validate()?;
        Ok(Self {
            registry: ModelRegistry::new(&config),
            deriver: FeatureDeriver::new(config.sigma_formula),
        })
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    pub fn score(&self, raw: &Value, target: Target) -> ExoResult<ScoreOutcome> {
        let features = FeatureSet::from_json(raw)?;
        self.score_features(&features, target)
    }

    pub fn score_features(&self, raw: &FeatureSet, target: Target) -> ExoResult<ScoreOutcome> {
        validate(raw, target).into_result()?;
        let derived = self.deriver.derive(raw);
        let vector = self.registry.normalizer()?.normalize(&derived);
        debug!(%target, width = vector.len(), "candidate prepared");

        let outcome = match target {
            Target::Specialist(sp) => ScoreOutcome::Specialist(self.run_specialist(sp, &vector)?),
            Target::Ensemble => ScoreOutcome::Aggregate(ensemble(&self.panel(&vector)?)),
            Target::Judge => {
                let panel = self.panel(&vector)?;
                ScoreOutcome::Aggregate(self.registry.judge()?.combine(&panel))
            }
        };
        debug!(%target, label = %outcome.label(), score = outcome.score(), "candidate scored");
        Ok(outcome)
    }

    /// Score many candidates in parallel; results keep the input order.
    pub fn score_batch(&self, raws: &[Value], target: Target) -> Vec<ExoResult<ScoreOutcome>> {
        raws.par_iter().map(|raw| self.score(raw, target)).collect()
    }

    /// Load every artifact now instead of on first request.
    pub fn warm_up(&self) -> ExoResult<()> {
        self.registry.normalizer()?;
        for sp in Specialist::ALL {
            self.registry.specialist(sp)?;
        }
        self.registry.judge()?;
        info!("all models loaded");
        Ok(())
    }

    pub fn health(&self) -> HealthReport {
        let components = self.registry.status();
        HealthReport {
            ready: components.iter().all(|c| c.loaded),
            components,
            missing_artifacts: self.registry.paths().missing(),
        }
    }

    fn run_specialist(&self, sp: Specialist, vector: &NormalizedVector) -> ExoResult<SpecialistResult> {
        let input = vector.select(sp.feature_group())?;
        self.registry.specialist(sp)?.score(&input)
    }

    fn panel(&self, vector: &NormalizedVector) -> ExoResult<SpecialistPanel> {
        let results = Specialist::ALL
            .iter()
            .map(|&sp| self.run_specialist(sp, vector))
            .collect::<ExoResult<Vec<_>>>()?;
        SpecialistPanel::from_results(results)
    }
}
