// ─────────────────────────────────────────────────────────────────────
// SCPN Exo Triage — Normalizer
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Frozen KNN imputation followed by standard scaling.
//!
//! Artifact layout:
//! - `normalizer.json`: `{ "version", "columns", "n_neighbors", "sigma_formula"? }`
//! - `normalizer.npz`: `mean (n)`, `scale (n)`, `reference (m, n)` (NaN allowed)

use crate::artifact::{expect_len, NpzArchive};
use crate::feature_set::{FeatureSet, FeatureValue};
use crate::impute::KnnImputer;
use exo_types::config::SigmaFormula;
use exo_types::constants::{DEFAULT_KNN_NEIGHBORS, SCHEMA_VERSION};
use exo_types::error::{ExoError, ExoResult};
use exo_types::schema::FeatureGroup;
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

fn default_version() -> u32 {
    SCHEMA_VERSION
}

fn default_neighbors() -> usize {
    DEFAULT_KNN_NEIGHBORS
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizerSchema {
    #[serde(default = "default_version")]
    pub version: u32,
    /// Fitted column order; every vector the normalizer emits follows it.
    pub columns: Vec<String>,
    #[serde(default = "default_neighbors")]
    pub n_neighbors: usize,
    /// Formula the `_sigma` columns were computed with at fit time, if recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sigma_formula: Option<SigmaFormula>,
}

impl NormalizerSchema {
    pub fn from_file(path: &Path) -> ExoResult<Self> {
        let label = path.display().to_string();
        let text = std::fs::read_to_string(path).map_err(|e| ExoError::load(&label, e))?;
        serde_json::from_str(&text).map_err(|e| ExoError::load(&label, e))
    }
}

#[derive(Debug)]
struct ColumnIndex {
    names: Vec<String>,
    positions: HashMap<String, usize>,
}

impl ColumnIndex {
    fn new(names: Vec<String>) -> ExoResult<Self> {
        let mut positions = HashMap::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            if positions.insert(name.clone(), i).is_some() {
                return Err(ExoError::load(
                    "normalizer schema",
                    format!("duplicate column '{name}'"),
                ));
            }
        }
        Ok(Self { names, positions })
    }
}

/// Column-addressable output of [`Normalizer::normalize`].
#[derive(Debug, Clone)]
pub struct NormalizedVector {
    columns: Arc<ColumnIndex>,
    values: Array1<f64>,
}

impl NormalizedVector {
    /// Build a vector directly, bypassing the normalizer.
    pub fn from_columns(names: Vec<String>, values: Array1<f64>) -> ExoResult<Self> {
        if names.len() != values.len() {
            return Err(ExoError::Processing(format!(
                "{} column names for {} values",
                names.len(),
                values.len()
            )));
        }
        let columns = ColumnIndex::new(names)
            .map_err(|e| ExoError::Processing(e.to_string()))?;
        Ok(Self {
            columns: Arc::new(columns),
            values,
        })
    }

    pub fn values(&self) -> &Array1<f64> {
        &self.values
    }

    pub fn columns(&self) -> &[String] {
        &self.columns.names
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, column: &str) -> Option<f64> {
        self.columns.positions.get(column).map(|&i| self.values[i])
    }

    /// Gather `group`'s columns in the group's own training order.
    pub fn select(&self, group: &FeatureGroup) -> ExoResult<Array1<f64>> {
        group
            .columns
            .iter()
            .map(|c| {
                self.get(c).ok_or_else(|| {
                    ExoError::Processing(format!(
                        "column '{c}' required by {} is not in the normalized vector",
                        group.name
                    ))
                })
            })
            .collect::<ExoResult<Vec<f64>>>()
            .map(Array1::from)
    }
}

#[derive(Debug)]
pub struct Normalizer {
    columns: Arc<ColumnIndex>,
    mean: Array1<f64>,
    scale: Array1<f64>,
    imputer: KnnImputer,
    sigma_formula: Option<SigmaFormula>,
}

impl Normalizer {
    pub fn new(
        schema: NormalizerSchema,
        mean: Array1<f64>,
        scale: Array1<f64>,
        reference: Array2<f64>,
    ) -> ExoResult<Self> {
        const LABEL: &str = "normalizer";
        let n = schema.columns.len();
        if n == 0 {
            return Err(ExoError::load(LABEL, "schema lists no columns"));
        }
        if schema.n_neighbors == 0 {
            return Err(ExoError::load(LABEL, "n_neighbors must be >= 1"));
        }
        expect_len(LABEL, "mean", &mean, n)?;
        expect_len(LABEL, "scale", &scale, n)?;
        if reference.ncols() != n {
            return Err(ExoError::load(
                LABEL,
                format!("reference has {} columns, schema has {n}", reference.ncols()),
            ));
        }
        if reference.nrows() == 0 {
            return Err(ExoError::load(LABEL, "reference table is empty"));
        }
        if mean.iter().any(|v| !v.is_finite()) {
            return Err(ExoError::load(LABEL, "mean contains non-finite values"));
        }
        // Constant training columns are left unscaled.
        let scale = scale.mapv(|s| if s.is_finite() && s != 0.0 { s } else { 1.0 });

        Ok(Self {
            columns: Arc::new(ColumnIndex::new(schema.columns)?),
            mean,
            scale,
            imputer: KnnImputer::new(reference, schema.n_neighbors),
            sigma_formula: schema.sigma_formula,
        })
    }

    /// Load from the schema JSON and the arrays archive. `n_neighbors`
    /// overrides the value stored in the schema.
    pub fn from_files(
        schema_path: &Path,
        arrays_path: &Path,
        n_neighbors: Option<usize>,
    ) -> ExoResult<Self> {
        let mut schema = NormalizerSchema::from_file(schema_path)?;
        if let Some(k) = n_neighbors {
            schema.n_neighbors = k;
        }
        let mut npz = NpzArchive::open(arrays_path)?;
        let mean = npz.array1("mean")?;
        let scale = npz.array1("scale")?;
        let reference = npz.array2("reference")?;
        let normalizer = Self::new(schema, mean, scale, reference)?;
        debug!(
            columns = normalizer.width(),
            neighbors = normalizer.imputer.n_neighbors(),
            "normalizer loaded"
        );
        Ok(normalizer)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns.names
    }

    pub fn width(&self) -> usize {
        self.columns.names.len()
    }

    pub fn sigma_formula(&self) -> Option<SigmaFormula> {
        self.sigma_formula
    }

    /// Columns of `group` this normalizer does not produce.
    pub fn missing_columns(&self, group: &FeatureGroup) -> Vec<&'static str> {
        group
            .columns
            .iter()
            .copied()
            .filter(|c| !self.columns.positions.contains_key(*c))
            .collect()
    }

    /// Map onto the fitted column order, impute, then scale.
    ///
    /// Columns absent from `features` are set to 0.0 before imputation; null
    /// or non-numeric values are treated as missing and imputed.
    pub fn normalize(&self, features: &FeatureSet) -> NormalizedVector {
        let mut zero_filled = 0usize;
        let mut row: Array1<f64> = self
            .columns
            .names
            .iter()
            .map(|name| match features.get(name) {
                Some(FeatureValue::Number(v)) => *v,
                Some(_) => f64::NAN,
                None => {
                    zero_filled += 1;
                    0.0
                }
            })
            .collect();

        let imputed = self.imputer.impute(&mut row);
        let values = (row - &self.mean) / &self.scale;
        debug!(zero_filled, imputed, width = values.len(), "candidate normalized");

        NormalizedVector {
            columns: Arc::clone(&self.columns),
            values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exo_types::error::ErrorKind;
    use exo_types::schema::ORBITAL;
    use ndarray::array;
    use ndarray_npy::NpzWriter;
    use std::fs::File;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn schema(columns: &[&str], k: usize) -> NormalizerSchema {
        NormalizerSchema {
            version: SCHEMA_VERSION,
            columns: columns.iter().map(|c| c.to_string()).collect(),
            n_neighbors: k,
            sigma_formula: None,
        }
    }

    fn small() -> Normalizer {
        Normalizer::new(
            schema(&["a", "b"], 1),
            array![1.0, 10.0],
            array![2.0, 0.0],
            array![[1.0, 10.0], [3.0, 30.0]],
        )
        .unwrap()
    }

    #[test]
    fn test_scales_complete_row() {
        let v = small().normalize(&FeatureSet::from_pairs([("a", 5.0), ("b", 12.0)]));
        // Zero scale is treated as one.
        assert_eq!(v.values(), &array![2.0, 2.0]);
        assert_eq!(v.get("a"), Some(2.0));
        assert_eq!(v.get("zzz"), None);
    }

    #[test]
    fn test_absent_column_zero_filled_not_imputed() {
        let v = small().normalize(&FeatureSet::from_pairs([("a", 3.0)]));
        assert_eq!(v.get("b"), Some(-10.0));
    }

    #[test]
    fn test_null_value_is_imputed() {
        let mut fs = FeatureSet::from_pairs([("a", 3.0)]);
        fs.insert_value("b", FeatureValue::Null);
        let v = small().normalize(&fs);
        // Nearest reference row is [3, 30].
        assert_eq!(v.get("b"), Some(20.0));
    }

    #[test]
    fn test_unknown_input_keys_ignored() {
        let v = small().normalize(&FeatureSet::from_pairs([("a", 1.0), ("b", 10.0), ("kepid", 7.0)]));
        assert_eq!(v.len(), 2);
        assert_eq!(v.values(), &array![0.0, 0.0]);
    }

    #[test]
    fn test_select_follows_group_order() {
        let names: Vec<String> = ORBITAL.columns.iter().rev().map(|c| c.to_string()).collect();
        let values = Array1::from_iter((0..names.len()).map(|i| i as f64));
        let v = NormalizedVector::from_columns(names.clone(), values).unwrap();
        let selected = v.select(&ORBITAL).unwrap();
        let last = (names.len() - 1) as f64;
        assert_eq!(selected[0], last);
        assert_eq!(selected[ORBITAL.width() - 1], 0.0);
    }

    #[test]
    fn test_select_missing_column_is_processing_error() {
        let err = small().normalize(&FeatureSet::new()).select(&ORBITAL).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Processing);
        assert!(err.to_string().contains("orbital"));
    }

    #[test]
    fn test_missing_columns_reports_gaps() {
        assert_eq!(small().missing_columns(&ORBITAL).len(), ORBITAL.width());
    }

    #[test]
    fn test_rejects_shape_mismatch() {
        let err = Normalizer::new(
            schema(&["a", "b"], 1),
            array![0.0],
            array![1.0, 1.0],
            array![[0.0, 0.0]],
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Load);

        let err = Normalizer::new(
            schema(&["a", "a"], 1),
            array![0.0, 0.0],
            array![1.0, 1.0],
            array![[0.0, 0.0]],
        )
        .unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_from_files_roundtrip() {
        let epoch_ns = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let stem = format!("exo_norm_{}_{}", std::process::id(), epoch_ns);
        let json_path = std::env::temp_dir().join(format!("{stem}.json"));
        let npz_path = std::env::temp_dir().join(format!("{stem}.npz"));

        std::fs::write(
            &json_path,
            r#"{"version": 1, "columns": ["a", "b"], "n_neighbors": 3, "sigma_formula": "mean_abs"}"#,
        )
        .unwrap();
        let mut writer = NpzWriter::new(File::create(&npz_path).unwrap());
        writer.add_array("mean", &array![0.0, 0.0]).unwrap();
        writer.add_array("scale", &array![1.0, 1.0]).unwrap();
        writer
            .add_array("reference", &array![[1.0, f64::NAN], [2.0, 4.0]])
            .unwrap();
        writer.finish().unwrap();

        let norm = Normalizer::from_files(&json_path, &npz_path, Some(1)).unwrap();
        assert_eq!(norm.columns(), &["a".to_string(), "b".to_string()]);
        assert_eq!(norm.sigma_formula(), Some(SigmaFormula::MeanAbs));
        let mut fs = FeatureSet::from_pairs([("a", 1.0)]);
        fs.insert_value("b", FeatureValue::Null);
        assert_eq!(norm.normalize(&fs).get("b"), Some(4.0));

        std::fs::remove_file(json_path).ok();
        std::fs::remove_file(npz_path).ok();
    }
}
