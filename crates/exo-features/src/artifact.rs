// ─────────────────────────────────────────────────────────────────────
// SCPN Exo Triage — Artifact Readers
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Readers for fitted arrays stored as NumPy `.npz` archives.
//!
//! Keys are accepted with or without the `.npy` suffix, and float32 arrays
//! (the usual PyTorch export dtype) are widened to f64.

use exo_types::error::{ExoError, ExoResult};
use ndarray::{Array1, Array2, Dimension, OwnedRepr};
use ndarray_npy::NpzReader;
use std::fs::File;
use std::path::Path;

/// Open `.npz` archive together with its path for error reporting.
pub struct NpzArchive {
    label: String,
    reader: NpzReader<File>,
}

impl NpzArchive {
    pub fn open(path: &Path) -> ExoResult<Self> {
        let label = path.display().to_string();
        let file = File::open(path).map_err(|e| ExoError::load(&label, e))?;
        let reader = NpzReader::new(file)
            .map_err(|e| ExoError::load(&label, format!("not a readable npz archive: {e}")))?;
        Ok(Self { label, reader })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn array1(&mut self, key: &str) -> ExoResult<Array1<f64>> {
        self.read::<ndarray::Ix1>(key)
    }

    pub fn array2(&mut self, key: &str) -> ExoResult<Array2<f64>> {
        self.read::<ndarray::Ix2>(key)
    }

    fn read<D: Dimension>(&mut self, key: &str) -> ExoResult<ndarray::Array<f64, D>> {
        let names = [format!("{key}.npy"), key.to_string()];
        let mut last_err = None;
        for name in &names {
            match self.reader.by_name::<OwnedRepr<f64>, D>(name) {
                Ok(arr) => return Ok(arr),
                Err(e) => last_err = Some(e.to_string()),
            }
            match self.reader.by_name::<OwnedRepr<f32>, D>(name) {
                Ok(arr) => return Ok(arr.mapv(f64::from)),
                Err(e) => last_err = Some(e.to_string()),
            }
        }
        Err(ExoError::load(
            &self.label,
            format!(
                "failed to read '{key}': {}",
                last_err.unwrap_or_else(|| "not found".to_string())
            ),
        ))
    }
}

/// Shape-check helper for 1-D arrays.
pub fn expect_len(label: &str, name: &str, arr: &Array1<f64>, expected: usize) -> ExoResult<()> {
    if arr.len() != expected {
        return Err(ExoError::load(
            label,
            format!("invalid {name} length {}, expected {expected}", arr.len()),
        ));
    }
    Ok(())
}

/// Shape-check helper for 2-D arrays.
pub fn expect_dim(
    label: &str,
    name: &str,
    arr: &Array2<f64>,
    expected: (usize, usize),
) -> ExoResult<()> {
    if arr.dim() != expected {
        return Err(ExoError::load(
            label,
            format!("invalid {name} shape {:?}, expected {expected:?}", arr.dim()),
        ));
    }
    Ok(())
}
