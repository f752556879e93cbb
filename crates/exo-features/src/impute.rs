// ─────────────────────────────────────────────────────────────────────
// SCPN Exo Triage — KNN Imputer
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Nearest-neighbour imputation against a frozen reference table.
//!
//! Distance is the NaN-aware Euclidean distance over coordinates present in
//! both rows, rescaled by `n_features / n_present`. A missing entry takes the
//! uniform mean of the `k` closest reference rows that have that column; with
//! no such donor it falls back to the reference column mean.

use ndarray::{Array1, Array2, ArrayView1, Axis};

#[derive(Debug, Clone)]
pub struct KnnImputer {
    reference: Array2<f64>,
    fallback: Array1<f64>,
    n_neighbors: usize,
}

impl KnnImputer {
    /// `reference` is (n_samples, n_features) and may hold NaN.
    pub fn new(reference: Array2<f64>, n_neighbors: usize) -> Self {
        let fallback = reference
            .axis_iter(Axis(1))
            .map(|col| {
                let (sum, n) = col
                    .iter()
                    .filter(|v| v.is_finite())
                    .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
                if n == 0 {
                    0.0
                } else {
                    sum / n as f64
                }
            })
            .collect();
        Self {
            reference,
            fallback,
            n_neighbors: n_neighbors.max(1),
        }
    }

    pub fn n_features(&self) -> usize {
        self.reference.ncols()
    }

    pub fn n_neighbors(&self) -> usize {
        self.n_neighbors
    }

    /// Fill every non-finite entry of `row` in place; returns how many were filled.
    pub fn impute(&self, row: &mut Array1<f64>) -> usize {
        let missing: Vec<usize> = row
            .iter()
            .enumerate()
            .filter(|(_, v)| !v.is_finite())
            .map(|(j, _)| j)
            .collect();
        if missing.is_empty() {
            return 0;
        }

        // Distances use the row as received, before any entry is filled.
        let distances: Vec<Option<f64>> = self
            .reference
            .outer_iter()
            .map(|r| nan_euclidean(row.view(), r))
            .collect();

        for &j in &missing {
            let mut donors: Vec<(f64, f64)> = distances
                .iter()
                .zip(self.reference.column(j))
                .filter_map(|(d, &v)| match d {
                    Some(d) if v.is_finite() => Some((*d, v)),
                    _ => None,
                })
                .collect();

            row[j] = if donors.is_empty() {
                self.fallback[j]
            } else {
                donors.sort_by(|a, b| a.0.total_cmp(&b.0));
                let k = self.n_neighbors.min(donors.len());
                donors[..k].iter().map(|(_, v)| v).sum::<f64>() / k as f64
            };
        }
        missing.len()
    }
}

/// NaN-aware Euclidean distance; `None` when the rows share no coordinate.
pub fn nan_euclidean(a: ArrayView1<f64>, b: ArrayView1<f64>) -> Option<f64> {
    let (sum, present) = a
        .iter()
        .zip(b.iter())
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .fold((0.0, 0usize), |(s, n), (x, y)| (s + (x - y).powi(2), n + 1));
    if present == 0 {
        return None;
    }
    let weight = a.len() as f64 / present as f64;
    Some((weight * sum).sqrt())
}
