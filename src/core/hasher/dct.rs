//! Forward 2D DCT-II engine.
//!
//! Unnormalized: `X[k] = Σ x[n] · cos(π/N · k · (n + 0.5))`, applied separably
//! along rows and columns. Two backends implement [`ForwardDct`]:
//! - [`DctTable`]: direct evaluation against a precomputed cosine table,
//!   O(N³) for an N×N raster. Can stop early at the low-frequency corner.
//! - [`PlannedDct`]: `rustdct` planned fast transform, O(N² log N).
//!
//! Both produce the same coefficients up to floating-point rounding.

use super::raster::{CoefficientMatrix, IntensityRaster};
use crate::error::HashError;
use once_cell::sync::Lazy;
use rustdct::{Dct2, DctPlanner, TransformType2And3};
use std::collections::HashMap;
use std::f64::consts::PI;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

/// One cached cosine table per transform size, never mutated once inserted
static SHARED_TABLES: Lazy<RwLock<HashMap<usize, Arc<DctTable>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// A forward 2D DCT-II over square rasters of one fixed size
pub trait ForwardDct: Send + Sync {
    /// Side length N of the rasters this engine accepts
    fn size(&self) -> usize;

    /// Transform an N×N raster into an N×N coefficient matrix.
    fn forward_2d(&self, raster: &IntensityRaster) -> Result<CoefficientMatrix, HashError>;

    /// Row-major `keep` x `keep` low-frequency corner of the transform.
    fn low_frequencies(
        &self,
        raster: &IntensityRaster,
        keep: usize,
    ) -> Result<Vec<f64>, HashError> {
        self.forward_2d(raster)?.low_frequency_block(keep)
    }
}

fn ensure_transform_size(size: usize) -> Result<(), HashError> {
    if size == 0 {
        return Err(HashError::InvalidTargetSize {
            width: 0,
            height: 0,
        });
    }
    Ok(())
}

/// Order of the two separable 1D passes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassOrder {
    RowsFirst,
    ColumnsFirst,
}

/// Immutable DCT-II basis for one transform size.
#[derive(Debug, Clone, PartialEq)]
pub struct DctTable {
    size: usize,
    /// `cosines[k * size + n] = cos(π/N · k · (n + 0.5))`
    cosines: Vec<f64>,
}

impl DctTable {
    /// Compute the cosine table for size `size`. Size 0 is rejected.
    pub fn new(size: usize) -> Result<Self, HashError> {
        ensure_transform_size(size)?;

        let mut cosines = vec![0.0; size * size];
        for k in 0..size {
            for n in 0..size {
                cosines[k * size + n] = (PI / size as f64 * k as f64 * (n as f64 + 0.5)).cos();
            }
        }
        Ok(Self { size, cosines })
    }

    /// The process-wide table for `size`, built on first use.
    ///
    /// Concurrent first callers may each compute a table, but only the first
    /// one inserted is ever handed out.
    pub fn shared(size: usize) -> Result<Arc<DctTable>, HashError> {
        if let Some(table) = SHARED_TABLES
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&size)
        {
            return Ok(Arc::clone(table));
        }

        let table = Arc::new(DctTable::new(size)?);
        let mut tables = SHARED_TABLES
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(Arc::clone(tables.entry(size).or_insert(table)))
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Basis value for output index `k`, input index `n`
    pub fn cosine(&self, k: usize, n: usize) -> f64 {
        self.cosines[k * self.size + n]
    }

    /// 1D DCT-II of `input` (length N), writing the first `output.len()` coefficients.
    pub fn transform_1d(&self, input: &[f64], output: &mut [f64]) {
        debug_assert_eq!(input.len(), self.size);
        debug_assert!(output.len() <= self.size);

        for (k, out) in output.iter_mut().enumerate() {
            let basis = &self.cosines[k * self.size..(k + 1) * self.size];
            *out = input.iter().zip(basis).map(|(x, c)| x * c).sum();
        }
    }
}

impl ForwardDct for DctTable {
    fn size(&self) -> usize {
        self.size
    }

    fn forward_2d(&self, raster: &IntensityRaster) -> Result<CoefficientMatrix, HashError> {
        forward_dct_2d(self, raster)
    }

    fn low_frequencies(
        &self,
        raster: &IntensityRaster,
        keep: usize,
    ) -> Result<Vec<f64>, HashError> {
        Ok(forward_dct_2d_low(self, raster, keep)?.into_values())
    }
}

/// Full 2D transform, rows first.
pub fn forward_dct_2d(
    table: &DctTable,
    raster: &IntensityRaster,
) -> Result<CoefficientMatrix, HashError> {
    separable(table, raster, table.size, PassOrder::RowsFirst)
}

/// Full 2D transform with an explicit pass order.
pub fn forward_dct_2d_ordered(
    table: &DctTable,
    raster: &IntensityRaster,
    order: PassOrder,
) -> Result<CoefficientMatrix, HashError> {
    separable(table, raster, table.size, order)
}

/// Only the `keep` x `keep` low-frequency corner of the 2D transform.
///
/// Skips every coefficient outside the corner, so the cost is O(N²·keep)
/// instead of O(N³).
pub fn forward_dct_2d_low(
    table: &DctTable,
    raster: &IntensityRaster,
    keep: usize,
) -> Result<CoefficientMatrix, HashError> {
    separable(table, raster, keep, PassOrder::RowsFirst)
}

fn separable(
    table: &DctTable,
    raster: &IntensityRaster,
    keep: usize,
    order: PassOrder,
) -> Result<CoefficientMatrix, HashError> {
    let n = table.size;
    raster.ensure_square(n)?;
    if keep == 0 || keep > n {
        return Err(HashError::SizeMismatch {
            expected: n,
            width: keep,
            height: keep,
        });
    }

    let mut column = vec![0.0; n];
    let mut freqs = vec![0.0; keep];
    let mut out = vec![0.0; keep * keep];

    match order {
        PassOrder::RowsFirst => {
            // n rows x keep horizontal frequencies
            let mut partial = vec![0.0; n * keep];
            for y in 0..n {
                table.transform_1d(raster.row(y), &mut partial[y * keep..(y + 1) * keep]);
            }
            for k in 0..keep {
                for (y, c) in column.iter_mut().enumerate() {
                    *c = partial[y * keep + k];
                }
                table.transform_1d(&column, &mut freqs);
                for (j, f) in freqs.iter().enumerate() {
                    out[j * keep + k] = *f;
                }
            }
        }
        PassOrder::ColumnsFirst => {
            // keep vertical frequencies x n columns
            let mut partial = vec![0.0; keep * n];
            for x in 0..n {
                for (y, c) in column.iter_mut().enumerate() {
                    *c = raster.get(x, y);
                }
                table.transform_1d(&column, &mut freqs);
                for (j, f) in freqs.iter().enumerate() {
                    partial[j * n + x] = *f;
                }
            }
            for j in 0..keep {
                table.transform_1d(
                    &partial[j * n..(j + 1) * n],
                    &mut out[j * keep..(j + 1) * keep],
                );
            }
        }
    }

    Ok(CoefficientMatrix::from_values(keep, out))
}

/// Fast transform backend planned by `rustdct`.
pub struct PlannedDct {
    size: usize,
    dct: Arc<dyn TransformType2And3<f64>>,
}

impl PlannedDct {
    /// Plan a transform for `size` x `size` rasters. Size 0 is rejected.
    pub fn new(size: usize) -> Result<Self, HashError> {
        ensure_transform_size(size)?;

        let mut planner = DctPlanner::new();
        Ok(Self {
            size,
            dct: planner.plan_dct2(size),
        })
    }
}

impl fmt::Debug for PlannedDct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlannedDct").field("size", &self.size).finish()
    }
}

impl ForwardDct for PlannedDct {
    fn size(&self) -> usize {
        self.size
    }

    fn forward_2d(&self, raster: &IntensityRaster) -> Result<CoefficientMatrix, HashError> {
        let n = self.size;
        raster.ensure_square(n)?;

        let mut values = raster.samples().to_vec();
        for row in values.chunks_exact_mut(n) {
            self.dct.process_dct2(row);
        }
        transpose_square(&mut values, n);
        for column in values.chunks_exact_mut(n) {
            self.dct.process_dct2(column);
        }
        transpose_square(&mut values, n);

        Ok(CoefficientMatrix::from_values(n, values))
    }
}

fn transpose_square(values: &mut [f64], n: usize) {
    for i in 0..n {
        for j in (i + 1)..n {
            values.swap(i * n + j, j * n + i);
        }
    }
}
