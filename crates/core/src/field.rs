//! Two-dimensional grid of unit flow vectors with edge-clamped lookups.
//!
//! A `FlowField` stores `cols * rows` direction vectors in row-major layout.
//! It is built once per render and only read afterwards. Lookups outside the
//! grid clamp to the nearest edge cell, so a particle that has drifted off the
//! surface keeps following the border flow instead of indexing out of range.

use std::f64::consts::TAU;

use crate::error::EngineError;
use crate::hash::NoiseSeed;
use crate::noise::gradient_noise;

/// How many full turns the flow angle makes per unit of noise. Amplifies
/// angular variation relative to the spatial noise frequency.
pub const ANGLE_TURNS_PER_NOISE_UNIT: f64 = 4.0;

/// A 2D grid of direction vectors.
#[derive(Debug, Clone)]
pub struct FlowField {
    cols: usize,
    rows: usize,
    data: Vec<(f64, f64)>,
}

impl FlowField {
    /// Creates a field of `(1, 0)` vectors.
    ///
    /// Returns `EngineError::InvalidDimensions` if either dimension is zero
    /// or if `cols * rows` overflows `usize`.
    pub fn new(cols: usize, rows: usize) -> Result<Self, EngineError> {
        let len = cell_count(cols, rows)?;
        Ok(Self {
            cols,
            rows,
            data: vec![(1.0, 0.0); len],
        })
    }

    /// Creates a field from pre-built vectors in row-major order.
    ///
    /// Vectors are stored as given; the caller is responsible for them being
    /// unit length.
    pub fn from_vectors(
        cols: usize,
        rows: usize,
        data: Vec<(f64, f64)>,
    ) -> Result<Self, EngineError> {
        let expected = cell_count(cols, rows)?;
        if data.len() != expected {
            return Err(EngineError::invalid_param(
                "data",
                format!(
                    "expected {expected} vectors for a {cols}x{rows} grid, got {}",
                    data.len()
                ),
            ));
        }
        Ok(Self { cols, rows, data })
    }

    /// Builds the field by sampling gradient noise once per cell.
    ///
    /// Returns `EngineError::InvalidDimensions` if the grid cannot be
    /// allocated.
    ///
    /// Cell `(col, row)` samples `n = noise(col * noise_step, row * noise_step)`
    /// and stores `(cos θ, sin θ)` with `θ = 8π · n`.
    pub fn from_noise(
        cols: usize,
        rows: usize,
        noise_step: f64,
        seed: NoiseSeed,
    ) -> Result<Self, EngineError> {
        let len = cell_count(cols, rows)?;
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| EngineError::InvalidDimensions)?;
        for row in 0..rows {
            let ny = row as f64 * noise_step;
            for col in 0..cols {
                let n = gradient_noise(col as f64 * noise_step, ny, seed);
                let theta = ANGLE_TURNS_PER_NOISE_UNIT * TAU * n;
                data.push((theta.cos(), theta.sin()));
            }
        }
        tracing::debug!(cols, rows, noise_step, seed = seed.0, "built flow field");
        Ok(Self { cols, rows, data })
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Read-only access to the underlying row-major vectors.
    pub fn data(&self) -> &[(f64, f64)] {
        &self.data
    }

    /// Vector at `(col, row)`, clamping both indices into the grid.
    pub fn vector_at(&self, col: isize, row: isize) -> (f64, f64) {
        let c = col.clamp(0, self.cols as isize - 1) as usize;
        let r = row.clamp(0, self.rows as isize - 1) as usize;
        self.data[r * self.cols + c]
    }

    /// Vector under pixel position `(x, y)` for cells `scale` pixels wide.
    ///
    /// The cell is `floor(p / scale)`, clamped into the grid. Non-finite
    /// positions read cell 0 on that axis.
    pub fn sample(&self, x: f64, y: f64, scale: f64) -> (f64, f64) {
        let c = clamp_cell(x / scale, self.cols);
        let r = clamp_cell(y / scale, self.rows);
        self.data[r * self.cols + c]
    }

    /// Iterates over all cells yielding `(col, row, vector)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, (f64, f64))> + '_ {
        self.data.iter().enumerate().map(|(i, &v)| {
            let col = i % self.cols;
            let row = i / self.cols;
            (col, row, v)
        })
    }
}

fn cell_count(cols: usize, rows: usize) -> Result<usize, EngineError> {
    if cols == 0 || rows == 0 {
        return Err(EngineError::InvalidDimensions);
    }
    cols.checked_mul(rows).ok_or(EngineError::InvalidDimensions)
}

/// Floors a fractional cell coordinate and clamps it to `[0, len)`.
///
/// Clamping happens in `f64` before the cast so huge or infinite values never
/// overflow the index.
fn clamp_cell(cell: f64, len: usize) -> usize {
    let cell = cell.floor();
    if cell.is_nan() || cell < 0.0 {
        return 0;
    }
    let max = (len - 1) as f64;
    if cell > max {
        len - 1
    } else {
        cell as usize
    }
}
