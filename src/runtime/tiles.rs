//! Tile partitioning with edge clamping, per-tile statistics and anomaly classification

use ndarray::{ArrayView2, s};

/// Validated parameters of one detector run
///
/// Every dimension is non-zero. Generated artifacts build this as a
/// `const`, so all derived sizes are compile-time constants there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileParams {
    /// Frame width in samples
    pub width: usize,
    /// Frame height in samples
    pub height: usize,
    /// Tile edge length
    pub tile: usize,
    /// Variance cutoff (strict)
    pub var_threshold: f32,
    /// Mean cutoff (strict)
    pub brightness_threshold: f32,
    /// Frame synthesis seed
    pub seed: u32,
}

impl TileParams {
    /// Number of tile columns, counting a clamped last column
    pub const fn tiles_x(&self) -> usize {
        self.width.div_ceil(self.tile)
    }

    /// Number of tile rows, counting a clamped last row
    pub const fn tiles_y(&self) -> usize {
        self.height.div_ceil(self.tile)
    }

    /// Number of cells in each tile map
    pub const fn tile_count(&self) -> usize {
        self.tiles_x() * self.tiles_y()
    }

    /// Number of samples in the frame
    pub const fn frame_len(&self) -> usize {
        self.width * self.height
    }

    /// Bytes needed to hold one anomaly bit per tile
    pub const fn anomaly_bytes(&self) -> usize {
        self.tile_count().div_ceil(8)
    }

    /// Byte region a run needs: frame samples plus anomaly bits
    pub const fn byte_region_len(&self) -> usize {
        self.frame_len() + self.anomaly_bytes()
    }

    /// Float region a run needs: mean map plus variance map
    pub const fn float_region_len(&self) -> usize {
        2 * self.tile_count()
    }

    /// Total bytes of the byte and float regions, if they can be allocated
    ///
    /// `None` if any size overflows `usize` or the total exceeds
    /// `isize::MAX`, the limit for one allocation or `static`.
    pub const fn checked_region_bytes(&self) -> Option<usize> {
        let Some(frame) = self.width.checked_mul(self.height) else {
            return None;
        };
        let Some(tiles) = self.tiles_x().checked_mul(self.tiles_y()) else {
            return None;
        };
        let Some(bytes) = frame.checked_add(tiles.div_ceil(8)) else {
            return None;
        };
        let Some(floats) = tiles.checked_mul(2 * size_of::<f32>()) else {
            return None;
        };

        match bytes.checked_add(floats) {
            Some(total) if total <= isize::MAX as usize => Some(total),
            _ => None,
        }
    }

    /// Sample rectangle covered by tile `(tx, ty)`, clamped to the frame
    pub const fn tile_bounds(&self, tx: usize, ty: usize) -> TileBounds {
        let x0 = tx * self.tile;
        let y0 = ty * self.tile;
        let x1 = clamp_end(x0 + self.tile, self.width);
        let y1 = clamp_end(y0 + self.tile, self.height);

        TileBounds {
            index: ty * self.tiles_x() + tx,
            tx,
            ty,
            x0,
            x1,
            y0,
            y1,
        }
    }

    /// Every tile in row-major order (ascending tile index)
    pub fn tiles(&self) -> impl Iterator<Item = TileBounds> + use<> {
        let params = *self;
        (0..params.tiles_y())
            .flat_map(move |ty| (0..params.tiles_x()).map(move |tx| params.tile_bounds(tx, ty)))
    }

    /// Whether a tile's statistics cross either cutoff
    ///
    /// Both comparisons are strict: a tile sitting exactly on a threshold
    /// is not anomalous.
    pub fn is_anomalous(&self, stats: &TileStats) -> bool {
        stats.variance > self.var_threshold || stats.mean > self.brightness_threshold
    }
}

const fn clamp_end(end: usize, limit: usize) -> usize {
    if end > limit { limit } else { end }
}

/// Half-open sample rectangle of one tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileBounds {
    /// Row-major tile index (`ty * tiles_x + tx`)
    pub index: usize,
    /// Tile column
    pub tx: usize,
    /// Tile row
    pub ty: usize,
    /// First sample column (inclusive)
    pub x0: usize,
    /// Last sample column (exclusive)
    pub x1: usize,
    /// First sample row (inclusive)
    pub y0: usize,
    /// Last sample row (exclusive)
    pub y1: usize,
}

impl TileBounds {
    /// Width in samples after clamping
    pub const fn width(&self) -> usize {
        self.x1.saturating_sub(self.x0)
    }

    /// Height in samples after clamping
    pub const fn height(&self) -> usize {
        self.y1.saturating_sub(self.y0)
    }

    /// Number of samples covered
    pub const fn sample_count(&self) -> usize {
        self.width() * self.height()
    }
}

/// Mean and population variance of one tile
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TileStats {
    /// Arithmetic mean of the samples
    pub mean: f32,
    /// Population variance of the samples (divides by the sample count)
    pub variance: f32,
}

/// Compute mean and population variance over one tile of the frame
///
/// Accumulates in `f64` with a second pass for the squared deviations,
/// then narrows both results to `f32`. An empty tile yields zeros.
pub fn tile_stats(frame: &ArrayView2<'_, u8>, bounds: &TileBounds) -> TileStats {
    let (rows, cols) = frame.dim();
    let y1 = bounds.y1.min(rows);
    let x1 = bounds.x1.min(cols);
    if bounds.y0 >= y1 || bounds.x0 >= x1 {
        return TileStats::default();
    }

    let tile = frame.slice(s![bounds.y0..y1, bounds.x0..x1]);
    let count = tile.len() as f64;

    let mean = tile.iter().map(|&v| f64::from(v)).sum::<f64>() / count;
    let variance = tile
        .iter()
        .map(|&v| {
            let delta = f64::from(v) - mean;
            delta * delta
        })
        .sum::<f64>()
        / count;

    TileStats {
        mean: mean as f32,
        variance: variance as f32,
    }
}
