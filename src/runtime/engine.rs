//! One statistics pass over one synthesized frame

use std::time::{Duration, Instant};

use bitvec::prelude::{BitSlice, Lsb0};
use ndarray::{ArrayView2, ArrayViewMut2};

use super::RuntimeError;
use super::arena::Bump;
use super::frame::synthesize_frame;
use super::tiles::{TileParams, tile_stats};

/// Buffers for one run, carved from caller-owned regions
#[derive(Debug)]
pub struct Workspace<'a> {
    frame: &'a mut [u8],
    mean_map: &'a mut [f32],
    var_map: &'a mut [f32],
    anom_map: &'a mut BitSlice<u8, Lsb0>,
}

impl<'a> Workspace<'a> {
    /// Carve the frame, both float maps and the anomaly bits for `params`
    ///
    /// The byte cursor needs [`TileParams::byte_region_len`] elements and
    /// the float cursor [`TileParams::float_region_len`].
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::ArenaExhausted`] if either region is too small
    pub fn carve(
        params: &TileParams,
        bytes: &mut Bump<'a, u8>,
        floats: &mut Bump<'a, f32>,
    ) -> Result<Self, RuntimeError> {
        let tile_count = params.tile_count();

        let frame = bytes.alloc(params.frame_len())?;
        let bits = BitSlice::<u8, Lsb0>::from_slice_mut(bytes.alloc(params.anomaly_bytes())?);
        let available = bits.len();
        let anom_map = bits
            .get_mut(..tile_count)
            .ok_or(RuntimeError::ArenaExhausted {
                requested: tile_count,
                remaining: available,
            })?;

        let mean_map = floats.alloc(tile_count)?;
        let var_map = floats.alloc(tile_count)?;

        Ok(Self {
            frame,
            mean_map,
            var_map,
            anom_map,
        })
    }
}

/// Runs frame synthesis and the tile statistics pass exactly once
#[derive(Debug)]
pub struct TileStatisticsEngine<'a> {
    params: TileParams,
    workspace: Workspace<'a>,
}

impl<'a> TileStatisticsEngine<'a> {
    /// Bind parameters to the buffers they were carved for
    pub const fn new(params: TileParams, workspace: Workspace<'a>) -> Self {
        Self { params, workspace }
    }

    /// Synthesize the frame, fill every tile map and count anomalies
    ///
    /// Only the statistics pass is timed; synthesis is excluded.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::Shape`] if the workspace was carved for
    /// different dimensions
    pub fn run(self) -> Result<TileReport<'a>, RuntimeError> {
        let Self { params, workspace } = self;
        let Workspace {
            frame,
            mean_map,
            var_map,
            anom_map,
        } = workspace;
        let shape = (params.height, params.width);

        synthesize_frame(
            &mut ArrayViewMut2::from_shape(shape, &mut *frame)?,
            params.seed,
        );
        let frame: &'a [u8] = frame;
        let frame = ArrayView2::from_shape(shape, frame)?;

        let started = Instant::now();
        for ((bounds, mean), variance) in params
            .tiles()
            .zip(mean_map.iter_mut())
            .zip(var_map.iter_mut())
        {
            let stats = tile_stats(&frame, &bounds);
            *mean = stats.mean;
            *variance = stats.variance;
            if let Some(mut flag) = anom_map.get_mut(bounds.index) {
                *flag = params.is_anomalous(&stats);
            }
        }
        let elapsed = started.elapsed();

        let anom_map: &'a BitSlice<u8, Lsb0> = anom_map;
        Ok(TileReport {
            params,
            frame,
            mean_map,
            var_map,
            anomalies: anom_map.count_ones(),
            anom_map,
            elapsed,
        })
    }
}

/// Read-only result of one engine run, shared by every sink
#[derive(Debug, Clone)]
pub struct TileReport<'a> {
    /// Parameters the run used
    pub params: TileParams,
    /// The synthesized frame (rows x columns)
    pub frame: ArrayView2<'a, u8>,
    /// Tile means, row-major
    pub mean_map: &'a [f32],
    /// Tile population variances, row-major
    pub var_map: &'a [f32],
    /// Tile anomaly flags, row-major
    pub anom_map: &'a BitSlice<u8, Lsb0>,
    /// Number of set anomaly flags
    pub anomalies: usize,
    /// Wall-clock duration of the statistics pass
    pub elapsed: Duration,
}

/// One cell of the tile grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileCell {
    /// Tile mean
    pub mean: f32,
    /// Tile population variance
    pub variance: f32,
    /// Whether the tile crossed either cutoff
    pub anomaly: bool,
}

impl TileReport<'_> {
    /// Number of tile columns
    pub const fn tiles_x(&self) -> usize {
        self.params.tiles_x()
    }

    /// Number of tile rows
    pub const fn tiles_y(&self) -> usize {
        self.params.tiles_y()
    }

    /// Cell at tile `(tx, ty)`, if it exists
    pub fn cell(&self, tx: usize, ty: usize) -> Option<TileCell> {
        if tx >= self.tiles_x() || ty >= self.tiles_y() {
            return None;
        }
        let index = ty * self.tiles_x() + tx;

        Some(TileCell {
            mean: *self.mean_map.get(index)?,
            variance: *self.var_map.get(index)?,
            anomaly: *self.anom_map.get(index)?,
        })
    }
}
