//! JSON dump of every tile map plus run metadata
//!
//! Field order is fixed: scalars first (`width`, `height`, `tile`,
//! `tiles_x`, `tiles_y`, `var_threshold`, `brightness_threshold`, `seed`,
//! `anomalies`), then `mean_map`, `var_map` and `anom_map`. Every map is
//! row-major with ascending tile index, so position `ty * tiles_x + tx`
//! always refers to tile `(tx, ty)`.

use std::io::Write;

use bitvec::prelude::{BitSlice, Lsb0};
use serde::{Serialize, Serializer};

use super::ResultSink;
use crate::runtime::TileReport;

#[derive(Serialize)]
struct TileDocument<'r> {
    width: usize,
    height: usize,
    tile: usize,
    tiles_x: usize,
    tiles_y: usize,
    var_threshold: f32,
    brightness_threshold: f32,
    seed: u32,
    anomalies: usize,
    mean_map: &'r [f32],
    var_map: &'r [f32],
    anom_map: AnomalyBits<'r>,
}

// Serialized as 0/1 integers rather than booleans
struct AnomalyBits<'r>(&'r BitSlice<u8, Lsb0>);

impl Serialize for AnomalyBits<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter().by_vals().map(u8::from))
    }
}

impl<'r> From<&'r TileReport<'_>> for TileDocument<'r> {
    fn from(report: &'r TileReport<'_>) -> Self {
        let params = &report.params;
        Self {
            width: params.width,
            height: params.height,
            tile: params.tile,
            tiles_x: report.tiles_x(),
            tiles_y: report.tiles_y(),
            var_threshold: params.var_threshold,
            brightness_threshold: params.brightness_threshold,
            seed: params.seed,
            anomalies: report.anomalies,
            mean_map: report.mean_map,
            var_map: report.var_map,
            anom_map: AnomalyBits(report.anom_map),
        }
    }
}

/// Writes a 2-space indented JSON document to any writer
#[derive(Debug)]
pub struct JsonSink<W> {
    out: W,
}

impl<W: Write> JsonSink<W> {
    /// Create a sink over `out`
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Recover the writer
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ResultSink for JsonSink<W> {
    const NAME: &'static str = "json";

    fn report(&mut self, report: &TileReport<'_>) -> std::io::Result<()> {
        serde_json::to_writer_pretty(&mut self.out, &TileDocument::from(report))?;
        writeln!(self.out)?;
        self.out.flush()
    }
}
