//! Console summary: configuration echo, grid size, timing and map previews
//!
//! Line layout (labels and order are relied on by screen scrapers):
//!
//! ```text
//! cfg: 160x120 tile=32 var_thr=400.0 bright_thr=9999.0 seed=1
//! tile_stats_demo: 160x120, tile=32 => tiles=5x4
//! time: 0.041 ms, anomalies: 3
//! mean_map[0..7]: 17.8 80.9 ...
//! var_map[0..7]: 85.3 91.0 ...
//! anom_map[0..7]: 0 0 ...
//! ```

use std::io::Write;

use super::ResultSink;
use crate::io::configuration::PREVIEW_LEN;
use crate::runtime::TileReport;

/// Writes the console summary to any writer
#[derive(Debug)]
pub struct ConsoleSink<W> {
    out: W,
}

impl<W: Write> ConsoleSink<W> {
    /// Create a sink over `out`
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Recover the writer
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_float_preview(&mut self, name: &str, values: &[f32]) -> std::io::Result<()> {
        write!(self.out, "{name}[0..{}]: ", PREVIEW_LEN - 1)?;
        for value in values.iter().take(PREVIEW_LEN) {
            write!(self.out, "{value:.1} ")?;
        }
        writeln!(self.out)
    }
}

impl<W: Write> ResultSink for ConsoleSink<W> {
    const NAME: &'static str = "console";

    fn report(&mut self, report: &TileReport<'_>) -> std::io::Result<()> {
        let params = &report.params;

        writeln!(
            self.out,
            "cfg: {}x{} tile={} var_thr={:.1} bright_thr={:.1} seed={}",
            params.width,
            params.height,
            params.tile,
            params.var_threshold,
            params.brightness_threshold,
            params.seed
        )?;
        writeln!(
            self.out,
            "tile_stats_demo: {}x{}, tile={} => tiles={}x{}",
            params.width,
            params.height,
            params.tile,
            report.tiles_x(),
            report.tiles_y()
        )?;
        writeln!(
            self.out,
            "time: {:.3} ms, anomalies: {}",
            report.elapsed.as_secs_f64() * 1000.0,
            report.anomalies
        )?;

        self.write_float_preview("mean_map", report.mean_map)?;
        self.write_float_preview("var_map", report.var_map)?;

        write!(self.out, "anom_map[0..{}]: ", PREVIEW_LEN - 1)?;
        for flag in report.anom_map.iter().by_vals().take(PREVIEW_LEN) {
            write!(self.out, "{} ", u8::from(flag))?;
        }
        writeln!(self.out)?;

        self.out.flush()
    }
}
