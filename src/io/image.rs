//! PNG export of synthesized frames

use std::path::Path;

use image::GrayImage;
use ndarray::ArrayView2;

use crate::io::error::{GeneratorError, Result, WithPath, invalid_parameter};

/// Export a frame (rows x columns) as an 8-bit grayscale PNG
///
/// # Errors
///
/// Returns an error if:
/// - A frame dimension does not fit in `u32`
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_frame_as_png(frame: &ArrayView2<'_, u8>, output_path: &Path) -> Result<()> {
    let (rows, cols) = frame.dim();
    let width = u32::try_from(cols)
        .ok()
        .ok_or_else(|| invalid_parameter("width", &cols, &"too wide for PNG export"))?;
    let height = u32::try_from(rows)
        .ok()
        .ok_or_else(|| invalid_parameter("height", &rows, &"too tall for PNG export"))?;

    // Logical iteration order is row-major regardless of memory layout
    let pixels: Vec<u8> = frame.iter().copied().collect();
    let img = GrayImage::from_raw(width, height, pixels).ok_or_else(|| {
        invalid_parameter(
            "frame",
            &format!("{cols}x{rows}"),
            &"sample count does not match dimensions",
        )
    })?;

    if let Some(parent) = output_path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
    {
        std::fs::create_dir_all(parent).with_path(parent, "create directory")?;
    }

    img.save(output_path)
        .map_err(|source| GeneratorError::ImageExport {
            path: output_path.to_path_buf(),
            source,
        })?;

    Ok(())
}
