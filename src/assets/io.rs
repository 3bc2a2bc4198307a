//! File plumbing for the CLI: PNG mask sequences in, PNG frames out, JSON amplitudes.

use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::animation::signal::AmplitudeSignal;
use crate::composite::compositor::ColorFrames;
use crate::foundation::core::Dims;
use crate::foundation::error::{MaskError, MaskResult};
use crate::mask::frames::{Mask, MaskFrame};

/// Decode one PNG (or any format `image` was built with) into a binary frame.
///
/// Pixels whose luma is above 127 are set.
pub fn decode_mask_frame(bytes: &[u8]) -> MaskResult<MaskFrame> {
    let luma = image::load_from_memory(bytes)
        .context("decode mask image from memory")?
        .to_luma8();
    let (width, height) = luma.dimensions();
    let cells = luma.into_raw().into_iter().map(|v| v > 127).collect();
    MaskFrame::from_cells(Dims::new(width as usize, height as usize), cells)
}

/// Load every `*.png` in `dir`, in file name order, as one mask sequence.
pub fn load_mask_dir(dir: &Path) -> MaskResult<Mask> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)
        .with_context(|| format!("read mask dir '{}'", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("png"))
        })
        .collect();
    paths.sort();
    if paths.is_empty() {
        return Err(MaskError::shape(format!(
            "no PNG frames found in '{}'",
            dir.display()
        )));
    }

    let frames = paths
        .iter()
        .map(|p| {
            let bytes = std::fs::read(p).with_context(|| format!("read '{}'", p.display()))?;
            decode_mask_frame(&bytes)
        })
        .collect::<MaskResult<Vec<_>>>()?;
    tracing::debug!(frames = frames.len(), dir = %dir.display(), "loaded mask sequence");
    Mask::new(frames)
}

/// Load a JSON array of per-frame amplitudes.
pub fn load_amplitude(path: &Path) -> MaskResult<AmplitudeSignal> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read amplitude '{}'", path.display()))?;
    let samples: Vec<f32> = serde_json::from_str(&text).map_err(|e| {
        MaskError::serde(format!("amplitude '{}': {e}", path.display()))
    })?;
    AmplitudeSignal::new(samples)
}

/// Write every frame as `frame_00000.png`, `frame_00001.png`, ... into `dir`.
pub fn write_frames(frames: &ColorFrames, dir: &Path) -> MaskResult<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("create output dir '{}'", dir.display()))?;
    let dims = frames.dims();
    let width = u32::try_from(dims.width).context("frame width exceeds u32")?;
    let height = u32::try_from(dims.height).context("frame height exceeds u32")?;

    let mut written = Vec::with_capacity(frames.frame_count());
    for index in 0..frames.frame_count() {
        let Some(rgb) = frames.frame_rgb8(index) else {
            break;
        };
        let path = dir.join(format!("frame_{index:05}.png"));
        image::save_buffer_with_format(
            &path,
            &rgb,
            width,
            height,
            image::ColorType::Rgb8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/io.rs"]
mod tests;
