//! Multi-event compositor.

use crate::foundation::core::{Dims, Rgb8};
use crate::foundation::error::{MaskError, MaskResult};
use crate::mask::frames::{Mask, MaskFrame};

/// A grown mask sequence painted in one color.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorLayer {
    /// Per-frame coverage.
    pub mask: Mask,
    /// Paint color.
    pub color: Rgb8,
}

/// Ungrown subject painted over every layer.
#[derive(Clone, Copy, Debug)]
pub struct SubjectOverlay<'a> {
    /// Ungrown subject mask; its last frame is reused past its end.
    pub mask: &'a Mask,
    /// Paint color.
    pub color: Rgb8,
}

/// Colored output, `frames × height × width × 3`, channels in `[0, 1]`.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorFrames {
    frame_count: usize,
    dims: Dims,
    data: Vec<f32>,
}

impl ColorFrames {
    /// Number of frames.
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Size of every frame.
    pub fn dims(&self) -> Dims {
        self.dims
    }

    /// Flat channel data in frame, row, column, channel order.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Channels of one frame.
    pub fn frame(&self, index: usize) -> Option<&[f32]> {
        let len = self.dims.area() * 3;
        self.data.get(index * len..(index + 1) * len)
    }

    /// RGB channels of pixel `(x, y)` in frame `index`.
    pub fn pixel(&self, index: usize, x: usize, y: usize) -> Option<[f32; 3]> {
        if x >= self.dims.width || y >= self.dims.height {
            return None;
        }
        let frame = self.frame(index)?;
        let at = (y * self.dims.width + x) * 3;
        Some([frame[at], frame[at + 1], frame[at + 2]])
    }

    /// One frame quantized back to 8-bit RGB.
    pub fn frame_rgb8(&self, index: usize) -> Option<Vec<u8>> {
        self.frame(index).map(|f| {
            f.iter()
                .map(|&c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
                .collect()
        })
    }
}

/// Paint `layers` over `background` for `frame_count` frames of size `dims`.
///
/// Layers are painted in order, so later layers win where they overlap. A layer without a
/// mask frame at some index contributes nothing there. When `subject` is given it is painted
/// last and always stays on top.
#[tracing::instrument(skip(layers, subject), fields(layers = layers.len()))]
pub fn composite(
    layers: &[ColorLayer],
    background: Rgb8,
    frame_count: usize,
    dims: Dims,
    subject: Option<SubjectOverlay<'_>>,
) -> MaskResult<ColorFrames> {
    for (i, layer) in layers.iter().enumerate() {
        if layer.mask.dims() != dims {
            return Err(MaskError::shape(format!(
                "layer {i} mask is {} but the output is {dims}",
                layer.mask.dims()
            )));
        }
    }
    if let Some(s) = &subject
        && s.mask.dims() != dims
    {
        return Err(MaskError::shape(format!(
            "subject mask is {} but the output is {dims}",
            s.mask.dims()
        )));
    }

    let area = dims.area();
    let mut data = Vec::with_capacity(frame_count * area * 3);
    let mut canvas = vec![background; area];
    for f in 0..frame_count {
        let frame_masks: Vec<Option<&MaskFrame>> =
            layers.iter().map(|l| l.mask.frame(f)).collect();
        // Everything below the topmost fully set layer is hidden.
        let first = frame_masks
            .iter()
            .rposition(|m| m.is_some_and(MaskFrame::is_full))
            .unwrap_or(0);

        canvas.fill(background);
        for (layer, mask) in layers.iter().zip(&frame_masks).skip(first) {
            if let Some(mask) = mask {
                paint(&mut canvas, mask, layer.color);
            }
        }
        if let Some(s) = &subject
            && let Some(mask) = s.mask.frame_or_last(f)
        {
            paint(&mut canvas, mask, s.color);
        }
        data.extend(canvas.iter().flat_map(|c| c.to_unit()));
    }

    Ok(ColorFrames {
        frame_count,
        dims,
        data,
    })
}

fn paint(canvas: &mut [Rgb8], mask: &MaskFrame, color: Rgb8) {
    for (px, &on) in canvas.iter_mut().zip(mask.cells()) {
        if on {
            *px = color;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composite/compositor.rs"]
mod tests;
