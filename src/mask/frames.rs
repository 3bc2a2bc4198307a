use crate::foundation::core::Dims;
use crate::foundation::error::{MaskError, MaskResult};

/// One binary frame, stored row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MaskFrame {
    dims: Dims,
    cells: Vec<bool>,
}

impl MaskFrame {
    /// All-background frame.
    pub fn empty(dims: Dims) -> Self {
        Self {
            dims,
            cells: vec![false; dims.area()],
        }
    }

    /// All-foreground frame.
    pub fn full(dims: Dims) -> Self {
        Self {
            dims,
            cells: vec![true; dims.area()],
        }
    }

    /// Wrap row-major cells; `cells.len()` must equal `width * height`.
    pub fn from_cells(dims: Dims, cells: Vec<bool>) -> MaskResult<Self> {
        if cells.len() != dims.area() {
            return Err(MaskError::shape(format!(
                "frame {dims} needs {} cells, got {}",
                dims.area(),
                cells.len()
            )));
        }
        Ok(Self { dims, cells })
    }

    /// Build from numeric cells; any value `> 0` is foreground.
    pub fn from_values(dims: Dims, values: &[f32]) -> MaskResult<Self> {
        Self::from_cells(dims, values.iter().map(|&v| v > 0.0).collect())
    }

    /// Frame dimensions.
    pub fn dims(&self) -> Dims {
        self.dims
    }

    /// Row-major cells.
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// One row of cells.
    pub fn row(&self, y: usize) -> &[bool] {
        let w = self.dims.width;
        &self.cells[y * w..(y + 1) * w]
    }

    /// Cell at `(x, y)`; out-of-bounds reads are background.
    pub fn get(&self, x: usize, y: usize) -> bool {
        if x >= self.dims.width || y >= self.dims.height {
            return false;
        }
        self.cells[y * self.dims.width + x]
    }

    /// Set the cell at `(x, y)`. Out-of-bounds writes are ignored.
    pub fn set(&mut self, x: usize, y: usize, on: bool) {
        if x < self.dims.width && y < self.dims.height {
            self.cells[y * self.dims.width + x] = on;
        }
    }

    /// Number of foreground cells.
    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Every cell is foreground (saturation).
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&c| c)
    }

    /// No cell is foreground.
    pub fn is_empty(&self) -> bool {
        !self.cells.iter().any(|&c| c)
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [bool] {
        &mut self.cells
    }
}

/// An ordered sequence of binary frames sharing one size.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    dims: Dims,
    frames: Vec<MaskFrame>,
}

impl Mask {
    /// Validate that `frames` is non-empty and uniformly sized.
    pub fn new(frames: Vec<MaskFrame>) -> MaskResult<Self> {
        let Some(first) = frames.first() else {
            return Err(MaskError::shape("mask must contain at least one frame"));
        };
        let dims = first.dims();
        if let Some((idx, f)) = frames.iter().enumerate().find(|(_, f)| f.dims() != dims) {
            return Err(MaskError::shape(format!(
                "mask frame {idx} is {} but frame 0 is {dims}",
                f.dims()
            )));
        }
        Ok(Self { dims, frames })
    }

    /// `frame_count` empty frames.
    pub fn empty(dims: Dims, frame_count: usize) -> Self {
        Self {
            dims,
            frames: vec![MaskFrame::empty(dims); frame_count],
        }
    }

    /// Build from a flat `frames × height × width` buffer of 0/1 values.
    pub fn from_values(frame_count: usize, dims: Dims, values: &[f32]) -> MaskResult<Self> {
        let expected = frame_count * dims.area();
        if values.len() != expected {
            return Err(MaskError::shape(format!(
                "mask buffer of {frame_count} frames at {dims} needs {expected} values, got {}",
                values.len()
            )));
        }
        if frame_count == 0 {
            return Err(MaskError::shape("mask must contain at least one frame"));
        }
        let frames = values
            .chunks_exact(dims.area().max(1))
            .take(frame_count)
            .map(|chunk| MaskFrame::from_values(dims, chunk))
            .collect::<MaskResult<Vec<_>>>()?;
        Self::new(frames)
    }

    /// Same frame repeated `frame_count` times.
    pub fn repeat(frame: MaskFrame, frame_count: usize) -> MaskResult<Self> {
        Self::new(vec![frame; frame_count])
    }

    /// Size of every frame.
    pub fn dims(&self) -> Dims {
        self.dims
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// `true` for a sequence without frames (only reachable via [`Mask::empty`]).
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frame at `index`.
    pub fn frame(&self, index: usize) -> Option<&MaskFrame> {
        self.frames.get(index)
    }

    /// Frame at `index`, or the last frame when `index` is past the end.
    pub fn frame_or_last(&self, index: usize) -> Option<&MaskFrame> {
        self.frames.get(index).or_else(|| self.frames.last())
    }

    /// All frames in order.
    pub fn frames(&self) -> &[MaskFrame] {
        &self.frames
    }

    /// Consume into frames.
    pub fn into_frames(self) -> Vec<MaskFrame> {
        self.frames
    }

    pub(crate) fn frames_mut(&mut self) -> &mut [MaskFrame] {
        &mut self.frames
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mask/frames.rs"]
mod tests;
