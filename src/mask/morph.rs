//! Binary dilation and erosion with row-span structuring elements.
//!
//! For each source row we precompute the horizontal distance from every cell to the nearest
//! cell of interest (foreground for dilation, background for erosion). A kernel row with
//! half-width `hw` then hits `(x, y + dy)` exactly when that distance is `<= hw`, which makes
//! one pass `O(width · height · (2r + 1))` instead of `O(width · height · r²)`.
//!
//! Borders follow the usual morphology convention: cells outside the frame never dilate into
//! it and never erode it.

use crate::mask::frames::MaskFrame;
use crate::mask::kernel::StructuringElement;

const FAR: usize = usize::MAX;

/// Dilate `src` by `kernel`, `iterations` times.
pub fn dilate(src: &MaskFrame, kernel: &StructuringElement, iterations: usize) -> MaskFrame {
    let mut cur = src.clone();
    for _ in 0..iterations {
        if cur.is_full() || cur.is_empty() || kernel.radius() == 0 {
            break;
        }
        cur = apply_once(&cur, kernel, true);
    }
    cur
}

/// Erode `src` by `kernel`, `iterations` times.
pub fn erode(src: &MaskFrame, kernel: &StructuringElement, iterations: usize) -> MaskFrame {
    let mut cur = src.clone();
    for _ in 0..iterations {
        if cur.is_full() || cur.is_empty() || kernel.radius() == 0 {
            break;
        }
        cur = apply_once(&cur, kernel, false);
    }
    cur
}

fn apply_once(src: &MaskFrame, kernel: &StructuringElement, dilating: bool) -> MaskFrame {
    let dims = src.dims();
    let (w, h) = (dims.width, dims.height);
    // Dilation looks for foreground, erosion for background.
    let dist = row_distances(src, dilating);
    let r = kernel.radius() as i64;
    let spans = kernel.spans();

    let mut out = MaskFrame::empty(dims);
    let cells = out.cells_mut();
    for y in 0..h {
        for x in 0..w {
            let mut hit = false;
            for dy in -r..=r {
                let sy = y as i64 + dy;
                if sy < 0 || sy >= h as i64 {
                    continue;
                }
                let d = dist[sy as usize * w + x];
                if d <= spans[(dy + r) as usize] {
                    hit = true;
                    break;
                }
            }
            // A dilation hit sets the cell; an erosion hit clears it.
            cells[y * w + x] = if dilating { hit } else { !hit };
        }
    }
    out
}

/// Per-cell horizontal distance to the nearest cell equal to `target` in the same row.
fn row_distances(src: &MaskFrame, target: bool) -> Vec<usize> {
    let w = src.dims().width;
    let mut dist = vec![FAR; src.cells().len()];
    for (y, row_out) in dist.chunks_mut(w.max(1)).enumerate() {
        let row = src.row(y);
        let mut last = FAR;
        for x in 0..w {
            if row[x] == target {
                last = 0;
            } else if last != FAR {
                last += 1;
            }
            row_out[x] = last;
        }
        let mut last = FAR;
        for x in (0..w).rev() {
            if row[x] == target {
                last = 0;
            } else if last != FAR {
                last += 1;
            }
            row_out[x] = row_out[x].min(last);
        }
    }
    dist
}

#[cfg(test)]
#[path = "../../tests/unit/mask/morph.rs"]
mod tests;
