/// Neighborhood shape of a structuring element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KernelShape {
    /// Cells with `x² + y² ≤ r²`.
    #[default]
    #[serde(alias = "disk")]
    Circle,
    /// Every cell of the `(2r+1)×(2r+1)` grid.
    Square,
}

/// Immutable binary neighborhood of radius `r` and side `2r + 1`.
///
/// Both supported shapes are made of one contiguous, centered run per row, so the element is
/// stored as per-row half-widths. `spans[dy + r]` is the largest `|dx|` set on row `dy`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StructuringElement {
    shape: KernelShape,
    radius: usize,
    spans: Vec<usize>,
}

impl StructuringElement {
    /// Build the element for `shape` at `radius`. Radius 0 is the 1×1 identity.
    pub fn build(shape: KernelShape, radius: usize) -> Self {
        let r = radius as i64;
        let spans = (-r..=r)
            .map(|dy| match shape {
                KernelShape::Square => radius,
                KernelShape::Circle => disk_half_width(r, dy),
            })
            .collect();
        Self {
            shape,
            radius,
            spans,
        }
    }

    /// Shape this element was built with.
    pub fn shape(&self) -> KernelShape {
        self.shape
    }

    /// Radius `r`.
    pub fn radius(&self) -> usize {
        self.radius
    }

    /// Side length `2r + 1`.
    pub fn side(&self) -> usize {
        2 * self.radius + 1
    }

    /// Half-width of each row, top to bottom.
    pub fn spans(&self) -> &[usize] {
        &self.spans
    }

    /// Whether offset `(dx, dy)` from the center is set.
    pub fn contains(&self, dx: i64, dy: i64) -> bool {
        let r = self.radius as i64;
        if dy < -r || dy > r {
            return false;
        }
        dx.unsigned_abs() as usize <= self.spans[(dy + r) as usize]
    }

    /// Number of set cells.
    pub fn cell_count(&self) -> usize {
        self.spans.iter().map(|&hw| 2 * hw + 1).sum()
    }

    /// Dense `side × side` grid, row-major.
    pub fn to_grid(&self) -> Vec<Vec<bool>> {
        let r = self.radius as i64;
        (-r..=r)
            .map(|dy| (-r..=r).map(|dx| self.contains(dx, dy)).collect())
            .collect()
    }
}

fn disk_half_width(r: i64, dy: i64) -> usize {
    let rem = r * r - dy * dy;
    // Exact integer square root; f64 seeds it and the loops correct rounding.
    let mut hw = (rem as f64).sqrt() as i64;
    while hw * hw > rem {
        hw -= 1;
    }
    while (hw + 1) * (hw + 1) <= rem {
        hw += 1;
    }
    hw as usize
}

/// Arena of structuring elements of one shape, indexed by radius.
///
/// A cache is tied to a single shape, so a run that switches between circular and square
/// kernels needs separate caches.
#[derive(Clone, Debug)]
pub struct KernelCache {
    shape: KernelShape,
    slots: Vec<Option<StructuringElement>>,
    built: usize,
}

impl KernelCache {
    /// Empty cache; elements are built on first use.
    pub fn new(shape: KernelShape) -> Self {
        Self {
            shape,
            slots: Vec::new(),
            built: 0,
        }
    }

    /// Cache with every radius in `[0, max_radius]` prebuilt.
    pub fn with_max_radius(shape: KernelShape, max_radius: usize) -> Self {
        let mut cache = Self::new(shape);
        for r in 0..=max_radius {
            cache.get_or_build(r);
        }
        cache
    }

    /// Shape of every element in this cache.
    pub fn shape(&self) -> KernelShape {
        self.shape
    }

    /// How many elements were constructed so far.
    pub fn built(&self) -> usize {
        self.built
    }

    /// Prebuilt element for `radius`, if present.
    pub fn get(&self, radius: usize) -> Option<&StructuringElement> {
        self.slots.get(radius).and_then(Option::as_ref)
    }

    /// Element for `radius`, building it on a miss.
    pub fn get_or_build(&mut self, radius: usize) -> &StructuringElement {
        if self.slots.len() <= radius {
            self.slots.resize(radius + 1, None);
        }
        let slot = &mut self.slots[radius];
        if slot.is_none() {
            self.built += 1;
        }
        slot.get_or_insert_with(|| StructuringElement::build(self.shape, radius))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mask/kernel.rs"]
mod tests;
