use crate::animation::ease::Ease;
use crate::foundation::error::MaskResult;
use crate::schedule::parser::{Document, Node, parse_document};
use crate::schedule::timing::TimingMode;

/// One keyframe of a weight schedule.
///
/// Grammar: `(weight | (weight, weight_invert), time[, duration][, easing])`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WeightKeyframe {
    /// Target weight.
    pub weight: f64,
    /// Target complementary weight (`1 - weight` when only a scalar is given).
    pub weight_invert: f64,
    /// Frame at which the transition starts.
    pub start_frame: usize,
    /// Transition length; `None` means "until the last frame".
    pub duration: Option<usize>,
    /// Transition curve.
    pub ease: Ease,
}

/// Parse a weight schedule. Entries without an easing name use `default_ease`.
pub fn parse_weight_schedule(
    text: &str,
    timing: TimingMode,
    total_frames: usize,
    default_ease: Ease,
) -> MaskResult<Vec<WeightKeyframe>> {
    let doc = parse_document(text)?;
    doc.entries
        .iter()
        .map(|entry| weight_keyframe(&doc, entry, timing, total_frames, default_ease))
        .collect()
}

fn weight_keyframe(
    doc: &Document<'_>,
    entry: &Node,
    timing: TimingMode,
    total_frames: usize,
    default_ease: Ease,
) -> MaskResult<WeightKeyframe> {
    let items = entry
        .as_tuple()
        .ok_or_else(|| doc.malformed(entry, "expected a tuple"))?;
    if !(2..=4).contains(&items.len()) {
        return Err(doc.malformed(
            entry,
            format!(
                "expected (weight, time[, duration][, easing]), found {} fields",
                items.len()
            ),
        ));
    }

    let (weight, weight_invert) = match (items[0].as_f64(), items[0].as_tuple()) {
        (Some(w), _) => (w, 1.0 - w),
        (None, Some([w, w_inv])) => match (w.as_f64(), w_inv.as_f64()) {
            (Some(w), Some(w_inv)) => (w, w_inv),
            _ => return Err(doc.malformed(entry, "weight pair must hold two numbers")),
        },
        _ => {
            return Err(doc.malformed(
                entry,
                "weight must be a number or a (weight, weight_invert) pair",
            ));
        }
    };

    let time = items[1]
        .as_f64()
        .ok_or_else(|| doc.malformed(entry, "time must be a number"))?;
    let start_frame = timing
        .resolve_start(time, total_frames)
        .map_err(|e| doc.malformed(entry, e))?;

    let mut duration = None;
    let mut ease = None;
    for item in &items[2..] {
        if let Some(v) = item.as_f64() {
            if duration.is_some() || ease.is_some() {
                return Err(doc.malformed(entry, "duration must come before the easing name"));
            }
            let span = timing
                .resolve_span(v, total_frames)
                .map_err(|e| doc.malformed(entry, e))?;
            // Zero means "run to the end".
            duration = Some((span > 0).then_some(span));
        } else if let Some(name) = item.as_ident() {
            if ease.is_some() {
                return Err(doc.malformed(entry, "only one easing name is allowed"));
            }
            ease = Some(name.parse::<Ease>().map_err(|e| doc.malformed(entry, e))?);
        } else {
            return Err(doc.malformed(entry, "expected a duration or an easing name"));
        }
    }

    Ok(WeightKeyframe {
        weight,
        weight_invert,
        start_frame,
        duration: duration.flatten(),
        ease: ease.unwrap_or(default_ease),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/weights.rs"]
mod tests;
