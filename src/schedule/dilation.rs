use std::fmt::Write as _;

use crate::foundation::core::Rgb8;
use crate::foundation::error::{MaskError, MaskResult};
use crate::schedule::parser::{Document, Node, parse_document};
use crate::schedule::timing::TimingMode;

/// Palette used when color text is blank: yellow, then magenta.
pub const DEFAULT_PALETTE: [Rgb8; 2] = [Rgb8::new(255, 255, 0), Rgb8::new(255, 0, 255)];

/// One scripted growth event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DilationEvent {
    /// Absolute frame at which growth starts.
    pub start_frame: usize,
    /// Radius added per frame, in pixels.
    pub speed: u32,
    /// Fill color of the grown region.
    pub color: Rgb8,
}

/// Parse `"(time, speed, (r, g, b)), ..."` into events in order of appearance.
///
/// Text order is both trigger order and paint order: later entries are painted on top.
pub fn parse_dilation_schedule(
    text: &str,
    timing: TimingMode,
    total_frames: usize,
) -> MaskResult<Vec<DilationEvent>> {
    let doc = parse_document(text)?;
    doc.entries
        .iter()
        .map(|entry| dilation_event(&doc, entry, timing, total_frames))
        .collect()
}

fn dilation_event(
    doc: &Document<'_>,
    entry: &Node,
    timing: TimingMode,
    total_frames: usize,
) -> MaskResult<DilationEvent> {
    let items = entry
        .as_tuple()
        .ok_or_else(|| doc.malformed(entry, "expected a tuple"))?;
    let [time, speed, color] = items else {
        return Err(doc.malformed(
            entry,
            format!("expected (time, speed, (r, g, b)), found {} fields", items.len()),
        ));
    };

    let time = time
        .as_f64()
        .ok_or_else(|| doc.malformed(entry, "time must be a number"))?;
    let start_frame = timing
        .resolve_start(time, total_frames)
        .map_err(|e| doc.malformed(entry, e))?;

    let speed = speed
        .as_u64()
        .and_then(|v| u32::try_from(v).ok())
        .ok_or_else(|| doc.malformed(entry, "speed must be a non-negative integer"))?;

    let color = color_tuple(doc, entry, color)?;

    Ok(DilationEvent {
        start_frame,
        speed,
        color,
    })
}

fn color_tuple(doc: &Document<'_>, entry: &Node, node: &Node) -> MaskResult<Rgb8> {
    let channels = node
        .as_tuple()
        .filter(|c| c.len() == 3)
        .ok_or_else(|| doc.malformed(entry, "color must be a (r, g, b) tuple"))?;
    let mut rgb = [0u8; 3];
    for (slot, ch) in rgb.iter_mut().zip(channels) {
        let v = ch
            .as_u64()
            .ok_or_else(|| doc.malformed(entry, "color channels must be integers"))?;
        *slot = Rgb8::channel(v, "color").map_err(|e| match e {
            MaskError::Range(msg) => {
                MaskError::range(format!("entry '{}': {msg}", doc.fragment(entry)))
            }
            other => other,
        })?;
    }
    Ok(Rgb8::new(rgb[0], rgb[1], rgb[2]))
}

/// Format events in frame timing so that [`parse_dilation_schedule`] reads them back unchanged.
pub fn format_dilation_schedule(events: &[DilationEvent]) -> String {
    let mut out = String::new();
    for (i, ev) in events.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let c = ev.color;
        // Writing to a String cannot fail.
        let _ = write!(
            out,
            "({}, {}, ({}, {}, {})),",
            ev.start_frame, ev.speed, c.r, c.g, c.b
        );
    }
    out
}

/// Parse `"(r, g, b), (r, g, b), ..."`. Blank text yields [`DEFAULT_PALETTE`].
pub fn parse_palette(text: &str) -> MaskResult<Vec<Rgb8>> {
    if text.trim().is_empty() {
        return Ok(DEFAULT_PALETTE.to_vec());
    }
    let doc = parse_document(text)?;
    doc.entries
        .iter()
        .map(|entry| color_tuple(&doc, entry, entry))
        .collect()
}

/// Frame window in which amplitude crossings may spawn events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct TriggerWindow {
    /// First frame considered.
    pub start: usize,
    /// Frame at which scanning stops; `None` scans to the end of the signal.
    pub end: Option<usize>,
}

impl TriggerWindow {
    /// Validate `start < end` when an end is set.
    pub fn new(start: usize, end: Option<usize>) -> MaskResult<Self> {
        if let Some(end) = end
            && end <= start
        {
            return Err(MaskError::range(format!(
                "trigger window end {end} must be after start {start}"
            )));
        }
        Ok(Self { start, end })
    }
}

/// Spawn one event per upward threshold crossing of `samples`.
///
/// A sample strictly above `threshold` fires when the trigger is armed; any sample at or below
/// it re-arms the trigger. Colors cycle through `palette` (or [`DEFAULT_PALETTE`] when empty).
pub fn events_from_amplitude(
    samples: &[f32],
    threshold: f32,
    speed: u32,
    palette: &[Rgb8],
    window: TriggerWindow,
) -> Vec<DilationEvent> {
    let palette = if palette.is_empty() {
        &DEFAULT_PALETTE[..]
    } else {
        palette
    };

    let mut events = Vec::new();
    let mut armed = true;
    for (index, &amp) in samples.iter().enumerate().skip(window.start) {
        if window.end.is_some_and(|end| index >= end) {
            break;
        }
        if amp > threshold {
            if armed {
                let color = palette[events.len() % palette.len()];
                tracing::debug!(frame = index, amp, "amplitude crossing spawns event");
                events.push(DilationEvent {
                    start_frame: index,
                    speed,
                    color,
                });
                armed = false;
            }
        } else {
            armed = true;
        }
    }
    events
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/dilation.rs"]
mod tests;
