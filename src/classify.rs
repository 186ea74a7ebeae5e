//! Position classifier — maps a continuous scroll offset to discrete
//! per-emitter active flags.
//!
//! The trigger position of an emitter is its absolute document top minus
//! the configured top margin; an emitter is *reached* once the scroll
//! offset passes it (strict `>`). Two policy modes, selected by
//! `Options::multiple`:
//!
//! - **Single**: exactly one emitter may be active, the reached one with
//!   the greatest trigger position (lowest on the page). Emitters are
//!   scanned in document order; when two triggers coincide exactly, the
//!   later one in document order wins.
//! - **Multiple**: every emitter whose margin-extended span intersects
//!   the viewport is active; alongside, the lowest reached emitter is
//!   forced active so there is never a gap after scrolling past a span.
//!
//! Both modes share the bottom-of-page override: near the end of the
//! document the last emitter counts as reached even when its own trigger
//! lies below the greatest scrollable offset.

use tracing::trace;

use crate::document::Document;
use crate::options::Options;
use crate::registry::Registry;

/// Snapshot of runtime scroll state after a classification pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pass {
    /// Pixels scrolled, `>= 0`.
    pub position: f64,
    /// Scroll progress as a percentage, clamped to `[0, 100]`.
    pub status: f64,
}

/// Run one classification pass: recompute scroll state and rewrite every
/// emitter's active flag. All flags are final when this returns; marker
/// mutation happens strictly afterwards (see `reconcile`).
pub fn classify<D: Document>(
    doc: &D,
    registry: &mut Registry<D::Element>,
    options: &Options,
) -> Pass {
    let position = doc.scroll_offset().max(0.0);
    let max_scroll = doc.max_scroll();

    // A page shorter than the viewport cannot scroll: by convention it
    // counts as fully scrolled (matches min(p / 0 * 100, 100)).
    let status = if max_scroll <= 0.0 {
        100.0
    } else {
        (position / max_scroll * 100.0).clamp(0.0, 100.0)
    };

    let at_bottom = position >= max_scroll - options.window_bottom_offset;
    let offset_top = options.offset_top();
    let offset_bottom = options.offset_bottom();
    let viewport_bottom = position + doc.viewport_height();

    // Absolute trigger position per emitter, in document order.
    let triggers: Vec<f64> = registry
        .emitters()
        .iter()
        .map(|e| doc.bounding_rect(&e.element).top + position - offset_top)
        .collect();

    // The reached emitter with the greatest trigger wins. `>=` makes a
    // same-position tie resolve to the later emitter in document order.
    let mut winner: Option<usize> = None;
    for (i, &trigger) in triggers.iter().enumerate() {
        let reached = position > trigger || at_bottom;
        if reached && winner.is_none_or(|w| trigger >= triggers[w]) {
            winner = Some(i);
        }
    }

    // Furthest-reached policy: with rewind off, scrolling back up never
    // moves the active emitter toward the top. The previous winner keeps
    // its place unless the new one sits at or below it.
    if !options.rewind {
        let previous = registry.emitters().iter().position(|e| e.is_active);
        if let Some(prev) = previous {
            winner = match winner {
                Some(w) if triggers[w] >= triggers[prev] => Some(w),
                _ => Some(prev),
            };
        }
    }

    if options.multiple {
        for (i, emitter) in registry.emitters_mut().iter_mut().enumerate() {
            let rect = doc.bounding_rect(&emitter.element);
            let span_top = rect.top + position - offset_top;
            let span_bottom = rect.bottom + position + offset_bottom;
            let in_viewport = span_top <= viewport_bottom && span_bottom >= position;

            let keep = !options.rewind && emitter.is_active;
            emitter.was_active = emitter.is_active;
            emitter.is_active = in_viewport || winner == Some(i) || keep;
        }
    } else {
        for (i, emitter) in registry.emitters_mut().iter_mut().enumerate() {
            emitter.was_active = emitter.is_active;
            emitter.is_active = winner == Some(i);
        }
    }

    trace!(position, status, ?winner, "classification pass");
    Pass { position, status }
}
