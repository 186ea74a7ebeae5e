//! Host document seam.
//!
//! Everything the classifier needs from its environment goes through
//! [`Document`]: element queries, geometry, marker mutation, scrolling,
//! history and focus. The crate never touches an environment directly, so
//! any host that can answer these questions (a browser DOM, a rendered
//! terminal document, a test fixture) can drive a
//! [`Scrollspy`](crate::Scrollspy) instance.

use crate::error::DocumentResult;

/// Vertical extent of an element, relative to the current viewport top
/// (the bounding-rectangle convention: negative `top` means the element
/// starts above the visible area).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub top: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn new(top: f64, bottom: f64) -> Self {
        Self { top, bottom }
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

/// How a programmatic scroll should be performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    /// Jump to the destination in one step.
    Instant,
    /// Animate toward the destination.
    Smooth,
}

/// The environment a scrollspy instance observes and mutates.
///
/// Query methods are read-only and must be cheap enough to call on every
/// classification pass. `set_marker`/`remove_marker` must be idempotent;
/// the reconciler applies the full marker state unconditionally.
pub trait Document {
    /// Opaque element handle. Equality identifies the same document node.
    type Element: Clone + PartialEq;

    /// All elements carrying `attribute`, in document order.
    fn elements_with_attribute(&self, attribute: &str) -> Vec<Self::Element>;

    /// Element with the given anchor id, if present.
    fn element_by_id(&self, id: &str) -> Option<Self::Element>;

    /// Value of a named attribute on an element.
    fn attribute(&self, el: &Self::Element, name: &str) -> Option<String>;

    /// Viewport-relative vertical extent of an element.
    fn bounding_rect(&self, el: &Self::Element) -> Rect;

    /// Current vertical scroll offset in pixels, `>= 0`.
    fn scroll_offset(&self) -> f64;

    /// Height of the visible viewport.
    fn viewport_height(&self) -> f64;

    /// Full height of the document content.
    fn document_height(&self) -> f64;

    /// Greatest reachable scroll offset. Zero when the document fits
    /// inside the viewport.
    fn max_scroll(&self) -> f64 {
        (self.document_height() - self.viewport_height()).max(0.0)
    }

    /// Add the marker attribute/class `name` to an element.
    fn set_marker(&mut self, el: &Self::Element, name: &str);

    /// Remove the marker attribute/class `name` from an element.
    fn remove_marker(&mut self, el: &Self::Element, name: &str);

    /// Scroll the viewport to `offset`.
    fn scroll_to(&mut self, offset: f64, behavior: ScrollBehavior) -> DocumentResult<()>;

    /// Whether the host can animate scrolls. The probe itself may fail;
    /// callers treat an `Err` as "unsupported".
    fn supports_smooth_scroll(&self) -> DocumentResult<bool> {
        Ok(false)
    }

    /// Whether the user has asked for reduced motion.
    fn prefers_reduced_motion(&self) -> bool {
        false
    }

    /// Rewrite the location fragment (`None` strips it) without adding a
    /// navigation history entry.
    fn replace_fragment(&mut self, fragment: Option<&str>);

    /// Move keyboard focus to an element. Returns false if the element
    /// is not focusable.
    fn focus(&mut self, el: &Self::Element) -> bool {
        let _ = el;
        false
    }

    /// Make a non-focusable element temporarily focusable (tabindex-style
    /// fallback) so a follow-up `focus` can succeed.
    fn make_focusable(&mut self, el: &Self::Element) {
        let _ = el;
    }
}
