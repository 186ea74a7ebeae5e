//! Configuration for a scrollspy instance.
//!
//! Options are resolved once at construction by overlaying user-supplied
//! fields onto defaults; unrecognized keys in deserialized input are
//! ignored rather than rejected. All fields are immutable after the
//! instance is built.
//!
//! # Example
//!
//! ```toml
//! # scrollspy.toml
//! attribute = "data-scrollspy"
//! attribute_current = "data-current"
//! offset = 5.0
//! multiple = false
//! rewind = false
//! smooth_scroll = "auto"
//! throttle_delay_ms = 100
//! window_bottom_offset = 20.0
//! ```

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;

/// Vertical trigger margin: either a fixed pixel value or a query
/// evaluated at classification time (e.g. the live height of a sticky
/// header element).
#[derive(Clone, Deserialize)]
#[serde(from = "f64")]
pub enum Offset {
    /// Fixed margin in pixels.
    Fixed(f64),
    /// Margin computed on every classification pass.
    Dynamic(Arc<dyn Fn() -> f64 + Send + Sync>),
}

impl Offset {
    /// Create a dynamic offset from a closure.
    pub fn dynamic(f: impl Fn() -> f64 + Send + Sync + 'static) -> Self {
        Offset::Dynamic(Arc::new(f))
    }

    /// Current value of the margin.
    pub fn resolve(&self) -> f64 {
        match self {
            Offset::Fixed(v) => *v,
            Offset::Dynamic(f) => f(),
        }
    }
}

impl From<f64> for Offset {
    fn from(v: f64) -> Self {
        Offset::Fixed(v)
    }
}

impl fmt::Debug for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Offset::Fixed(v) => f.debug_tuple("Fixed").field(v).finish(),
            Offset::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

/// Navigation scroll behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "SmoothScrollRepr")]
pub enum SmoothScroll {
    /// Smooth when the host supports it and the user has not requested
    /// reduced motion.
    Auto,
    /// Always request an animated scroll.
    Always,
    /// Always jump immediately.
    Never,
}

/// Accepts `true` / `false` / `"auto"` in configuration input.
#[derive(Deserialize)]
#[serde(untagged)]
enum SmoothScrollRepr {
    Flag(bool),
    Mode(String),
}

impl From<SmoothScrollRepr> for SmoothScroll {
    fn from(repr: SmoothScrollRepr) -> Self {
        match repr {
            SmoothScrollRepr::Flag(true) => SmoothScroll::Always,
            SmoothScrollRepr::Flag(false) => SmoothScroll::Never,
            // Unknown strings fall back to the default rather than erroring.
            SmoothScrollRepr::Mode(_) => SmoothScroll::Auto,
        }
    }
}

/// Scrollspy instance configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Attribute that marks listener elements in the document.
    pub attribute: String,

    /// Marker applied to listeners whose emitter is active. An empty
    /// string disables marker reconciliation entirely.
    pub attribute_current: String,

    /// Default trigger margin, used for both edges unless overridden.
    pub offset: Offset,

    /// Margin above an emitter's top edge. Falls back to `offset`.
    pub offset_top: Option<Offset>,

    /// Margin below an emitter's bottom edge (multiple mode only).
    /// Falls back to `offset`.
    pub offset_bottom: Option<Offset>,

    /// Allow more than one simultaneously active emitter.
    pub multiple: bool,

    /// Clear an emitter's active flag once its range is exited. When
    /// false, the furthest-reached emitter stays active while the user
    /// scrolls back up.
    pub rewind: bool,

    /// Navigation behavior for `scroll_to`.
    pub smooth_scroll: SmoothScroll,

    /// Minimum interval between classification passes during continuous
    /// scroll, in milliseconds.
    pub throttle_delay_ms: u64,

    /// Margin before the document's bottom edge that still counts as
    /// "reached the last emitter".
    pub window_bottom_offset: f64,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            attribute: "data-scrollspy".to_string(),
            attribute_current: "data-current".to_string(),
            offset: Offset::Fixed(5.0),
            offset_top: None,
            offset_bottom: None,
            multiple: false,
            rewind: false,
            smooth_scroll: SmoothScroll::Auto,
            throttle_delay_ms: 100,
            window_bottom_offset: 20.0,
        }
    }
}

impl Options {
    /// Marker name, or `None` when reconciliation is disabled.
    pub fn marker(&self) -> Option<&str> {
        if self.attribute_current.is_empty() {
            None
        } else {
            Some(&self.attribute_current)
        }
    }

    /// Effective top margin for this pass.
    pub fn offset_top(&self) -> f64 {
        self.offset_top.as_ref().unwrap_or(&self.offset).resolve()
    }

    /// Effective bottom margin for this pass.
    pub fn offset_bottom(&self) -> f64 {
        self.offset_bottom.as_ref().unwrap_or(&self.offset).resolve()
    }
}
