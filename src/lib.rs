//! Headless scroll-position classifier.
//!
//! Tracks a vertical scroll offset against registered page elements
//! ("emitters") and mirrors the currently reached one(s) onto linked
//! elements ("listeners") by toggling a marker, with optional smooth
//! programmatic scrolling. The environment — element queries, geometry,
//! marker mutation, history, focus — is abstracted behind the
//! [`Document`] trait, so the same instance logic drives a browser DOM,
//! a rendered terminal document (see the demo binary) or a test fixture.
//!
//! # Example
//!
//! ```rust,ignore
//! use scrollspy::{Options, Scrollspy};
//!
//! let mut spy = Scrollspy::new(my_document, Options::default());
//! spy.on_update(|state| println!("{}% scrolled", state.status));
//!
//! // Host event loop:
//! spy.handle_scroll(Instant::now());   // on scroll events (throttled)
//! spy.handle_resize(Instant::now());   // on resize events (debounced)
//! spy.tick(Instant::now());            // periodically, for deferred passes
//! ```

pub mod classify;
pub mod document;
pub mod error;
pub mod events;
pub mod navigate;
pub mod options;
pub mod reconcile;
pub mod registry;
pub mod throttle;

mod spy;

#[cfg(test)]
pub(crate) mod testutil;

pub use classify::Pass;
pub use document::{Document, Rect, ScrollBehavior};
pub use error::{DocumentError, Error, Result};
pub use events::State;
pub use options::{Offset, Options, SmoothScroll};
pub use registry::{Emitter, LinkTarget, Listener, Registry};
pub use spy::Scrollspy;
pub use throttle::{Mode, RateGate};
