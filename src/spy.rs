//! The scrollspy instance.
//!
//! Owns the document handle, the registry, both rate gates and the
//! callback registry. Construction scans the document and runs one
//! classification pass so a page that loads mid-scroll (e.g. via a URL
//! fragment) is classified immediately. There is no global state:
//! independent instances never interfere.
//!
//! The host wires its environment in by forwarding events:
//!
//! ```rust,ignore
//! let mut spy = Scrollspy::new(doc, Options::default());
//! // on scroll events:
//! spy.handle_scroll(Instant::now());
//! // on resize/orientation events:
//! spy.handle_resize(Instant::now());
//! // on every loop tick, so deferred passes fire:
//! spy.tick(Instant::now());
//! ```

use std::time::{Duration, Instant};

use tracing::debug;

use crate::classify;
use crate::document::Document;
use crate::events::{Callbacks, State};
use crate::navigate;
use crate::options::Options;
use crate::reconcile;
use crate::registry::{Emitter, LinkTarget, Registry};
use crate::throttle::{Mode, RateGate};

/// Tracks scroll position against registered emitters and mirrors the
/// reached one(s) onto listener elements.
pub struct Scrollspy<D: Document> {
    doc: D,
    options: Options,
    registry: Registry<D::Element>,
    scroll_gate: RateGate,
    resize_gate: RateGate,
    callbacks: Callbacks,
    position: f64,
    status: f64,
}

impl<D: Document> Scrollspy<D> {
    /// Build an instance, scan the document and run the first pass.
    pub fn new(doc: D, options: Options) -> Self {
        let interval = Duration::from_millis(options.throttle_delay_ms);
        let mut spy = Self {
            doc,
            options,
            registry: Registry::default(),
            scroll_gate: RateGate::new(interval, Mode::Throttle),
            resize_gate: RateGate::new(interval, Mode::Debounce),
            callbacks: Callbacks::default(),
            position: 0.0,
            status: 0.0,
        };
        spy.refresh();
        spy
    }

    /// Re-scan the document for listener and emitter elements. The old
    /// collections are discarded wholesale, then one classification pass
    /// runs against the fresh ones.
    pub fn refresh(&mut self) {
        self.registry = Registry::scan(&self.doc, &self.options.attribute);
        debug!(emitters = self.registry.emitters().len(), "refresh");
        self.update();
    }

    /// Run a classification + reconciliation pass immediately, bypassing
    /// the rate gates.
    pub fn update(&mut self) {
        let pass = classify::classify(&self.doc, &mut self.registry, &self.options);
        self.position = pass.position;
        self.status = pass.status;
        reconcile::apply(&mut self.doc, &self.registry, &self.options);
        let state = self.state();
        self.callbacks.emit_update(&state);
    }

    /// Report a scroll event. Throttled: runs a pass at most once per
    /// `throttle_delay_ms`, deferring the latest suppressed event to the
    /// end of the interval.
    pub fn handle_scroll(&mut self, now: Instant) {
        if self.scroll_gate.poll_call(now) {
            self.update();
        }
    }

    /// Report a resize/orientation event. Debounced: a pass runs only
    /// after the events go quiet.
    pub fn handle_resize(&mut self, now: Instant) {
        self.resize_gate.poll_call(now);
    }

    /// Drive deferred passes. Hosts call this periodically; a throttled
    /// trailing edge or a matured debounce triggers exactly one pass.
    pub fn tick(&mut self, now: Instant) {
        let scroll_due = self.scroll_gate.poll_tick(now);
        let resize_due = self.resize_gate.poll_tick(now);
        if scroll_due || resize_due {
            self.update();
        }
    }

    /// Navigate to the emitter with id `target`, or to the top. See the
    /// `navigate` module for degrade behavior.
    pub fn scroll_to(&mut self, target: Option<&str>) {
        navigate::scroll_to(&mut self.doc, target, &self.options);
    }

    /// Handle an activation (click) of a document element. Returns true
    /// when the element was a registered listener or scroll-top link; in
    /// that case navigation runs and `click` callbacks fire.
    pub fn handle_click(&mut self, el: &D::Element) -> bool {
        match self.registry.link_target(el) {
            Some(LinkTarget::Emitter(id)) => {
                self.scroll_to(Some(&id));
                self.callbacks.emit_click(Some(&id));
                true
            }
            Some(LinkTarget::Top) => {
                self.scroll_to(None);
                self.callbacks.emit_click(None);
                true
            }
            None => false,
        }
    }

    /// Register an `update` callback. Fires once immediately with the
    /// current state, then after every classification pass.
    pub fn on_update(&mut self, mut cb: impl FnMut(&State) + 'static) {
        let state = self.state();
        cb(&state);
        self.callbacks.on_update(Box::new(cb));
    }

    /// Register a `click` callback, fired when a registered link is
    /// navigation-activated. The payload is the target emitter id, or
    /// `None` for scroll-to-top links.
    pub fn on_click(&mut self, cb: impl FnMut(Option<&str>) + 'static) {
        self.callbacks.on_click(Box::new(cb));
    }

    /// Pixels scrolled at the last pass.
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Scroll progress percentage at the last pass, `0..=100`.
    pub fn status(&self) -> f64 {
        self.status
    }

    /// Emitters from the last scan, in document order.
    pub fn emitters(&self) -> &[Emitter<D::Element>] {
        self.registry.emitters()
    }

    /// Ids of the currently active emitters.
    pub fn active_ids(&self) -> Vec<String> {
        self.registry.active_ids()
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn document(&self) -> &D {
        &self.doc
    }

    pub fn document_mut(&mut self) -> &mut D {
        &mut self.doc
    }

    fn state(&self) -> State {
        State {
            position: self.position,
            status: self.status,
            active: self.registry.active_ids(),
        }
    }
}

impl<D: Document + std::fmt::Debug> std::fmt::Debug for Scrollspy<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scrollspy")
            .field("position", &self.position)
            .field("status", &self.status)
            .field("emitters", &self.registry.emitters().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::FakeDom;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn dom() -> FakeDom {
        let mut dom = FakeDom::new(800.0, 1600.0);
        dom.add_section("one", 100.0, 300.0);
        dom.add_section("two", 500.0, 300.0);
        dom.add_section("three", 900.0, 300.0);
        let _ = dom.add_nav_href("#one");
        let _ = dom.add_nav_href("#two");
        let _ = dom.add_nav_href("#three");
        dom
    }

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_construction_classifies_mid_scroll_load() {
        let mut dom = dom();
        // Page loaded at a fragment: already scrolled.
        dom.set_scroll(550.0);
        let spy = Scrollspy::new(dom, Options::default());

        assert_eq!(spy.active_ids(), vec!["two"]);
        assert_eq!(spy.position(), 550.0);
    }

    #[test]
    fn test_throttled_scroll_defers_to_trailing_edge() {
        let spy_dom = dom();
        let mut spy = Scrollspy::new(spy_dom, Options::default());
        let t0 = Instant::now();

        // Leading edge runs against the current position.
        spy.document_mut().set_scroll(120.0);
        spy.handle_scroll(t0);
        assert_eq!(spy.active_ids(), vec!["one"]);

        // Events inside the interval are suppressed...
        spy.document_mut().set_scroll(550.0);
        spy.handle_scroll(t0 + ms(30));
        assert_eq!(spy.active_ids(), vec!["one"]);

        // ...but the trailing edge picks up the final position.
        spy.tick(t0 + ms(100));
        assert_eq!(spy.active_ids(), vec!["two"]);
    }

    #[test]
    fn test_resize_is_debounced() {
        let spy_dom = dom();
        let mut spy = Scrollspy::new(spy_dom, Options::default());
        let t0 = Instant::now();

        spy.document_mut().set_scroll(550.0);
        spy.handle_resize(t0);
        assert!(spy.active_ids().is_empty());
        spy.tick(t0 + ms(50));
        assert!(spy.active_ids().is_empty());
        spy.tick(t0 + ms(100));
        assert_eq!(spy.active_ids(), vec!["two"]);
    }

    #[test]
    fn test_update_bypasses_gates() {
        let spy_dom = dom();
        let mut spy = Scrollspy::new(spy_dom, Options::default());

        spy.document_mut().set_scroll(550.0);
        spy.update();
        assert_eq!(spy.active_ids(), vec!["two"]);
    }

    #[test]
    fn test_update_callback_fires_immediately_and_per_pass() {
        let spy_dom = dom();
        let mut spy = Scrollspy::new(spy_dom, Options::default());

        let seen: Rc<RefCell<Vec<f64>>> = Rc::default();
        let sink = seen.clone();
        spy.on_update(move |state| sink.borrow_mut().push(state.position));
        assert_eq!(seen.borrow().as_slice(), &[0.0]);

        spy.document_mut().set_scroll(550.0);
        spy.update();
        assert_eq!(seen.borrow().as_slice(), &[0.0, 550.0]);
    }

    #[test]
    fn test_click_navigates_and_notifies() {
        let mut spy_dom = FakeDom::new(800.0, 1600.0);
        spy_dom.add_section("one", 100.0, 300.0);
        let nav = spy_dom.add_nav_href("#one");
        let top_link = spy_dom.add_nav_href("#");
        let mut spy = Scrollspy::new(spy_dom, Options::default());

        let clicks: Rc<RefCell<Vec<Option<String>>>> = Rc::default();
        let sink = clicks.clone();
        spy.on_click(move |target| sink.borrow_mut().push(target.map(str::to_string)));

        assert!(spy.handle_click(&nav));
        assert_eq!(spy.document().last_scroll(), Some(96.0));

        assert!(spy.handle_click(&top_link));
        assert_eq!(spy.document().last_scroll(), Some(0.0));

        assert_eq!(
            clicks.borrow().as_slice(),
            &[Some("one".to_string()), None]
        );
    }

    #[test]
    fn test_click_on_unregistered_element_is_ignored() {
        let mut spy_dom = FakeDom::new(800.0, 1600.0);
        let plain = spy_dom.add_plain_element();
        let mut spy = Scrollspy::new(spy_dom, Options::default());

        assert!(!spy.handle_click(&plain));
        assert_eq!(spy.document().last_scroll(), None);
    }

    #[test]
    fn test_scroll_to_nudge_activates_target_next_pass() {
        let spy_dom = dom();
        let mut spy = Scrollspy::new(spy_dom, Options::default());

        spy.scroll_to(Some("two"));
        spy.update();
        assert_eq!(spy.active_ids(), vec!["two"]);
    }

    #[test]
    fn test_refresh_drops_stale_entries() {
        let spy_dom = dom();
        let mut spy = Scrollspy::new(spy_dom, Options::default());
        assert_eq!(spy.emitters().len(), 3);

        spy.document_mut().clear_nav();
        spy.refresh();
        assert!(spy.emitters().is_empty());
        assert!(spy.active_ids().is_empty());
    }

    #[test]
    fn test_independent_instances_do_not_interfere() {
        let mut spy_a = Scrollspy::new(dom(), Options::default());
        let mut spy_b = Scrollspy::new(dom(), Options::default());

        spy_a.document_mut().set_scroll(550.0);
        spy_a.update();
        spy_b.update();

        assert_eq!(spy_a.active_ids(), vec!["two"]);
        assert!(spy_b.active_ids().is_empty());
    }
}
