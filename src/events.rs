//! Callback registry for instance events.
//!
//! Two event kinds exist: `update` fires after every classification pass
//! (and once immediately at registration), `click` fires when a
//! registered link is navigation-activated. Callbacks run synchronously
//! on the pass that produced them.

/// Runtime scroll state handed to `update` callbacks.
#[derive(Debug, Clone, PartialEq)]
pub struct State {
    /// Pixels scrolled.
    pub position: f64,
    /// Scroll progress percentage, `0..=100`.
    pub status: f64,
    /// Ids of the currently active emitters, in document order.
    pub active: Vec<String>,
}

type UpdateCallback = Box<dyn FnMut(&State)>;
type ClickCallback = Box<dyn FnMut(Option<&str>)>;

/// Registered callbacks for one scrollspy instance.
#[derive(Default)]
pub struct Callbacks {
    update: Vec<UpdateCallback>,
    click: Vec<ClickCallback>,
}

impl Callbacks {
    pub fn on_update(&mut self, cb: UpdateCallback) {
        self.update.push(cb);
    }

    pub fn on_click(&mut self, cb: ClickCallback) {
        self.click.push(cb);
    }

    pub fn emit_update(&mut self, state: &State) {
        for cb in &mut self.update {
            cb(state);
        }
    }

    /// `target` is the clicked emitter id, or `None` for a
    /// scroll-to-top link.
    pub fn emit_click(&mut self, target: Option<&str>) {
        for cb in &mut self.click {
            cb(target);
        }
    }
}

impl std::fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Callbacks")
            .field("update", &self.update.len())
            .field("click", &self.click.len())
            .finish()
    }
}
