//! Listener/emitter registry.
//!
//! A scan walks every element carrying the configured listener attribute
//! and resolves each one to at most one emitter element. Listeners whose
//! emitter id resolves to nothing are discarded during the scan, so the
//! collections never contain dangling references. Anchor-only links
//! (`href="#"`) produce no listener but stay eligible for
//! click-to-scroll-top handling.

use std::collections::HashMap;

use tracing::debug;

use crate::document::Document;

/// A tracked document element whose vertical position drives state.
#[derive(Debug, Clone)]
pub struct Emitter<E> {
    /// Unique anchor id of the element.
    pub id: String,
    pub element: E,
    pub is_active: bool,
    /// Flag from the previous classification pass.
    pub was_active: bool,
}

/// An element that receives the active marker of its emitter.
#[derive(Debug, Clone)]
pub struct Listener<E> {
    pub element: E,
    /// Back-reference to exactly one emitter, by id.
    pub emitter_id: String,
}

/// What a click on a registered element should navigate to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// Scroll to the named emitter.
    Emitter(String),
    /// Anchor-only link: scroll to the top of the document.
    Top,
}

/// Scan result: listener→emitter associations plus bare scroll-top links.
/// Replaced wholesale on every refresh; callers must not hold entries
/// across a re-scan.
#[derive(Debug, Clone)]
pub struct Registry<E> {
    emitters: Vec<Emitter<E>>,
    listeners: Vec<Listener<E>>,
    scroll_links: Vec<E>,
    /// Emitter id → index into `emitters`.
    index: HashMap<String, usize>,
}

impl<E> Default for Registry<E> {
    fn default() -> Self {
        Self {
            emitters: Vec::new(),
            listeners: Vec::new(),
            scroll_links: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<E: Clone + PartialEq> Registry<E> {
    /// Scan the document for listener elements and build the
    /// associations. Finding nothing is not an error; the registry is
    /// simply left empty.
    pub fn scan<D>(doc: &D, attribute: &str) -> Self
    where
        D: Document<Element = E>,
    {
        let mut registry = Self::default();

        for el in doc.elements_with_attribute(attribute) {
            // Prefer a page-anchor fragment from href; otherwise the
            // listener attribute's own value names the emitter.
            let href_fragment = doc
                .attribute(&el, "href")
                .and_then(|href| href.split_once('#').map(|(_, frag)| frag.to_string()));
            let anchor_only = href_fragment.as_deref() == Some("");

            let target = match href_fragment {
                Some(frag) if !frag.is_empty() => Some(frag),
                _ => doc.attribute(&el, attribute).filter(|v| !v.is_empty()),
            };

            let resolved = target.and_then(|id| doc.element_by_id(&id).map(|em| (id, em)));

            match resolved {
                Some((id, emitter_el)) => {
                    let idx = *registry.index.entry(id.clone()).or_insert_with(|| {
                        registry.emitters.push(Emitter {
                            id: id.clone(),
                            element: emitter_el,
                            is_active: false,
                            was_active: false,
                        });
                        registry.emitters.len() - 1
                    });
                    registry.listeners.push(Listener {
                        element: el,
                        emitter_id: registry.emitters[idx].id.clone(),
                    });
                }
                None if anchor_only => {
                    // No emitter, but still a smooth-scroll target.
                    registry.scroll_links.push(el);
                }
                None => {
                    debug!("listener discarded: emitter id did not resolve");
                }
            }
        }

        debug!(
            emitters = registry.emitters.len(),
            listeners = registry.listeners.len(),
            scroll_links = registry.scroll_links.len(),
            "registry scan complete"
        );
        registry
    }

    pub fn emitters(&self) -> &[Emitter<E>] {
        &self.emitters
    }

    pub(crate) fn emitters_mut(&mut self) -> &mut [Emitter<E>] {
        &mut self.emitters
    }

    pub fn listeners(&self) -> &[Listener<E>] {
        &self.listeners
    }

    pub fn is_empty(&self) -> bool {
        self.emitters.is_empty() && self.scroll_links.is_empty()
    }

    /// Look up an emitter by id.
    pub fn emitter(&self, id: &str) -> Option<&Emitter<E>> {
        self.index.get(id).map(|&i| &self.emitters[i])
    }

    /// Ids of all currently active emitters, in document order.
    pub fn active_ids(&self) -> Vec<String> {
        self.emitters
            .iter()
            .filter(|e| e.is_active)
            .map(|e| e.id.clone())
            .collect()
    }

    /// Resolve a clicked element to its navigation target, if it was
    /// registered during the last scan.
    pub fn link_target(&self, el: &E) -> Option<LinkTarget> {
        if let Some(listener) = self.listeners.iter().find(|l| l.element == *el) {
            return Some(LinkTarget::Emitter(listener.emitter_id.clone()));
        }
        if self.scroll_links.contains(el) {
            return Some(LinkTarget::Top);
        }
        None
    }
}
