//! In-memory document fixture for tests.
//!
//! Elements are indices into a flat vector; geometry is authored in
//! absolute document coordinates and translated to viewport-relative
//! rects the way a bounding-rectangle query would report them.

use std::collections::{HashMap, HashSet};

use crate::document::{Document, Rect, ScrollBehavior};
use crate::error::{DocumentError, DocumentResult};

const LISTENER_ATTR: &str = "data-scrollspy";

#[derive(Debug, Default)]
struct FakeElement {
    id: Option<String>,
    attrs: HashMap<String, String>,
    top: f64,
    height: f64,
    markers: HashSet<String>,
    focusable: bool,
    made_focusable: bool,
}

#[derive(Debug)]
pub(crate) struct FakeDom {
    elements: Vec<FakeElement>,
    scroll: f64,
    viewport_height: f64,
    document_height: f64,
    fragment: Option<String>,
    scrolls: Vec<(f64, ScrollBehavior)>,
    focused: Option<usize>,
    pub(crate) smooth_supported: Result<bool, String>,
    pub(crate) reduced_motion: bool,
}

impl FakeDom {
    pub(crate) fn new(viewport_height: f64, document_height: f64) -> Self {
        Self {
            elements: Vec::new(),
            scroll: 0.0,
            viewport_height,
            document_height,
            fragment: None,
            scrolls: Vec::new(),
            focused: None,
            smooth_supported: Ok(false),
            reduced_motion: false,
        }
    }

    /// Add a content section with an anchor id at an absolute offset.
    pub(crate) fn add_section(&mut self, id: &str, top: f64, height: f64) -> usize {
        self.elements.push(FakeElement {
            id: Some(id.to_string()),
            top,
            height,
            ..Default::default()
        });
        self.elements.len() - 1
    }

    /// Add a nav link carrying the listener attribute and an href.
    pub(crate) fn add_nav_href(&mut self, href: &str) -> usize {
        let mut attrs = HashMap::new();
        attrs.insert(LISTENER_ATTR.to_string(), String::new());
        attrs.insert("href".to_string(), href.to_string());
        self.elements.push(FakeElement {
            attrs,
            ..Default::default()
        });
        self.elements.len() - 1
    }

    /// Add a nav element naming its emitter via the attribute value.
    pub(crate) fn add_nav_value(&mut self, value: &str) -> usize {
        let mut attrs = HashMap::new();
        attrs.insert(LISTENER_ATTR.to_string(), value.to_string());
        self.elements.push(FakeElement {
            attrs,
            ..Default::default()
        });
        self.elements.len() - 1
    }

    /// Add an element the registry has no reason to pick up.
    pub(crate) fn add_plain_element(&mut self) -> usize {
        self.elements.push(FakeElement::default());
        self.elements.len() - 1
    }

    /// Strip the listener attribute from every element, as if the nav
    /// was removed from the page.
    pub(crate) fn clear_nav(&mut self) {
        for el in &mut self.elements {
            el.attrs.remove(LISTENER_ATTR);
        }
    }

    pub(crate) fn set_scroll(&mut self, offset: f64) {
        self.scroll = offset;
    }

    pub(crate) fn has_marker(&self, el: usize, name: &str) -> bool {
        self.elements[el].markers.contains(name)
    }

    /// Marker sets of all elements, for idempotence comparisons.
    pub(crate) fn marker_snapshot(&self) -> Vec<Vec<String>> {
        self.elements
            .iter()
            .map(|el| {
                let mut m: Vec<String> = el.markers.iter().cloned().collect();
                m.sort();
                m
            })
            .collect()
    }

    pub(crate) fn fragment(&self) -> Option<String> {
        self.fragment.clone()
    }

    pub(crate) fn last_scroll(&self) -> Option<f64> {
        self.scrolls.last().map(|(offset, _)| *offset)
    }

    pub(crate) fn last_behavior(&self) -> Option<ScrollBehavior> {
        self.scrolls.last().map(|(_, behavior)| *behavior)
    }

    pub(crate) fn was_made_focusable(&self, id: &str) -> bool {
        self.elements
            .iter()
            .any(|el| el.id.as_deref() == Some(id) && el.made_focusable)
    }

    pub(crate) fn focused_id(&self) -> Option<String> {
        self.focused.and_then(|i| self.elements[i].id.clone())
    }
}

impl Document for FakeDom {
    type Element = usize;

    fn elements_with_attribute(&self, attribute: &str) -> Vec<usize> {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, el)| el.attrs.contains_key(attribute))
            .map(|(i, _)| i)
            .collect()
    }

    fn element_by_id(&self, id: &str) -> Option<usize> {
        self.elements.iter().position(|el| el.id.as_deref() == Some(id))
    }

    fn attribute(&self, el: &usize, name: &str) -> Option<String> {
        self.elements[*el].attrs.get(name).cloned()
    }

    fn bounding_rect(&self, el: &usize) -> Rect {
        let element = &self.elements[*el];
        Rect::new(
            element.top - self.scroll,
            element.top + element.height - self.scroll,
        )
    }

    fn scroll_offset(&self) -> f64 {
        self.scroll
    }

    fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    fn document_height(&self) -> f64 {
        self.document_height
    }

    fn set_marker(&mut self, el: &usize, name: &str) {
        self.elements[*el].markers.insert(name.to_string());
    }

    fn remove_marker(&mut self, el: &usize, name: &str) {
        self.elements[*el].markers.remove(name);
    }

    fn scroll_to(&mut self, offset: f64, behavior: ScrollBehavior) -> DocumentResult<()> {
        self.scrolls.push((offset, behavior));
        self.scroll = offset;
        Ok(())
    }

    fn supports_smooth_scroll(&self) -> DocumentResult<bool> {
        self.smooth_supported
            .clone()
            .map_err(DocumentError::CapabilityProbe)
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    fn replace_fragment(&mut self, fragment: Option<&str>) {
        self.fragment = fragment.map(str::to_string);
    }

    fn focus(&mut self, el: &usize) -> bool {
        let element = &self.elements[*el];
        if element.focusable || element.made_focusable {
            self.focused = Some(*el);
            true
        } else {
            false
        }
    }

    fn make_focusable(&mut self, el: &usize) {
        self.elements[*el].made_focusable = true;
    }
}
