//! Marker reconciliation.
//!
//! Mirrors emitter flags onto listener elements after a classification
//! pass. Flags are already final when this runs, so listeners never
//! observe a half-computed state. Applying the same flags twice leaves
//! the document unchanged.

use crate::document::Document;
use crate::options::Options;
use crate::registry::Registry;

/// Set or remove the active marker on every listener according to its
/// emitter's flag. Skipped entirely when the marker is disabled.
pub fn apply<D: Document>(doc: &mut D, registry: &Registry<D::Element>, options: &Options) {
    let Some(marker) = options.marker() else {
        return;
    };

    for listener in registry.listeners() {
        let active = registry
            .emitter(&listener.emitter_id)
            .is_some_and(|e| e.is_active);
        if active {
            doc.set_marker(&listener.element, marker);
        } else {
            doc.remove_marker(&listener.element, marker);
        }
    }
}
