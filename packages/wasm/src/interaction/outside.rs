//! Scoped click-outside listener.
//!
//! Registering installs a `click` listener on the document that fires the
//! callback for clicks landing outside the container. The listener lives
//! exactly as long as the guard.

use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, Node};

/// Owns the document listener; dropping it removes the listener.
pub struct OutsideClickGuard {
    document: Document,
    closure: Closure<dyn FnMut(Event)>,
}

impl OutsideClickGuard {
    /// Listen for clicks outside `container`.
    pub fn register(
        container: Element,
        mut on_outside: impl FnMut() + 'static,
    ) -> Result<Self, JsValue> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| JsValue::from_str("no document available"))?;

        let closure = Closure::wrap(Box::new(move |event: Event| {
            let inside = event
                .target()
                .and_then(|target| target.dyn_into::<Node>().ok())
                .is_some_and(|node| container.contains(Some(&node)));
            if !inside {
                on_outside();
            }
        }) as Box<dyn FnMut(Event)>);

        document.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        debug!("registered outside-click listener");

        Ok(Self { document, closure })
    }
}

impl Drop for OutsideClickGuard {
    fn drop(&mut self) {
        if let Err(err) = self
            .document
            .remove_event_listener_with_callback("click", self.closure.as_ref().unchecked_ref())
        {
            warn!(?err, "failed to remove outside-click listener");
            return;
        }
        debug!("removed outside-click listener");
    }
}
