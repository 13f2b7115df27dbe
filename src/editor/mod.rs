mod surface;

pub(crate) use surface::{ContentEditableSurface, RichTextEditor};

use crate::state::{BodyOrigin, DraftChange, DraftSession, ListenerId};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// An editing surface that owns its own buffer.
pub(crate) trait RichTextSurface {
    /// Current content in the surface's canonical serialization.
    fn content(&self) -> String;

    /// Replace the buffer without emitting an edit event.
    fn set_content_silent(&self, html: &str);
}

/// Keeps a rich-text surface and a draft's body in step.
///
/// Surface edits flow into the session as `BodyOrigin::Surface`. Session
/// body changes with `BodyOrigin::External` are pushed into the surface; a
/// push that arrives before a surface is attached is held until `attach`.
pub(crate) struct EditorBridge<S: RichTextSurface> {
    session: DraftSession,
    surface: RefCell<Option<S>>,
    /// An external update arrived while detached; `attach` owes the surface a push.
    push_owed: Cell<bool>,
    pushing: Cell<bool>,
    listener: Cell<Option<ListenerId>>,
}

impl<S: RichTextSurface + 'static> EditorBridge<S> {
    pub fn new(session: DraftSession) -> Rc<Self> {
        let bridge = Rc::new(Self {
            session: session.clone(),
            surface: RefCell::new(None),
            push_owed: Cell::new(false),
            pushing: Cell::new(false),
            listener: Cell::new(None),
        });

        let weak = Rc::downgrade(&bridge);
        let id = session.subscribe(move |change| {
            if change != DraftChange::Body(BodyOrigin::External) {
                return;
            }
            if let Some(b) = weak.upgrade() {
                b.push_external();
            }
        });
        bridge.listener.set(Some(id));

        bridge
    }

    /// Surface finished initializing. Syncs it to the draft's body as it is now,
    /// which also settles any push owed while detached.
    pub fn attach(&self, surface: S) {
        *self.surface.borrow_mut() = Some(surface);
        self.push_owed.set(false);
        let body = self.session.body();
        self.push(&body);
    }

    pub fn detach(&self) -> Option<S> {
        self.surface.borrow_mut().take()
    }

    pub fn is_attached(&self) -> bool {
        self.surface.borrow().is_some()
    }

    #[cfg(test)]
    pub fn has_deferred_push(&self) -> bool {
        self.push_owed.get()
    }

    /// Edit event from the surface.
    pub fn on_surface_edit(&self, value: String) {
        // Echo of our own push from a surface that reports programmatic writes.
        if self.pushing.get() {
            return;
        }
        self.session.set_body(value, BodyOrigin::Surface);
    }

    fn push_external(&self) {
        if !self.is_attached() {
            tracing::debug!("surface not ready; deferring body push");
            self.push_owed.set(true);
            return;
        }
        let body = self.session.body();
        self.push(&body);
    }

    fn push(&self, value: &str) {
        let canonical = {
            let surface = self.surface.borrow();
            let Some(surface) = surface.as_ref() else {
                return;
            };
            if surface.content() == value {
                return;
            }

            self.pushing.set(true);
            surface.set_content_silent(value);
            self.pushing.set(false);
            surface.content()
        };

        tracing::debug!(len = value.len(), "pushed body into surface");

        // The surface may normalize markup; adopt its form so both sides read the same.
        if canonical != value {
            self.session.set_body(canonical, BodyOrigin::Surface);
        }
    }
}

impl<S: RichTextSurface> Drop for EditorBridge<S> {
    fn drop(&mut self) {
        if let Some(id) = self.listener.take() {
            self.session.unsubscribe(id);
        }
    }
}
