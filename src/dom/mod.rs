//! Abstract page capabilities the components are written against.
//!
//! A host (a browser binding, or [`MemoryPage`] in tests and the CLI) implements
//! the traits below. Components only ever see `Rc<dyn Page>`.

pub(crate) mod key;
pub(crate) mod memory;

pub use key::{Key, KeyEvent, Modifiers};
pub use memory::{DocPageLayout, MemoryPage};

use crate::search::Matcher;
use std::cell::Cell;
use std::rc::Rc;

/// Opaque handle to one element of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub(crate) usize);

/// What a listener is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Element(ElementId),
    Document,
}

/// Event kinds the components listen for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    KeyDown,
    Click,
    /// The autocomplete accepted a suggestion row into its input.
    SuggestionAccepted,
}

/// A dispatched event.
#[derive(Debug)]
pub struct Event {
    kind: EventKind,
    target: Target,
    key: Option<KeyEvent>,
    default_prevented: Cell<bool>,
}

impl Event {
    pub const fn new(kind: EventKind, target: Target) -> Self {
        Self {
            kind,
            target,
            key: None,
            default_prevented: Cell::new(false),
        }
    }

    pub const fn key_down(target: Target, key: KeyEvent) -> Self {
        Self {
            key: Some(key),
            ..Self::new(EventKind::KeyDown, target)
        }
    }

    pub const fn kind(&self) -> EventKind {
        self.kind
    }

    /// Element the event was originally dispatched to.
    pub const fn target(&self) -> Target {
        self.target
    }

    pub const fn key(&self) -> Option<&KeyEvent> {
        self.key.as_ref()
    }

    /// Suppress the host's default action for this event.
    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}

pub type Handler = Rc<dyn Fn(&Event)>;

/// A unit of work queued with [`Scheduler::defer`].
pub type Task = Box<dyn FnOnce()>;

/// Read and mutate the element tree.
pub trait Dom {
    fn element_by_id(&self, id: &str) -> Option<ElementId>;
    /// Elements carrying `class`, in document order.
    fn elements_by_class(&self, class: &str) -> Vec<ElementId>;
    fn parent(&self, element: ElementId) -> Option<ElementId>;
    fn first_child(&self, element: ElementId) -> Option<ElementId>;

    fn has_class(&self, element: ElementId, class: &str) -> bool;
    fn add_class(&self, element: ElementId, class: &str);
    fn remove_class(&self, element: ElementId, class: &str);
    /// Flip `class` on `element`, returning whether it is now present.
    fn toggle_class(&self, element: ElementId, class: &str) -> bool {
        if self.has_class(element, class) {
            self.remove_class(element, class);
            false
        } else {
            self.add_class(element, class);
            true
        }
    }

    /// Current text of an input element; empty for anything else.
    fn value(&self, element: ElementId) -> String;
    fn focus(&self, element: ElementId);
    /// Select the whole text of an input element.
    fn select_text(&self, element: ElementId);
    fn active_element(&self) -> Option<ElementId>;
}

/// Handler registration.
pub trait EventSource {
    fn listen(&self, target: Target, kind: EventKind, handler: Handler);
}

/// Deferred execution on the page's event loop.
pub trait Scheduler {
    /// Run `task` once the event currently being dispatched, and every handler
    /// it synchronously triggers, has finished.
    fn defer(&self, task: Task);
}

/// Effects that leave the page layer.
pub trait Window {
    /// Replace the current document. The page unloads afterwards.
    fn navigate(&self, location: &str);
    /// Blocking user-visible notification.
    fn alert(&self, message: &str);
}

/// The external suggestion primitive.
pub trait AutoCompleteHost {
    /// Attach a suggestion list to `input`, offering at most `max_rows` rows from
    /// `matcher` as the user types. Acceptance is signalled with a
    /// [`EventKind::SuggestionAccepted`] event on `input`.
    fn attach_autocomplete(&self, input: ElementId, matcher: Rc<dyn Matcher>, max_rows: usize);
}

/// Everything a component needs from its host page.
pub trait Page: Dom + EventSource + Scheduler + Window + AutoCompleteHost {}

impl<T> Page for T where T: Dom + EventSource + Scheduler + Window + AutoCompleteHost {}
