//! The search box: suggestions while typing, navigation on confirmation.

use crate::config::WidgetConfig;
use crate::dom::{ElementId, Event, EventKind, Key, Page, Target};
use crate::error::{Error, Result};
use crate::search::{ArrayMatcher, BaseDirectory, SymbolIndex};
use std::cell::Cell;
use std::rc::{Rc, Weak};

/// Where a widget is in its confirm cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetState {
    /// Waiting for input; suggestions are driven by the autocomplete.
    Idle,
    /// Resolving the current input.
    Confirming,
    /// A location was set. The page is unloading and later confirmations are ignored.
    Navigating,
}

/// Outcome of one confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirmation {
    Navigated(String),
    /// The input named no known symbol; the user was alerted.
    Unresolved(String),
    /// A navigation is already under way.
    Ignored,
}

/// Search input plus "go" control, bound to a [`SymbolIndex`].
pub struct SearchWidget {
    page: Weak<dyn Page>,
    index: Rc<SymbolIndex>,
    base_dir: BaseDirectory,
    input: ElementId,
    go: ElementId,
    shortcut: Key,
    state: Cell<WidgetState>,
}

impl std::fmt::Debug for SearchWidget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchWidget")
            .field("symbols", &self.index.len())
            .field("base_dir", &self.base_dir)
            .field("input", &self.input)
            .field("go", &self.go)
            .field("state", &self.state.get())
            .finish_non_exhaustive()
    }
}

impl SearchWidget {
    /// Wire the search box on `page` and mark it interactive.
    ///
    /// All required elements are looked up before anything is attached, so a
    /// page missing one is left untouched.
    pub fn init(
        page: &Rc<dyn Page>,
        index: Rc<SymbolIndex>,
        base_dir: BaseDirectory,
        config: &WidgetConfig,
    ) -> Result<Rc<Self>> {
        let input = page
            .element_by_id(&config.search_input_id)
            .ok_or_else(|| Error::missing_element(format!("#{}", config.search_input_id)))?;
        let go = page
            .element_by_id(&config.go_control_id)
            .ok_or_else(|| Error::missing_element(format!("#{}", config.go_control_id)))?;
        let container = page.parent(input).ok_or_else(|| {
            Error::missing_element(format!("container of #{}", config.search_input_id))
        })?;

        let widget = Rc::new(Self {
            page: Rc::downgrade(page),
            index,
            base_dir,
            input,
            go,
            shortcut: config.shortcut_key,
            state: Cell::new(WidgetState::Idle),
        });

        let matcher = ArrayMatcher::new(widget.index.suggestions());
        page.attach_autocomplete(input, Rc::new(matcher), config.max_suggestions);

        let this = Rc::clone(&widget);
        page.listen(
            Target::Element(input),
            EventKind::SuggestionAccepted,
            Rc::new(move |_: &Event| {
                this.confirm();
            }),
        );

        let this = Rc::clone(&widget);
        page.listen(
            Target::Element(input),
            EventKind::KeyDown,
            Rc::new(move |event: &Event| this.on_input_key(event)),
        );

        let this = Rc::clone(&widget);
        page.listen(
            Target::Element(go),
            EventKind::Click,
            Rc::new(move |_: &Event| {
                this.confirm();
            }),
        );

        let this = Rc::clone(&widget);
        page.listen(
            Target::Document,
            EventKind::KeyDown,
            Rc::new(move |event: &Event| this.on_document_key(event)),
        );

        page.remove_class(container, &config.inactive_class);
        tracing::debug!(
            "Search enabled with {} symbols under '{}'",
            widget.index.len(),
            widget.base_dir
        );
        Ok(widget)
    }

    pub fn state(&self) -> WidgetState {
        self.state.get()
    }

    pub const fn input(&self) -> ElementId {
        self.input
    }

    pub const fn go_control(&self) -> ElementId {
        self.go
    }

    /// Resolve the current input and navigate, or alert when it is unknown.
    pub fn confirm(&self) -> Confirmation {
        let Some(page) = self.page.upgrade() else {
            return Confirmation::Ignored;
        };
        if self.state.get() == WidgetState::Navigating {
            tracing::trace!("Confirmation ignored, navigation already under way");
            return Confirmation::Ignored;
        }

        self.state.set(WidgetState::Confirming);
        let name = page.value(self.input);
        match self.index.resolve(&name) {
            Some(path) => {
                let location = self.base_dir.join(path);
                tracing::debug!("Resolved '{}' -> {}", name, location);
                self.state.set(WidgetState::Navigating);
                page.navigate(&location);
                Confirmation::Navigated(location)
            }
            None => {
                tracing::debug!("Unknown symbol '{}'", name);
                page.alert(&format!("unknown symbol {}", name));
                self.state.set(WidgetState::Idle);
                Confirmation::Unresolved(name)
            }
        }
    }

    /// Enter confirms, but only after the autocomplete has finished handling
    /// the same key press and updated the input.
    fn on_input_key(self: &Rc<Self>, event: &Event) {
        if !event.key().is_some_and(|k| k.key == Key::Enter) {
            return;
        }
        let Some(page) = self.page.upgrade() else {
            return;
        };
        let this = Rc::clone(self);
        page.defer(Box::new(move || {
            this.confirm();
        }));
    }

    fn on_document_key(&self, event: &Event) {
        let Some(key) = event.key() else {
            return;
        };
        if !key.key.same_key(self.shortcut) {
            return;
        }
        let Some(page) = self.page.upgrade() else {
            return;
        };
        if page.active_element() == Some(self.input) {
            return;
        }

        page.focus(self.input);
        page.select_text(self.input);
        event.prevent_default();
    }
}
