//! A self-contained page used by the CLI and the test suite.
//!
//! `MemoryPage` keeps its own element tree, listener table, task queue and a
//! minimal autocomplete. Each simulated user action (`click`, `press_key`,
//! `type_text`) is one turn of the event loop: listeners run first, then the
//! autocomplete and default actions, then every deferred task in FIFO order.

use super::{
    AutoCompleteHost, Dom, ElementId, Event, EventKind, EventSource, Handler, Key, KeyEvent,
    Scheduler, Target, Task, Window,
};
use crate::config::WidgetConfig;
use crate::search::Matcher;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

const ROOT: ElementId = ElementId(0);

#[derive(Debug)]
struct Node {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    value: String,
    /// Whole value selected; the next typed character replaces it.
    selected: bool,
}

impl Node {
    fn new(tag: &str, parent: Option<ElementId>) -> Self {
        Self {
            tag: tag.to_string(),
            id: None,
            classes: Vec::new(),
            parent,
            children: Vec::new(),
            value: String::new(),
            selected: false,
        }
    }

    fn is_text_input(&self) -> bool {
        self.tag == "input"
    }
}

struct Listener {
    target: Target,
    kind: EventKind,
    handler: Handler,
}

struct AutoComplete {
    input: ElementId,
    matcher: Rc<dyn Matcher>,
    max_rows: usize,
    rows: Vec<String>,
    highlighted: Option<usize>,
}

/// What happened inside the autocomplete for one key press.
enum AutoCompleteStep {
    Ignored,
    Consumed,
    Accepted(ElementId),
}

#[derive(Default)]
pub struct MemoryPage {
    nodes: RefCell<Vec<Node>>,
    focused: Cell<Option<ElementId>>,
    listeners: RefCell<Vec<Listener>>,
    tasks: RefCell<VecDeque<Task>>,
    autocomplete: RefCell<Option<AutoComplete>>,
    navigations: RefCell<Vec<String>>,
    alerts: RefCell<Vec<String>>,
}

impl fmt::Debug for MemoryPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryPage")
            .field("elements", &self.nodes.borrow().len())
            .field("listeners", &self.listeners.borrow().len())
            .field("pending_tasks", &self.tasks.borrow().len())
            .field("navigations", &self.navigations.borrow())
            .field("alerts", &self.alerts.borrow())
            .finish_non_exhaustive()
    }
}

/// Element handles of a page built by [`MemoryPage::doc_page`].
#[derive(Debug, Clone)]
pub struct DocPageLayout {
    pub search_container: ElementId,
    pub search: ElementId,
    pub go: ElementId,
    /// A plain link for moving focus away from the search box.
    pub index_link: ElementId,
    /// `(block, trigger)` per hidden content block.
    pub hidden_blocks: Vec<(ElementId, ElementId)>,
}

impl MemoryPage {
    /// An empty page holding only its `body`.
    pub fn new() -> Self {
        let page = Self::default();
        page.nodes.borrow_mut().push(Node::new("body", None));
        page
    }

    /// The layout the documentation generator emits: a nav bar with an inactive
    /// search box and `hidden_blocks` collapsed member descriptions.
    pub fn doc_page(hidden_blocks: usize) -> (Rc<Self>, DocPageLayout) {
        Self::doc_page_for(&WidgetConfig::default(), hidden_blocks)
    }

    /// [`MemoryPage::doc_page`] using the ids and classes named in `config`.
    pub fn doc_page_for(config: &WidgetConfig, hidden_blocks: usize) -> (Rc<Self>, DocPageLayout) {
        let page = Self::new();
        let nav = page.append(ROOT, "ul");
        page.add_class(nav, "nav");

        let index_item = page.append(nav, "li");
        let index_link = page.append(index_item, "a");

        let search_container = page.append(nav, "li");
        page.add_class(search_container, &config.inactive_class);
        let search = page.append(search_container, "input");
        page.set_id(search, &config.search_input_id);
        let go = page.append(search_container, "button");
        page.set_id(go, &config.go_control_id);

        let blocks = (0..hidden_blocks)
            .map(|_| {
                let block = page.append(ROOT, "div");
                page.add_class(block, &config.hidden_class);
                let trigger = page.append(block, "h2");
                page.append(block, "p");
                (block, trigger)
            })
            .collect();

        let layout = DocPageLayout {
            search_container,
            search,
            go,
            index_link,
            hidden_blocks: blocks,
        };
        (Rc::new(page), layout)
    }

    pub const fn body(&self) -> ElementId {
        ROOT
    }

    /// Append a new `tag` element as the last child of `parent`.
    ///
    /// An unknown `parent` leaves the new element detached.
    pub fn append(&self, parent: ElementId, tag: &str) -> ElementId {
        let mut nodes = self.nodes.borrow_mut();
        let id = ElementId(nodes.len());
        let parent = nodes.get_mut(parent.0).map(|node| {
            node.children.push(id);
            parent
        });
        nodes.push(Node::new(tag, parent));
        id
    }

    pub fn set_id(&self, element: ElementId, id: &str) {
        if let Some(node) = self.nodes.borrow_mut().get_mut(element.0) {
            node.id = Some(id.to_string());
        }
    }

    /// Remove an element id, e.g. to simulate a page without a search box.
    pub fn clear_id(&self, element: ElementId) {
        if let Some(node) = self.nodes.borrow_mut().get_mut(element.0) {
            node.id = None;
        }
    }

    pub fn classes(&self, element: ElementId) -> Vec<String> {
        self.nodes
            .borrow()
            .get(element.0)
            .map(|node| node.classes.clone())
            .unwrap_or_default()
    }

    /// Whether the whole value of an input is currently selected.
    pub fn is_selected(&self, element: ElementId) -> bool {
        self.nodes
            .borrow()
            .get(element.0)
            .is_some_and(|node| node.selected)
    }

    /// Locations passed to [`Window::navigate`], oldest first.
    pub fn navigations(&self) -> Vec<String> {
        self.navigations.borrow().clone()
    }

    /// Messages passed to [`Window::alert`], oldest first.
    pub fn alerts(&self) -> Vec<String> {
        self.alerts.borrow().clone()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn pending_tasks(&self) -> usize {
        self.tasks.borrow().len()
    }

    /// Rows the autocomplete currently shows.
    pub fn suggestions(&self) -> Vec<String> {
        self.autocomplete
            .borrow()
            .as_ref()
            .map(|ac| ac.rows.clone())
            .unwrap_or_default()
    }

    pub fn highlighted_suggestion(&self) -> Option<String> {
        let ac = self.autocomplete.borrow();
        let ac = ac.as_ref()?;
        ac.highlighted.and_then(|i| ac.rows.get(i).cloned())
    }

    /// Click `element`: it gains focus and a `Click` bubbles from it.
    pub fn click(&self, element: ElementId) {
        self.focused.set(Some(element));
        let event = Event::new(EventKind::Click, Target::Element(element));
        self.dispatch(&event);
        self.run_tasks();
    }

    /// Press `key` in whatever holds focus. Returns whether a listener
    /// suppressed the default action.
    pub fn press_key(&self, key: impl Into<KeyEvent>) -> bool {
        let key = key.into();
        let target = self.focused.get().unwrap_or(ROOT);
        let event = Event::key_down(Target::Element(target), key);
        self.dispatch(&event);

        let mut prevented = event.default_prevented();
        match self.autocomplete_key(target, key.key) {
            AutoCompleteStep::Ignored => {}
            AutoCompleteStep::Consumed => prevented = true,
            AutoCompleteStep::Accepted(input) => {
                prevented = true;
                let accepted = Event::new(EventKind::SuggestionAccepted, Target::Element(input));
                self.dispatch(&accepted);
            }
        }

        if !prevented {
            self.default_key_action(target, key.key);
        }
        self.run_tasks();
        event.default_prevented()
    }

    /// Type each character of `text` as its own key press.
    pub fn type_text(&self, text: &str) {
        for c in text.chars() {
            self.press_key(Key::Char(c));
        }
    }

    /// Send `event` to listeners on its target, each ancestor, then the document.
    fn dispatch(&self, event: &Event) {
        let mut path = Vec::new();
        if let Target::Element(mut current) = event.target() {
            path.push(Target::Element(current));
            while let Some(parent) = self.parent(current) {
                path.push(Target::Element(parent));
                current = parent;
            }
        }
        path.push(Target::Document);

        for target in path {
            // Snapshot so handlers may register listeners or touch the page.
            let handlers: Vec<Handler> = self
                .listeners
                .borrow()
                .iter()
                .filter(|l| l.target == target && l.kind == event.kind())
                .map(|l| Rc::clone(&l.handler))
                .collect();
            for handler in handlers {
                tracing::trace!("dispatch {:?} at {:?}", event.kind(), target);
                handler(event);
            }
        }
    }

    fn run_tasks(&self) {
        loop {
            let next = self.tasks.borrow_mut().pop_front();
            match next {
                Some(task) => task(),
                None => break,
            }
        }
    }

    fn autocomplete_key(&self, target: ElementId, key: Key) -> AutoCompleteStep {
        let mut slot = self.autocomplete.borrow_mut();
        let Some(ac) = slot.as_mut().filter(|ac| ac.input == target) else {
            return AutoCompleteStep::Ignored;
        };
        if ac.rows.is_empty() {
            return AutoCompleteStep::Ignored;
        }

        match key {
            Key::Down => {
                let last = ac.rows.len() - 1;
                ac.highlighted = Some(ac.highlighted.map_or(0, |i| (i + 1).min(last)));
                AutoCompleteStep::Consumed
            }
            Key::Up => {
                ac.highlighted = Some(ac.highlighted.map_or(0, |i| i.saturating_sub(1)));
                AutoCompleteStep::Consumed
            }
            Key::Escape => {
                ac.rows.clear();
                ac.highlighted = None;
                AutoCompleteStep::Consumed
            }
            Key::Enter | Key::Tab => {
                let Some(row) = ac.highlighted.and_then(|i| ac.rows.get(i).cloned()) else {
                    return AutoCompleteStep::Ignored;
                };
                let input = ac.input;
                ac.rows.clear();
                ac.highlighted = None;
                drop(slot);

                if let Some(node) = self.nodes.borrow_mut().get_mut(input.0) {
                    node.value = row;
                    node.selected = false;
                }
                AutoCompleteStep::Accepted(input)
            }
            _ => AutoCompleteStep::Ignored,
        }
    }

    fn default_key_action(&self, target: ElementId, key: Key) {
        {
            let mut nodes = self.nodes.borrow_mut();
            let Some(node) = nodes.get_mut(target.0).filter(|node| node.is_text_input()) else {
                return;
            };
            match key {
                Key::Char(c) => {
                    if node.selected {
                        node.value.clear();
                    }
                    node.value.push(c);
                }
                Key::Backspace => {
                    if node.selected {
                        node.value.clear();
                    } else {
                        node.value.pop();
                    }
                }
                _ => return,
            }
            node.selected = false;
        }
        self.refresh_autocomplete(target);
    }

    fn refresh_autocomplete(&self, input: ElementId) {
        let token = self.value(input);
        let mut slot = self.autocomplete.borrow_mut();
        if let Some(ac) = slot.as_mut().filter(|ac| ac.input == input) {
            ac.rows = ac.matcher.matches(&token, ac.max_rows);
            ac.highlighted = if ac.rows.is_empty() { None } else { Some(0) };
        }
    }
}

impl Dom for MemoryPage {
    fn element_by_id(&self, id: &str) -> Option<ElementId> {
        self.nodes
            .borrow()
            .iter()
            .position(|node| node.id.as_deref() == Some(id))
            .map(ElementId)
    }

    fn elements_by_class(&self, class: &str) -> Vec<ElementId> {
        let nodes = self.nodes.borrow();
        let mut found = Vec::new();
        let mut stack = vec![ROOT];
        while let Some(element) = stack.pop() {
            let Some(node) = nodes.get(element.0) else {
                continue;
            };
            if node.classes.iter().any(|c| c == class) {
                found.push(element);
            }
            stack.extend(node.children.iter().rev());
        }
        found
    }

    fn parent(&self, element: ElementId) -> Option<ElementId> {
        self.nodes.borrow().get(element.0)?.parent
    }

    fn first_child(&self, element: ElementId) -> Option<ElementId> {
        self.nodes.borrow().get(element.0)?.children.first().copied()
    }

    fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.nodes
            .borrow()
            .get(element.0)
            .is_some_and(|node| node.classes.iter().any(|c| c == class))
    }

    fn add_class(&self, element: ElementId, class: &str) {
        let mut nodes = self.nodes.borrow_mut();
        if let Some(node) = nodes.get_mut(element.0)
            && !node.classes.iter().any(|c| c == class)
        {
            node.classes.push(class.to_string());
        }
    }

    fn remove_class(&self, element: ElementId, class: &str) {
        if let Some(node) = self.nodes.borrow_mut().get_mut(element.0) {
            node.classes.retain(|c| c != class);
        }
    }

    fn value(&self, element: ElementId) -> String {
        self.nodes
            .borrow()
            .get(element.0)
            .filter(|node| node.is_text_input())
            .map(|node| node.value.clone())
            .unwrap_or_default()
    }

    fn focus(&self, element: ElementId) {
        self.focused.set(Some(element));
    }

    fn select_text(&self, element: ElementId) {
        if let Some(node) = self.nodes.borrow_mut().get_mut(element.0)
            && node.is_text_input()
        {
            node.selected = !node.value.is_empty();
        }
    }

    fn active_element(&self) -> Option<ElementId> {
        self.focused.get()
    }
}

impl EventSource for MemoryPage {
    fn listen(&self, target: Target, kind: EventKind, handler: Handler) {
        self.listeners.borrow_mut().push(Listener {
            target,
            kind,
            handler,
        });
    }
}

impl Scheduler for MemoryPage {
    fn defer(&self, task: Task) {
        self.tasks.borrow_mut().push_back(task);
    }
}

impl Window for MemoryPage {
    fn navigate(&self, location: &str) {
        tracing::debug!("navigate: {}", location);
        self.navigations.borrow_mut().push(location.to_string());
    }

    fn alert(&self, message: &str) {
        tracing::debug!("alert: {}", message);
        self.alerts.borrow_mut().push(message.to_string());
    }
}

impl AutoCompleteHost for MemoryPage {
    fn attach_autocomplete(&self, input: ElementId, matcher: Rc<dyn Matcher>, max_rows: usize) {
        *self.autocomplete.borrow_mut() = Some(AutoComplete {
            input,
            matcher,
            max_rows,
            rows: Vec::new(),
            highlighted: None,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{ArrayMatcher, SymbolIndex};
    use assert2::check;

    fn page_with_autocomplete() -> (Rc<MemoryPage>, DocPageLayout) {
        let (page, layout) = MemoryPage::doc_page(0);
        let index = SymbolIndex::new([("Foo", "foo.html"), ("Foo.bar", "foo.html#bar")]).unwrap();
        page.attach_autocomplete(
            layout.search,
            Rc::new(ArrayMatcher::new(index.suggestions())),
            20,
        );
        page.focus(layout.search);
        (page, layout)
    }

    #[test]
    fn doc_page_layout() {
        let (page, layout) = MemoryPage::doc_page(2);
        check!(page.element_by_id("search") == Some(layout.search));
        check!(page.element_by_id("go") == Some(layout.go));
        check!(page.parent(layout.search) == Some(layout.search_container));
        check!(page.has_class(layout.search_container, "off"));

        let hidden = page.elements_by_class("hidden");
        check!(hidden.len() == 2);
        for (block, trigger) in &layout.hidden_blocks {
            check!(page.first_child(*block) == Some(*trigger));
        }
    }

    #[test]
    fn class_lookup_follows_document_order() {
        let (page, layout) = MemoryPage::doc_page(1);
        let late_but_early = page.append(layout.search_container, "span");
        page.add_class(late_but_early, "hidden");

        let (block, _) = layout.hidden_blocks[0];
        check!(page.elements_by_class("hidden") == [late_but_early, block]);
    }

    #[test]
    fn events_bubble_to_ancestors_then_document() {
        let (page, layout) = MemoryPage::doc_page(0);
        let seen = Rc::new(RefCell::new(Vec::new()));
        for (label, target) in [
            ("document", Target::Document),
            ("container", Target::Element(layout.search_container)),
            ("go", Target::Element(layout.go)),
        ] {
            let seen = Rc::clone(&seen);
            page.listen(
                target,
                EventKind::Click,
                Rc::new(move |_: &Event| seen.borrow_mut().push(label)),
            );
        }

        page.click(layout.go);
        check!(*seen.borrow() == ["go", "container", "document"]);
    }

    #[test]
    fn deferred_tasks_run_after_dispatch() {
        let (page, layout) = MemoryPage::doc_page(0);
        let seen = Rc::new(RefCell::new(Vec::new()));

        let weak = Rc::downgrade(&page);
        let log = Rc::clone(&seen);
        page.listen(
            Target::Element(layout.go),
            EventKind::Click,
            Rc::new(move |_: &Event| {
                log.borrow_mut().push("handler");
                let log = Rc::clone(&log);
                if let Some(page) = weak.upgrade() {
                    page.defer(Box::new(move || log.borrow_mut().push("task")));
                }
            }),
        );
        let log = Rc::clone(&seen);
        page.listen(
            Target::Document,
            EventKind::Click,
            Rc::new(move |_: &Event| log.borrow_mut().push("document")),
        );

        page.click(layout.go);
        check!(*seen.borrow() == ["handler", "document", "task"]);
        check!(page.pending_tasks() == 0);
    }

    #[test]
    fn typing_fills_input_and_refreshes_rows() {
        let (page, layout) = page_with_autocomplete();
        page.type_text("foo.");
        check!(page.value(layout.search) == "foo.");
        check!(page.suggestions() == ["Foo.bar"]);
        check!(page.highlighted_suggestion().as_deref() == Some("Foo.bar"));

        page.press_key(Key::Backspace);
        check!(page.value(layout.search) == "foo");
        check!(page.suggestions() == ["Foo", "Foo.bar"]);
    }

    #[test]
    fn arrows_move_highlight_and_enter_accepts() {
        let (page, layout) = page_with_autocomplete();
        let accepted = Rc::new(Cell::new(0));
        let count = Rc::clone(&accepted);
        page.listen(
            Target::Element(layout.search),
            EventKind::SuggestionAccepted,
            Rc::new(move |_: &Event| count.set(count.get() + 1)),
        );

        page.type_text("fo");
        page.press_key(Key::Down);
        check!(page.highlighted_suggestion().as_deref() == Some("Foo.bar"));
        page.press_key(Key::Down);
        check!(page.highlighted_suggestion().as_deref() == Some("Foo.bar"));
        page.press_key(Key::Up);
        check!(page.highlighted_suggestion().as_deref() == Some("Foo"));

        page.press_key(Key::Enter);
        check!(page.value(layout.search) == "Foo");
        check!(accepted.get() == 1);
        check!(page.suggestions().is_empty());
    }

    #[test]
    fn escape_closes_without_accepting() {
        let (page, layout) = page_with_autocomplete();
        page.type_text("fo");
        page.press_key(Key::Escape);
        check!(page.suggestions().is_empty());
        page.press_key(Key::Enter);
        check!(page.value(layout.search) == "fo");
    }

    #[test]
    fn selected_text_is_replaced_by_typing() {
        let (page, layout) = page_with_autocomplete();
        page.type_text("abc");
        page.select_text(layout.search);
        check!(page.is_selected(layout.search));
        page.type_text("F");
        check!(page.value(layout.search) == "F");
        check!(!page.is_selected(layout.search));
    }

    /// Handles from another page are ignored rather than indexed.
    #[test]
    fn foreign_element_ids_are_ignored() {
        let (big, layout) = MemoryPage::doc_page(3);
        let (_, last_trigger) = layout.hidden_blocks[2];
        let small = MemoryPage::new();

        small.set_id(last_trigger, "search");
        small.clear_id(last_trigger);
        check!(small.classes(last_trigger).is_empty());
        check!(!small.is_selected(last_trigger));
        check!(small.element_by_id("search").is_none());

        let orphan = small.append(last_trigger, "p");
        check!(small.parent(orphan).is_none());
        check!(small.first_child(small.body()).is_none());

        small.focus(last_trigger);
        small.type_text("x");
        small.press_key(Key::Enter);
        check!(small.value(last_trigger).is_empty());
        check!(big.classes(last_trigger).is_empty());
    }

    #[test]
    fn toggle_class_flips_presence() {
        let (page, layout) = MemoryPage::doc_page(1);
        let (block, _) = layout.hidden_blocks[0];
        check!(!page.toggle_class(block, "hidden"));
        check!(!page.has_class(block, "hidden"));
        check!(page.toggle_class(block, "hidden"));
        check!(page.has_class(block, "hidden"));
    }
}
