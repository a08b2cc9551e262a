//! Shared test fixtures for page-level integration tests.
//!
//! # Available Fixtures
//!
//! - `scenario_host`: the single-entry index `{"Foo.bar": "foo/bar.html"}` under `/docs`
//! - `library_host`: a larger index shaped like a Closure-style library
//! - `loaded_page`: a generated page with two hidden blocks, initialized with `library_host`

use jvdoc_nav::dom::{DocPageLayout, Page};
use jvdoc_nav::{HostData, MemoryPage, PageController, WidgetConfig};
use rstest::fixture;
use std::collections::BTreeMap;
use std::rc::Rc;

/// A page after `init`, together with handles to its elements.
#[allow(dead_code)] // Fields used across different integration test crates
pub struct LoadedPage {
    pub page: Rc<MemoryPage>,
    pub layout: DocPageLayout,
    pub controller: PageController,
}

#[allow(dead_code)] // Used across different integration test crates
pub fn host(entries: &[(&str, &str)], base_dir: &str) -> HostData {
    let xref: BTreeMap<String, String> = entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    HostData::new(xref, base_dir)
}

#[allow(dead_code)]
#[fixture]
pub fn scenario_host() -> HostData {
    host(&[("Foo.bar", "foo/bar.html")], "/docs")
}

#[fixture]
pub fn library_host() -> HostData {
    host(
        &[
            ("goog.dom", "goog/dom.html"),
            ("goog.dom.classes", "goog/dom/classes.html"),
            ("goog.dom.classes.toggle", "goog/dom/classes.html#goog.dom.classes.toggle"),
            ("goog.events", "goog/events.html"),
            ("goog.events.listen", "goog/events.html#goog.events.listen"),
            ("goog.ui.AutoComplete.Basic", "goog/ui/ac/basic.html"),
            ("jv", "jv.html"),
            ("jv.enableHiddenContent", "jv.html#jv.enableHiddenContent"),
            ("jv.enableSearch", "jv.html#jv.enableSearch"),
            ("jv.init", "jv.html#jv.init"),
        ],
        "..",
    )
}

/// Initialize a generated page carrying `hidden_blocks` collapsed blocks.
#[allow(dead_code)] // Used across different integration test crates
pub fn load(host: HostData, hidden_blocks: usize) -> LoadedPage {
    jvdoc_nav::tracing::init();
    let config = WidgetConfig::default();
    let (page, layout) = MemoryPage::doc_page_for(&config, hidden_blocks);
    let dyn_page: Rc<dyn Page> = page.clone();
    let controller = jvdoc_nav::init(&dyn_page, host, &config).expect("page should initialize");
    LoadedPage {
        page,
        layout,
        controller,
    }
}

#[fixture]
pub fn loaded_page(library_host: HostData) -> LoadedPage {
    load(library_host, 2)
}
