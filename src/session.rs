//! Scripted search sessions over an in-memory page.
//!
//! Each submitted line is entered the way a reader would: press the shortcut
//! key, type the text over whatever was selected, press Enter.

use crate::config::WidgetConfig;
use crate::controller::{self, PageController};
use crate::dom::{DocPageLayout, Key, MemoryPage, Page};
use crate::error::Result;
use crate::host::HostData;
use std::rc::Rc;

/// What a submitted line led to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Navigated(String),
    Alerted(String),
    /// Neither navigation nor alert happened, e.g. for an empty line.
    Nothing,
}

struct LoadedPage {
    page: Rc<MemoryPage>,
    layout: DocPageLayout,
    _controller: PageController,
}

pub struct Session {
    host: HostData,
    config: WidgetConfig,
    current: LoadedPage,
    loads: usize,
}

impl Session {
    pub fn new(host: HostData, config: WidgetConfig) -> Result<Self> {
        let current = load(&host, &config)?;
        Ok(Self {
            host,
            config,
            current,
            loads: 1,
        })
    }

    /// Number of page loads so far; every navigation loads a fresh page.
    pub const fn loads(&self) -> usize {
        self.loads
    }

    pub const fn page(&self) -> &Rc<MemoryPage> {
        &self.current.page
    }

    pub const fn layout(&self) -> &DocPageLayout {
        &self.current.layout
    }

    /// Enter `line` into the search box and confirm it.
    pub fn submit(&mut self, line: &str) -> Result<Outcome> {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.is_empty() {
            return Ok(Outcome::Nothing);
        }

        let page = Rc::clone(&self.current.page);
        let (navigated, alerted) = (page.navigations().len(), page.alerts().len());

        page.click(self.current.layout.index_link);
        page.press_key(self.config.shortcut_key);
        page.type_text(line);
        page.press_key(Key::Enter);

        if let Some(location) = page.navigations().get(navigated).cloned() {
            self.current = load(&self.host, &self.config)?;
            self.loads += 1;
            return Ok(Outcome::Navigated(location));
        }
        Ok(page
            .alerts()
            .get(alerted)
            .cloned()
            .map_or(Outcome::Nothing, Outcome::Alerted))
    }
}

/// Look `symbol` up exactly, the way a confirmation does, without the search
/// box or its suggestions.
pub fn resolve(host: HostData, symbol: &str) -> Result<Outcome> {
    let (index, base_dir) = host.into_parts()?;
    Ok(match index.resolve(symbol) {
        Some(path) => Outcome::Navigated(base_dir.join(path)),
        None => Outcome::Alerted(format!("unknown symbol {}", symbol)),
    })
}

fn load(host: &HostData, config: &WidgetConfig) -> Result<LoadedPage> {
    let (page, layout) = MemoryPage::doc_page_for(config, 0);
    let dyn_page: Rc<dyn Page> = page.clone();
    let controller = controller::init(&dyn_page, host.clone(), config)?;
    Ok(LoadedPage {
        page,
        layout,
        _controller: controller,
    })
}
