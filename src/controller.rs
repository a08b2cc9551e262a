//! Page entry point.

use crate::config::WidgetConfig;
use crate::dom::Page;
use crate::error::Result;
use crate::host::HostData;
use crate::visibility::VisibilityToggle;
use crate::widget::SearchWidget;
use std::rc::Rc;

/// The initialized page layer.
#[derive(Debug)]
pub struct PageController {
    search: Rc<SearchWidget>,
    toggle: VisibilityToggle,
}

impl PageController {
    pub const fn search(&self) -> &Rc<SearchWidget> {
        &self.search
    }

    pub const fn visibility(&self) -> &VisibilityToggle {
        &self.toggle
    }
}

/// Initialize search and hidden-content toggles for a loaded page.
///
/// Host data is validated first; nothing on the page changes when it is malformed.
pub fn init(page: &Rc<dyn Page>, host: HostData, config: &WidgetConfig) -> Result<PageController> {
    let (index, base_dir) = host.into_parts()?;
    let search = SearchWidget::init(page, Rc::new(index), base_dir, config)?;
    let toggle = VisibilityToggle::init(page, config)?;
    Ok(PageController { search, toggle })
}
