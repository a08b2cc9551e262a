//! Click-to-reveal for collapsed (protected and deprecated) members.

use crate::config::WidgetConfig;
use crate::dom::{ElementId, Event, EventKind, Page, Target};
use crate::error::{Error, Result};
use std::rc::Rc;

/// A collapsed block and the element that flips it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleBlock {
    pub block: ElementId,
    pub trigger: ElementId,
}

/// All blocks found hidden at initialization, each toggled on its own.
///
/// Visibility lives only in the marker class on the block.
#[derive(Debug, Clone, Default)]
pub struct VisibilityToggle {
    blocks: Vec<ToggleBlock>,
}

impl VisibilityToggle {
    /// Find every block marked hidden and wire its first child as the trigger.
    ///
    /// Fails before wiring anything if some block has no child.
    pub fn init(page: &Rc<dyn Page>, config: &WidgetConfig) -> Result<Self> {
        let blocks = page
            .elements_by_class(&config.hidden_class)
            .into_iter()
            .enumerate()
            .map(|(i, block)| {
                page.first_child(block)
                    .map(|trigger| ToggleBlock { block, trigger })
                    .ok_or(Error::MissingTrigger { block: i })
            })
            .collect::<Result<Vec<_>>>()?;

        for ToggleBlock { block, trigger } in &blocks {
            let block = *block;
            let weak = Rc::downgrade(page);
            let class = config.hidden_class.clone();
            page.listen(
                Target::Element(*trigger),
                EventKind::Click,
                Rc::new(move |_: &Event| {
                    if let Some(page) = weak.upgrade() {
                        let hidden = page.toggle_class(block, &class);
                        tracing::trace!("Block {:?} hidden: {}", block, hidden);
                    }
                }),
            );
        }

        tracing::debug!("Wired {} hidden blocks", blocks.len());
        Ok(Self { blocks })
    }

    pub fn blocks(&self) -> &[ToggleBlock] {
        &self.blocks
    }
}
