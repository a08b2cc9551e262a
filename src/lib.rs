//! Interactive layer for generated JavaScript API documentation pages:
//! symbol search with suggestions, a focus shortcut, and click-to-reveal for
//! collapsed members.
//!
//! Components are written against the [`dom::Page`] capabilities and wired by
//! [`controller::init`].

pub mod cli;
pub mod config;
pub mod controller;
pub mod dom;
pub mod error;
pub mod host;
pub mod search;
pub mod session;
pub mod tracing;
pub mod visibility;
pub mod widget;

pub use config::WidgetConfig;
pub use controller::{PageController, init};
pub use dom::MemoryPage;
pub use error::{Error, Result};
pub use host::HostData;
pub use search::{ArrayMatcher, BaseDirectory, Matcher, SymbolIndex};
pub use session::{Outcome, Session, resolve};
pub use widget::{Confirmation, SearchWidget, WidgetState};
