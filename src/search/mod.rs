//! Symbol resolution and suggestion matching.
//!
//! [`SymbolIndex`] answers exact lookups for confirmed input; [`ArrayMatcher`]
//! feeds the autocomplete while the user is still typing.

pub(crate) mod index;
pub(crate) mod matcher;

pub use index::{BaseDirectory, SuggestionList, SymbolIndex};
pub use matcher::{ArrayMatcher, Matcher};
