//! Symbol cross-reference: exact name to document path resolution.

use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// Immutable mapping from symbol name to a document path relative to the docs root.
///
/// Keys are case-sensitive and kept in name order, which is also the order the
/// generator writes them in.
#[derive(Debug, Clone, Default)]
pub struct SymbolIndex {
    entries: BTreeMap<String, String>,
}

impl SymbolIndex {
    /// Build an index from `(symbol, path)` pairs.
    ///
    /// Every path must be non-empty. A duplicated symbol keeps its last path.
    pub fn new<I, K, V>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut map = BTreeMap::new();
        for (symbol, path) in entries {
            let (symbol, path) = (symbol.into(), path.into());
            if path.is_empty() {
                return Err(Error::EmptyPath { symbol });
            }
            map.insert(symbol, path);
        }
        Ok(Self { entries: map })
    }

    /// Exact, case-sensitive lookup. `None` means the symbol is unknown.
    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Every symbol name, in index order, as a candidate pool for matching.
    pub fn suggestions(&self) -> SuggestionList {
        SuggestionList {
            names: self.entries.keys().cloned().collect(),
        }
    }
}

/// The ordered candidate pool offered to the autocomplete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionList {
    names: Rc<[String]>,
}

impl SuggestionList {
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

/// Prefix joined with a resolved path to form a navigable location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseDirectory(String);

impl BaseDirectory {
    pub fn new(dir: impl Into<String>) -> Self {
        Self(dir.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The location for a resolved path: `<base>/<path>`.
    pub fn join(&self, path: &str) -> String {
        format!("{}/{}", self.0, path)
    }
}

impl fmt::Display for BaseDirectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    fn index() -> SymbolIndex {
        SymbolIndex::new([
            ("goog.dom", "goog/dom.html"),
            ("Foo.bar", "foo/bar.html"),
            ("foo.bar", "foo/lower.html"),
        ])
        .unwrap()
    }

    #[test]
    fn resolve_is_exact_and_case_sensitive() {
        let index = index();
        check!(index.resolve("Foo.bar") == Some("foo/bar.html"));
        check!(index.resolve("foo.bar") == Some("foo/lower.html"));
        check!(index.resolve("FOO.BAR").is_none());
        check!(index.resolve("Foo").is_none());
        check!(index.resolve(" Foo.bar").is_none());
        check!(index.resolve("").is_none());
    }

    #[test]
    fn rejects_empty_paths() {
        let result = SymbolIndex::new([("ok", "ok.html"), ("broken", "")]);
        check!(matches!(result, Err(Error::EmptyPath { symbol }) if symbol == "broken"));
    }

    #[test]
    fn suggestions_follow_name_order() {
        let list = index().suggestions();
        let names: Vec<&str> = list.iter().collect();
        check!(names == ["Foo.bar", "foo.bar", "goog.dom"]);
        check!(list.len() == 3);
    }

    #[test]
    fn base_directory_join() {
        check!(BaseDirectory::new("/docs").join("foo/bar.html") == "/docs/foo/bar.html");
        check!(BaseDirectory::new("..").join("index.html") == "../index.html");
    }
}
