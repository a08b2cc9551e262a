//! Candidate matching for the suggestion list.

use super::index::SuggestionList;
use regex::Regex;

/// Produces suggestion rows for the text currently typed into the search box.
pub trait Matcher {
    /// Up to `max` candidates for `token`, best first.
    fn matches(&self, token: &str, max: usize) -> Vec<String>;
}

/// Case-insensitive matcher over a fixed candidate pool.
///
/// Rows come in tiers, each in pool order:
/// - the candidate equal to the token, if any
/// - candidates where the token starts a word (`bar` matches `Foo.bar`)
/// - candidates containing the token anywhere (`oo` matches `Foo.bar`)
#[derive(Debug, Clone)]
pub struct ArrayMatcher {
    pool: SuggestionList,
}

impl ArrayMatcher {
    pub const fn new(pool: SuggestionList) -> Self {
        Self { pool }
    }

    pub const fn pool(&self) -> &SuggestionList {
        &self.pool
    }
}

impl Matcher for ArrayMatcher {
    fn matches(&self, token: &str, max: usize) -> Vec<String> {
        if token.is_empty() || max == 0 {
            return vec![];
        }

        // Escaped input always forms a valid pattern.
        let Ok(word_start) = Regex::new(&format!(r"(?i)(?:^|\W){}", regex::escape(token))) else {
            return vec![];
        };
        let needle = token.to_lowercase();

        // An exactly typed symbol must be the highlighted row, or accepting the
        // highlight would navigate somewhere else.
        let exact = self.pool.iter().find(|candidate| *candidate == token);
        let mut rows: Vec<String> = exact
            .into_iter()
            .chain(
                self.pool
                    .iter()
                    .filter(|candidate| Some(*candidate) != exact)
                    .filter(|candidate| word_start.is_match(candidate)),
            )
            .take(max)
            .map(str::to_owned)
            .collect();

        if rows.len() < max {
            let remaining = max - rows.len();
            let substring: Vec<String> = self
                .pool
                .iter()
                .filter(|candidate| !word_start.is_match(candidate))
                .filter(|candidate| candidate.to_lowercase().contains(&needle))
                .take(remaining)
                .map(str::to_owned)
                .collect();
            rows.extend(substring);
        }

        tracing::trace!("matcher: '{}' -> {} rows", token, rows.len());
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::SymbolIndex;
    use assert2::check;
    use rstest::rstest;

    fn matcher() -> ArrayMatcher {
        let index = SymbolIndex::new([
            ("Foo", "foo.html"),
            ("Foo.bar", "foo.html#bar"),
            ("Foo.barBaz", "foo.html#barBaz"),
            ("goog.dom.classes", "goog/dom/classes.html"),
            ("goog.ui.AutoComplete.Basic", "goog/ui/ac/basic.html"),
            ("jv.enableSearch", "jv.html#enableSearch"),
            ("sidebar", "sidebar.html"),
        ])
        .unwrap();
        ArrayMatcher::new(index.suggestions())
    }

    #[rstest]
    #[case("foo", &["Foo", "Foo.bar", "Foo.barBaz"])]
    #[case("Foo.bar", &["Foo.bar", "Foo.barBaz"])]
    #[case("bar", &["Foo.bar", "Foo.barBaz", "sidebar"])]
    #[case("BASIC", &["goog.ui.AutoComplete.Basic"])]
    #[case("search", &["jv.enableSearch"])]
    #[case("qux", &[])]
    #[case("", &[])]
    fn word_starts_rank_before_substrings(#[case] token: &str, #[case] expected: &[&str]) {
        check!(matcher().matches(token, 20) == expected);
    }

    #[test]
    fn exact_match_is_first() {
        let index = SymbolIndex::new([
            ("Bar.foo", "bar.html#foo"),
            ("foo", "foo.html"),
            ("foo.Zed", "foo/zed.html"),
        ])
        .unwrap();
        let matcher = ArrayMatcher::new(index.suggestions());
        check!(matcher.matches("foo", 20) == ["foo", "Bar.foo", "foo.Zed"]);
        check!(matcher.matches("foo", 1) == ["foo"]);
        check!(matcher.matches("Foo", 20) == ["Bar.foo", "foo", "foo.Zed"]);
    }

    #[test]
    fn caps_rows_across_tiers() {
        check!(matcher().matches("bar", 2) == ["Foo.bar", "Foo.barBaz"]);
        check!(matcher().matches("o", 1) == ["Foo"]);
        check!(matcher().matches("foo", 0).is_empty());
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        check!(matcher().matches("Foo.", 20) == ["Foo.bar", "Foo.barBaz"]);
        check!(matcher().matches("(", 20).is_empty());
        check!(matcher().matches("*", 20).is_empty());
    }
}
