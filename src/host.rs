//! Host-supplied page data: the symbol cross-reference and the base directory.
//!
//! Generated documentation carries these as two globals: `jvXRef` in `index.js`
//! and `jvBaseDir` inline in every page head. They can also be supplied as JSON.

use crate::error::{Error, Result};
use crate::search::{BaseDirectory, SymbolIndex};
use regex::Regex;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;

/// Name of the cross-reference script written next to the generated pages.
pub const INDEX_SCRIPT: &str = "index.js";

const XREF_GLOBAL: &str = "jvXRef";
const BASE_DIR_GLOBAL: &str = "jvBaseDir";

static XREF_BODY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\bvar\s+jvXRef\s*=\s*\{(.*?)\}\s*;").unwrap());

static QUOTED_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:'((?:[^'\\]|\\.)*)'|"((?:[^"\\]|\\.)*)")\s*:\s*(?:'((?:[^'\\]|\\.)*)'|"((?:[^"\\]|\\.)*)")"#)
        .unwrap()
});

static BASE_DIR_ASSIGN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\bvar\s+jvBaseDir\s*=\s*(?:'((?:[^'\\]|\\.)*)'|"((?:[^"\\]|\\.)*)")"#).unwrap()
});

/// The two globals a page provides before initialization.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostData {
    pub xref: BTreeMap<String, String>,
    pub base_dir: String,
}

impl HostData {
    pub fn new(xref: BTreeMap<String, String>, base_dir: impl Into<String>) -> Self {
        Self {
            xref,
            base_dir: base_dir.into(),
        }
    }

    /// Parse `{ "xref": { ... }, "baseDir": "..." }`.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse the generated `index.js`.
    pub fn from_index_script(script: &str, base_dir: impl Into<String>) -> Result<Self> {
        let body = XREF_BODY
            .captures(script)
            .and_then(|caps| caps.get(1))
            .ok_or(Error::MissingHostData { name: XREF_GLOBAL })?
            .as_str();

        let mut xref = BTreeMap::new();
        let mut consumed = 0;
        for caps in QUOTED_PAIR.captures_iter(body) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            check_separator(&body[consumed..whole.start()])?;
            consumed = whole.end();

            let key = caps.get(1).or_else(|| caps.get(2));
            let value = caps.get(3).or_else(|| caps.get(4));
            if let (Some(key), Some(value)) = (key, value) {
                xref.insert(unescape(key.as_str()), unescape(value.as_str()));
            }
        }
        check_separator(&body[consumed..])?;

        tracing::debug!("Parsed {} cross-reference entries", xref.len());
        Ok(Self::new(xref, base_dir))
    }

    /// Read host data from disk.
    ///
    /// - a directory: its `index.js`, with `base_dir` or `.`
    /// - a `.json` file: the JSON form, `base_dir` overriding its own value
    /// - anything else: an `index.js`-style script, with `base_dir` or `.`
    pub fn load(path: &Path, base_dir: Option<&str>) -> Result<Self> {
        if path.is_dir() {
            let script_path = path.join(INDEX_SCRIPT);
            let script = read(&script_path)?;
            return Self::from_index_script(&script, base_dir.unwrap_or("."));
        }

        let content = read(path)?;
        if path.extension().is_some_and(|ext| ext == "json") {
            let mut data = Self::from_json(&content)?;
            if let Some(dir) = base_dir {
                data.base_dir = dir.to_string();
            }
            Ok(data)
        } else {
            Self::from_index_script(&content, base_dir.unwrap_or("."))
        }
    }

    /// Extract the `jvBaseDir` value from a generated page.
    pub fn base_dir_from_page(html: &str) -> Result<String> {
        BASE_DIR_ASSIGN
            .captures(html)
            .and_then(|caps| caps.get(1).or_else(|| caps.get(2)))
            .map(|m| unescape(m.as_str()))
            .ok_or(Error::MissingHostData {
                name: BASE_DIR_GLOBAL,
            })
    }

    /// Validate the cross-reference and split it into the runtime pieces.
    pub fn into_parts(self) -> Result<(SymbolIndex, BaseDirectory)> {
        let index = SymbolIndex::new(self.xref)?;
        Ok((index, BaseDirectory::new(self.base_dir)))
    }
}

/// Text between entries may only be commas and whitespace.
fn check_separator(gap: &str) -> Result<()> {
    match gap.trim_matches(|c: char| c == ',' || c.is_whitespace()) {
        "" => Ok(()),
        rest => Err(Error::MalformedHostData {
            reason: format!("unexpected `{}` in `{}`", rest, XREF_GLOBAL),
        }),
    }
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

/// Undo backslash escapes inside a quoted script literal.
fn unescape(literal: &str) -> String {
    let mut out = String::with_capacity(literal.len());
    let mut chars = literal.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}
