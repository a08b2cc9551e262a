//! Logical keys as seen by page event handlers.

use crate::error::Error;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// A logical key, independent of platform key codes or character codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Tab,
    Up,
    Down,
    Backspace,
}

impl Key {
    /// Whether `self` and `other` name the same physical key.
    ///
    /// Letters compare without case, so a shortcut bound to `f` also fires for `F`.
    pub fn same_key(self, other: Self) -> bool {
        match (self, other) {
            (Self::Char(a), Self::Char(b)) => a.to_lowercase().eq(b.to_lowercase()),
            _ => self == other,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Char(c) => write!(f, "{}", c),
            Self::Enter => write!(f, "Enter"),
            Self::Escape => write!(f, "Escape"),
            Self::Tab => write!(f, "Tab"),
            Self::Up => write!(f, "Up"),
            Self::Down => write!(f, "Down"),
            Self::Backspace => write!(f, "Backspace"),
        }
    }
}

impl FromStr for Key {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Ok(Self::Char(c));
        }

        match s.to_lowercase().as_str() {
            "enter" | "return" => Ok(Self::Enter),
            "escape" | "esc" => Ok(Self::Escape),
            "tab" => Ok(Self::Tab),
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            "backspace" => Ok(Self::Backspace),
            "space" => Ok(Self::Char(' ')),
            _ => Err(Error::InvalidKey(s.to_string())),
        }
    }
}

impl TryFrom<String> for Key {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Modifier state held while a key was pressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub meta: bool,
}

/// A key press delivered with a `KeyDown` event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::default(),
        }
    }

    pub const fn with_modifiers(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }
}

impl From<Key> for KeyEvent {
    fn from(key: Key) -> Self {
        Self::new(key)
    }
}
