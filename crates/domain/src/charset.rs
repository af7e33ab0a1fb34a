//! Character sets for random string generation

use std::fmt;
use std::str::FromStr;

use crate::error::{DomainError, DomainResult};

const ENGLISH_RUNES: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
const ASCII_RUNES: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const POLISH_RUNES: &str =
    "aąbcćdeęfghijklłmnńoóprsśtuwyzźżAĄBCĆDEĘFGHIJKLŁMNŃOÓPRSŚTUWYZŹŻ";
const RUSSIAN_RUNES: &str =
    "абвгдеёжзийклмнопрстуфхцчшщъыьэюяАБВГДЕЁЖЗИЙКЛМНОПРСТУФХЦЧШЩЪЫЬЭЮЯ";
const UNICODE_EXTRA_RUNES: &str =
    "ąćęłńóśźżĄĆĘŁŃÓŚŹŻäöüßÄÖÜéèêàçñαβγδεζηθλμπσφψωΔΣΩабвгдежзиклмнопрстуфхцчшщэюя€£¥©®§¶";

/// A named alphabet used for random string generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Charset {
    /// Latin letters and digits.
    Ascii,
    /// ASCII letters and digits plus a broad set of non-ASCII letters and symbols.
    Unicode,
    /// Polish alphabet.
    Polish,
    /// English alphabet, letters only.
    English,
    /// Russian Cyrillic alphabet.
    Russian,
}

impl Charset {
    /// Canonical names of every supported charset.
    pub const NAMES: &'static [&'static str] = &["ASCII", "UNICODE", "POLISH", "ENGLISH", "RUSSIAN"];

    /// Returns the canonical name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ascii => "ASCII",
            Self::Unicode => "UNICODE",
            Self::Polish => "POLISH",
            Self::English => "ENGLISH",
            Self::Russian => "RUSSIAN",
        }
    }

    /// Returns the runes this charset draws from.
    #[must_use]
    pub fn runes(self) -> Vec<char> {
        match self {
            Self::Ascii => ASCII_RUNES.chars().collect(),
            Self::Unicode => ASCII_RUNES.chars().chain(UNICODE_EXTRA_RUNES.chars()).collect(),
            Self::Polish => POLISH_RUNES.chars().collect(),
            Self::English => ENGLISH_RUNES.chars().collect(),
            Self::Russian => RUSSIAN_RUNES.chars().collect(),
        }
    }

    /// Returns true if `c` belongs to this charset.
    #[must_use]
    pub fn contains(self, c: char) -> bool {
        match self {
            Self::Ascii => ASCII_RUNES.contains(c),
            Self::Unicode => ASCII_RUNES.contains(c) || UNICODE_EXTRA_RUNES.contains(c),
            Self::Polish => POLISH_RUNES.contains(c),
            Self::English => ENGLISH_RUNES.contains(c),
            Self::Russian => RUSSIAN_RUNES.contains(c),
        }
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Charset {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s.to_lowercase().as_str() {
            "ascii" => Ok(Self::Ascii),
            "unicode" => Ok(Self::Unicode),
            "polish" => Ok(Self::Polish),
            "english" => Ok(Self::English),
            "russian" => Ok(Self::Russian),
            _ => Err(DomainError::UnsupportedCharset {
                given: s.to_string(),
                available: DomainError::list(Self::NAMES),
            }),
        }
    }
}
