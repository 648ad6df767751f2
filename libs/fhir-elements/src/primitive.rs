//! Primitive values
//!
//! FHIR primitives are elements in their own right (they may carry an id and
//! extensions); the host value they box is a [`Primitive`]. Each primitive
//! type declares a [`PrimitiveKind`] that fixes the value representation and
//! the lexical rules checked at build time.

use regex::Regex;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use std::sync::OnceLock;

/// A host value boxed by a primitive element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Primitive {
    Boolean(bool),
    Integer(i32),
    Decimal(Decimal),
    String(String),
}

impl Primitive {
    pub fn repr(&self) -> Repr {
        match self {
            Self::Boolean(_) => Repr::Boolean,
            Self::Integer(_) => Repr::Integer,
            Self::Decimal(_) => Repr::Decimal,
            Self::String(_) => Repr::String,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i32> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Self::Decimal(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(b) => write!(f, "{}", b),
            Self::Integer(i) => write!(f, "{}", i),
            Self::Decimal(d) => write!(f, "{}", d),
            Self::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<bool> for Primitive {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i32> for Primitive {
    fn from(value: i32) -> Self {
        Self::Integer(value)
    }
}

impl From<Decimal> for Primitive {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

impl From<&str> for Primitive {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Primitive {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

/// Host representation of a primitive value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Repr {
    Boolean,
    Integer,
    Decimal,
    String,
}

/// Primitive FHIR types and their lexical rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PrimitiveKind {
    Boolean,
    Integer,
    PositiveInt,
    UnsignedInt,
    Decimal,
    String,
    Markdown,
    Code,
    Id,
    Uri,
    Canonical,
    Date,
    DateTime,
    Instant,
    Xhtml,
}

impl PrimitiveKind {
    pub fn repr(&self) -> Repr {
        match self {
            Self::Boolean => Repr::Boolean,
            Self::Integer | Self::PositiveInt | Self::UnsignedInt => Repr::Integer,
            Self::Decimal => Repr::Decimal,
            _ => Repr::String,
        }
    }

    /// Check a value against this kind's representation and lexical rules.
    ///
    /// Returns the reason for rejection.
    pub fn check(&self, value: &Primitive) -> std::result::Result<(), String> {
        if value.repr() != self.repr() {
            return Err(format!(
                "expected a {:?} value, found {:?}",
                self.repr(),
                value.repr()
            ));
        }

        match (self, value) {
            (Self::PositiveInt, Primitive::Integer(i)) if *i < 1 => {
                Err("must be greater than zero".to_string())
            }
            (Self::UnsignedInt, Primitive::Integer(i)) if *i < 0 => {
                Err("must not be negative".to_string())
            }
            (_, Primitive::String(s)) => self.check_lexical(s),
            _ => Ok(()),
        }
    }

    fn check_lexical(&self, s: &str) -> std::result::Result<(), String> {
        let ok = match self {
            Self::String | Self::Markdown => !s.trim().is_empty(),
            Self::Code => code_regex().is_match(s),
            Self::Id => id_regex().is_match(s),
            Self::Uri | Self::Canonical => !s.is_empty() && !s.chars().any(char::is_whitespace),
            Self::Date => date_regex().is_match(s),
            Self::DateTime => date_time_regex().is_match(s),
            Self::Instant => instant_regex().is_match(s),
            Self::Xhtml => s.trim_start().starts_with("<div"),
            _ => true,
        };

        if ok {
            Ok(())
        } else {
            Err(match self {
                Self::String | Self::Markdown => "must contain non-whitespace content",
                Self::Code => "must not have leading, trailing or repeated whitespace",
                Self::Id => "must be 1-64 characters of [A-Za-z0-9-.]",
                Self::Uri | Self::Canonical => "must be non-empty and contain no whitespace",
                Self::Xhtml => "must be a <div> fragment",
                _ => "does not match the required format",
            }
            .to_string())
        }
    }
}

fn code_regex() -> &'static Regex {
    static CODE_RE: OnceLock<Regex> = OnceLock::new();
    CODE_RE.get_or_init(|| Regex::new(r"^[^\s]+( [^\s]+)*$").expect("code regex must compile"))
}

fn id_regex() -> &'static Regex {
    static ID_RE: OnceLock<Regex> = OnceLock::new();
    ID_RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9\-.]{1,64}$").expect("id regex must compile"))
}

fn date_regex() -> &'static Regex {
    static DATE_RE: OnceLock<Regex> = OnceLock::new();
    DATE_RE.get_or_init(|| {
        Regex::new(
            r"^([0-9]([0-9]([0-9][1-9]|[1-9]0)|[1-9]00)|[1-9]000)(-(0[1-9]|1[0-2])(-(0[1-9]|[1-2][0-9]|3[0-1]))?)?$",
        )
        .expect("date regex must compile")
    })
}

fn date_time_regex() -> &'static Regex {
    static DATE_TIME_RE: OnceLock<Regex> = OnceLock::new();
    DATE_TIME_RE.get_or_init(|| {
        Regex::new(
            r"^([0-9]([0-9]([0-9][1-9]|[1-9]0)|[1-9]00)|[1-9]000)(-(0[1-9]|1[0-2])(-(0[1-9]|[1-2][0-9]|3[0-1])(T([01][0-9]|2[0-3]):[0-5][0-9]:([0-5][0-9]|60)(\.[0-9]{1,9})?)?)?(Z|(\+|-)((0[0-9]|1[0-3]):[0-5][0-9]|14:00)?)?)?$",
        )
        .expect("dateTime regex must compile")
    })
}

fn instant_regex() -> &'static Regex {
    static INSTANT_RE: OnceLock<Regex> = OnceLock::new();
    INSTANT_RE.get_or_init(|| {
        Regex::new(
            r"^([0-9]([0-9]([0-9][1-9]|[1-9]0)|[1-9]00)|[1-9]000)-(0[1-9]|1[0-2])-(0[1-9]|[1-2][0-9]|3[0-1])T([01][0-9]|2[0-3]):[0-5][0-9]:([0-5][0-9]|60)(\.[0-9]{1,9})?(Z|(\+|-)((0[0-9]|1[0-3]):[0-5][0-9]|14:00))$",
        )
        .expect("instant regex must compile")
    })
}
