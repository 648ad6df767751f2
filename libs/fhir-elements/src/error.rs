//! Error types for element construction
//!
//! Every failure is raised synchronously from `Builder::build` (or from a
//! replace-whole-list setter) and is never retried or logged internally.

use serde_json::{json, Value};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // ------------------------------------------------------------------
    // Builder misuse (reported regardless of validation mode)
    // ------------------------------------------------------------------
    #[error("Unknown element '{element}' for type {type_name}")]
    UnknownElement {
        type_name: &'static str,
        element: String,
    },

    #[error("Element '{element}' is repeating; use add() or replace()")]
    Repeating { element: String },

    #[error("Element '{element}' is not repeating; use set()")]
    NotRepeating { element: String },

    #[error("Element '{element}' does not accept a primitive value")]
    NotPrimitive { element: String },

    #[error("Unknown type: {0}")]
    UnknownType(String),

    #[error("Collection passed for element '{element}' must not be null")]
    NullArgument { element: String },

    // ------------------------------------------------------------------
    // Shape validation
    // ------------------------------------------------------------------
    #[error("Missing required element: '{element}'")]
    MissingElement { element: String },

    #[error("Invalid type for element '{element}': expected {expected}, found {actual}")]
    InvalidType {
        element: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Invalid type for choice element '{element}': {actual} is not one of {allowed:?}")]
    InvalidChoice {
        element: String,
        actual: &'static str,
        allowed: Vec<&'static str>,
    },

    #[error("Repeating element '{element}' contains a null entry at index {index}")]
    NullEntry { element: String, index: usize },

    #[error("Invalid reference type '{actual}' for element '{element}': must be one of {allowed:?}")]
    InvalidReferenceType {
        element: String,
        actual: String,
        allowed: Vec<&'static str>,
    },

    #[error("Element of type {type_name} must have a value, an id or children")]
    EmptyElement { type_name: &'static str },

    #[error("Invalid {type_name} value '{value}': {reason}")]
    InvalidPrimitive {
        type_name: &'static str,
        value: String,
        reason: String,
    },

    #[error("Code '{code}' for element '{element}' is not one of {allowed:?}")]
    InvalidCode {
        element: String,
        code: String,
        allowed: Vec<&'static str>,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether this error came from a validation rule rather than builder misuse.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingElement { .. }
                | Self::InvalidType { .. }
                | Self::InvalidChoice { .. }
                | Self::NullEntry { .. }
                | Self::InvalidReferenceType { .. }
                | Self::EmptyElement { .. }
                | Self::InvalidPrimitive { .. }
                | Self::InvalidCode { .. }
        )
    }

    /// The element path named by this error, if any.
    pub fn element(&self) -> Option<&str> {
        match self {
            Self::UnknownElement { element, .. }
            | Self::Repeating { element }
            | Self::NotRepeating { element }
            | Self::NotPrimitive { element }
            | Self::NullArgument { element }
            | Self::MissingElement { element }
            | Self::InvalidType { element, .. }
            | Self::InvalidChoice { element, .. }
            | Self::NullEntry { element, .. }
            | Self::InvalidReferenceType { element, .. }
            | Self::InvalidCode { element, .. } => Some(element),
            Self::UnknownType(_) | Self::EmptyElement { .. } | Self::InvalidPrimitive { .. } => {
                None
            }
        }
    }

    pub fn code(&self) -> IssueCode {
        match self {
            Self::MissingElement { .. } => IssueCode::Required,
            Self::InvalidCode { .. } => IssueCode::CodeInvalid,
            Self::InvalidPrimitive { .. } => IssueCode::Value,
            Self::UnknownType(_) => IssueCode::NotSupported,
            Self::NullArgument { .. } => IssueCode::Invalid,
            _ => IssueCode::Structure,
        }
    }

    /// Render this error as a single-issue OperationOutcome.
    pub fn to_operation_outcome(&self) -> Value {
        let mut issue = json!({
            "severity": "error",
            "code": self.code().to_string(),
            "diagnostics": self.to_string(),
        });

        if let Some(element) = self.element() {
            issue["expression"] = json!([element]);
        }

        json!({
            "resourceType": "OperationOutcome",
            "issue": [issue]
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueCode {
    Invalid,
    Structure,
    Required,
    Value,
    CodeInvalid,
    NotSupported,
}

impl std::fmt::Display for IssueCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Invalid => "invalid",
            Self::Structure => "structure",
            Self::Required => "required",
            Self::Value => "value",
            Self::CodeInvalid => "code-invalid",
            Self::NotSupported => "not-supported",
        };
        write!(f, "{}", s)
    }
}
