//! Build configuration
//!
//! Validation is controlled per builder through [`BuildOptions`] instead of a
//! process-wide switch, so concurrent build sequences never observe each
//! other's settings.

use serde::{Deserialize, Serialize};

/// How `build()` treats the shape rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValidationMode {
    /// Run every rule and fail the build on the first violation.
    #[default]
    Enforce,
    /// Run every rule but return the node, marked invalid, with the violation attached.
    Record,
    /// Do not run the rules; the node is marked unvalidated.
    Skip,
}

/// Options threaded into `Builder::build`.
///
/// ```rust
/// use ferrum_elements::{BuildOptions, ValidationMode};
///
/// let options = BuildOptions::default()
///     .with_validation(ValidationMode::Record)
///     .with_reference_type_checks(false);
///
/// assert_eq!(options.validation, ValidationMode::Record);
/// assert!(!options.check_reference_types);
/// assert!(options.check_bindings);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BuildOptions {
    pub validation: ValidationMode,
    /// Check reference targets against each field's allow-list.
    pub check_reference_types: bool,
    /// Check `code` values against required bindings.
    pub check_bindings: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            validation: ValidationMode::Enforce,
            check_reference_types: true,
            check_bindings: true,
        }
    }
}

impl BuildOptions {
    /// Options that skip validation entirely.
    pub fn unchecked() -> Self {
        Self::default().with_validation(ValidationMode::Skip)
    }

    pub fn with_validation(mut self, validation: ValidationMode) -> Self {
        self.validation = validation;
        self
    }

    pub fn with_reference_type_checks(mut self, enabled: bool) -> Self {
        self.check_reference_types = enabled;
        self
    }

    pub fn with_binding_checks(mut self, enabled: bool) -> Self {
        self.check_bindings = enabled;
        self
    }

    /// Parse options from a JSON document; absent keys keep their defaults.
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn is_validating(&self) -> bool {
        self.validation != ValidationMode::Skip
    }
}
