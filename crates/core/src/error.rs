//! Error types for articulate operations.
//!
//! This module defines the main error type [`TransformError`] which covers
//! configuration problems found while rules are built, content problems found
//! while rules are applied, and the recursion guard of the transformer.
//!
//! Unmatched input is *not* an error; see [`crate::Warning`].
//!
//! # Example
//!
//! ```rust
//! use articulate_core::{Selector, TransformError};
//!
//! match Selector::parse("[[invalid") {
//!     Err(TransformError::InvalidSelector { selector, .. }) => assert_eq!(selector, "[[invalid"),
//!     _ => unreachable!(),
//! }
//! ```

use thiserror::Error;

use crate::elements::ContextKind;

/// Main error type for rule construction and tree transformation.
#[derive(Error, Debug)]
pub enum TransformError {
    /// A selector string could not be compiled.
    ///
    /// Raised when a rule or property is constructed, never during a walk.
    #[error("Invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },

    /// A property declared a getter kind nobody registered.
    #[error("Unknown getter kind: {0}")]
    UnknownGetter(String),

    /// A rule set named a rule type with no registered factory.
    #[error("Unknown rule type: {0}")]
    UnknownRule(String),

    /// Rule configuration errors.
    ///
    /// Missing selectors, missing mandatory property definitions and
    /// unknown context names end up here.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A rule could not find a property its output requires.
    ///
    /// This aborts the enclosing transform call.
    #[error("{rule} could not find '{property}' in {node}")]
    MissingProperty { rule: &'static str, property: String, node: String },

    /// An output element setter rejected its argument.
    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidValue { field: &'static str, value: String, reason: String },

    /// A rule was applied to a context of the wrong kind.
    #[error("Expected a {expected} context, found {found}")]
    ContextMismatch { expected: ContextKind, found: ContextKind },

    /// Nested transform calls went deeper than the configured limit.
    #[error("Transform depth limit of {limit} exceeded")]
    DepthExceeded { limit: usize },

    /// Rule-set JSON could not be decoded.
    ///
    /// This variant is only available when the `ruleset` feature is enabled.
    #[cfg(feature = "ruleset")]
    #[error("Rule set error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TransformError {
    /// Whether the error comes from rule configuration rather than input content.
    pub fn is_config_error(&self) -> bool {
        match self {
            TransformError::InvalidSelector { .. }
            | TransformError::UnknownGetter(_)
            | TransformError::UnknownRule(_)
            | TransformError::Config(_) => true,
            #[cfg(feature = "ruleset")]
            TransformError::Json(_) => true,
            TransformError::MissingProperty { .. }
            | TransformError::InvalidValue { .. }
            | TransformError::ContextMismatch { .. }
            | TransformError::DepthExceeded { .. } => false,
        }
    }
}

/// Result type alias for TransformError.
pub type Result<T> = std::result::Result<T, TransformError>;
