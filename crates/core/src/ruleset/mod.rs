//! Declarative rule sets.
//!
//! A rule set lists rules by class identifier, each with a selector, an
//! optional context name and named property definitions. [`RuleFactories`]
//! turns each entry into a [`Rule`](crate::rules::Rule). JSON decoding needs
//! the `ruleset` feature; the types themselves are always available so hosts
//! can deserialize from other formats.
//!
//! # Example
//!
//! ```rust
//! # #[cfg(feature = "ruleset")]
//! # {
//! use articulate_core::{RuleSet, Transformer};
//!
//! let rules = RuleSet::from_json_str(r#"{"rules": [
//!     {"class": "HeaderTitleRule", "selector": "h1"},
//!     {"class": "HeaderKickerRule", "selector": "h3.op-kicker"}
//! ]}"#).unwrap();
//!
//! let mut transformer = Transformer::new();
//! rules.register(&mut transformer).unwrap();
//! assert_eq!(transformer.rules().len(), 2);
//! # }
//! ```

pub mod factories;

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::elements::ContextKind;
use crate::getters::{GetterRegistry, PropertyDescriptor};
use crate::selector::ROOT_SELECTOR;
use crate::transformer::Transformer;
use crate::{Result, TransformError};

pub use factories::{RuleFactories, RuleFactory};

/// One entry of a rule set.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RuleConfig {
    /// Rule class identifier, optionally namespace-qualified.
    #[serde(rename = "class")]
    pub rule_type: String,
    pub selector: Option<String>,
    /// Context kind name, for rules whose context is configurable.
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default)]
    pub properties: BTreeMap<String, PropertyConfig>,
}

impl RuleConfig {
    /// The rule's selector.
    ///
    /// # Errors
    ///
    /// [`TransformError::Config`] when the entry has none.
    pub fn selector(&self) -> Result<&str> {
        self.selector
            .as_deref()
            .ok_or_else(|| TransformError::Config(format!("{} has no selector", self.rule_type)))
    }

    /// The configured context kind, or `default` when none is given.
    pub fn context_or(&self, default: ContextKind) -> Result<ContextKind> {
        match &self.context {
            Some(name) => name.parse(),
            None => Ok(default),
        }
    }
}

/// A named property definition inside a rule entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PropertyConfig {
    /// Getter kind, e.g. `string` or `attribute`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Defaults to the matched node itself.
    #[serde(default)]
    pub selector: Option<String>,
    #[serde(default)]
    pub attribute: Option<String>,
}

impl PropertyConfig {
    pub fn descriptor(&self, getters: &GetterRegistry, name: &str) -> Result<PropertyDescriptor> {
        PropertyDescriptor::new(
            getters,
            name,
            &self.kind,
            self.selector.as_deref().unwrap_or(ROOT_SELECTOR),
            self.attribute.as_deref(),
        )
    }
}

/// An ordered list of rule entries; earlier entries get lower priority.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RuleSet {
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

impl RuleSet {
    /// Parses a rule set from JSON text.
    #[cfg(feature = "ruleset")]
    pub fn from_json_str(json: &str) -> Result<Self> {
        let rule_set: RuleSet = serde_json::from_str(json)?;
        tracing::debug!(rules = rule_set.rules.len(), "Parsed rule set");
        Ok(rule_set)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Registers every entry with the built-in factories and getters.
    pub fn register(&self, transformer: &mut Transformer) -> Result<()> {
        self.register_with(transformer, &RuleFactories::with_builtins(), &GetterRegistry::with_builtins())
    }

    /// Registers every entry in order.
    ///
    /// All entries are built before any is registered, so a bad entry leaves
    /// the transformer untouched.
    pub fn register_with(
        &self, transformer: &mut Transformer, factories: &RuleFactories, getters: &GetterRegistry,
    ) -> Result<()> {
        let rules = self
            .rules
            .iter()
            .map(|config| factories.build(config, getters))
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(rules = rules.len(), "Loaded rule set");
        for rule in rules {
            transformer.add_shared_rule(rule);
        }
        Ok(())
    }
}
