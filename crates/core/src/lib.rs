pub mod dom;
pub mod elements;
pub mod error;
pub mod getters;
pub mod rules;
pub mod ruleset;
pub mod selector;
pub mod transformer;

#[doc(hidden)]
pub use dom::HtmlNode;
pub use elements::{ContextKind, Element};
pub use error::{Result, TransformError};
pub use getters::{GetterRegistry, PropertyDescriptor, PropertyValue};
pub use rules::{Rule, SelectorRule};
pub use ruleset::{PropertyConfig, RuleConfig, RuleFactories, RuleSet};
pub use selector::Selector;
pub use transformer::{Conversion, Transformer, TransformerConfig, TransformerConfigBuilder, Warning};
