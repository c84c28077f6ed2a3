use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::getters::GetterRegistry;
use crate::rules::{
    CaptionRule, HeaderKickerRule, HeaderRule, HeaderTitleRule, IgnoreRule, InstantArticleRule, InteractiveRule,
    PassThroughRule, Rule, VideoRule,
};
use crate::ruleset::RuleConfig;
use crate::{Result, TransformError};

/// Builds a rule from its configuration.
pub type RuleFactory = fn(&RuleConfig, &GetterRegistry) -> Result<Arc<dyn Rule>>;

/// Rule class identifier to factory.
#[derive(Clone)]
pub struct RuleFactories {
    factories: HashMap<String, RuleFactory>,
}

impl fmt::Debug for RuleFactories {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.factories.keys().collect();
        names.sort();
        f.debug_struct("RuleFactories").field("names", &names).finish()
    }
}

impl RuleFactories {
    /// An empty registry.
    pub fn new() -> Self {
        Self { factories: HashMap::new() }
    }

    /// Registry with every built-in rule under its `NAME`.
    pub fn with_builtins() -> Self {
        let mut factories = Self::new();
        factories.register(InstantArticleRule::NAME, |c, g| Ok(Arc::new(InstantArticleRule::from_config(c, g)?)));
        factories.register(HeaderRule::NAME, |c, g| Ok(Arc::new(HeaderRule::from_config(c, g)?)));
        factories.register(HeaderTitleRule::NAME, |c, g| Ok(Arc::new(HeaderTitleRule::from_config(c, g)?)));
        factories.register(HeaderKickerRule::NAME, |c, g| Ok(Arc::new(HeaderKickerRule::from_config(c, g)?)));
        factories.register(InteractiveRule::NAME, |c, g| Ok(Arc::new(InteractiveRule::from_config(c, g)?)));
        factories.register(VideoRule::NAME, |c, g| Ok(Arc::new(VideoRule::from_config(c, g)?)));
        factories.register(CaptionRule::NAME, |c, g| Ok(Arc::new(CaptionRule::from_config(c, g)?)));
        factories.register(PassThroughRule::NAME, |c, g| Ok(Arc::new(PassThroughRule::from_config(c, g)?)));
        factories.register(IgnoreRule::NAME, |c, g| Ok(Arc::new(IgnoreRule::from_config(c, g)?)));
        factories
    }

    /// Registers a factory, replacing any earlier one with the same name.
    pub fn register(&mut self, name: &str, factory: RuleFactory) {
        self.factories.insert(name.to_string(), factory);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(Self::short_name(name))
    }

    /// Builds the rule a configuration entry describes.
    ///
    /// # Errors
    ///
    /// [`TransformError::UnknownRule`] when no factory is registered for the
    /// class, otherwise whatever the factory reports.
    pub fn build(&self, config: &RuleConfig, getters: &GetterRegistry) -> Result<Arc<dyn Rule>> {
        let factory = self
            .factories
            .get(Self::short_name(&config.rule_type))
            .ok_or_else(|| TransformError::UnknownRule(config.rule_type.clone()))?;
        factory(config, getters)
    }

    /// `Vendor\Rules\HeaderTitleRule` resolves as `HeaderTitleRule`.
    fn short_name(name: &str) -> &str {
        name.rsplit('\\').next().unwrap_or(name)
    }
}

impl Default for RuleFactories {
    fn default() -> Self {
        Self::with_builtins()
    }
}
