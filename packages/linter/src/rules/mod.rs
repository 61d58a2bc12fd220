mod ab_variant_count;
mod column_widths;
mod data_extension_key;
mod orphan_component;
mod single_form;
mod style_injection;

pub use ab_variant_count::AbVariantCountRule;
pub use column_widths::ColumnWidthsRule;
pub use data_extension_key::DataExtensionKeyRule;
pub use orphan_component::OrphanComponentRule;
pub use single_form::SingleFormRule;
pub use style_injection::StyleInjectionRule;

use crate::diagnostic::Diagnostic;
use cloudpage_model::{CloudPage, ComponentTree, PageComponent};

/// Trait for implementing lint rules
pub trait LintRule {
    /// Unique identifier for this rule
    fn name(&self) -> &'static str;

    /// Human-readable description
    fn description(&self) -> &'static str;

    /// Check page-wide properties, once per page
    fn check_page(&self, _page: &CloudPage, _tree: &ComponentTree) -> Vec<Diagnostic> {
        Vec::new()
    }

    /// Check a single component, once per component in list order
    fn check_component(&self, _component: &PageComponent) -> Vec<Diagnostic> {
        Vec::new()
    }
}

/// Registry of all available lint rules
pub struct RuleRegistry {
    rules: Vec<Box<dyn LintRule>>,
}

impl RuleRegistry {
    /// Create a new registry with all built-in rules
    pub fn new() -> Self {
        Self {
            rules: vec![
                Box::new(ColumnWidthsRule),
                Box::new(SingleFormRule),
                Box::new(OrphanComponentRule),
                Box::new(AbVariantCountRule),
                Box::new(DataExtensionKeyRule),
                Box::new(StyleInjectionRule),
            ],
        }
    }

    /// Get all registered rules
    pub fn rules(&self) -> &[Box<dyn LintRule>] {
        &self.rules
    }

    /// Create an empty registry
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Add a custom rule to the registry
    pub fn add_rule(&mut self, rule: Box<dyn LintRule>) {
        self.rules.push(rule);
    }

    /// Drop the named rules; unknown names are ignored
    pub fn without(mut self, names: &[&str]) -> Self {
        self.rules.retain(|rule| !names.contains(&rule.name()));
        self
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &format!("{} rules", self.rules.len()))
            .finish()
    }
}
