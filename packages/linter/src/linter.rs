use crate::diagnostic::Diagnostic;
use crate::rules::RuleRegistry;
use cloudpage_model::{CloudPage, ComponentTree};
use tracing::{debug, instrument};

/// Options for configuring the linter
#[derive(Debug, Default)]
pub struct LintOptions {
    /// Custom rule registry (uses default if None)
    pub registry: Option<RuleRegistry>,
}

/// Lint a page snapshot and return diagnostics.
///
/// Page-wide checks come first, followed by per-component checks in the
/// order components appear in the snapshot.
#[instrument(skip(page, options), fields(page_id = %page.id))]
pub fn lint_page(page: &CloudPage, options: LintOptions) -> Vec<Diagnostic> {
    let registry = options.registry.unwrap_or_default();
    let tree = ComponentTree::new(&page.components);
    let mut diagnostics = Vec::new();

    for rule in registry.rules() {
        diagnostics.extend(rule.check_page(page, &tree));
    }

    for component in &page.components {
        for rule in registry.rules() {
            diagnostics.extend(rule.check_component(component));
        }
    }

    debug!(
        rules = registry.rules().len(),
        diagnostics = diagnostics.len(),
        "Linted page"
    );
    diagnostics
}
