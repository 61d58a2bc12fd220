use crate::diagnostic::Diagnostic;
use crate::rules::LintRule;
use cloudpage_compiler_script::names::is_placeholder_key;
use cloudpage_model::{CloudPage, ComponentTree, SecurityConfig};

/// Data extensions the page writes to or reads from must be configured
pub struct DataExtensionKeyRule;

impl LintRule for DataExtensionKeyRule {
    fn name(&self) -> &'static str {
        "data-extension-key"
    }

    fn description(&self) -> &'static str {
        "Forms and password gates need a real data extension key"
    }

    fn check_page(&self, page: &CloudPage, _tree: &ComponentTree) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        if let Some((form, _)) = page.form() {
            let key = page.meta.data_extension_key.as_deref().unwrap_or_default();
            if is_placeholder_key(key) {
                diagnostics.push(
                    Diagnostic::error(
                        self.name(),
                        "The page has a form but no data extension key; submissions are never written",
                    )
                    .on(form.id.as_str())
                    .with_suggestion("Set meta.dataExtensionKey to the external key of the target data extension"),
                );
            }
        }

        if let SecurityConfig::Password(password) = &page.meta.security {
            if is_placeholder_key(&password.data_extension_key) {
                diagnostics.push(
                    Diagnostic::error(
                        self.name(),
                        "Password protection has no credentials data extension; every login fails",
                    )
                    .with_suggestion("Set meta.security.dataExtensionKey"),
                );
            }
        }

        diagnostics
    }
}
