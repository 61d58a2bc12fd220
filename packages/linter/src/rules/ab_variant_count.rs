use crate::diagnostic::Diagnostic;
use crate::rules::LintRule;
use cloudpage_model::PageComponent;

/// A/B tests need exactly one usable variant patch
pub struct AbVariantCountRule;

impl LintRule for AbVariantCountRule {
    fn name(&self) -> &'static str {
        "ab-variant-count"
    }

    fn description(&self) -> &'static str {
        "A/B tested components must define exactly one variant"
    }

    fn check_component(&self, component: &PageComponent) -> Vec<Diagnostic> {
        if !component.ab_test_enabled {
            return Vec::new();
        }

        let mut diagnostics = Vec::new();
        if !component.has_ab_test() {
            diagnostics.push(
                Diagnostic::warning(
                    self.name(),
                    "A/B test is enabled but has no variant B; every visitor sees A",
                )
                .on(component.id.as_str())
                .with_suggestion("Add a variant with the props that should change"),
            );
            return diagnostics;
        }

        if component.ab_test_variants.len() > 1 {
            diagnostics.push(
                Diagnostic::info(
                    self.name(),
                    format!(
                        "{} variants defined; only the first is used as B",
                        component.ab_test_variants.len()
                    ),
                )
                .on(component.id.as_str()),
            );
        }

        if let Err(e) = component.variant_b() {
            diagnostics.push(
                Diagnostic::error(self.name(), format!("Variant B cannot be applied: {}", e))
                    .on(component.id.as_str())
                    .with_suggestion("Fix the variant props so they match the component type"),
            );
        }

        diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn component(json: &str) -> PageComponent {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_enabled_without_variant() {
        let diagnostics = AbVariantCountRule.check_component(&component(
            r#"{"id": "hero", "type": "Title", "props": {}, "abTestEnabled": true}"#,
        ));
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("no variant B"));
    }

    #[test]
    fn test_extra_variants_are_reported() {
        let diagnostics = AbVariantCountRule.check_component(&component(
            r#"{"id": "hero", "type": "Title", "props": {}, "abTestEnabled": true,
                "abTestVariants": [{"text": "B"}, {"text": "C"}]}"#,
        ));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].level, crate::DiagnosticLevel::Info);
    }

    #[test]
    fn test_unusable_patch_is_an_error() {
        let diagnostics = AbVariantCountRule.check_component(&component(
            r#"{"id": "cols", "type": "Columns", "props": {}, "abTestEnabled": true,
                "abTestVariants": [{"columnWidths": "wide"}]}"#,
        ));
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].is_error());
    }

    #[test]
    fn test_disabled_test_is_ignored() {
        let diagnostics = AbVariantCountRule.check_component(&component(
            r#"{"id": "hero", "type": "Title", "props": {}, "abTestVariants": [{"text": "B"}]}"#,
        ));
        assert!(diagnostics.is_empty());
    }
}
