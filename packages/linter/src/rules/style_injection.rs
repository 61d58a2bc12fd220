use crate::diagnostic::Diagnostic;
use crate::rules::LintRule;
use cloudpage_model::{PageComponent, StyleMap, StyleValue};
use regex::Regex;
use std::sync::OnceLock;

/// Style values are written into `style="..."` attributes verbatim
pub struct StyleInjectionRule;

fn unsafe_chars() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r#"[<>;{}"]"#).ok())
        .as_ref()
}

impl LintRule for StyleInjectionRule {
    fn name(&self) -> &'static str {
        "style-injection"
    }

    fn description(&self) -> &'static str {
        "Style values must not contain characters that end the declaration or the attribute"
    }

    fn check_component(&self, component: &PageComponent) -> Vec<Diagnostic> {
        let common = component.common();
        let mut diagnostics = Vec::new();
        check_styles(self.name(), component, "styles", &common.styles, &mut diagnostics);
        check_styles(
            self.name(),
            component,
            "mobileStyles",
            &common.mobile_styles,
            &mut diagnostics,
        );
        diagnostics
    }
}

fn check_styles(
    rule: &str,
    component: &PageComponent,
    group: &str,
    styles: &StyleMap,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let pattern = match unsafe_chars() {
        Some(pattern) => pattern,
        None => return,
    };
    for (key, value) in styles.iter() {
        let text = match value {
            StyleValue::Text(text) => text,
            _ => continue,
        };
        if let Some(found) = pattern.find(text) {
            diagnostics.push(
                Diagnostic::error(
                    rule,
                    format!(
                        "{}.{} contains '{}', which breaks out of the style declaration",
                        group,
                        key,
                        found.as_str()
                    ),
                )
                .on(component.id.as_str())
                .with_suggestion(format!("Use a plain CSS value for '{}'", key)),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_injected_declarations() {
        let component: PageComponent = serde_json::from_str(
            r#"{"id": "t", "type": "Title", "props": {
                "styles": {"color": "red; position: fixed", "fontSize": "12px"},
                "mobileStyles": {"width": "1px\" onclick=\"x"}
            }}"#,
        )
        .unwrap();

        let diagnostics = StyleInjectionRule.check_component(&component);
        assert_eq!(diagnostics.len(), 2);
        assert!(diagnostics.iter().any(|d| d.message.starts_with("styles.color contains ';'")));
        assert!(diagnostics.iter().any(|d| d.message.starts_with("mobileStyles.width")));
    }

    #[test]
    fn test_allows_ordinary_values() {
        let component: PageComponent = serde_json::from_str(
            r##"{"id": "t", "type": "Title", "props": {
                "styles": {"color": "#333", "padding": 16, "fontFamily": "'Open Sans', sans-serif"}
            }}"##,
        )
        .unwrap();
        assert!(StyleInjectionRule.check_component(&component).is_empty());
    }
}
