use crate::diagnostic::Diagnostic;
use crate::rules::LintRule;
use cloudpage_model::{CloudPage, ComponentTree, ComponentType};

/// Only the first Form is wired to the submission script
pub struct SingleFormRule;

impl LintRule for SingleFormRule {
    fn name(&self) -> &'static str {
        "single-form"
    }

    fn description(&self) -> &'static str {
        "A page may contain at most one Form"
    }

    fn check_page(&self, page: &CloudPage, _tree: &ComponentTree) -> Vec<Diagnostic> {
        let mut forms = page.components_of_type(ComponentType::Form);
        let first = match forms.next() {
            Some(first) => first,
            None => return Vec::new(),
        };

        forms
            .map(|extra| {
                Diagnostic::warning(
                    self.name(),
                    format!(
                        "Submissions from this form are never saved; only '{}' is captured",
                        first.id
                    ),
                )
                .on(extra.id.as_str())
                .with_suggestion("Merge the fields into the first form or remove this one")
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_every_extra_form() {
        let page = CloudPage::from_json(
            r#"{"components": [
                {"id": "f1", "type": "Form", "props": {}},
                {"id": "t", "type": "Title", "props": {}},
                {"id": "f2", "type": "Form", "props": {}},
                {"id": "f3", "type": "Form", "props": {}}
            ]}"#,
        )
        .unwrap();
        let tree = ComponentTree::new(&page.components);

        let diagnostics = SingleFormRule.check_page(&page, &tree);
        let ids: Vec<_> = diagnostics.iter().filter_map(|d| d.component_id.as_deref()).collect();
        assert_eq!(ids, vec!["f2", "f3"]);
        assert!(diagnostics[0].message.contains("'f1'"));
    }

    #[test]
    fn test_single_form_is_fine() {
        let page = CloudPage::from_json(r#"{"components": [{"id": "f1", "type": "Form", "props": {}}]}"#)
            .unwrap();
        let tree = ComponentTree::new(&page.components);
        assert!(SingleFormRule.check_page(&page, &tree).is_empty());
    }
}
