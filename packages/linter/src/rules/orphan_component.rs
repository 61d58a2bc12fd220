use crate::diagnostic::Diagnostic;
use crate::rules::LintRule;
use cloudpage_model::{CloudPage, ComponentProps, ComponentTree, PageComponent};
use std::collections::HashSet;

/// Components the tree walk never reaches
pub struct OrphanComponentRule;

impl LintRule for OrphanComponentRule {
    fn name(&self) -> &'static str {
        "orphan-component"
    }

    fn description(&self) -> &'static str {
        "Every component must be reachable from the page root"
    }

    fn check_page(&self, _page: &CloudPage, tree: &ComponentTree) -> Vec<Diagnostic> {
        tree.unreachable()
            .into_iter()
            .map(|component| {
                let message = format!("{}; the component is never rendered", reason(tree, component));
                Diagnostic::warning(self.name(), message)
                    .on(component.id.as_str())
                    .with_suggestion("Move the component to an existing container or the page root")
            })
            .collect()
    }
}

fn reason(tree: &ComponentTree, component: &PageComponent) -> String {
    let parent_id = component.parent_id.as_deref().unwrap_or_default();
    let parent = match tree.get(parent_id) {
        Some(parent) => parent,
        None => return format!("Parent '{}' does not exist", parent_id),
    };
    match &parent.props {
        ComponentProps::Columns(props) => {
            let column = component.column.unwrap_or(0);
            if column >= props.columns() {
                return format!(
                    "Column {} is past the {} columns of '{}'",
                    column,
                    props.columns(),
                    parent_id
                );
            }
        }
        ComponentProps::Div(_) => {}
        _ => {
            return format!(
                "Parent '{}' is a {} and cannot hold children",
                parent_id,
                parent.component_type()
            )
        }
    }
    if in_cycle(tree, component) {
        format!("Parent '{}' is part of a parent cycle", parent_id)
    } else {
        format!("Parent '{}' is never rendered", parent_id)
    }
}

fn in_cycle(tree: &ComponentTree, component: &PageComponent) -> bool {
    let mut seen = HashSet::new();
    let mut current = component;
    while let Some(parent) = current.parent_id.as_deref().and_then(|id| tree.get(id)) {
        if parent.id == component.id {
            return true;
        }
        if !seen.insert(parent.id.as_str()) {
            return false;
        }
        current = parent;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_parent_and_cycle() {
        let page = CloudPage::from_json(
            r#"{"components": [
                {"id": "root", "type": "Title", "props": {}},
                {"id": "lost", "type": "Paragraph", "parentId": "gone", "props": {}},
                {"id": "a", "type": "Div", "parentId": "b", "props": {}},
                {"id": "b", "type": "Div", "parentId": "a", "props": {}}
            ]}"#,
        )
        .unwrap();
        let tree = ComponentTree::new(&page.components);

        let diagnostics = OrphanComponentRule.check_page(&page, &tree);
        assert_eq!(diagnostics.len(), 3);

        let lost = diagnostics
            .iter()
            .find(|d| d.component_id.as_deref() == Some("lost"))
            .unwrap();
        assert!(lost.message.contains("does not exist"));

        let cyclic = diagnostics
            .iter()
            .find(|d| d.component_id.as_deref() == Some("a"))
            .unwrap();
        assert!(cyclic.message.contains("cycle"));
    }

    #[test]
    fn test_hidden_column_and_leaf_parent() {
        let page = CloudPage::from_json(
            r#"{"components": [
                {"id": "cols", "type": "Columns", "props": {"columnCount": 2}},
                {"id": "shown", "type": "Paragraph", "parentId": "cols", "column": 1, "props": {}},
                {"id": "hidden", "type": "Paragraph", "parentId": "cols", "column": 3, "props": {}},
                {"id": "nested", "type": "Paragraph", "parentId": "hidden", "props": {}},
                {"id": "title", "type": "Title", "props": {}},
                {"id": "under-title", "type": "Paragraph", "parentId": "title", "props": {}}
            ]}"#,
        )
        .unwrap();
        let tree = ComponentTree::new(&page.components);

        let diagnostics = OrphanComponentRule.check_page(&page, &tree);
        let message = |id: &str| {
            diagnostics
                .iter()
                .find(|d| d.component_id.as_deref() == Some(id))
                .map(|d| d.message.clone())
                .unwrap_or_default()
        };
        assert_eq!(diagnostics.len(), 3);
        assert!(message("hidden").contains("Column 3 is past the 2 columns of 'cols'"));
        assert!(message("nested").contains("Parent 'hidden' is a Paragraph"));
        assert!(message("under-title").contains("Parent 'title' is a Title"));
    }
}
