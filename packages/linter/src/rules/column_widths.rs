use crate::diagnostic::Diagnostic;
use crate::rules::LintRule;
use cloudpage_model::props::ColumnsProps;
use cloudpage_model::{format_number, ComponentProps, PageComponent};

/// Column widths the renderer will ignore in favour of equal columns
pub struct ColumnWidthsRule;

impl LintRule for ColumnWidthsRule {
    fn name(&self) -> &'static str {
        "column-widths"
    }

    fn description(&self) -> &'static str {
        "Column widths must give one positive width per column and add up to 100"
    }

    fn check_component(&self, component: &PageComponent) -> Vec<Diagnostic> {
        let props = match &component.props {
            ComponentProps::Columns(props) => props,
            _ => return Vec::new(),
        };
        if props.column_widths.is_empty() || props.valid_widths().is_some() {
            return Vec::new();
        }

        vec![Diagnostic::warning(self.name(), problem(props))
            .on(component.id.as_str())
            .with_suggestion(format!(
                "Give {} widths that add up to 100, or remove them for equal columns",
                props.columns()
            ))]
    }
}

fn problem(props: &ColumnsProps) -> String {
    let count = props.columns() as usize;
    let widths = &props.column_widths;
    if widths.len() != count {
        return format!(
            "{} column widths for {} columns; the columns will be equal",
            widths.len(),
            count
        );
    }
    if widths.iter().any(|w| !w.is_finite() || *w <= 0.0) {
        return "Column widths must be positive; the columns will be equal".to_string();
    }
    let sum: f64 = widths.iter().sum();
    format!(
        "Column widths add up to {} instead of 100; the columns will be equal",
        format_number(sum)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns(json: &str) -> PageComponent {
        serde_json::from_str(&format!(
            r#"{{"id": "cols", "type": "Columns", "props": {}}}"#,
            json
        ))
        .unwrap()
    }

    #[test]
    fn test_detects_bad_sum() {
        let diagnostics =
            ColumnWidthsRule.check_component(&columns(r#"{"columnCount": 3, "columnWidths": [40, 40, 40]}"#));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].rule, "column-widths");
        assert_eq!(diagnostics[0].component_id.as_deref(), Some("cols"));
        assert!(diagnostics[0].message.contains("add up to 120"));
    }

    #[test]
    fn test_detects_count_mismatch() {
        let diagnostics =
            ColumnWidthsRule.check_component(&columns(r#"{"columnCount": 3, "columnWidths": [50, 50]}"#));
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.starts_with("2 column widths for 3 columns"));
    }

    #[test]
    fn test_allows_valid_and_absent_widths() {
        assert!(ColumnWidthsRule
            .check_component(&columns(r#"{"columnCount": 2, "columnWidths": [70, 30]}"#))
            .is_empty());
        assert!(ColumnWidthsRule
            .check_component(&columns(r#"{"columnCount": 4}"#))
            .is_empty());
    }
}
