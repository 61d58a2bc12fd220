//! The declaration block emitted at the top of the body and the URL prefill
//! block.
//!
//! Every variable a renderer may reference is declared here, even when the
//! page never assigns it, so the template runtime never sees an undefined
//! variable.

use crate::ampscript::{attribute_value, request_parameter, AmpBlock, AmpStatement};
use crate::names::{ab_input, ab_variable, binding_variable, FORM_SUBMITTED, IS_AUTHENTICATED, LOGIN_ERROR};
use cloudpage_model::{CloudPage, FormSchema};
use tracing::debug;

/// Variable declarations and defaults.
///
/// With `assign_variants` each A/B-tested component gets its variant from the
/// posted `ab_<ID>` field or, on first view, a random draw.
pub fn variable_block(page: &CloudPage, schema: &FormSchema, assign_variants: bool) -> String {
    let mut variables = vec![
        FORM_SUBMITTED.to_string(),
        IS_AUTHENTICATED.to_string(),
        LOGIN_ERROR.to_string(),
    ];
    variables.extend(schema.fields().iter().map(|f| f.variable()));

    let bindings = page.data_bindings();
    for binding in &bindings {
        let variable = binding_variable(binding);
        if !variables.contains(&variable) {
            variables.push(variable);
        }
    }

    let ab_components: Vec<&str> = page.ab_test_components().map(|c| c.id.as_str()).collect();
    variables.extend(ab_components.iter().map(|id| ab_variable(id)));

    let mut block = AmpBlock::new();
    block.var(variables);
    block
        .push(AmpStatement::set_str(FORM_SUBMITTED, "false"))
        .push(AmpStatement::set_str(IS_AUTHENTICATED, "false"))
        .push(AmpStatement::set_str(LOGIN_ERROR, "false"));
    for field in schema.fields() {
        block.push(AmpStatement::set_str(field.variable(), ""));
    }
    for binding in &bindings {
        block.set(binding_variable(binding), attribute_value(binding.trim()));
    }

    for id in &ab_components {
        let variable = ab_variable(id);
        if assign_variants {
            block.set(variable.clone(), request_parameter(&ab_input(id)));
            block.push(AmpStatement::If {
                condition: format!("EMPTY({})", variable),
                then: vec![AmpStatement::If {
                    condition: "Random(1, 2) == 1".to_string(),
                    then: vec![AmpStatement::set_str(variable.clone(), "A")],
                    otherwise: vec![AmpStatement::set_str(variable.clone(), "B")],
                }],
                otherwise: vec![],
            });
        } else {
            block.push(AmpStatement::set_str(variable, "A"));
        }
    }

    debug!(
        fields = schema.fields().len(),
        bindings = bindings.len(),
        ab_tests = ab_components.len(),
        "Emitted variable block"
    );
    block.render()
}

/// Copies query-string parameters into the variables of fields that opted
/// into URL prefill. `None` when no field did.
pub fn prefill_block(schema: &FormSchema) -> Option<String> {
    let mut block = AmpBlock::new();
    for field in schema.prefill_fields() {
        block.set(field.variable(), request_parameter(&field.query_param));
    }
    if block.is_empty() {
        None
    } else {
        Some(block.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(json: &str) -> CloudPage {
        CloudPage::from_json(json).expect("page")
    }

    fn schema(page: &CloudPage) -> FormSchema {
        page.form()
            .map(|(_, props)| FormSchema::from_props(props))
            .unwrap_or_default()
    }

    #[test]
    fn test_declares_flags_fields_and_bindings() {
        let page = page(
            r#"{"components": [
                {"id": "t", "type": "Title", "props": {"dataBinding": "FirstName"}},
                {"id": "f", "type": "Form", "props": {"fields": {"email": {"enabled": true}}}}
            ]}"#,
        );
        let text = variable_block(&page, &schema(&page), true);
        println!("{}", text);
        assert!(text.contains("VAR @formSubmitted, @isAuthenticated, @loginError, @email, @FirstName"));
        assert!(text.contains(r#"SET @formSubmitted = "false""#));
        assert!(text.contains(r#"SET @email = """#));
        assert!(text.contains(r#"SET @FirstName = AttributeValue("FirstName")"#));
    }

    #[test]
    fn test_variant_assignment_only_when_requested() {
        let page = page(
            r#"{"components": [
                {"id": "hero", "type": "Title", "props": {"text": "A"},
                 "abTestEnabled": true, "abTestVariants": [{"text": "B"}]}
            ]}"#,
        );
        let text = variable_block(&page, &FormSchema::default(), true);
        assert!(text.contains(r#"SET @abVariant_HERO = RequestParameter("ab_HERO")"#));
        assert!(text.contains("IF EMPTY(@abVariant_HERO) THEN"));
        assert!(text.contains("Random(1, 2) == 1"));

        let text = variable_block(&page, &FormSchema::default(), false);
        assert!(text.contains("@abVariant_HERO"));
        assert!(!text.contains("Random("));
    }

    #[test]
    fn test_prefill_block() {
        let page = page(
            r#"{"components": [
                {"id": "f", "type": "Form", "props": {"fields": {
                    "email": {"enabled": true, "prefillFromUrl": true},
                    "name": {"enabled": true}
                }}}
            ]}"#,
        );
        let text = prefill_block(&schema(&page)).expect("prefill");
        assert!(text.contains(r#"SET @email = RequestParameter("email")"#));
        assert!(!text.contains("@name"));

        assert!(prefill_block(&FormSchema::default()).is_none());
    }
}
