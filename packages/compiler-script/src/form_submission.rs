//! Server script that captures a posted page form and writes it to the data
//! extension.

use crate::names::{
    ab_column, ab_input, is_placeholder_key, is_safe_redirect, FORM_SUBMITTED, NPS_COLUMN,
    NPS_INPUT, SUBMIT_MARKER,
};
use crate::ssjs::{js_string, js_string_array, ServerScript};
use cloudpage_model::props::CustomFieldType;
use cloudpage_model::{
    CapturedField, CloudPage, ComponentType, DataExtensionTarget, FieldKind, FormSchema,
};
use tracing::{debug, warn};

/// One posted value and the column it is written to
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionField {
    pub input_name: String,
    pub column: String,
    /// Checkbox inputs post nothing when unchecked
    pub checkbox: bool,
}

impl SubmissionField {
    pub fn script_var(&self) -> String {
        format!("f_{}", self.input_name)
    }
}

/// Everything a submission captures: the form's fields, the NPS score when the
/// page has an NPS widget, and the variant of every A/B-tested component
pub fn submission_fields(page: &CloudPage, schema: &FormSchema) -> Vec<SubmissionField> {
    let mut fields: Vec<SubmissionField> = schema
        .fields()
        .iter()
        .map(|f| SubmissionField {
            input_name: f.input_name.clone(),
            column: f.column.clone(),
            checkbox: matches!(
                f.kind,
                FieldKind::Consent | FieldKind::Custom(CustomFieldType::Checkbox)
            ),
        })
        .collect();

    if page.has_component(ComponentType::Nps) {
        fields.push(SubmissionField {
            input_name: NPS_INPUT.to_string(),
            column: NPS_COLUMN.to_string(),
            checkbox: false,
        });
    }

    for component in page.ab_test_components() {
        fields.push(SubmissionField {
            input_name: ab_input(&component.id),
            column: ab_column(&component.id),
            checkbox: false,
        });
    }
    fields
}

/// `None` when the page has no form
pub fn emit_form_submission_script(page: &CloudPage) -> Option<String> {
    let (form, props) = page.form()?;
    let schema = FormSchema::from_props(props);
    let fields = submission_fields(page, &schema);

    let mut script = ServerScript::new();
    script.open("try");
    script.open(&format!(
        "if (Request.Method == \"POST\" && Request.GetFormField({}) == \"1\")",
        js_string(SUBMIT_MARKER)
    ));

    for field in &fields {
        let read = format!("Request.GetFormField({})", js_string(&field.input_name));
        if field.checkbox {
            script.line(&format!(
                "var {} = {} ? \"true\" : \"false\";",
                field.script_var(),
                read
            ));
        } else {
            script.line(&format!("var {} = {} || \"\";", field.script_var(), read));
        }
    }
    // Keep the posted values so a rejected submission re-renders them
    for field in schema.fields() {
        script.set_variable(&field.variable(), &field.script_var());
    }

    let key = page.meta.data_extension_key.as_deref().unwrap_or("").trim();
    let discriminator = schema.discriminator();

    match (discriminator, is_placeholder_key(key)) {
        (Some(discriminator), false) => {
            let mut guards = vec![guard(discriminator)];
            for required in schema.required_fields() {
                let check = guard(required);
                if !guards.contains(&check) {
                    guards.push(check);
                }
            }
            let condition = guards.join(" && ");

            script.open(&format!("if ({})", condition));
            write_record(&mut script, page.meta.data_extension_target_method, key, &fields);
            script.set_variable(FORM_SUBMITTED, "\"true\"");
            if let Some(url) = props.redirect_url.as_deref() {
                if is_safe_redirect(url) {
                    script.line(&format!("Redirect({}, false);", js_string(url.trim())));
                } else {
                    debug!(form = %form.id, url = %url, "Skipping unsafe redirect target");
                }
            }
            script.close();
        }
        (None, _) => {
            warn!(form = %form.id, "Form has no capturable field; submissions are never written");
        }
        (Some(_), true) => {
            warn!(form = %form.id, key = %key, "Data extension key missing or placeholder; submissions are never written");
        }
    }

    script.close();
    script.else_branch("catch (e)");
    script.set_variable(FORM_SUBMITTED, "\"false\"");
    script.close();

    debug!(form = %form.id, fields = fields.len(), "Emitted form submission script");
    Some(script.render())
}

/// Checked-box inputs read as `"true"`, everything else must be non-empty
fn guard(field: &CapturedField) -> String {
    match field.kind {
        FieldKind::Consent | FieldKind::Custom(CustomFieldType::Checkbox) => {
            format!("{} == \"true\"", field.script_var())
        }
        _ => format!("{} != \"\"", field.script_var()),
    }
}

fn write_record(
    script: &mut ServerScript,
    target: DataExtensionTarget,
    key: &str,
    fields: &[SubmissionField],
) {
    match target {
        DataExtensionTarget::Key => {
            script.line("var record = {};");
            for field in fields {
                script.line(&format!(
                    "record[{}] = {};",
                    js_string(&field.column),
                    field.script_var()
                ));
            }
            script.line(&format!(
                "DataExtension.Init({}).Rows.Add(record);",
                js_string(key)
            ));
        }
        DataExtensionTarget::Name => {
            let columns = js_string_array(fields.iter().map(|f| f.column.as_str()));
            let values = fields
                .iter()
                .map(|f| f.script_var())
                .collect::<Vec<_>>()
                .join(", ");
            script.line(&format!(
                "Platform.Function.InsertData({}, {}, [{}]);",
                js_string(key),
                columns,
                values
            ));
        }
    }
}
