//! The page form.
//!
//! Fields come from [`FormSchema`], the same structure the submission script
//! is emitted from, so input names and captured fields cannot diverge.

use super::{non_empty, root};
use crate::context::RenderContext;
use crate::markup::{Element, Node};
use cloudpage_compiler_css::{serialize_styles, StyleFilter};
use cloudpage_compiler_script::ampscript::{else_branch, end_if, equals, interpolate, open_if};
use cloudpage_compiler_script::names::{
    ab_input, ab_variable, FORM_ELEMENT_ID, FORM_SUBMITTED, SUBMIT_MARKER,
};
use cloudpage_model::props::{CustomFieldType, FormProps};
use cloudpage_model::{CapturedField, FieldKind, FormSchema, PageComponent, StandardField};
use tracing::debug;

pub const DEFAULT_SUBMIT_TEXT: &str = "Submit";
pub const DEFAULT_SUCCESS_MESSAGE: &str = "Thank you! Your information has been received.";

pub fn render_form(component: &PageComponent, props: &FormProps, ctx: &RenderContext) -> Node {
    let schema = FormSchema::from_props(props);
    let is_page_form = ctx
        .page
        .form()
        .map(|(first, _)| first.id == component.id)
        .unwrap_or(false);
    let form_id = if is_page_form {
        FORM_ELEMENT_ID.to_string()
    } else {
        format!("{}-form", component.dom_id())
    };

    let mut form = Element::new("form")
        .with_attr("id", form_id.as_str())
        .with_class("cp-form-element")
        .with_attr("method", "post")
        .with_attr("action", "")
        .with_attr("data-cp-form", "true");

    if let Some(title) = non_empty(props.title.as_deref()) {
        form = form.with_child(Element::new("h3").with_class("cp-form-title").with_text(title));
    }
    form = form.with_child(hidden(SUBMIT_MARKER, "1"));

    if is_page_form && ctx.branch_variants() {
        for tested in ctx.page.ab_test_components() {
            form = form.with_child(hidden(
                &ab_input(&tested.id),
                &interpolate(&ab_variable(&tested.id)),
            ));
        }
    }

    let consent_url = props
        .consent
        .as_ref()
        .and_then(|c| non_empty(c.link_url.as_deref()));
    for field in schema.fields() {
        form = form.with_child(render_field(field, &form_id, consent_url, ctx));
    }
    form = form.with_child(submit_button(props, ctx));

    let success = Element::new("div")
        .with_class("cp-success")
        .with_attr("role", "status")
        .with_text(non_empty(props.success_message.as_deref()).unwrap_or(DEFAULT_SUCCESS_MESSAGE));

    debug!(form = %component.id, fields = schema.fields().len(), "Rendered form");

    root(component, "div")
        .with_style(serialize_styles(&props.common.styles, StyleFilter::ALL))
        .with_child(Node::raw(open_if(&equals(FORM_SUBMITTED, "true"))))
        .with_child(success)
        .with_child(Node::raw(else_branch()))
        .with_child(form)
        .with_child(Node::raw(end_if()))
        .into()
}

fn hidden(name: &str, value: &str) -> Element {
    Element::new("input")
        .with_attr("type", "hidden")
        .with_attr("name", name)
        .with_attr("value", value)
}

fn render_field(
    field: &CapturedField,
    form_id: &str,
    consent_url: Option<&str>,
    ctx: &RenderContext,
) -> Node {
    let input_id = format!("{}-{}", form_id, field.input_name);
    let conditional = field.conditional.as_ref();

    let mut wrapper = Element::new("div")
        .with_class("cp-field")
        .with_attr("data-field", field.input_name.as_str());
    if let Some(rule) = conditional {
        wrapper = wrapper
            .with_class("cp-hidden")
            .with_attr("data-conditional-field", rule.field.as_str())
            .with_attr("data-conditional-value", rule.value.as_str())
            .with_attr_opt("data-conditional-required", field.required.then_some("true"));
    }
    // Conditional fields toggle `required` client-side, the label always marks them
    let required = field.required && conditional.is_none();

    let value = (!ctx.hide_template_expressions()).then(|| interpolate(&field.variable()));

    let control: Vec<Node> = match field.kind {
        FieldKind::Consent | FieldKind::Custom(CustomFieldType::Checkbox) => {
            let mut label = Element::new("label")
                .with_class("cp-checkbox")
                .with_child(
                    Element::new("input")
                        .with_attr("type", "checkbox")
                        .with_attr("id", input_id.as_str())
                        .with_attr("name", field.input_name.as_str())
                        .with_attr("value", "true")
                        .with_flag_if("required", required),
                )
                .with_child(Element::new("span").with_text(field.label.as_str()));
            if field.kind == FieldKind::Consent {
                if let Some(url) = consent_url {
                    label = label.with_child(
                        Element::new("a")
                            .with_attr("href", url)
                            .with_attr("target", "_blank")
                            .with_attr("rel", "noopener noreferrer")
                            .with_text(" (privacy policy)"),
                    );
                }
            }
            vec![label.into()]
        }
        kind => {
            let label = field_label(field, &input_id);
            let input = match kind {
                FieldKind::Custom(CustomFieldType::Select) => select(field, &input_id, required),
                FieldKind::Custom(CustomFieldType::Textarea) => Element::new("textarea")
                    .with_class("cp-input")
                    .with_attr("id", input_id.as_str())
                    .with_attr("name", field.input_name.as_str())
                    .with_attr("rows", "4")
                    .with_attr_opt("placeholder", field.placeholder.as_deref())
                    .with_flag_if("required", required)
                    .with_text(value.clone().unwrap_or_default()),
                _ => text_input(field, &input_id, required, value),
            };
            vec![
                label.into(),
                input.into(),
                Element::new("div")
                    .with_class("cp-field-error")
                    .with_text(error_message(field))
                    .into(),
            ]
        }
    };

    wrapper.with_children(control).into()
}

fn field_label(field: &CapturedField, input_id: &str) -> Element {
    let mut label = Element::new("label")
        .with_class("cp-label")
        .with_attr("for", input_id)
        .with_text(field.label.as_str());
    if field.required {
        label = label.with_child(Element::new("span").with_class("cp-required").with_text("*"));
    }
    label
}

fn text_input(
    field: &CapturedField,
    input_id: &str,
    required: bool,
    value: Option<String>,
) -> Element {
    let (input_type, autocomplete, mask) = match field.kind {
        FieldKind::Standard(standard) => (
            standard.input_type(),
            standard.autocomplete(),
            match standard {
                StandardField::Phone => Some("phone"),
                StandardField::Cpf => Some("cpf"),
                _ => None,
            },
        ),
        FieldKind::Custom(CustomFieldType::Number) => ("number", None, None),
        FieldKind::Custom(CustomFieldType::Date) => ("date", None, None),
        _ => ("text", None, None),
    };

    Element::new("input")
        .with_class("cp-input")
        .with_attr("type", input_type)
        .with_attr("id", input_id)
        .with_attr("name", field.input_name.as_str())
        .with_attr_opt("placeholder", field.placeholder.as_deref())
        .with_attr_opt("autocomplete", autocomplete)
        .with_attr_opt("data-mask", mask)
        .with_attr_opt("value", value)
        .with_flag_if("required", required)
}

fn select(field: &CapturedField, input_id: &str, required: bool) -> Element {
    let placeholder = non_empty(field.placeholder.as_deref()).unwrap_or("Select...");
    let mut select = Element::new("select")
        .with_class("cp-input")
        .with_attr("id", input_id)
        .with_attr("name", field.input_name.as_str())
        .with_flag_if("required", required)
        .with_child(Element::new("option").with_attr("value", "").with_text(placeholder));
    for option in &field.options {
        select = select.with_child(
            Element::new("option")
                .with_attr("value", option.as_str())
                .with_text(option.as_str()),
        );
    }
    select
}

fn error_message(field: &CapturedField) -> &'static str {
    match field.kind {
        FieldKind::Standard(StandardField::Email) => "Please enter a valid email address.",
        FieldKind::Standard(StandardField::Phone) => "Please enter a valid phone number.",
        FieldKind::Standard(StandardField::Cpf) => "Please enter a valid CPF.",
        _ => "This field is required.",
    }
}

/// Submit button: form `buttonProps`, then `buttonText`, then brand defaults,
/// then the literal fallback
fn submit_button(props: &FormProps, ctx: &RenderContext) -> Element {
    let overrides = props.button_props.clone().unwrap_or_default();
    let text = non_empty(overrides.text.as_deref())
        .or_else(|| non_empty(props.button_text.as_deref()))
        .unwrap_or(DEFAULT_SUBMIT_TEXT);

    let background = non_empty(overrides.background_color.as_deref())
        .map(str::to_string)
        .unwrap_or_else(|| ctx.theme.button_background.clone());
    let color = non_empty(overrides.text_color.as_deref())
        .map(str::to_string)
        .unwrap_or_else(|| ctx.theme.button_text.clone());
    let radius = overrides
        .border_radius
        .as_ref()
        .and_then(|r| r.as_length())
        .unwrap_or_else(|| ctx.theme.button_radius.clone());

    let mut button = Element::new("button")
        .with_attr("type", "submit")
        .with_class("cp-button cp-submit")
        .with_style(format!(
            "background-color: {}; color: {}; border-radius: {};",
            background, color, radius
        ));
    if let Some(icon) = non_empty(overrides.icon.as_deref()) {
        button = button.with_child(
            Element::new("span")
                .with_class("cp-button-icon")
                .with_attr("aria-hidden", "true")
                .with_text(icon),
        );
    }
    button.with_text(text)
}
