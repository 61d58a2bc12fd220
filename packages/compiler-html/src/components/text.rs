use super::styled_root;
use crate::context::RenderContext;
use crate::markup::Node;
use cloudpage_compiler_script::ampscript::interpolate;
use cloudpage_compiler_script::names::binding_variable;
use cloudpage_model::props::TextProps;
use cloudpage_model::{ComponentType, PageComponent};

/// Title, Subtitle and Paragraph
pub fn render_text(component: &PageComponent, props: &TextProps, ctx: &RenderContext) -> Node {
    let (tag, class) = match component.component_type() {
        ComponentType::Title => (heading_tag(props.level, 1), "cp-heading"),
        ComponentType::Subtitle => (heading_tag(props.level, 2), "cp-subheading"),
        _ => ("div".to_string(), "cp-text"),
    };

    styled_root(component, &tag)
        .with_class(class)
        .with_text(text_content(props, ctx))
        .into()
}

/// The bound field's interpolation, or the literal text when unbound or
/// when template expressions are hidden
pub fn text_content(props: &TextProps, ctx: &RenderContext) -> String {
    match props.binding() {
        Some(field) if !ctx.hide_template_expressions() => {
            interpolate(&binding_variable(field))
        }
        _ => props.text.clone(),
    }
}

fn heading_tag(level: Option<u8>, default: u8) -> String {
    format!("h{}", level.unwrap_or(default).clamp(1, 6))
}
