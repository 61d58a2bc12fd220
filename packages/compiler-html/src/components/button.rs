//! Buttons split their styles between a layout wrapper and the clickable
//! element so alignment never picks up colours and the anchor never picks up
//! outer spacing.

use super::{link, non_empty, root};
use crate::context::RenderContext;
use crate::markup::{Element, Node};
use cloudpage_compiler_css::{serialize_styles, StyleFilter};
use cloudpage_model::props::{
    ActionKind, Alignment, ButtonProps, CommonProps, DownloadButtonProps, FloatingButtonProps,
};
use cloudpage_model::ident::dom_id;
use cloudpage_model::{PageComponent, StyleMap};

/// Fragments a wrapper style key must contain
pub const WRAPPER_STYLE_KEYS: &[&str] = &["margin", "textAlign", "justifyContent", "alignItems"];

#[derive(Debug, Clone, PartialEq)]
pub struct ButtonStyles {
    pub wrapper: String,
    pub element: String,
}

/// Split a style map into disjoint wrapper and element declarations
pub fn partition_button_styles(styles: &StyleMap) -> ButtonStyles {
    let wrapper = StyleFilter::allow(WRAPPER_STYLE_KEYS);
    ButtonStyles {
        wrapper: serialize_styles(styles, wrapper),
        element: serialize_styles(styles, wrapper.complement()),
    }
}

/// Element styles plus the radius fallback: component, then brand, then default
fn element_style(styles: &StyleMap, ctx: &RenderContext) -> String {
    let mut css = partition_button_styles(styles).element;
    if !styles.get("borderRadius").map(|v| v.is_truthy()).unwrap_or(false) {
        if !css.is_empty() {
            css.push(' ');
        }
        css.push_str(&format!("border-radius: {};", ctx.theme.button_radius));
    }
    css
}

fn wrapper(common: &CommonProps) -> Element {
    let alignment = common
        .layout
        .as_ref()
        .and_then(|l| l.alignment)
        .unwrap_or(Alignment::Center);
    Element::new("div")
        .with_class("cp-button-wrapper")
        .with_style(format!("justify-content: {};", alignment.as_flex()))
        .with_style(partition_button_styles(&common.styles).wrapper)
}

fn label(icon: Option<&str>, text: &str) -> Vec<Node> {
    let mut children = Vec::new();
    if let Some(icon) = non_empty(icon) {
        children.push(
            Element::new("span")
                .with_class("cp-button-icon")
                .with_attr("aria-hidden", "true")
                .with_text(icon)
                .into(),
        );
    }
    children.push(Node::raw(text));
    children
}

/// Target of a button click and whether it opens a new tab
fn button_href(props: &ButtonProps) -> (String, bool) {
    let fallback = non_empty(props.url.as_deref()).unwrap_or("#").to_string();
    let Some(action) = &props.action else {
        return (fallback, props.open_in_new_tab);
    };
    match action.kind {
        ActionKind::Url => (
            non_empty(action.url.as_deref())
                .map(str::to_string)
                .unwrap_or(fallback),
            action.open_in_new_tab || props.open_in_new_tab,
        ),
        ActionKind::Scroll => (
            non_empty(action.target_id.as_deref())
                .map(|id| format!("#{}", dom_id(id)))
                .unwrap_or(fallback),
            false,
        ),
        ActionKind::Email => (
            non_empty(action.email.as_deref())
                .map(|email| format!("mailto:{}", email))
                .unwrap_or(fallback),
            false,
        ),
        ActionKind::Phone => (
            non_empty(action.phone.as_deref())
                .map(|phone| format!("tel:{}", phone.replace([' ', '(', ')', '-'], "")))
                .unwrap_or(fallback),
            false,
        ),
    }
}

pub fn render_button(component: &PageComponent, props: &ButtonProps, ctx: &RenderContext) -> Node {
    let (href, new_tab) = button_href(props);
    let text = non_empty(props.text.as_deref()).unwrap_or("Click here");

    let anchor = link(&href, new_tab)
        .with_attr("id", component.dom_id())
        .with_class("cp-button")
        .with_class_if("cp-button-full", props.full_width)
        .with_style(element_style(&props.common.styles, ctx))
        .with_children(label(props.icon.as_deref(), text));

    wrapper(&props.common).with_child(anchor).into()
}

pub fn render_download_button(
    component: &PageComponent,
    props: &DownloadButtonProps,
    ctx: &RenderContext,
) -> Node {
    let href = non_empty(props.file_url.as_deref()).unwrap_or("#");
    let text = non_empty(props.text.as_deref()).unwrap_or("Download");

    let anchor = Element::new("a")
        .with_attr("id", component.dom_id())
        .with_attr("href", href)
        .with_attr("download", non_empty(props.file_name.as_deref()).unwrap_or(""))
        .with_class("cp-button cp-download-button")
        .with_style(element_style(&props.common.styles, ctx))
        .with_children(label(Some("&#8615;"), text));

    wrapper(&props.common).with_child(anchor).into()
}

pub fn render_floating_button(
    component: &PageComponent,
    props: &FloatingButtonProps,
    ctx: &RenderContext,
) -> Node {
    let href = non_empty(props.url.as_deref()).unwrap_or("#");
    let text = non_empty(props.text.as_deref()).unwrap_or("Contact us");

    root(component, "a")
        .with_attr("href", href)
        .with_class("cp-button")
        .with_class(format!("cp-{}", props.position.as_class()))
        .with_style(element_style(&props.common.styles, ctx))
        .with_children(label(props.icon.as_deref(), text))
        .into()
}
