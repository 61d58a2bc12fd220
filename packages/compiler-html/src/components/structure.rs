use super::{link, non_empty, styled_root};
use crate::markup::{Element, Node};
use cloudpage_model::props::{DividerProps, FooterProps, HeaderProps, LinkItem, SpacerProps};
use cloudpage_model::PageComponent;

pub fn render_header(component: &PageComponent, props: &HeaderProps) -> Node {
    let mut inner = Element::new("div").with_class("cp-header-inner");

    if let Some(logo) = non_empty(props.logo_url.as_deref()) {
        let height = props
            .logo_height
            .as_ref()
            .and_then(|h| h.as_length())
            .unwrap_or_else(|| "48px".to_string());
        inner = inner.with_child(
            Element::new("div").with_class("cp-header-logo").with_child(
                Element::new("img")
                    .with_attr("src", logo)
                    .with_attr("alt", props.logo_alt.as_deref().unwrap_or("Logo"))
                    .with_style(format!("height: {};", height)),
            ),
        );
    }
    if let Some(title) = non_empty(props.title.as_deref()) {
        inner = inner.with_child(Element::new("div").with_class("cp-header-title").with_text(title));
    }
    if !props.links.is_empty() {
        inner = inner.with_child(
            Element::new("nav")
                .with_class("cp-header-nav")
                .with_children(links(&props.links)),
        );
    }

    styled_root(component, "header").with_child(inner).into()
}

pub fn render_footer(component: &PageComponent, props: &FooterProps) -> Node {
    let mut footer = styled_root(component, "footer");
    if let Some(company) = non_empty(props.company_name.as_deref()) {
        footer = footer.with_child(Element::new("strong").with_text(company));
    }
    if let Some(text) = non_empty(props.text.as_deref()) {
        footer = footer.with_child(Element::new("p").with_text(text));
    }
    if let Some(address) = non_empty(props.address.as_deref()) {
        footer = footer.with_child(Element::new("address").with_text(address));
    }
    if !props.links.is_empty() {
        footer = footer.with_child(
            Element::new("div")
                .with_class("cp-footer-links")
                .with_children(links(&props.links)),
        );
    }
    footer.into()
}

fn links(items: &[LinkItem]) -> Vec<Node> {
    items
        .iter()
        .filter(|item| !item.label.trim().is_empty())
        .map(|item| {
            let href = non_empty(Some(item.url.as_str())).unwrap_or("#");
            link(href, item.open_in_new_tab).with_text(&item.label).into()
        })
        .collect()
}

pub fn render_divider(component: &PageComponent, props: &DividerProps) -> Node {
    let thickness = props
        .thickness
        .as_ref()
        .and_then(|t| t.as_length())
        .unwrap_or_else(|| "1px".to_string());
    let line_style = match props.line_style.as_deref() {
        Some(s @ ("solid" | "dashed" | "dotted" | "double")) => s,
        _ => "solid",
    };
    let color = non_empty(props.color.as_deref()).unwrap_or("#e0e0e0");
    let width = props
        .width
        .as_ref()
        .and_then(|w| w.as_css())
        .map(|w| if w.chars().all(|c| c.is_ascii_digit() || c == '.') { format!("{}%", w) } else { w })
        .unwrap_or_else(|| "100%".to_string());

    styled_root(component, "hr")
        .with_style(format!(
            "border-top: {} {} {}; width: {};",
            thickness, line_style, color, width
        ))
        .into()
}

pub fn render_spacer(component: &PageComponent, props: &SpacerProps) -> Node {
    let height = props
        .height
        .as_ref()
        .and_then(|h| h.as_length())
        .unwrap_or_else(|| "40px".to_string());
    styled_root(component, "div")
        .with_attr("aria-hidden", "true")
        .with_style(format!("height: {};", height))
        .into()
}
