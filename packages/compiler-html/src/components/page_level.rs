//! Page-level components. The document assembler places these outside the
//! content flow: stripes above `<main>`, the WhatsApp button fixed to a corner.

use super::{link, non_empty, script, styled_root};
use crate::markup::{Element, Node};
use cloudpage_compiler_script::ssjs::js_string;
use cloudpage_model::props::{StripeProps, WhatsAppProps};
use cloudpage_model::PageComponent;

const WHATSAPP_ICON: &str = r#"<svg viewBox="0 0 32 32" aria-hidden="true"><path d="M16 3C8.8 3 3 8.8 3 16c0 2.3.6 4.5 1.7 6.5L3 29l6.7-1.7c1.9 1 4.1 1.6 6.3 1.6 7.2 0 13-5.8 13-13S23.2 3 16 3zm0 23.7c-2 0-3.9-.5-5.6-1.5l-.4-.2-4 1 1.1-3.9-.3-.4C5.8 20 5.3 18 5.3 16 5.3 10.1 10.1 5.3 16 5.3S26.7 10.1 26.7 16 21.9 26.7 16 26.7zm5.9-8c-.3-.2-1.9-.9-2.2-1s-.5-.2-.7.2-.8 1-1 1.2-.4.2-.7.1c-.3-.2-1.4-.5-2.6-1.6-1-.9-1.6-1.9-1.8-2.2s0-.5.1-.6l.5-.6c.2-.2.2-.4.3-.6s0-.4 0-.6-.7-1.7-1-2.3c-.3-.6-.5-.5-.7-.5h-.6c-.2 0-.6.1-.9.4s-1.2 1.1-1.2 2.8 1.2 3.2 1.4 3.5c.2.2 2.4 3.6 5.7 5 .8.3 1.4.5 1.9.7.8.3 1.5.2 2.1.1.6-.1 1.9-.8 2.2-1.5.3-.7.3-1.4.2-1.5-.1-.2-.3-.3-.6-.4z"/></svg>"#;

pub fn render_stripe(component: &PageComponent, props: &StripeProps) -> Node {
    let mut stripe = styled_root(component, "div")
        .with_attr("role", "note")
        .with_child(Element::new("span").with_text(props.text.as_str()));
    if let Some(href) = non_empty(props.link_url.as_deref()) {
        stripe = stripe.with_child(
            link(href, false).with_text(non_empty(props.link_text.as_deref()).unwrap_or("Learn more")),
        );
    }
    if !props.dismissible {
        return stripe.into();
    }

    stripe = stripe.with_child(
        Element::new("button")
            .with_attr("type", "button")
            .with_class("cp-stripe-close")
            .with_attr("aria-label", "Close")
            .with_text("&times;"),
    );
    Node::Fragment(vec![
        stripe.into(),
        script(format!(
            r#"(function () {{
  var root = document.getElementById({id});
  if (!root) return;
  var key = {key};
  try {{ if (sessionStorage.getItem(key) === "1") {{ root.style.display = "none"; return; }} }} catch (e) {{}}
  root.querySelector(".cp-stripe-close").onclick = function () {{
    root.style.display = "none";
    try {{ sessionStorage.setItem(key, "1"); }} catch (e) {{}}
  }};
}})();"#,
            id = js_string(&component.dom_id()),
            key = js_string(&format!("cp-stripe-{}", component.id)),
        )),
    ])
}

/// `https://wa.me/<digits>[?text=<message>]`
pub fn whatsapp_url(phone: &str, message: Option<&str>) -> String {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    match non_empty(message) {
        Some(text) => format!("https://wa.me/{}?text={}", digits, urlencoding::encode(text)),
        None => format!("https://wa.me/{}", digits),
    }
}

pub fn render_whatsapp(component: &PageComponent, props: &WhatsAppProps) -> Node {
    let tooltip = non_empty(props.tooltip.as_deref()).unwrap_or("Chat on WhatsApp");
    styled_root(component, "a")
        .with_class(format!("cp-{}", props.position.as_class()))
        .with_attr("href", whatsapp_url(&props.phone_number, props.message.as_deref()))
        .with_attr("target", "_blank")
        .with_attr("rel", "noopener noreferrer")
        .with_attr("title", tooltip)
        .with_attr("aria-label", tooltip)
        .with_child(Node::raw(WHATSAPP_ICON))
        .into()
}
