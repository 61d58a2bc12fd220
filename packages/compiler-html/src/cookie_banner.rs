use crate::components::{link, non_empty, script};
use crate::markup::{Element, Node};
use cloudpage_model::{BannerPosition, CookieBanner};

/// `localStorage` key holding `accepted` or `declined`
pub const CONSENT_STORAGE_KEY: &str = "cp-cookie-consent";

/// The consent banner, hidden by its script once a choice is stored
pub fn render_cookie_banner(banner: &CookieBanner) -> Option<Node> {
    if !banner.enabled {
        return None;
    }

    let position = match banner.position {
        BannerPosition::Bottom => "cp-cookie-bottom",
        BannerPosition::Top => "cp-cookie-top",
    };
    let mut style = String::new();
    if let Some(color) = non_empty(banner.background_color.as_deref()) {
        style.push_str(&format!("background: {};", color));
    }
    if let Some(color) = non_empty(banner.text_color.as_deref()) {
        style.push_str(&format!(" color: {};", color));
    }
    let button_style = non_empty(banner.button_color.as_deref())
        .map(|color| format!("background: {}; color: #fff;", color))
        .unwrap_or_default();

    let mut text = Element::new("span").with_text(
        non_empty(banner.text.as_deref())
            .unwrap_or("We use cookies to improve your experience on this site."),
    );
    if let Some(url) = non_empty(banner.policy_url.as_deref()) {
        text = text.with_text(" ").with_child(
            link(url, true).with_text(non_empty(banner.policy_link_text.as_deref()).unwrap_or("Privacy policy")),
        );
    }

    let element = Element::new("div")
        .with_attr("id", "cp-cookie-banner")
        .with_class("cp-cookie-banner")
        .with_class(position)
        .with_attr("role", "dialog")
        .with_attr("aria-live", "polite")
        .with_style(style)
        .with_child(text)
        .with_child(
            Element::new("button")
                .with_attr("type", "button")
                .with_attr("data-consent", "accepted")
                .with_style(&button_style)
                .with_text(non_empty(banner.accept_text.as_deref()).unwrap_or("Accept")),
        )
        .with_child(
            Element::new("button")
                .with_attr("type", "button")
                .with_attr("data-consent", "declined")
                .with_text(non_empty(banner.decline_text.as_deref()).unwrap_or("Decline")),
        );

    Some(Node::Fragment(vec![
        element.into(),
        script(format!(
            r#"(function () {{
  var banner = document.getElementById("cp-cookie-banner");
  if (!banner) return;
  var key = "{key}";
  try {{ if (localStorage.getItem(key)) {{ banner.style.display = "none"; return; }} }} catch (e) {{}}
  var buttons = banner.querySelectorAll("button[data-consent]");
  for (var i = 0; i < buttons.length; i++) {{
    buttons[i].onclick = function () {{
      try {{ localStorage.setItem(key, this.getAttribute("data-consent")); }} catch (e) {{}}
      banner.style.display = "none";
    }};
  }}
}})();"#,
            key = CONSENT_STORAGE_KEY,
        )),
    ]))
}
