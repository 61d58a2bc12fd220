//! Third-party embeds and raw markup.

use super::{link, non_empty, styled_root};
use crate::dates::{calendar_stamp, parse_datetime};
use crate::markup::{Element, Node};
use chrono::{Duration, SecondsFormat};
use cloudpage_model::format_number;
use cloudpage_model::props::{
    AddToCalendarProps, CalendlyProps, CustomHtmlProps, MapProps, SocialIconsProps,
};
use cloudpage_model::PageComponent;
use tracing::warn;

const DEFAULT_MAP_ZOOM: f64 = 15.0;
const DEFAULT_ICON_SIZE: f64 = 40.0;

pub fn render_map(component: &PageComponent, props: &MapProps) -> Node {
    let Some(address) = non_empty(props.address.as_deref()) else {
        return styled_root(component, "div")
            .with_child(Element::new("p").with_class("cp-error").with_text("No address configured"))
            .into();
    };
    let zoom = props.zoom.unwrap_or(DEFAULT_MAP_ZOOM).clamp(1.0, 21.0);
    let height = props
        .height
        .as_ref()
        .and_then(|h| h.as_length())
        .unwrap_or_else(|| "400px".to_string());

    styled_root(component, "div")
        .with_child(
            Element::new("iframe")
                .with_attr("src", map_url(address, zoom))
                .with_attr("title", address)
                .with_attr("loading", "lazy")
                .with_attr("referrerpolicy", "no-referrer-when-downgrade")
                .with_style(format!("height: {};", height)),
        )
        .into()
}

pub fn map_url(address: &str, zoom: f64) -> String {
    format!(
        "https://maps.google.com/maps?q={}&z={}&output=embed",
        urlencoding::encode(address),
        format_number(zoom.round())
    )
}

/// Short glyph for a network; unknown networks use their initial
fn network_glyph(network: &str) -> String {
    match network.to_ascii_lowercase().as_str() {
        "facebook" => "f".to_string(),
        "instagram" => "IG".to_string(),
        "linkedin" => "in".to_string(),
        "twitter" | "x" => "X".to_string(),
        "youtube" => "YT".to_string(),
        "tiktok" => "TT".to_string(),
        "whatsapp" => "WA".to_string(),
        other => other
            .chars()
            .next()
            .map(|c| c.to_ascii_uppercase().to_string())
            .unwrap_or_default(),
    }
}

pub fn render_social_icons(component: &PageComponent, props: &SocialIconsProps) -> Node {
    let size = props.size.filter(|s| *s > 0.0).unwrap_or(DEFAULT_ICON_SIZE);
    let justify = props.alignment.unwrap_or_default().as_flex();
    let mut icon_style = format!(
        "width: {0}px; height: {0}px; font-size: {1}px;",
        format_number(size),
        format_number((size * 0.4).round())
    );
    if let Some(color) = non_empty(props.color.as_deref()) {
        icon_style.push_str(&format!(" background: {};", color));
    }

    let icons = props
        .icons
        .iter()
        .filter(|icon| !icon.url.trim().is_empty())
        .map(|icon| {
            Node::from(
                link(&icon.url, true)
                    .with_class("cp-social-link")
                    .with_class(format!("cp-social-{}", icon.network.to_ascii_lowercase()))
                    .with_attr("aria-label", icon.network.as_str())
                    .with_style(&icon_style)
                    .with_text(network_glyph(&icon.network)),
            )
        });

    styled_root(component, "div")
        .with_class("cp-social")
        .with_style(format!("justify-content: {};", justify))
        .with_children(icons)
        .into()
}

pub fn render_calendly(component: &PageComponent, props: &CalendlyProps) -> Node {
    let Some(url) = non_empty(props.url.as_deref()) else {
        return styled_root(component, "div")
            .with_child(Element::new("p").with_class("cp-error").with_text("No scheduling link configured"))
            .into();
    };
    let height = props
        .height
        .as_ref()
        .and_then(|h| h.as_length())
        .unwrap_or_else(|| "650px".to_string());

    styled_root(component, "div")
        .with_child(
            Element::new("iframe")
                .with_attr("src", url)
                .with_attr("title", "Schedule a meeting")
                .with_attr("loading", "lazy")
                .with_style(format!("height: {};", height)),
        )
        .into()
}

/// Calendar links for an event. Without a parseable start date only the
/// title renders.
pub fn render_add_to_calendar(component: &PageComponent, props: &AddToCalendarProps) -> Node {
    let title = non_empty(props.title.as_deref()).unwrap_or("Event");
    let mut root = styled_root(component, "div")
        .with_child(Element::new("h3").with_class("cp-calendar-title").with_text(title));

    let raw = props.start_date.as_deref().unwrap_or("");
    let Some(start) = parse_datetime(raw) else {
        warn!(component = %component.id, date = %raw, "Invalid event start date");
        return root.into();
    };
    let end = props
        .end_date
        .as_deref()
        .and_then(parse_datetime)
        .filter(|end| *end > start)
        .unwrap_or(start + Duration::hours(1));

    let details = props.description.as_deref().unwrap_or("");
    let location = props.location.as_deref().unwrap_or("");

    let google = format!(
        "https://calendar.google.com/calendar/render?action=TEMPLATE&text={}&dates={}/{}&details={}&location={}",
        urlencoding::encode(title),
        calendar_stamp(&start),
        calendar_stamp(&end),
        urlencoding::encode(details),
        urlencoding::encode(location),
    );
    let outlook = format!(
        "https://outlook.live.com/calendar/0/deeplink/compose?subject={}&startdt={}&enddt={}&body={}&location={}",
        urlencoding::encode(title),
        urlencoding::encode(&start.to_rfc3339_opts(SecondsFormat::Secs, true)),
        urlencoding::encode(&end.to_rfc3339_opts(SecondsFormat::Secs, true)),
        urlencoding::encode(details),
        urlencoding::encode(location),
    );
    let label = non_empty(props.button_text.as_deref()).unwrap_or("Add to calendar");

    root = root.with_child(
        Element::new("div")
            .with_class("cp-calendar-links")
            .with_child(
                link(&google, true)
                    .with_class("cp-button")
                    .with_text(format!("{} (Google)", label)),
            )
            .with_child(
                link(&outlook, true)
                    .with_class("cp-button")
                    .with_text(format!("{} (Outlook)", label)),
            ),
    );
    root.into()
}

/// Designer-authored markup, emitted verbatim
pub fn render_custom_html(component: &PageComponent, props: &CustomHtmlProps) -> Node {
    styled_root(component, "div")
        .with_child(Node::raw(props.html.as_str()))
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cloudpage_model::ComponentProps;

    fn component(component_type: &str, props: &str) -> PageComponent {
        serde_json::from_str(&format!(
            r#"{{"id": "e1", "type": "{}", "props": {}}}"#,
            component_type, props
        ))
        .unwrap()
    }

    #[test]
    fn test_map_url_is_encoded() {
        assert_eq!(
            map_url("Av. Paulista, 1000 - São Paulo", 14.0),
            "https://maps.google.com/maps?q=Av.%20Paulista%2C%201000%20-%20S%C3%A3o%20Paulo&z=14&output=embed"
        );
    }

    #[test]
    fn test_calendar_links() {
        let c = component(
            "AddToCalendar",
            r#"{"title": "Launch", "startDate": "2030-05-01T14:00", "location": "Online"}"#,
        );
        let html = match &c.props {
            ComponentProps::AddToCalendar(p) => render_add_to_calendar(&c, p).to_html(),
            _ => unreachable!(),
        };
        println!("{}", html);
        assert!(html.contains("dates=20300501T140000Z/20300501T150000Z"));
        assert!(html.contains("text=Launch"));
        assert!(html.contains("startdt=2030-05-01T14%3A00%3A00Z"));
    }

    #[test]
    fn test_invalid_calendar_date_omits_links() {
        let c = component("AddToCalendar", r#"{"title": "Launch", "startDate": "soon"}"#);
        let html = match &c.props {
            ComponentProps::AddToCalendar(p) => render_add_to_calendar(&c, p).to_html(),
            _ => unreachable!(),
        };
        assert!(html.contains("Launch"));
        assert!(!html.contains("calendar.google.com"));
    }

    #[test]
    fn test_custom_html_is_verbatim() {
        let c = component("CustomHTML", r#"{"html": "<marquee>%%=v(@x)=%%</marquee>"}"#);
        let html = match &c.props {
            ComponentProps::CustomHtml(p) => render_custom_html(&c, p).to_html(),
            _ => unreachable!(),
        };
        assert!(html.contains("<marquee>%%=v(@x)=%%</marquee>"));
    }

    #[test]
    fn test_social_icons_skip_empty_urls() {
        let c = component(
            "SocialIcons",
            r#"{"icons": [{"network": "Facebook", "url": "https://fb.com/x"}, {"network": "x", "url": ""}], "alignment": "left"}"#,
        );
        let html = match &c.props {
            ComponentProps::SocialIcons(p) => render_social_icons(&c, p).to_html(),
            _ => unreachable!(),
        };
        assert_eq!(html.matches("cp-social-link").count(), 1);
        assert!(html.contains("justify-content: flex-start;"));
        assert!(html.contains("cp-social-facebook"));
    }
}
