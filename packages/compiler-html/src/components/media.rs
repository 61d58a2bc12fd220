use super::{link, non_empty, root, script, styled_root, PLACEHOLDER_IMAGE};
use crate::markup::{Element, Node};
use cloudpage_compiler_script::ssjs::js_string;
use cloudpage_model::format_number;
use cloudpage_model::props::{
    BannerProps, CarouselProps, FloatSide, FloatingImageProps, ImageProps, VideoProps,
};
use cloudpage_model::PageComponent;
use regex::Regex;
use std::sync::OnceLock;
use tracing::warn;

pub fn render_banner(component: &PageComponent, props: &BannerProps) -> Node {
    let src = non_empty(props.image_url.as_deref()).unwrap_or(PLACEHOLDER_IMAGE);
    let height = props.height.as_ref().and_then(|h| h.as_length());

    let image = Element::new("img")
        .with_attr("src", src)
        .with_attr("alt", props.alt.as_deref().unwrap_or(""))
        .with_style(height.map(|h| format!("height: {};", h)).unwrap_or_default());

    let image: Node = match non_empty(props.link_url.as_deref()) {
        Some(href) => link(href, false).with_child(image).into(),
        None => image.into(),
    };

    let mut banner = styled_root(component, "div").with_child(image);
    let title = non_empty(props.title.as_deref());
    let subtitle = non_empty(props.subtitle.as_deref());
    if title.is_some() || subtitle.is_some() {
        let mut overlay = Element::new("div").with_class("cp-banner-text");
        if let Some(title) = title {
            overlay = overlay.with_child(Element::new("h1").with_text(title));
        }
        if let Some(subtitle) = subtitle {
            overlay = overlay.with_child(Element::new("p").with_text(subtitle));
        }
        banner = banner.with_child(overlay);
    }
    banner.into()
}

pub fn render_image(component: &PageComponent, props: &ImageProps) -> Node {
    let src = non_empty(props.src.as_deref()).unwrap_or(PLACEHOLDER_IMAGE);
    let image = Element::new("img")
        .with_attr("src", src)
        .with_attr("alt", props.alt.as_deref().unwrap_or(""))
        .with_attr("loading", "lazy")
        .with_style(
            props
                .width
                .as_ref()
                .and_then(|w| w.as_length())
                .map(|w| format!("width: {};", w))
                .unwrap_or_default(),
        );

    let image: Node = match non_empty(props.link_url.as_deref()) {
        Some(href) => link(href, true).with_child(image).into(),
        None => image.into(),
    };

    let mut figure = styled_root(component, "figure").with_child(image);
    if let Some(caption) = non_empty(props.caption.as_deref()) {
        figure = figure.with_child(Element::new("figcaption").with_text(caption));
    }
    figure.into()
}

pub fn render_floating_image(component: &PageComponent, props: &FloatingImageProps) -> Node {
    let side = match props.position {
        FloatSide::Left => "cp-float-left",
        FloatSide::Right => "cp-float-right",
    };
    let width = props
        .width
        .as_ref()
        .and_then(|w| w.as_length())
        .unwrap_or_else(|| "40%".to_string());

    styled_root(component, "div")
        .with_class("cp-float-image")
        .with_class(side)
        .with_child(
            Element::new("img")
                .with_attr("src", non_empty(props.src.as_deref()).unwrap_or(PLACEHOLDER_IMAGE))
                .with_attr("alt", props.alt.as_deref().unwrap_or(""))
                .with_style(format!("width: {};", width)),
        )
        .with_child(
            Element::new("div")
                .with_class("cp-float-text")
                .with_text(props.text.as_deref().unwrap_or("")),
        )
        .into()
}

fn youtube_regex() -> Option<&'static Regex> {
    static YOUTUBE: OnceLock<Option<Regex>> = OnceLock::new();
    YOUTUBE
        .get_or_init(|| {
            Regex::new(
                r"(?:youtube\.com/(?:watch\?(?:[^#]*&)?v=|embed/|shorts/|live/)|youtu\.be/)([A-Za-z0-9_-]{11})",
            )
            .ok()
        })
        .as_ref()
}

fn vimeo_regex() -> Option<&'static Regex> {
    static VIMEO: OnceLock<Option<Regex>> = OnceLock::new();
    VIMEO
        .get_or_init(|| Regex::new(r"vimeo\.com/(?:video/)?(\d+)").ok())
        .as_ref()
}

/// Embeddable player URL for YouTube and Vimeo links
pub fn embed_url(url: &str, autoplay: bool) -> Option<String> {
    let url = url.trim();
    if let Some(id) = youtube_regex().and_then(|re| re.captures(url)).and_then(|c| c.get(1)) {
        let mut embed = format!("https://www.youtube.com/embed/{}", id.as_str());
        if autoplay {
            embed.push_str("?autoplay=1&mute=1");
        }
        return Some(embed);
    }
    if let Some(id) = vimeo_regex().and_then(|re| re.captures(url)).and_then(|c| c.get(1)) {
        let mut embed = format!("https://player.vimeo.com/video/{}", id.as_str());
        if autoplay {
            embed.push_str("?autoplay=1&muted=1");
        }
        return Some(embed);
    }
    None
}

pub fn render_video(component: &PageComponent, props: &VideoProps) -> Node {
    let url = props.url.as_deref().unwrap_or("");
    let embed = match embed_url(url, props.autoplay) {
        Some(embed) => embed,
        None => {
            warn!(component = %component.id, url = %url, "Invalid video URL");
            return root(component, "p")
                .with_class("cp-error")
                .with_text("Invalid video URL")
                .into();
        }
    };

    styled_root(component, "div")
        .with_child(
            Element::new("iframe")
                .with_attr("src", embed)
                .with_attr("title", props.title.as_deref().unwrap_or("Video"))
                .with_attr(
                    "allow",
                    "accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture",
                )
                .with_flag("allowfullscreen"),
        )
        .into()
}

pub const DEFAULT_CAROUSEL_INTERVAL_MS: f64 = 5000.0;

pub fn render_carousel(component: &PageComponent, props: &CarouselProps) -> Node {
    let mut carousel = styled_root(component, "div");

    if props.slides.is_empty() {
        return carousel
            .with_child(
                Element::new("div")
                    .with_class("cp-slide active")
                    .with_child(Element::new("img").with_attr("src", PLACEHOLDER_IMAGE).with_attr("alt", "")),
            )
            .into();
    }

    for (index, slide) in props.slides.iter().enumerate() {
        let image = Element::new("img")
            .with_attr("src", non_empty(Some(slide.image_url.as_str())).unwrap_or(PLACEHOLDER_IMAGE))
            .with_attr("alt", slide.alt.as_deref().unwrap_or(""));
        let image: Node = match non_empty(slide.link_url.as_deref()) {
            Some(href) => link(href, false).with_child(image).into(),
            None => image.into(),
        };

        let mut item = Element::new("div")
            .with_class("cp-slide")
            .with_class_if("active", index == 0)
            .with_child(image);
        if let Some(caption) = non_empty(slide.caption.as_deref()) {
            item = item.with_child(Element::new("div").with_class("cp-slide-caption").with_text(caption));
        }
        carousel = carousel.with_child(item);
    }

    if props.slides.len() > 1 {
        carousel = carousel
            .with_child(
                Element::new("button")
                    .with_attr("type", "button")
                    .with_class("cp-carousel-prev")
                    .with_attr("aria-label", "Previous")
                    .with_text("&#8249;"),
            )
            .with_child(
                Element::new("button")
                    .with_attr("type", "button")
                    .with_class("cp-carousel-next")
                    .with_attr("aria-label", "Next")
                    .with_text("&#8250;"),
            );
        let dots = (0..props.slides.len()).map(|i| {
            Node::from(
                Element::new("button")
                    .with_attr("type", "button")
                    .with_class("cp-carousel-dot")
                    .with_class_if("active", i == 0)
                    .with_attr("data-index", i.to_string()),
            )
        });
        carousel = carousel.with_child(Element::new("div").with_class("cp-carousel-dots").with_children(dots));
    }

    let autoplay = props.autoplay.unwrap_or(true) && props.slides.len() > 1;
    let interval = props
        .interval
        .filter(|i| *i > 0.0)
        .unwrap_or(DEFAULT_CAROUSEL_INTERVAL_MS);

    Node::Fragment(vec![
        carousel.into(),
        script(format!(
            r#"(function () {{
  var root = document.getElementById({id});
  if (!root) return;
  var slides = root.querySelectorAll(".cp-slide");
  var dots = root.querySelectorAll(".cp-carousel-dot");
  var current = 0;
  function show(i) {{
    if (!slides.length) return;
    current = (i + slides.length) % slides.length;
    for (var s = 0; s < slides.length; s++) {{
      slides[s].classList.toggle("active", s === current);
      if (dots[s]) dots[s].classList.toggle("active", s === current);
    }}
  }}
  var prev = root.querySelector(".cp-carousel-prev");
  var next = root.querySelector(".cp-carousel-next");
  if (prev) prev.onclick = function () {{ show(current - 1); }};
  if (next) next.onclick = function () {{ show(current + 1); }};
  for (var d = 0; d < dots.length; d++) {{
    dots[d].onclick = function () {{ show(parseInt(this.getAttribute("data-index"), 10)); }};
  }}
  if ({autoplay}) {{
    if (root._cpTimer) clearInterval(root._cpTimer);
    root._cpTimer = setInterval(function () {{ show(current + 1); }}, {interval});
  }}
}})();"#,
            id = js_string(&component.dom_id()),
            autoplay = autoplay,
            interval = format_number(interval),
        )),
    ])
}
