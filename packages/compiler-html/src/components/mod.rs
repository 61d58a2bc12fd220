//! One renderer per component type.
//!
//! Every renderer is a pure function of the component, its typed props and
//! the [`RenderContext`]. Missing optional props fall back to documented
//! defaults; nothing here fails.

pub mod button;
pub mod containers;
pub mod embed;
pub mod form;
pub mod interactive;
pub mod media;
pub mod page_level;
pub mod structure;
pub mod text;
pub mod upload;

use crate::context::RenderContext;
use crate::markup::{Element, Node};
use cloudpage_compiler_css::{serialize_styles, StyleFilter};
use cloudpage_model::{ComponentProps, PageComponent};

/// Render a component without children. Containers rendered through here
/// come out empty; the composer renders them with their children instead.
pub fn render_component(component: &PageComponent, ctx: &RenderContext) -> Node {
    match &component.props {
        ComponentProps::Header(p) => structure::render_header(component, p),
        ComponentProps::Banner(p) => media::render_banner(component, p),
        ComponentProps::Title(p) | ComponentProps::Subtitle(p) | ComponentProps::Paragraph(p) => {
            text::render_text(component, p, ctx)
        }
        ComponentProps::Image(p) => media::render_image(component, p),
        ComponentProps::FloatingImage(p) => media::render_floating_image(component, p),
        ComponentProps::Video(p) => media::render_video(component, p),
        ComponentProps::Carousel(p) => media::render_carousel(component, p),
        ComponentProps::Countdown(p) => interactive::render_countdown(component, p),
        ComponentProps::Divider(p) => structure::render_divider(component, p),
        ComponentProps::Spacer(p) => structure::render_spacer(component, p),
        ComponentProps::Button(p) => button::render_button(component, p, ctx),
        ComponentProps::DownloadButton(p) => button::render_download_button(component, p, ctx),
        ComponentProps::FloatingButton(p) => button::render_floating_button(component, p, ctx),
        ComponentProps::Form(p) => form::render_form(component, p, ctx),
        ComponentProps::Accordion(p) => interactive::render_accordion(component, p),
        ComponentProps::Tabs(p) => interactive::render_tabs(component, p),
        ComponentProps::Voting(p) => interactive::render_voting(component, p),
        ComponentProps::Stripe(p) => page_level::render_stripe(component, p),
        ComponentProps::Nps(p) => interactive::render_nps(component, p),
        ComponentProps::Map(p) => embed::render_map(component, p),
        ComponentProps::SocialIcons(p) => embed::render_social_icons(component, p),
        ComponentProps::WhatsApp(p) => page_level::render_whatsapp(component, p),
        ComponentProps::FtpUpload(p) => upload::render_ftp_upload(component, p),
        ComponentProps::DataExtensionUpload(p) => upload::render_de_upload(component, p),
        ComponentProps::Calendly(p) => embed::render_calendly(component, p),
        ComponentProps::AddToCalendar(p) => embed::render_add_to_calendar(component, p),
        ComponentProps::PopUp(p) => interactive::render_popup(component, p),
        ComponentProps::CustomHtml(p) => embed::render_custom_html(component, p),
        ComponentProps::Div(p) => containers::render_div(component, p, Node::empty()),
        ComponentProps::Columns(p) => {
            let empty = vec![Node::empty(); p.columns() as usize];
            containers::render_columns(component, p, empty)
        }
        ComponentProps::Footer(p) => structure::render_footer(component, p),
    }
}

/// `<tag id="cp-<id>" class="cp-<type>">`
pub(crate) fn root(component: &PageComponent, tag: &str) -> Element {
    Element::new(tag)
        .with_attr("id", component.dom_id())
        .with_class(format!("cp-{}", component.component_type().css_name()))
}

/// [`root`] carrying the component's own styles inline
pub(crate) fn styled_root(component: &PageComponent, tag: &str) -> Element {
    root(component, tag).with_style(serialize_styles(
        &component.common().styles,
        StyleFilter::ALL,
    ))
}

pub(crate) fn script(js: impl Into<String>) -> Node {
    Element::new("script").with_text(js).into()
}

pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Anchor opening in a new tab when asked
pub(crate) fn link(href: &str, new_tab: bool) -> Element {
    Element::new("a")
        .with_attr("href", href)
        .with_attr_opt("target", new_tab.then_some("_blank"))
        .with_attr_opt("rel", new_tab.then_some("noopener noreferrer"))
}

pub const PLACEHOLDER_IMAGE: &str = "https://placehold.co/800x400?text=Image";
