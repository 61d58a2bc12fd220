//! Document assembler: stitches head, server blocks, the composed body and
//! the page-level chrome into one HTML document.

use crate::client_script::CLIENT_SCRIPT;
use crate::compose::Composer;
use crate::context::{GenerateOptions, RenderContext};
use crate::cookie_banner::render_cookie_banner;
use crate::markup::{Element, Node};
use crate::tracking::tracking_snippets;
use cloudpage_compiler_css::{global_stylesheet, google_font_url};
use cloudpage_compiler_script::ampscript::{else_branch, end_if, equals, open_if};
use cloudpage_compiler_script::names::IS_AUTHENTICATED;
use cloudpage_compiler_script::{
    emit_form_submission_script, emit_security_script, prefill_block, variable_block,
    SecurityScript,
};
use cloudpage_model::{CloudPage, ComponentTree, ComponentType};
use tracing::{info, instrument, warn};

struct Context {
    depth: usize,
    buffer: String,
}

impl Context {
    fn new() -> Self {
        Self {
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add_line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.buffer.push_str("  ");
        }
        self.buffer.push_str(text);
        self.buffer.push('\n');
    }

    /// Adds multi-line text one line at a time at the current depth
    fn add_block(&mut self, text: &str) {
        for line in text.trim_end().lines() {
            if line.trim().is_empty() {
                continue;
            }
            self.add_line(line);
        }
    }

    /// Adds designer-supplied text byte for byte, on its own lines
    fn add_raw(&mut self, text: &str) {
        self.buffer.push_str(text);
        if !text.ends_with('\n') {
            self.buffer.push('\n');
        }
    }

    fn add_node(&mut self, node: &Node) {
        if !node.is_empty() {
            self.add_line(&node.to_html());
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

/// Generate the complete document for a page. Never fails: bad input
/// degrades to fallback markup and a logged warning.
#[instrument(skip(page, options), fields(page_id = %page.id, preview = options.is_for_preview))]
pub fn generate_document(page: &CloudPage, options: &GenerateOptions) -> String {
    info!(components = page.components.len(), "Generating document");

    let render = RenderContext::new(page, options);
    let tree = ComponentTree::new(&page.components);
    for node in tree.unreachable() {
        warn!(id = %node.id, parent = ?node.parent_id, "Component is not reachable from the page root and will not render");
    }

    let mut ctx = Context::new();
    ctx.add_line("<!DOCTYPE html>");
    ctx.add_line(&format!(
        "<html lang=\"{}\">",
        page.meta.language.as_deref().map(str::trim).filter(|l| !l.is_empty()).unwrap_or("en")
    ));
    ctx.indent();

    let tracking = tracking_snippets(&page.meta.tracking);
    compile_head(page, &render, &tracking.head, &mut ctx);

    ctx.add_line("<body>");
    ctx.indent();
    for snippet in &tracking.body {
        ctx.add_line(snippet);
    }
    let security = emit_security_script(page);
    compile_server_blocks(page, &render, &security, &mut ctx);

    ctx.add_line(&open_if(&equals(IS_AUTHENTICATED, "true")));
    compile_visible_body(page, &render, &tree, &mut ctx);
    ctx.add_line(else_branch());
    ctx.add_block(&security.body_html);
    ctx.add_line(end_if());

    ctx.dedent();
    ctx.add_line("</body>");
    ctx.dedent();
    ctx.add_line("</html>");

    let output = ctx.get_output();
    info!(bytes = output.len(), "Generated document");
    output
}

fn compile_head(page: &CloudPage, render: &RenderContext, tracking: &[String], ctx: &mut Context) {
    ctx.add_line("<head>");
    ctx.indent();

    ctx.add_line("<meta charset=\"UTF-8\">");
    ctx.add_line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">");
    ctx.add_line(&format!("<title>{}</title>", page.title()));

    let meta = &page.meta;
    let tag = |name_attr: &str, name: &str, content: Option<&str>| -> Option<Element> {
        let content = content.map(str::trim).filter(|c| !c.is_empty())?;
        Some(
            Element::new("meta")
                .with_attr(name_attr, name)
                .with_attr("content", content),
        )
    };
    let tags = [
        tag("name", "description", meta.description.as_deref()),
        tag("name", "keywords", meta.keywords.as_deref()),
        tag("property", "og:title", Some(page.title())),
        tag("property", "og:description", meta.description.as_deref()),
        tag("property", "og:image", meta.og_image.as_deref()),
    ];
    for element in tags.into_iter().flatten() {
        ctx.add_line(&element.to_html());
    }

    if let Some(favicon) = meta.favicon.as_deref().map(str::trim).filter(|f| !f.is_empty()) {
        ctx.add_line(&Element::new("link").with_attr("rel", "icon").with_attr("href", favicon).to_html());
    }
    ctx.add_line(&format!("<meta name=\"theme-color\" content=\"{}\">", render.theme.primary));

    if let Some(url) = google_font_url(&render.theme.webfonts()) {
        ctx.add_line("<link rel=\"preconnect\" href=\"https://fonts.googleapis.com\">");
        ctx.add_line("<link rel=\"preconnect\" href=\"https://fonts.gstatic.com\" crossorigin>");
        ctx.add_line(&Element::new("link").with_attr("href", url).with_attr("rel", "stylesheet").to_html());
    }

    for snippet in tracking {
        ctx.add_block(snippet);
    }

    ctx.add_line("<style>");
    ctx.add_block(&global_stylesheet(&render.theme));
    if let Some(css) = page.styles.custom_css.as_deref().filter(|c| !c.trim().is_empty()) {
        ctx.add_raw(css);
    }
    ctx.add_line("</style>");
    ctx.add_line("<script>");
    ctx.add_block(CLIENT_SCRIPT);
    ctx.add_line("</script>");

    ctx.dedent();
    ctx.add_line("</head>");
}

/// Template and server blocks that run before anything visible
fn compile_server_blocks(
    page: &CloudPage,
    render: &RenderContext,
    security: &SecurityScript,
    ctx: &mut Context,
) {
    ctx.add_block(&variable_block(page, &render.form_schema, render.branch_variants()));

    if let Some(script) = &security.server_script {
        ctx.add_block(script);
    }
    ctx.add_block(&security.template_script);

    if let Some(custom) = page.meta.custom_ampscript.as_deref().filter(|s| !s.trim().is_empty()) {
        if custom.contains("%%[") {
            ctx.add_raw(custom);
        } else {
            ctx.add_line("%%[");
            ctx.add_raw(custom);
            ctx.add_line("]%%");
        }
    }

    if let Some(prefill) = prefill_block(&render.form_schema) {
        ctx.add_block(&prefill);
    }
    if let Some(submission) = emit_form_submission_script(page) {
        ctx.add_block(&submission);
    }
}

/// Everything shown to an authenticated visitor
fn compile_visible_body(
    page: &CloudPage,
    render: &RenderContext,
    tree: &ComponentTree,
    ctx: &mut Context,
) {
    let loader = match page.meta.loader_image.as_deref().map(str::trim).filter(|l| !l.is_empty()) {
        Some(src) => Element::new("img").with_attr("src", src).with_attr("alt", "Loading"),
        None => Element::new("div").with_class("cp-spinner"),
    };
    ctx.add_node(
        &Element::new("div")
            .with_attr("id", "cp-loading")
            .with_attr("aria-hidden", "true")
            .with_child(loader)
            .into(),
    );

    let composer = Composer::new(tree, render);
    let roots = tree.roots();
    for stripe in roots.iter().filter(|c| c.component_type() == ComponentType::Stripe) {
        ctx.add_node(&composer.render_page_level(stripe));
    }

    let content = composer.render_page();
    ctx.add_line("<main class=\"cp-page\">");
    ctx.indent();
    if let Node::Fragment(sections) = &content {
        for section in sections {
            ctx.add_node(section);
        }
    } else {
        ctx.add_node(&content);
    }
    ctx.dedent();
    ctx.add_line("</main>");

    if let Some(whatsapp) = roots.iter().find(|c| c.component_type() == ComponentType::WhatsApp) {
        ctx.add_node(&composer.render_page_level(whatsapp));
    }
    if let Some(banner) = page.cookie_banner.as_ref().and_then(render_cookie_banner) {
        ctx.add_node(&banner);
    }
    if !render.options.is_for_preview {
        ctx.add_node(&pixel(&render.options.base_url, &page.id).into());
    }
}

/// Invisible page-view pixel
fn pixel(base_url: &str, page_id: &str) -> Element {
    Element::new("img")
        .with_attr(
            "src",
            format!(
                "{}/api/pixel/{}",
                base_url.trim_end_matches('/'),
                urlencoding::encode(page_id)
            ),
        )
        .with_attr("width", "1")
        .with_attr("height", "1")
        .with_attr("alt", "")
        .with_class("cp-pixel")
        .with_style("display: none;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_url() {
        assert_eq!(
            pixel("https://studio.example.com/", "page 1").to_html(),
            r#"<img src="https://studio.example.com/api/pixel/page%201" width="1" height="1" alt="" class="cp-pixel" style="display: none;">"#
        );
    }

    #[test]
    fn test_context_indents_blocks() {
        let mut ctx = Context::new();
        ctx.add_line("<a>");
        ctx.indent();
        ctx.add_block("x\n\ny\n");
        ctx.dedent();
        ctx.add_line("</a>");
        assert_eq!(ctx.get_output(), "<a>\n  x\n  y\n</a>\n");
    }

    #[test]
    fn test_raw_text_keeps_blank_lines_and_indentation() {
        let mut ctx = Context::new();
        ctx.add_line("<a>");
        ctx.indent();
        ctx.add_raw("SET @s = \"line one\n\n    line two\"");
        ctx.dedent();
        ctx.add_line("</a>");
        assert_eq!(
            ctx.get_output(),
            "<a>\nSET @s = \"line one\n\n    line two\"\n</a>\n"
        );
    }
}
