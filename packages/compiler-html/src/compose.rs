//! Tree composer.
//!
//! Walks the component arena slot by slot, renders each node, wraps it in a
//! section and, in the published document, branches A/B components through
//! template conditionals. Containers render their children first and receive
//! them as opaque nodes.

use crate::components::{containers, render_component};
use crate::context::RenderContext;
use crate::markup::{Element, Node};
use cloudpage_compiler_css::mobile_override;
use cloudpage_compiler_script::ampscript::{else_branch, end_if, equals, open_if};
use cloudpage_compiler_script::names::ab_variable;
use cloudpage_model::ident::camel_to_kebab;
use cloudpage_model::{ComponentProps, ComponentTree, PageComponent, Slot};
use tracing::{debug, warn};

/// Nesting depth past which children are dropped
pub const MAX_DEPTH: usize = 32;

pub struct Composer<'t, 'c> {
    tree: &'t ComponentTree<'c>,
    ctx: &'t RenderContext<'c>,
}

impl<'t, 'c> Composer<'t, 'c> {
    pub fn new(tree: &'t ComponentTree<'c>, ctx: &'t RenderContext<'c>) -> Self {
        Self { tree, ctx }
    }

    /// The page's main content flow. Page-level components are left to the
    /// document assembler.
    pub fn render_page(&self) -> Node {
        let nodes = self
            .tree
            .roots()
            .into_iter()
            .filter(|c| !c.component_type().is_page_level())
            .map(|c| self.render_node(c, 0))
            .collect();
        Node::Fragment(nodes)
    }

    /// Every child of `slot`, in order, each wrapped in its section
    pub fn render_slot(&self, slot: &Slot, depth: usize) -> Node {
        if depth > MAX_DEPTH {
            warn!(parent = ?slot.parent, depth, "Maximum nesting depth exceeded, dropping children");
            return Node::empty();
        }
        Node::Fragment(
            self.tree
                .children(slot)
                .into_iter()
                .map(|c| self.render_node(c, depth))
                .collect(),
        )
    }

    /// One component in its section wrapper, A/B branched when active
    pub fn render_node(&self, component: &PageComponent, depth: usize) -> Node {
        debug!(id = %component.id, component_type = %component.component_type(), depth, "Rendering component");

        let body = if self.ctx.branch_variants() && component.has_ab_test() {
            self.render_ab(component, depth)
        } else {
            self.render_body(component, depth)
        };
        section(component, depth, body)
    }

    /// A page-level component without the section wrapper, still A/B branched
    pub fn render_page_level(&self, component: &PageComponent) -> Node {
        debug!(id = %component.id, component_type = %component.component_type(), "Rendering page-level component");
        if self.ctx.branch_variants() && component.has_ab_test() {
            self.render_ab(component, 0)
        } else {
            self.render_body(component, 0)
        }
    }

    fn render_ab(&self, component: &PageComponent, depth: usize) -> Node {
        let variant = match component.variant_b() {
            Ok(variant) => variant,
            Err(e) => {
                warn!(id = %component.id, error = %e, "A/B variant could not be applied, rendering base only");
                return self.render_body(component, depth);
            }
        };

        let variable = ab_variable(&component.id);
        let branch = |label: &str, body: Node| -> Node {
            Element::new("div")
                .with_class("ab-variant")
                .with_class(format!("ab-variant-{}", label.to_ascii_lowercase()))
                .with_attr("data-ab-test", component.id.as_str())
                .with_attr("data-variant", label)
                .with_child(body)
                .into()
        };

        Node::Fragment(vec![
            Node::raw(open_if(&equals(&variable, "A"))),
            branch("A", self.render_body(component, depth)),
            Node::raw(else_branch()),
            branch("B", self.render_body(&variant, depth)),
            Node::raw(end_if()),
        ])
    }

    /// The component itself, with children for containers
    fn render_body(&self, component: &PageComponent, depth: usize) -> Node {
        match &component.props {
            ComponentProps::Div(props) => {
                let inner = self.render_slot(&Slot::child_of(&component.id, None), depth + 1);
                containers::render_div(component, props, inner)
            }
            ComponentProps::Columns(props) => {
                let columns = (0..props.columns())
                    .map(|index| {
                        self.render_slot(&Slot::child_of(&component.id, Some(index)), depth + 1)
                    })
                    .collect();
                containers::render_columns(component, props, columns)
            }
            _ => render_component(component, self.ctx),
        }
    }
}

/// `<section>` wrapper carrying layout, visibility and animation classes,
/// followed by the component's mobile overrides
fn section(component: &PageComponent, depth: usize, body: Node) -> Node {
    let common = component.common();
    let mut wrapper = Element::new("section")
        .with_class("cp-section")
        .with_class(format!("cp-section-{}", component.component_type().css_name()))
        .with_class_if("cp-nested", depth > 0)
        .with_class_if("cp-hide-mobile", common.hide_on_mobile)
        .with_class_if("cp-hide-desktop", common.hide_on_desktop)
        .with_attr("data-component", component.id.as_str());

    if let Some(layout) = &common.layout {
        if let Some(alignment) = layout.alignment {
            wrapper = wrapper.with_class(format!("cp-align-{}", alignment.as_css()));
        }
        if let Some(max_width) = layout.max_width.as_ref().and_then(|w| w.as_length()) {
            wrapper = wrapper.with_style(format!("max-width: {};", max_width));
        }
    }
    if let Some(class_name) = common.class_name.as_deref() {
        wrapper = wrapper.with_class(class_name);
    }
    if let Some(animation) = &common.animation {
        if let Some(kind) = animation_class(animation.kind.as_deref()) {
            wrapper = wrapper.with_class("cp-animate").with_class(kind);
            if let Some(duration) = animation.duration.filter(|d| *d > 0.0) {
                wrapper = wrapper.with_style(format!("animation-duration: {}s;", duration));
            }
            if let Some(delay) = animation.delay.filter(|d| *d > 0.0) {
                wrapper = wrapper.with_style(format!("animation-delay: {}s;", delay));
            }
        }
    }

    wrapper = wrapper.with_child(body);
    if let Some(css) = mobile_override(&format!("#{}", component.dom_id()), &common.mobile_styles) {
        wrapper = wrapper.with_child(Element::new("style").with_text(css));
    }
    wrapper.into()
}

/// `fadeIn` / `fade-in` → `cp-anim-fade-in`; `none` disables
fn animation_class(kind: Option<&str>) -> Option<String> {
    let kind = kind.map(str::trim).filter(|k| !k.is_empty() && *k != "none")?;
    Some(format!("cp-anim-{}", camel_to_kebab(kind).trim_start_matches('-')))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::GenerateOptions;
    use cloudpage_model::CloudPage;

    fn compose(page: &CloudPage, options: &GenerateOptions) -> String {
        let ctx = RenderContext::new(page, options);
        let tree = ComponentTree::new(&page.components);
        Composer::new(&tree, &ctx).render_page().to_html()
    }

    #[test]
    fn test_animation_class() {
        assert_eq!(animation_class(Some("fadeIn")).as_deref(), Some("cp-anim-fade-in"));
        assert_eq!(animation_class(Some("slide-up")).as_deref(), Some("cp-anim-slide-up"));
        assert_eq!(animation_class(Some("none")), None);
        assert_eq!(animation_class(None), None);
    }

    #[test]
    fn test_children_render_inside_their_column() {
        let page = CloudPage::from_json(
            r#"{
                "id": "p",
                "components": [
                    {"id": "row", "type": "Columns", "props": {"columnCount": 2}},
                    {"id": "right", "type": "Paragraph", "parentId": "row", "column": 1, "props": {"text": "RIGHT"}},
                    {"id": "left", "type": "Paragraph", "parentId": "row", "column": 0, "props": {"text": "LEFT"}}
                ]
            }"#,
        )
        .unwrap();
        let html = compose(&page, &GenerateOptions::preview());
        println!("{}", html);
        let left = html.find("LEFT").unwrap();
        let right = html.find("RIGHT").unwrap();
        assert!(left < right);
        assert!(html.contains(r#"class="cp-section cp-section-paragraph cp-nested""#));
        assert_eq!(html.matches("<section").count(), 3);
    }

    #[test]
    fn test_page_level_components_are_skipped() {
        let page = CloudPage::from_json(
            r#"{
                "components": [
                    {"id": "s", "type": "Stripe", "props": {"text": "Sale"}},
                    {"id": "t", "type": "Title", "props": {"text": "Hi"}}
                ]
            }"#,
        )
        .unwrap();
        let html = compose(&page, &GenerateOptions::preview());
        assert!(!html.contains("Sale"));
        assert!(html.contains("Hi"));
    }

    #[test]
    fn test_ab_branching_only_when_published() {
        let page = CloudPage::from_json(
            r#"{
                "components": [
                    {"id": "hero", "type": "Title", "props": {"text": "Base"},
                     "abTestEnabled": true, "abTestVariants": [{"text": "Other"}]}
                ]
            }"#,
        )
        .unwrap();

        let preview = compose(&page, &GenerateOptions::preview());
        assert!(!preview.contains("%%["));
        assert!(!preview.contains("Other"));

        let published = compose(&page, &GenerateOptions::published("https://x.example"));
        println!("{}", published);
        assert!(published.contains(r#"%%[ IF @abVariant_HERO == "A" THEN ]%%"#));
        assert!(published.contains(r#"data-ab-test="hero" data-variant="B""#));
        assert!(published.contains("Other"));
        assert!(published.contains("%%[ ENDIF ]%%"));
    }

    #[test]
    fn test_mobile_override_targets_component_root() {
        let page = CloudPage::from_json(
            r#"{"components": [{"id": "t", "type": "Title", "props": {"text": "x", "mobileStyles": {"fontSize": "20px"}}}]}"#,
        )
        .unwrap();
        let html = compose(&page, &GenerateOptions::preview());
        assert!(html.contains("@media (max-width: 768px) { #cp-t { font-size: 20px !important; } }"));
    }
}
