//! `Div` and `Columns`: the two components that own children.
//!
//! Both receive their children already rendered. Background keys are painted
//! from a [`Background`] rather than serialized as plain CSS.

use super::root;
use crate::markup::{Element, Node};
use cloudpage_compiler_css::{serialize_styles, Background, StyleFilter, BACKGROUND_KEYS};
use cloudpage_model::format_number;
use cloudpage_model::props::{ColumnsProps, DivProps};
use cloudpage_model::{PageComponent, StyleMap};
use tracing::debug;

pub fn render_div(component: &PageComponent, props: &DivProps, inner: Node) -> Node {
    let body = root(component, "div");
    paint(body, &props.common.styles, props.full_width, vec![inner])
}

pub fn render_columns(component: &PageComponent, props: &ColumnsProps, columns: Vec<Node>) -> Node {
    let count = props.columns() as usize;
    let mut grid = root(component, "div")
        .with_class_if("cp-columns-stack", props.stack_on_mobile != Some(false))
        .with_style(format!("grid-template-columns: {};", grid_template(props)));
    if let Some(gap) = props.gap.as_ref().and_then(|g| g.as_length()) {
        grid = grid.with_style(format!("gap: {};", gap));
    }
    grid = grid.with_style(format!("align-items: {};", props.vertical_align.as_css()));

    let mut slots = columns.into_iter();
    let cells: Vec<Node> = (0..count)
        .map(|index| {
            let content = slots.next().unwrap_or_else(Node::empty);
            let style = props
                .column_styles
                .get(index)
                .map(|styles| serialize_styles(styles, StyleFilter::ALL))
                .unwrap_or_default();
            Element::new("div")
                .with_class("cp-column")
                .with_attr("data-column", index.to_string())
                .with_style(style)
                .with_child(content)
                .into()
        })
        .collect();

    paint(grid, &props.common.styles, props.full_width, cells)
}

/// `grid-template-columns` for a Columns node. Explicit widths are used only
/// when there is one per column, each positive, summing to 100.
pub fn grid_template(props: &ColumnsProps) -> String {
    let count = props.columns();
    match props.valid_widths() {
        Some(widths) => widths
            .iter()
            .map(|w| format!("{}fr", format_number(*w)))
            .collect::<Vec<_>>()
            .join(" "),
        None => {
            if !props.column_widths.is_empty() {
                debug!(count, widths = ?props.column_widths, "Ignoring column widths");
            }
            format!("repeat({}, 1fr)", count)
        }
    }
}

/// Applies styles and background to `body`. Full-width containers move the
/// background to an outer `cp-full-width` wrapper so it spans the viewport
/// while `body` keeps its padding and id.
fn paint(body: Element, styles: &StyleMap, full_width: bool, children: Vec<Node>) -> Node {
    let background = Background::from_styles(styles);
    let body = body.with_style(serialize_styles(styles, StyleFilter::forbid(BACKGROUND_KEYS)));
    let overlay = background.overlay().map(|color| {
        Node::from(
            Element::new("div")
                .with_class("cp-bg-overlay")
                .with_style(format!("background-color: {};", color)),
        )
    });

    if full_width {
        let mut outer = Element::new("div")
            .with_class("cp-full-width")
            .with_style(background.declarations());
        if let Some(overlay) = overlay {
            outer = outer.with_child(overlay);
        }
        return outer
            .with_child(body.with_class("cp-bg-content").with_children(children))
            .into();
    }

    let body = body.with_style(background.declarations());
    match overlay {
        Some(overlay) => body
            .with_child(overlay)
            .with_child(Element::new("div").with_class("cp-bg-content").with_children(children))
            .into(),
        None => body.with_children(children).into(),
    }
}
