//! HTML output tree.
//!
//! Renderers build [`Node`]s instead of concatenating strings so that
//! attribute quoting lives in one place. Text and script bodies are written
//! verbatim: designer-authored copy may carry inline markup and template
//! segments that must reach the output untouched.

/// A node of the output tree
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    /// Written as-is
    Raw(String),
    Fragment(Vec<Node>),
}

impl Node {
    pub fn raw(text: impl Into<String>) -> Self {
        Node::Raw(text.into())
    }

    pub fn empty() -> Self {
        Node::Fragment(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Node::Element(_) => false,
            Node::Raw(text) => text.is_empty(),
            Node::Fragment(nodes) => nodes.iter().all(Node::is_empty),
        }
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write(&mut out);
        out
    }

    pub fn write(&self, out: &mut String) {
        match self {
            Node::Element(element) => element.write(out),
            Node::Raw(text) => out.push_str(text),
            Node::Fragment(nodes) => {
                for node in nodes {
                    node.write(out);
                }
            }
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Raw(text)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Raw(text.to_string())
    }
}

impl From<Vec<Node>> for Node {
    fn from(nodes: Vec<Node>) -> Self {
        Node::Fragment(nodes)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: String,
    pub classes: Vec<String>,
    pub style: String,
    /// `None` value renders a bare boolean attribute
    pub attributes: Vec<(String, Option<String>)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            classes: Vec::new(),
            style: String::new(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), Some(value.into())));
        self
    }

    /// Adds the attribute only when `value` is set and non-empty
    pub fn with_attr_opt(self, key: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value.map(Into::<String>::into) {
            Some(value) if !value.is_empty() => self.with_attr(key, value),
            _ => self,
        }
    }

    pub fn with_flag(mut self, key: impl Into<String>) -> Self {
        self.attributes.push((key.into(), None));
        self
    }

    pub fn with_flag_if(self, key: impl Into<String>, on: bool) -> Self {
        if on {
            self.with_flag(key)
        } else {
            self
        }
    }

    /// Appends one or more space-separated classes; empty input is ignored
    pub fn with_class(mut self, class: impl AsRef<str>) -> Self {
        for name in class.as_ref().split_whitespace() {
            if !self.classes.iter().any(|c| c == name) {
                self.classes.push(name.to_string());
            }
        }
        self
    }

    pub fn with_class_if(self, class: impl AsRef<str>, on: bool) -> Self {
        if on {
            self.with_class(class)
        } else {
            self
        }
    }

    /// Appends CSS declarations to the inline style
    pub fn with_style(mut self, declarations: impl AsRef<str>) -> Self {
        let declarations = declarations.as_ref().trim();
        if !declarations.is_empty() {
            if !self.style.is_empty() {
                self.style.push(' ');
            }
            self.style.push_str(declarations);
        }
        self
    }

    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_child(Node::Raw(text.into()))
    }

    pub fn id(&self) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == "id")
            .and_then(|(_, v)| v.as_deref())
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write(&mut out);
        out
    }

    pub fn write(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (key, value) in &self.attributes {
            out.push(' ');
            out.push_str(key);
            if let Some(value) = value {
                out.push_str("=\"");
                out.push_str(&escape_attr(value));
                out.push('"');
            }
        }
        if !self.classes.is_empty() {
            out.push_str(" class=\"");
            out.push_str(&escape_attr(&self.classes.join(" ")));
            out.push('"');
        }
        if !self.style.is_empty() {
            out.push_str(" style=\"");
            out.push_str(&escape_attr(&self.style));
            out.push('"');
        }
        out.push('>');

        if is_void(&self.tag) {
            return;
        }
        for child in &self.children {
            child.write(out);
        }
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }
}

/// Only `"` is escaped; everything else in an attribute value is designer
/// input or a template segment and is kept byte-for-byte
pub fn escape_attr(value: &str) -> String {
    value.replace('"', "&quot;")
}

fn is_void(tag: &str) -> bool {
    matches!(
        tag,
        "img"
            | "input"
            | "br"
            | "hr"
            | "meta"
            | "link"
            | "area"
            | "base"
            | "col"
            | "embed"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_rendering() {
        let html = Element::new("a")
            .with_attr("href", "https://x.com/?a=1&b=\"2\"")
            .with_class("cp-button")
            .with_class("cp-button  cp-button-full")
            .with_style("color: red;")
            .with_style("")
            .with_text("Go")
            .to_html();
        assert_eq!(
            html,
            r#"<a href="https://x.com/?a=1&b=&quot;2&quot;" class="cp-button cp-button-full" style="color: red;">Go</a>"#
        );
    }

    #[test]
    fn test_void_and_flags() {
        let html = Element::new("input")
            .with_attr("type", "checkbox")
            .with_flag("required")
            .with_flag_if("checked", false)
            .with_attr_opt("placeholder", None::<String>)
            .with_attr_opt("value", Some(""))
            .to_html();
        assert_eq!(html, r#"<input type="checkbox" required>"#);
    }

    #[test]
    fn test_template_segments_survive() {
        let html = Element::new("input")
            .with_attr("value", "%%=v(@email)=%%")
            .to_html();
        assert_eq!(html, r#"<input value="%%=v(@email)=%%">"#);
    }

    #[test]
    fn test_fragment_emptiness() {
        assert!(Node::empty().is_empty());
        assert!(Node::Fragment(vec![Node::raw("")]).is_empty());
        assert!(!Node::from(Element::new("br")).is_empty());
    }
}
