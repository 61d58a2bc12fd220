//! Server-script (SSJS) builder

use crate::ampscript::Lines;

pub const PLATFORM_LOAD: &str = r#"Platform.Load("Core", "1.1.1");"#;

/// JavaScript string literal
pub fn js_string(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

/// `[a, b, c]` of string literals
pub fn js_string_array<'a>(values: impl IntoIterator<Item = &'a str>) -> String {
    let items: Vec<String> = values.into_iter().map(js_string).collect();
    format!("[{}]", items.join(", "))
}

/// Line-oriented script body with brace-aware indentation
#[derive(Debug, Default)]
pub struct ServerScript {
    lines: Lines,
}

impl ServerScript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(&mut self, text: &str) -> &mut Self {
        self.lines.line(text);
        self
    }

    /// Writes `header {` and indents
    pub fn open(&mut self, header: &str) -> &mut Self {
        self.lines.line(&format!("{} {{", header));
        self.lines.indent();
        self
    }

    pub fn close(&mut self) -> &mut Self {
        self.lines.dedent();
        self.lines.line("}");
        self
    }

    /// `} else {` or `} catch (e) {` without changing depth
    pub fn else_branch(&mut self, header: &str) -> &mut Self {
        self.lines.dedent();
        self.lines.line(&format!("}} {} {{", header));
        self.lines.indent();
        self
    }

    /// `Variable.SetValue("@var", expr);`
    pub fn set_variable(&mut self, variable: &str, expr: &str) -> &mut Self {
        self.line(&format!("Variable.SetValue({}, {});", js_string(variable), expr))
    }

    /// Wrapped in `<script runat="server">` with the platform load line
    pub fn render(self) -> String {
        let mut out = String::from("<script runat=\"server\">\n");
        out.push_str(PLATFORM_LOAD);
        out.push('\n');
        out.push_str(&self.lines.finish());
        out.push_str("</script>");
        out
    }
}
