//! Template-language (AMPscript) statement builder.
//!
//! Statements are collected into an [`AmpBlock`] and rendered once as a
//! `%%[ ... ]%%` control segment. Inline helpers ([`interpolate`],
//! [`open_if`], [`else_branch`], [`end_if`]) produce the segments that are
//! interleaved with literal HTML.

/// Double-quoted string literal; embedded quotes are doubled
pub fn string_literal(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// `%%=v(@Var)=%%`
pub fn interpolate(variable: &str) -> String {
    format!("%%=v({})=%%", variable)
}

pub fn open_if(condition: &str) -> String {
    format!("%%[ IF {} THEN ]%%", condition)
}

pub fn else_branch() -> &'static str {
    "%%[ ELSE ]%%"
}

pub fn end_if() -> &'static str {
    "%%[ ENDIF ]%%"
}

/// `@var == "value"`
pub fn equals(variable: &str, value: &str) -> String {
    format!("{} == {}", variable, string_literal(value))
}

pub fn request_parameter(name: &str) -> String {
    format!("RequestParameter({})", string_literal(name))
}

pub fn attribute_value(name: &str) -> String {
    format!("AttributeValue({})", string_literal(name))
}

#[derive(Debug, Clone, PartialEq)]
pub enum AmpStatement {
    Var(Vec<String>),
    Set { variable: String, expr: String },
    If {
        condition: String,
        then: Vec<AmpStatement>,
        otherwise: Vec<AmpStatement>,
    },
    /// Bare function call or verbatim text
    Raw(String),
}

impl AmpStatement {
    pub fn set(variable: impl Into<String>, expr: impl Into<String>) -> Self {
        AmpStatement::Set {
            variable: variable.into(),
            expr: expr.into(),
        }
    }

    pub fn set_str(variable: impl Into<String>, value: &str) -> Self {
        Self::set(variable, string_literal(value))
    }

    fn write(&self, out: &mut Lines) {
        match self {
            AmpStatement::Var(vars) => {
                if !vars.is_empty() {
                    out.line(&format!("VAR {}", vars.join(", ")));
                }
            }
            AmpStatement::Set { variable, expr } => {
                out.line(&format!("SET {} = {}", variable, expr));
            }
            AmpStatement::If {
                condition,
                then,
                otherwise,
            } => {
                out.line(&format!("IF {} THEN", condition));
                out.indent();
                for statement in then {
                    statement.write(out);
                }
                out.dedent();
                if !otherwise.is_empty() {
                    out.line("ELSE");
                    out.indent();
                    for statement in otherwise {
                        statement.write(out);
                    }
                    out.dedent();
                }
                out.line("ENDIF");
            }
            AmpStatement::Raw(text) => {
                for line in text.lines() {
                    out.line(line);
                }
            }
        }
    }
}

/// An ordered list of statements rendered as one control segment
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AmpBlock {
    statements: Vec<AmpStatement>,
}

impl AmpBlock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, statement: AmpStatement) -> &mut Self {
        self.statements.push(statement);
        self
    }

    pub fn var(&mut self, variables: Vec<String>) -> &mut Self {
        self.push(AmpStatement::Var(variables))
    }

    pub fn set(&mut self, variable: impl Into<String>, expr: impl Into<String>) -> &mut Self {
        self.push(AmpStatement::set(variable, expr))
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn statements(&self) -> &[AmpStatement] {
        &self.statements
    }

    pub fn render(&self) -> String {
        let mut out = Lines::default();
        out.line("%%[");
        out.indent();
        for statement in &self.statements {
            statement.write(&mut out);
        }
        out.dedent();
        out.line("]%%");
        out.finish()
    }
}

/// Indented line buffer shared by both script builders
#[derive(Debug, Default)]
pub(crate) struct Lines {
    buffer: String,
    depth: usize,
}

impl Lines {
    pub(crate) fn line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.buffer.push_str("  ");
        }
        self.buffer.push_str(text);
        self.buffer.push('\n');
    }

    pub(crate) fn indent(&mut self) {
        self.depth += 1;
    }

    pub(crate) fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    pub(crate) fn finish(self) -> String {
        self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_literal_doubles_quotes() {
        assert_eq!(string_literal(r#"say "hi""#), r#""say ""hi""""#);
    }

    #[test]
    fn test_inline_segments() {
        assert_eq!(interpolate("@FirstName"), "%%=v(@FirstName)=%%");
        assert_eq!(
            open_if(&equals("@formSubmitted", "true")),
            r#"%%[ IF @formSubmitted == "true" THEN ]%%"#
        );
    }

    #[test]
    fn test_block_render() {
        let mut block = AmpBlock::new();
        block
            .var(vec!["@a".to_string(), "@b".to_string()])
            .set("@a", request_parameter("a"))
            .push(AmpStatement::If {
                condition: "EMPTY(@a)".to_string(),
                then: vec![AmpStatement::set_str("@a", "x")],
                otherwise: vec![],
            });

        let text = block.render();
        println!("{}", text);
        assert_eq!(
            text,
            "%%[\n  VAR @a, @b\n  SET @a = RequestParameter(\"a\")\n  IF EMPTY(@a) THEN\n    SET @a = \"x\"\n  ENDIF\n]%%\n"
        );
    }
}
