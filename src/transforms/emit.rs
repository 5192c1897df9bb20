//! Stylesheet statement tree and emitter
//!
//! The Sass plugin builds its output as a list of [`Statement`]s and lets the
//! [`Emitter`] render them in either syntax. The two syntaxes differ only in
//! block delimiters, statement terminators and map layout.

use std::fmt::Write;

const INDENT: &str = "  ";

/// Output syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Syntax {
    /// Braces and `;` terminators
    #[default]
    Scss,
    /// Indentation blocks, no terminators
    Indented,
}

impl Syntax {
    /// File extension for this syntax, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Syntax::Scss => "scss",
            Syntax::Indented => "sass",
        }
    }
}

/// A Sass expression: a literal or a map literal.
#[derive(Debug, Clone, PartialEq)]
pub enum SassExpr {
    Literal(String),
    /// Keys are emitted verbatim, in order
    Map(Vec<(String, SassExpr)>),
}

impl SassExpr {
    pub fn literal(s: impl Into<String>) -> Self {
        SassExpr::Literal(s.into())
    }
}

/// One statement of the output.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `// text`
    Comment(String),
    /// A terminated statement such as `@use "sass:map"` or `@return $x`
    Line(String),
    /// `$name: value`
    Variable { name: String, value: SassExpr },
    /// A rule or at-rule with a nested body
    Block { header: String, body: Vec<Statement> },
    /// Empty line
    Blank,
}

impl Statement {
    pub fn line(s: impl Into<String>) -> Self {
        Statement::Line(s.into())
    }

    pub fn block(header: impl Into<String>, body: Vec<Statement>) -> Self {
        Statement::Block { header: header.into(), body }
    }
}

/// Double-quote a Sass string, escaping `\` and `"`.
///
/// ```
/// use tokenweave::transforms::quote;
///
/// assert_eq!(quote("Open Sans"), "\"Open Sans\"");
/// assert_eq!(quote(r#"a"b\c"#), r#""a\"b\\c""#);
/// ```
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\a "),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Renders statements in one syntax.
#[derive(Debug, Clone, Copy)]
pub struct Emitter {
    syntax: Syntax,
}

impl Emitter {
    pub fn new(syntax: Syntax) -> Self {
        Self { syntax }
    }

    pub fn syntax(&self) -> Syntax {
        self.syntax
    }

    /// Render a statement list. The result ends with a newline.
    pub fn emit(&self, statements: &[Statement]) -> String {
        let mut out = String::new();
        for statement in statements {
            self.statement(&mut out, statement, 0);
        }
        out
    }

    fn statement(&self, out: &mut String, statement: &Statement, depth: usize) {
        let pad = INDENT.repeat(depth);
        match statement {
            Statement::Comment(text) => {
                let _ = writeln!(out, "{}// {}", pad, text);
            }
            Statement::Line(text) => {
                let _ = writeln!(out, "{}{}{}", pad, text, self.terminator());
            }
            Statement::Variable { name, value } => {
                let _ = write!(out, "{}${}: ", pad, name);
                self.expr(out, value, depth);
                let _ = writeln!(out, "{}", self.terminator());
            }
            Statement::Block { header, body } => {
                match self.syntax {
                    Syntax::Scss => {
                        let _ = writeln!(out, "{}{} {{", pad, header);
                    }
                    Syntax::Indented => {
                        let _ = writeln!(out, "{}{}", pad, header);
                    }
                }
                for child in body {
                    self.statement(out, child, depth + 1);
                }
                if self.syntax == Syntax::Scss {
                    let _ = writeln!(out, "{}}}", pad);
                }
            }
            Statement::Blank => out.push('\n'),
        }
    }

    fn terminator(&self) -> &'static str {
        match self.syntax {
            Syntax::Scss => ";",
            Syntax::Indented => "",
        }
    }

    fn expr(&self, out: &mut String, expr: &SassExpr, depth: usize) {
        match expr {
            SassExpr::Literal(s) => out.push_str(s),
            SassExpr::Map(entries) if entries.is_empty() => out.push_str("()"),
            SassExpr::Map(entries) => match self.syntax {
                // Indented syntax keeps map literals on one line
                Syntax::Indented => {
                    out.push('(');
                    for (i, (key, value)) in entries.iter().enumerate() {
                        if i > 0 {
                            out.push_str(", ");
                        }
                        out.push_str(key);
                        out.push_str(": ");
                        self.expr(out, value, depth);
                    }
                    out.push(')');
                }
                Syntax::Scss => {
                    let inner = INDENT.repeat(depth + 1);
                    out.push_str("(\n");
                    for (key, value) in entries {
                        let _ = write!(out, "{}{}: ", inner, key);
                        self.expr(out, value, depth + 1);
                        out.push_str(",\n");
                    }
                    out.push_str(&INDENT.repeat(depth));
                    out.push(')');
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Statement> {
        vec![
            Statement::Comment("generated".into()),
            Statement::line("@use \"sass:map\""),
            Statement::Blank,
            Statement::Variable {
                name: "values".into(),
                value: SassExpr::Map(vec![
                    ("\"a\"".into(), SassExpr::Map(vec![("\"default\"".into(), SassExpr::literal("1px"))])),
                    ("\"b\"".into(), SassExpr::literal("2px")),
                ]),
            },
            Statement::block(
                "@function f($x)",
                vec![Statement::block("@if $x", vec![Statement::line("@return 1")]), Statement::line("@return 0")],
            ),
        ]
    }

    #[test]
    fn test_scss_output() {
        let out = Emitter::new(Syntax::Scss).emit(&sample());
        let expected = "\
// generated
@use \"sass:map\";

$values: (
  \"a\": (
    \"default\": 1px,
  ),
  \"b\": 2px,
);
@function f($x) {
  @if $x {
    @return 1;
  }
  @return 0;
}
";
        assert_eq!(out, expected);
    }

    #[test]
    fn test_indented_output() {
        let out = Emitter::new(Syntax::Indented).emit(&sample());
        let expected = "\
// generated
@use \"sass:map\"

$values: (\"a\": (\"default\": 1px), \"b\": 2px)
@function f($x)
  @if $x
    @return 1
  @return 0
";
        assert_eq!(out, expected);
    }

    #[test]
    fn test_empty_map() {
        let stmt = Statement::Variable { name: "m".into(), value: SassExpr::Map(vec![]) };
        assert_eq!(Emitter::new(Syntax::Scss).emit(&[stmt.clone()]), "$m: ();\n");
        assert_eq!(Emitter::new(Syntax::Indented).emit(&[stmt]), "$m: ()\n");
    }

    #[test]
    fn test_quote_newline() {
        assert_eq!(quote("a\nb"), "\"a\\a b\"");
    }

    #[test]
    fn test_extension() {
        assert_eq!(Syntax::Scss.extension(), "scss");
        assert_eq!(Syntax::Indented.extension(), "sass");
    }
}
