use std::fmt;

use proc_macro2::Span;

use crate::request::Argument;

/// One validation failure of a declaration request.
///
/// Diagnostics are batched: the analyzer reports every offending argument in
/// a single pass and only emits a type when none were produced.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub span: Span,
    pub severity: Severity,
    pub fix_its: Vec<FixIt>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    UnexpectedParameterCount(usize),
    BadParameterLabel {
        found: Option<String>,
        expected: Option<String>,
    },
    ExpressionIsNotTypeIdentifier(String),
    UnsupportedDeclaration(String),
}

/// A mechanical edit that fixes a [`Diagnostic`]: the argument at `index`
/// is replaced by `replacement`.
#[derive(Debug, Clone)]
pub struct FixIt {
    pub kind: FixItKind,
    pub index: usize,
    pub original: Argument,
    pub replacement: Argument,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixItKind {
    RemoveLabel,
    AddLabel(String),
    UpdateLabel { from: String, to: String },
}

impl Diagnostic {
    pub fn error(kind: DiagnosticKind, span: Span) -> Self {
        Self {
            kind,
            span,
            severity: Severity::Error,
            fix_its: vec![],
        }
    }

    pub fn with_fix_it(mut self, fix_it: FixIt) -> Self {
        self.fix_its.push(fix_it);
        self
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// 1-based line and 0-based column of the offending tokens. Only
    /// meaningful for sources parsed outside of a compiler invocation.
    pub fn location(&self) -> (usize, usize) {
        let start = self.span.start();
        (start.line, start.column)
    }
}

impl FixIt {
    /// `update "potato" to "backing": `backing: Y``
    pub fn help(&self) -> String {
        format!("{}: `{}`", self.kind, self.replacement)
    }
}

impl DiagnosticKind {
    pub fn code(&self) -> &'static str {
        use DiagnosticKind::*;
        match self {
            UnexpectedParameterCount(_) => "unexpected_parameter_count",
            BadParameterLabel { .. } => "bad_parameter_label",
            ExpressionIsNotTypeIdentifier(_) => "expression_is_not_type_identifier",
            UnsupportedDeclaration(_) => "unsupported_declaration",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use DiagnosticKind::*;
        match self {
            UnexpectedParameterCount(count) => write!(
                f,
                "unexpected parameter count, expected at least 2, got {}",
                count
            ),
            BadParameterLabel { found, expected } => write!(
                f,
                "found {} as the parameter label, expected {}",
                quoted_or(found, "nothing"),
                quoted_or(expected, "no label")
            ),
            ExpressionIsNotTypeIdentifier(expr) => {
                write!(f, "expression `{}` is not a type identifier", expr)
            }
            UnsupportedDeclaration(reason) => write!(f, "{}", reason),
        }
    }
}

fn quoted_or(label: &Option<String>, fallback: &str) -> String {
    label
        .as_ref()
        .map(|l| format!("\"{}\"", l))
        .unwrap_or_else(|| fallback.to_string())
}

impl fmt::Display for FixItKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FixItKind::RemoveLabel => write!(f, "remove label"),
            FixItKind::AddLabel(label) => {
                write!(f, "add the label \"{}:\"", label)
            }
            FixItKind::UpdateLabel { from, to } => {
                write!(f, "update \"{}\" to \"{}\"", from, to)
            }
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (line, column) = self.location();
        write!(f, "error[{}] {}:{}: {}", self.code(), line, column, self.kind)?;
        for fix_it in &self.fix_its {
            write!(f, "\n  help: {}", fix_it.help())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifier::analyze::analyze;
    use crate::request::DeclarationRequest;

    fn diagnose(source: &str) -> Vec<Diagnostic> {
        analyze(DeclarationRequest::parse_str(source).unwrap())
            .err()
            .unwrap()
    }

    #[test]
    fn help_shows_the_label_edit_and_the_replacement() {
        let helps: Vec<String> = diagnose("type: X, potato: Y, octopus: Z, pie: W")
            .iter()
            .flat_map(|d| d.fix_its.iter().map(FixIt::help))
            .collect();
        assert_eq!(
            helps,
            vec![
                "remove label: `X`",
                "update \"potato\" to \"backing\": `backing: Y`",
                "update \"octopus\" to \"adopts\": `adopts: Z`",
                "remove label: `W`",
            ]
        );
    }

    #[test]
    fn expression_problems_have_no_fix_it() {
        let diagnostics = diagnose("X, backing: uuid::Uuid");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code(), "expression_is_not_type_identifier");
        assert!(diagnostics[0].fix_its.is_empty());
        assert_eq!(
            diagnostics[0].kind.to_string(),
            "expression `uuid :: Uuid` is not a type identifier"
        );
    }
}
