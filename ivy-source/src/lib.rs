//! Source code representation and diagnostic rendering.

use console::style;
use std::fmt;
use std::ops::Range;

/// Byte offsets into the source text.
pub type Span = Range<usize>;

/// Represents source code.
pub struct Source<'a> {
    /// Name used in diagnostic locations (usually a file path).
    pub name: &'a str,
    /// Original source code.
    pub content: &'a str,
}

impl<'a> Source<'a> {
    /// Create a new `Source` with the specified `content`.
    pub fn new(content: &'a str) -> Self {
        Self {
            name: "<input>",
            content,
        }
    }

    /// Create a new `Source` that reports diagnostics under `name`.
    pub fn with_name(name: &'a str, content: &'a str) -> Self {
        Self { name, content }
    }

    /// Returns the 1-based `(line, column)` of the byte `offset`.
    /// Columns are counted in characters. Offsets past the end are clamped.
    ///
    /// # Example
    /// ```
    /// use ivy_source::Source;
    /// let source = Source::new("var x = 1;\nx + y;");
    /// assert_eq!(source.line_col(0), (1, 1));
    /// assert_eq!(source.line_col(15), (2, 5));
    /// ```
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let offset = self.clamp(offset);
        let before = &self.content[..offset];
        let line = before.matches('\n').count() + 1;
        let column = before[self.line_start(offset)..].chars().count() + 1;
        (line, column)
    }

    /// Returns the text of the 1-based line `n` without its line terminator.
    pub fn line(&self, n: usize) -> Option<&'a str> {
        if n == 0 {
            return None;
        }
        self.content
            .split('\n')
            .nth(n - 1)
            .map(|line| line.trim_end_matches('\r'))
    }

    /// Returns a [`Report`] that displays `diagnostic` against this source.
    pub fn report<'s>(&'s self, diagnostic: &'s Diagnostic) -> Report<'s, 'a> {
        Report {
            source: self,
            diagnostic,
        }
    }

    /// Renders `diagnostic` as a multi-line report pointing at the offending source.
    pub fn render(&self, diagnostic: &Diagnostic) -> String {
        self.report(diagnostic).to_string()
    }

    fn clamp(&self, offset: usize) -> usize {
        let mut offset = offset.min(self.content.len());
        while !self.content.is_char_boundary(offset) {
            offset -= 1;
        }
        offset
    }

    fn line_start(&self, offset: usize) -> usize {
        self.content[..offset].rfind('\n').map_or(0, |i| i + 1)
    }
}

impl<'a> From<&'a str> for Source<'a> {
    fn from(content: &'a str) -> Self {
        Source::new(content)
    }
}

/// A diagnostic displayed with its location, the offending line and a caret underline.
pub struct Report<'s, 'a> {
    source: &'s Source<'a>,
    diagnostic: &'s Diagnostic,
}

impl fmt::Display for Report<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = self.source;
        let diagnostic = self.diagnostic;
        let (line, column) = source.line_col(diagnostic.span.start);
        let text = source.line(line).unwrap_or("");
        let gutter = " ".repeat(line.to_string().len());

        // underline is clipped to the reported line and is never empty
        let start = source.clamp(diagnostic.span.start);
        let line_end = source.line_start(start) + text.len();
        let end = source.clamp(diagnostic.span.end).min(line_end).max(start);
        let width = source.content[start..end].chars().count().max(1);

        writeln!(
            f,
            "{}: {}",
            style("error").red().bold(),
            style(&diagnostic.message).bold()
        )?;
        writeln!(
            f,
            "{}{} {}:{}:{}",
            gutter,
            style("-->").blue().bold(),
            source.name,
            line,
            column
        )?;
        writeln!(f, "{} {}", gutter, style("|").blue().bold())?;
        writeln!(
            f,
            "{} {} {}",
            style(line).blue().bold(),
            style("|").blue().bold(),
            text
        )?;
        writeln!(
            f,
            "{} {} {}{}",
            gutter,
            style("|").blue().bold(),
            " ".repeat(column - 1),
            style("^".repeat(width)).red().bold()
        )
    }
}

/// A message attached to a region of the source.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub message: String,
    pub span: Span,
}

impl Diagnostic {
    /// Create a new diagnostic with the specified `message` and `span`.
    pub fn new(message: impl ToString, span: Span) -> Self {
        Self {
            message: message.to_string(),
            span,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_col() {
        let source = Source::new("var x = 1;\n\nfoo(x);");
        assert_eq!(source.line_col(4), (1, 5));
        assert_eq!(source.line_col(11), (2, 1));
        assert_eq!(source.line_col(12), (3, 1));
        assert_eq!(source.line_col(1000), (3, 8));
    }

    #[test]
    fn test_line() {
        let source = Source::new("first\r\nsecond\nthird");
        assert_eq!(source.line(0), None);
        assert_eq!(source.line(1), Some("first"));
        assert_eq!(source.line(2), Some("second"));
        assert_eq!(source.line(3), Some("third"));
        assert_eq!(source.line(4), None);
    }

    #[test]
    fn test_render() {
        let source = Source::with_name("main.ivy", "var x = 1;\nx + y;");
        let report = source.render(&Diagnostic::new("undefined name `y`", 15..16));
        assert!(report.contains("undefined name `y`"));
        assert!(report.contains("main.ivy:2:5"));
        assert!(report.contains("x + y;"));
        assert!(report.contains('^'));
    }

    #[test]
    fn test_render_at_end_of_input() {
        let source = Source::new("var x = 5");
        let report = source.render(&Diagnostic::new("unexpected end of input", 9..9));
        assert!(report.contains("<input>:1:10"));
        assert!(report.contains('^'));
    }

    #[test]
    fn test_report_display_matches_render() {
        let source = Source::new("1 / 0;");
        let diagnostic = Diagnostic::new("division by zero", 2..3);
        let report = source.report(&diagnostic);
        assert_eq!(format!("{}", report), source.render(&diagnostic));
        assert_eq!(report.to_string().lines().count(), 5);
    }
}
