use std::{fmt, path::Path};

use owo_colors::OwoColorize;

/// A failure to be shown to whoever wrote the document: what went wrong,
/// a longer explanation, and (where known) the position it happened at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentError<'i> {
    pub problem: String,
    pub details: String,
    pub filename: &'i Path,
    pub source: &'i str,
    pub offset: Option<usize>,
}

// Verbose detailed explanation
impl<'i> DocumentError<'i> {
    pub fn full_details(&self) -> String {
        let offset = match self.offset {
            Some(offset) => offset,
            None => {
                return format!(
                    "{}: {}\n{}\n\n{}",
                    "error".bright_red(),
                    self.problem
                        .bold(),
                    self.filename
                        .to_string_lossy(),
                    self.details
                )
                .trim_ascii()
                .to_string();
            }
        };

        let i = calculate_line_number(self.source, offset);
        let j = calculate_column_number(self.source, offset);

        let code = self
            .source
            .lines()
            .nth(i)
            .unwrap_or("?");

        let line = i + 1;
        let column = j + 1;

        let width = line
            .to_string()
            .len();
        let width = 3.max(width);

        format!(
            r#"
{}: {}
{}:{}:{}

{:width$} {}
{:width$} {} {}
{:width$} {} {:>column$}

{}
            "#,
            "error".bright_red(),
            self.problem
                .bold(),
            self.filename
                .to_string_lossy(),
            line,
            column,
            ' ',
            '|'.bright_blue(),
            line.bright_blue(),
            '|'.bright_blue(),
            code,
            ' ',
            '|'.bright_blue(),
            '^'.bright_red(),
            self.details
        )
        .trim_ascii()
        .to_string()
    }
}

// Concise version for internal use
impl<'i> fmt::Display for DocumentError<'i> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.offset {
            Some(offset) => {
                let line = calculate_line_number(self.source, offset) + 1;
                let column = calculate_column_number(self.source, offset) + 1;

                write!(
                    f,
                    "error: {}:{}:{} {}",
                    self.filename
                        .to_string_lossy(),
                    line,
                    column,
                    self.problem
                )
            }
            None => write!(
                f,
                "error: {} {}",
                self.filename
                    .to_string_lossy(),
                self.problem
            ),
        }
    }
}

// This returns a zero-origin result so that it can subsequently be used for
// splitting; for display to humans you'll have to add 1.
fn calculate_line_number(content: &str, offset: usize) -> usize {
    let offset = offset.min(content.len());
    content.as_bytes()[..offset]
        .iter()
        .filter(|&&b| b == b'\n')
        .count()
}

// Calculate the column number, also zero-origin for consistency. Counted in
// characters so that the caret lines up under non-ASCII text.
fn calculate_column_number(content: &str, offset: usize) -> usize {
    let offset = offset.min(content.len());
    let before = &content.as_bytes()[..offset];
    let start = match before
        .iter()
        .rposition(|&b| b == b'\n')
    {
        Some(newline) => newline + 1,
        None => 0,
    };
    String::from_utf8_lossy(&before[start..])
        .chars()
        .count()
}
