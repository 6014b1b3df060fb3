use std::collections::btree_map::Entry;
use std::fmt;
use tracing::debug;

use crate::language::*;
use crate::parsing::scope::Scope;

const LIST: &str = "enumerate";
const SOLUTION: &str = "solution";
const ITEM: &str = r"\item";

/// Parse a LaTeX solution document into its questions, keyed by tag.
///
/// Only the first `enumerate` environment is read. A document without one
/// has no questions and yields an empty map. An untagged item, a repeated
/// tag, or an environment that never closes fails the whole document; no
/// partial result is returned.
pub fn parse_latex_soln(content: &str) -> Result<Solutions, ParsingError> {
    let mut input = Parser::new();
    input.initialize(content);

    let mut body = match input.take_list_body()? {
        Some(body) => body,
        None => {
            debug!("No enumerate environment found");
            return Ok(Solutions::new());
        }
    };

    let items = body.split_items();
    debug!(
        "Found {} item{}",
        items.len(),
        if items.len() == 1 { "" } else { "s" }
    );

    let mut solutions = Solutions::new();
    for item in items {
        let mut parser = input.subparser_at(item.offset, item.text);
        let question = parser.read_question()?;

        match solutions.entry(question.tag.clone()) {
            Entry::Occupied(_) => {
                return Err(ParsingError::DuplicateTag(item.offset, question.tag));
            }
            Entry::Vacant(slot) => {
                debug!(tag = %question.tag, solution = question.solution.is_some(), "item {}", item.ordinal);
                slot.insert(question);
            }
        }
    }

    Ok(solutions)
}

/// Return the body of the first `enumerate` environment in the document,
/// or None if there isn't one.
pub fn extract_enumerate_body(content: &str) -> Result<Option<&str>, ParsingError> {
    let mut input = Parser::new();
    input.initialize(content);

    let body = input.take_list_body()?;
    Ok(body.map(|parser| parser.source))
}

/// Split the body of a list into its top-level items. Offsets in the
/// returned items are relative to `body`.
pub fn split_top_level_items(body: &str) -> Vec<Item<'_>> {
    let mut input = Parser::new();
    input.initialize(body);

    input.split_items()
}

/// Break a single item (with its `\item` marker already removed) into tag,
/// question, and solution.
pub fn decompose_item(text: &str) -> Result<Question, ParsingError> {
    let mut input = Parser::new();
    input.initialize(text);

    input.read_question()
}

/// Remove every instance of the named environments, markers included.
/// This is how a question sheet is produced from a solution document.
pub fn strip_environments(content: &str, names: &[&str]) -> Result<String, ParsingError> {
    let mut input = Parser::new();
    input.initialize(content);

    let mut result = String::with_capacity(content.len());
    let mut mark = 0;

    while let Some((marker, width)) = input.seek_marker() {
        match marker {
            Marker::Begin(name) if names.contains(&name) => {
                result.push_str(&content[mark..input.offset]);
                let opened = input.offset;
                input.advance(width);
                input.take_environment(name, opened)?;
                mark = input.offset;
            }
            _ => input.advance(width),
        }
    }
    result.push_str(&content[mark..]);

    Ok(result)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsingError {
    Unterminated(usize, String),
    MissingTag(usize),
    MultipleTags(usize, String),
    DuplicateTag(usize, String),
}

impl ParsingError {
    pub fn offset(&self) -> usize {
        match self {
            ParsingError::Unterminated(offset, _) => *offset,
            ParsingError::MissingTag(offset) => *offset,
            ParsingError::MultipleTags(offset, _) => *offset,
            ParsingError::DuplicateTag(offset, _) => *offset,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ParsingError::Unterminated(_, environment) => {
                format!(r"unterminated \begin{{{}}}", environment)
            }
            ParsingError::MissingTag(_) => r"item is missing its \qtag".to_string(),
            ParsingError::MultipleTags(_, tag) => {
                format!(r"item has more than one \qtag, also found '{}'", tag)
            }
            ParsingError::DuplicateTag(_, tag) => format!("duplicate qtag '{}'", tag),
        }
    }
}

impl fmt::Display for ParsingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for ParsingError {}

#[derive(Debug)]
struct Parser<'i> {
    original: &'i str,
    source: &'i str,
    offset: usize,
}

impl<'i> Parser<'i> {
    fn new() -> Parser<'i> {
        Parser {
            original: "",
            source: "",
            offset: 0,
        }
    }

    fn initialize(&mut self, content: &'i str) {
        self.original = content;
        self.source = content;
        self.offset = 0;
    }

    fn advance(&mut self, width: usize) {
        // advance the parser position
        self.source = &self.source[width..];
        self.offset += width;
    }

    /// Fork a parser over a slice of the original input. The offset is
    /// absolute so that errors raised by the child point into the document.
    fn subparser_at(&self, offset: usize, content: &'i str) -> Parser<'i> {
        Parser {
            original: self.original,
            source: content,
            offset,
        }
    }

    fn trim_whitespace(&mut self) {
        let content = self.source;
        let l = content.len()
            - content
                .trim_start()
                .len();
        self.advance(l);
    }

    fn trim_whitespace_and_comments(&mut self) {
        loop {
            self.trim_whitespace();
            if !self
                .source
                .starts_with('%')
            {
                break;
            }
            self.skip_line();
        }
    }

    fn skip_line(&mut self) {
        let content = self.source;
        let l = content
            .find('\n')
            .unwrap_or(content.len());
        self.advance(l);
    }

    /// Move forward to the next structural marker and return it along with
    /// its width, leaving the parser positioned at its backslash. Comments
    /// and control sequences we don't track are stepped over. Returns None
    /// once the input is exhausted.
    fn seek_marker(&mut self) -> Option<(Marker<'i>, usize)> {
        loop {
            let content = self.source;
            let i = match content.find(&['\\', '%'][..]) {
                Some(i) => i,
                None => {
                    self.advance(content.len());
                    return None;
                }
            };
            self.advance(i);

            let content = self.source;
            if content.starts_with('%') {
                self.skip_line();
                continue;
            }

            if let Some(found) = recognize_marker(content) {
                return Some(found);
            }

            // step over the backslash and whatever it escapes, so that
            // \\ and \% don't get read as the start of something else.
            let width = content[1..]
                .chars()
                .next()
                .map_or(0, char::len_utf8);
            self.advance(1 + width);
        }
    }

    /// Having consumed `\begin{name}` (which started at `opened`), consume
    /// up to and including the matching `\end{name}` and return what was in
    /// between. Only environments of the same name affect the nesting.
    fn take_environment(&mut self, name: &str, opened: usize) -> Result<&'i str, ParsingError> {
        let start = self.source;
        let begin = self.offset;
        let mut depth = 1;

        while let Some((marker, width)) = self.seek_marker() {
            match marker {
                Marker::Begin(inner) if inner == name => depth += 1,
                Marker::End(inner) if inner == name => {
                    depth -= 1;
                    if depth == 0 {
                        let body = &start[..self.offset - begin];
                        self.advance(width);
                        return Ok(body);
                    }
                }
                _ => {}
            }
            self.advance(width);
        }

        Err(ParsingError::Unterminated(opened, name.to_string()))
    }

    /// Find the first `enumerate` environment and return a parser over its
    /// body.
    fn take_list_body(&mut self) -> Result<Option<Parser<'i>>, ParsingError> {
        while let Some((marker, width)) = self.seek_marker() {
            let opened = self.offset;
            self.advance(width);

            if marker == Marker::Begin(LIST) {
                let offset = self.offset;
                let body = self.take_environment(LIST, opened)?;
                return Ok(Some(self.subparser_at(offset, body)));
            }
        }

        Ok(None)
    }

    /// Divide a list body at each `\item` that is not inside some nested
    /// environment. Anything before the first such marker is discarded.
    fn split_items(&mut self) -> Vec<Item<'i>> {
        let mut scope = Scope::new();
        let mut items = Vec::new();
        let mut current: Option<(usize, &'i str)> = None;

        while let Some((marker, width)) = self.seek_marker() {
            match marker {
                Marker::Begin(name) => scope.push(name),
                Marker::End(name) => {
                    let closed = scope.pop();
                    if closed != Some(name) {
                        debug!(
                            "\\end{{{}}} at offset {} closes {:?}, depth now {}",
                            name,
                            self.offset,
                            closed,
                            scope.depth()
                        );
                    }
                }
                Marker::Item if scope.is_outermost() => {
                    if let Some((offset, start)) = current.take() {
                        items.push(Item {
                            ordinal: items.len() + 1,
                            offset,
                            text: &start[..self.offset - offset],
                        });
                    }
                    self.advance(width);
                    current = Some((self.offset, self.source));
                    continue;
                }
                _ => {}
            }
            self.advance(width);
        }

        if let Some((offset, start)) = current {
            items.push(Item {
                ordinal: items.len() + 1,
                offset,
                text: start,
            });
        }

        items
    }

    /// Read the leading tag, then walk the rest of the item lifting out the
    /// solution environment. The question is whatever is left over.
    fn read_question(&mut self) -> Result<Question, ParsingError> {
        self.trim_whitespace_and_comments();

        let tag = match recognize_marker(self.source) {
            Some((Marker::Tag(value), width))
                if !value
                    .trim()
                    .is_empty() =>
            {
                self.advance(width);
                value.trim()
            }
            _ => return Err(ParsingError::MissingTag(self.offset)),
        };

        let mut question = String::new();
        let mut solution = None;
        let mut start = self.source;
        let mut mark = self.offset;

        while let Some((marker, width)) = self.seek_marker() {
            match marker {
                Marker::Begin(SOLUTION) => {
                    question.push_str(&start[..self.offset - mark]);

                    let opened = self.offset;
                    self.advance(width);
                    let body = self.take_environment(SOLUTION, opened)?;

                    if solution.is_none() {
                        solution = Some(
                            body.trim()
                                .to_string(),
                        );
                    }

                    start = self.source;
                    mark = self.offset;
                }
                Marker::Tag(other) => {
                    return Err(ParsingError::MultipleTags(
                        self.offset,
                        other
                            .trim()
                            .to_string(),
                    ));
                }
                _ => self.advance(width),
            }
        }
        question.push_str(start);

        Ok(Question {
            tag: tag.to_string(),
            question_latex: question
                .trim()
                .to_string(),
            solution,
        })
    }
}

fn recognize_marker(content: &str) -> Option<(Marker<'_>, usize)> {
    let re = regex!(r"^\\(begin|end)\{([^}]*)\}");
    if let Some(cap) = re.captures(content) {
        let width = cap
            .get(0)?
            .len();
        let name = cap
            .get(2)?
            .as_str()
            .trim();

        let marker = if &cap[1] == "begin" {
            Marker::Begin(name)
        } else {
            Marker::End(name)
        };
        return Some((marker, width));
    }

    let re = regex!(r"^\\qtag\{([^}]*)\}");
    if let Some(cap) = re.captures(content) {
        let width = cap
            .get(0)?
            .len();
        let value = cap
            .get(1)?
            .as_str();
        return Some((Marker::Tag(value), width));
    }

    if is_item(content) {
        return Some((Marker::Item, ITEM.len()));
    }

    None
}

/// `\item` is a control word, so it only counts if the next character is
/// not a letter; `\itemsep` is something else entirely.
fn is_item(content: &str) -> bool {
    match content.strip_prefix(ITEM) {
        Some(rest) => !rest.starts_with(|c: char| c.is_ascii_alphabetic()),
        None => false,
    }
}
