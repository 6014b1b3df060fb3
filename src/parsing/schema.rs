//! Reader for the XML grading schema that accompanies a solution document.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::btree_map::Entry;
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

use crate::language::*;

/// Parse a grading schema into its questions, keyed by tag.
///
/// Tags are strict: a `<question>` without a `<qtag>`, or with a tag seen
/// before, fails the whole schema. The other fields are lenient and fall
/// back to defaults, in particular a `<points>` value that isn't a number
/// counts as zero.
pub fn parse_grade_schema(content: &str) -> Result<Schema, SchemaError> {
    let document = read_tree(content)?;
    let root = document
        .children
        .first()
        .ok_or_else(|| SchemaError::Malformed(0, "no root element".to_string()))?;

    let mut schema = Schema::new();

    for node in root.find_all("question") {
        let id = node
            .attributes
            .get("id")
            .cloned();

        let tag = match node.find_text("qtag") {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => {
                let id = id
                    .as_deref()
                    .unwrap_or("<no id>");
                return Err(SchemaError::MissingTag(id.to_string()));
            }
        };

        let slot = match schema.entry(tag) {
            Entry::Occupied(existing) => {
                return Err(SchemaError::DuplicateTag(
                    existing
                        .key()
                        .clone(),
                ));
            }
            Entry::Vacant(slot) => slot,
        };

        let grading_notes = match node.find("grading_notes") {
            Some(notes) => dedent(&notes.text)
                .trim()
                .to_string(),
            None => String::new(),
        };

        // unlike most flags, grading is off unless explicitly turned on
        let grade = node
            .find_text("grade")
            .map(|text| text.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let preferred_model = node
            .find_text("preferred_model")
            .filter(|text| !text.is_empty())
            .map(str::to_string);

        let mut parts = Vec::new();
        if let Some(list) = node.find("parts") {
            for part in list.find_all("part") {
                let part_label = part
                    .find_text("part_label")
                    .unwrap_or("")
                    .to_string();
                let points = parse_points(
                    part.find_text("points")
                        .unwrap_or(""),
                );
                parts.push(Part { part_label, points });
            }
        }

        debug!(tag = %slot.key(), grade, parts = parts.len(), "schema question");

        let tag = slot
            .key()
            .clone();
        slot.insert(SchemaQuestion {
            tag,
            id,
            grading_notes,
            grade,
            parts,
            preferred_model,
        });
    }

    debug!("Found {} schema questions", schema.len());
    Ok(schema)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    Malformed(usize, String),
    MissingTag(String),
    DuplicateTag(String),
}

impl SchemaError {
    pub fn offset(&self) -> Option<usize> {
        match self {
            SchemaError::Malformed(offset, _) => Some(*offset),
            _ => None,
        }
    }

    pub fn message(&self) -> String {
        match self {
            SchemaError::Malformed(_, details) => format!("malformed XML: {}", details),
            SchemaError::MissingTag(id) => format!("missing <qtag> in question id={}", id),
            SchemaError::DuplicateTag(tag) => format!("duplicate qtag found in schema: '{}'", tag),
        }
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for SchemaError {}

/// An unparsable or negative point value is worth nothing; it does not fail
/// the schema.
fn parse_points(text: &str) -> f64 {
    match text
        .trim()
        .parse::<f64>()
    {
        Ok(points) if points.is_finite() && points >= 0.0 => points,
        _ => {
            debug!("Treating points value {:?} as 0", text);
            0.0
        }
    }
}

/// Remove whatever leading whitespace all non-blank lines have in common.
/// Lines holding only whitespace come out empty.
fn dedent(text: &str) -> String {
    let mut margin: Option<&str> = None;

    for line in text.lines() {
        if line
            .trim()
            .is_empty()
        {
            continue;
        }
        let indent = &line[..line.len()
            - line
                .trim_start()
                .len()];
        margin = Some(match margin {
            None => indent,
            Some(previous) => common_prefix(previous, indent),
        });
    }

    let width = margin.map_or(0, str::len);

    text.lines()
        .map(|line| {
            if line
                .trim()
                .is_empty()
            {
                ""
            } else {
                &line[width..]
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn common_prefix<'a>(a: &'a str, b: &str) -> &'a str {
    let end = a
        .char_indices()
        .zip(b.chars())
        .find(|((_, x), y)| x != y)
        .map(|((i, _), _)| i)
        .unwrap_or_else(|| a.len().min(b.len()));
    &a[..end]
}

/// Just enough of an element tree to answer the handful of lookups the
/// schema needs.
#[derive(Debug, Default)]
struct Element {
    name: String,
    attributes: HashMap<String, String>,
    text: String,
    children: Vec<Element>,
}

impl Element {
    fn new(start: &BytesStart, position: usize) -> Result<Element, SchemaError> {
        let name = String::from_utf8_lossy(
            start
                .name()
                .as_ref(),
        )
        .to_string();

        let mut attributes = HashMap::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|error| SchemaError::Malformed(position, error.to_string()))?;
            let key = String::from_utf8_lossy(
                attr.key
                    .as_ref(),
            )
            .to_string();
            let value = attr
                .unescape_value()
                .map_err(|error| SchemaError::Malformed(position, error.to_string()))?
                .to_string();
            attributes.insert(key, value);
        }

        Ok(Element {
            name,
            attributes,
            ..Element::default()
        })
    }

    fn find(&self, name: &str) -> Option<&Element> {
        self.children
            .iter()
            .find(|child| child.name == name)
    }

    fn find_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children
            .iter()
            .filter(move |child| child.name == name)
    }

    /// The trimmed text of the first child with the given name.
    fn find_text(&self, name: &str) -> Option<&str> {
        self.find(name)
            .map(|child| {
                child
                    .text
                    .trim()
            })
    }
}

/// A document holds exactly one root element; anything starting after it
/// has closed is junk.
fn check_single_root(stack: &[Element], position: usize) -> Result<(), SchemaError> {
    match stack {
        [document] if !document
            .children
            .is_empty() =>
        {
            Err(SchemaError::Malformed(
                position,
                "junk after document element".to_string(),
            ))
        }
        _ => Ok(()),
    }
}

fn read_tree(content: &str) -> Result<Element, SchemaError> {
    let mut reader = Reader::from_str(content);
    reader
        .config_mut()
        .trim_text(false);
    let mut buf = Vec::new();

    // the bottom of the stack is the document itself, holding the root
    let mut stack = vec![Element::default()];

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|error| {
                SchemaError::Malformed(reader.buffer_position() as usize, error.to_string())
            })?;

        match event {
            Event::Start(ref e) => {
                let position = reader.buffer_position() as usize;
                check_single_root(&stack, position)?;
                stack.push(Element::new(e, position)?);
            }
            Event::Empty(ref e) => {
                let position = reader.buffer_position() as usize;
                check_single_root(&stack, position)?;
                let element = Element::new(e, position)?;
                if let Some(parent) = stack.last_mut() {
                    parent
                        .children
                        .push(element);
                }
            }
            Event::End(ref e) => {
                let name = String::from_utf8_lossy(
                    e.name()
                        .as_ref(),
                )
                .to_string();
                let open = stack
                    .last()
                    .map(|element| element.name.as_str());

                if stack.len() < 2 || open != Some(name.as_str()) {
                    return Err(SchemaError::Malformed(
                        reader.buffer_position() as usize,
                        format!("unexpected closing tag </{}>", name),
                    ));
                }
                if let Some(element) = stack.pop() {
                    if let Some(parent) = stack.last_mut() {
                        parent
                            .children
                            .push(element);
                    }
                }
            }
            Event::Text(ref e) => {
                let text = e
                    .unescape()
                    .map_err(|error| {
                        SchemaError::Malformed(reader.buffer_position() as usize, error.to_string())
                    })?;
                if let Some(current) = stack.last_mut() {
                    current
                        .text
                        .push_str(&text);
                }
            }
            Event::CData(e) => {
                let text = String::from_utf8_lossy(&e.into_inner()).to_string();
                if let Some(current) = stack.last_mut() {
                    current
                        .text
                        .push_str(&text);
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if stack.len() != 1 {
        return Err(SchemaError::Malformed(
            content.len(),
            "unclosed element at end of input".to_string(),
        ));
    }

    stack
        .pop()
        .ok_or_else(|| SchemaError::Malformed(0, "empty document".to_string()))
}
