//! Types representing the records extracted from a solution document and
//! its grading schema.

use serde::Serialize;
use std::collections::BTreeMap;

/// One question from a LaTeX solution document.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Question {
    /// The `\qtag{...}` value; it is also the key this question is stored
    /// under, so it is not repeated in serialized output.
    #[serde(skip)]
    pub tag: String,
    pub question_latex: String,
    pub solution: Option<String>,
}

/// Questions from a solution document, keyed by tag.
pub type Solutions = BTreeMap<String, Question>;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Part {
    pub part_label: String,
    pub points: f64,
}

/// One `<question>` node from a grading schema.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SchemaQuestion {
    #[serde(skip)]
    pub tag: String,
    pub id: Option<String>,
    pub grading_notes: String,
    pub grade: bool,
    pub parts: Vec<Part>,
    pub preferred_model: Option<String>,
}

impl SchemaQuestion {
    pub fn total_points(&self) -> f64 {
        self.parts
            .iter()
            .fold(0.0, |total, part| total + part.points)
    }
}

/// Questions from a grading schema, keyed by tag.
pub type Schema = BTreeMap<String, SchemaQuestion>;

/// The structural markers recognized while scanning LaTeX. Everything else
/// in the input is opaque text.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Marker<'i> {
    Begin(&'i str),
    End(&'i str),
    Item,
    Tag(&'i str),
}

/// A top-level `\item` of the outer list, with the marker itself removed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Item<'i> {
    pub ordinal: usize,
    /// Byte offset of `text` within the original document.
    pub offset: usize,
    pub text: &'i str,
}
