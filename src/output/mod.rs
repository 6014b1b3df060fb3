//! Combining a solution document with its grading schema, and reporting
//! on the result.

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use tinytemplate::TinyTemplate;
use tracing::info;

use crate::language::*;
use crate::parsing::{compare_qtags, TagMismatch};

static SUMMARY: &str = r#"{filename}: {count} question{{ if plural }}s{{ endif }}
{{ for question in questions }}  {question.tag}{{ if question.solution }}{{ else }}, no solution{{ endif }}{{ if question.scored }}, {question.points} points{{ if question.grade }}, graded{{ endif }}{{ endif }}
{{ endfor }}"#;

/// Everything known about one question: its LaTeX and solution alongside
/// the grading instructions for it.
#[derive(Debug, Serialize)]
pub struct Graded<'a> {
    #[serde(flatten)]
    pub question: &'a Question,
    #[serde(flatten)]
    pub schema: &'a SchemaQuestion,
}

/// Join each question with its grading schema entry. The two must carry
/// exactly the same tags.
pub fn merge<'a>(
    solutions: &'a Solutions,
    schema: &'a Schema,
) -> Result<BTreeMap<&'a str, Graded<'a>>, TagMismatch> {
    compare_qtags(solutions, schema)?;

    let mut merged = BTreeMap::new();
    for (tag, question) in solutions {
        if let Some(entry) = schema.get(tag) {
            merged.insert(
                tag.as_str(),
                Graded {
                    question,
                    schema: entry,
                },
            );
        }
    }

    info!("Merged {} questions", merged.len());
    Ok(merged)
}

pub fn to_json(merged: &BTreeMap<&str, Graded<'_>>) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(merged)
}

#[derive(Serialize)]
struct Summary<'a> {
    filename: String,
    count: usize,
    plural: bool,
    questions: Vec<Line<'a>>,
}

#[derive(Serialize)]
struct Line<'a> {
    tag: &'a str,
    solution: bool,
    scored: bool,
    points: f64,
    grade: bool,
}

/// A short human readable listing of the questions found, with their
/// point totals if a schema is supplied.
pub fn summary(
    filename: &Path,
    solutions: &Solutions,
    schema: Option<&Schema>,
) -> Result<String, tinytemplate::error::Error> {
    let questions = solutions
        .iter()
        .map(|(tag, question)| {
            let entry = schema.and_then(|schema| schema.get(tag));
            Line {
                tag,
                solution: question
                    .solution
                    .is_some(),
                scored: entry.is_some(),
                points: entry.map_or(0.0, SchemaQuestion::total_points),
                grade: entry.map_or(false, |entry| entry.grade),
            }
        })
        .collect::<Vec<_>>();

    let context = Summary {
        filename: filename
            .to_string_lossy()
            .to_string(),
        count: questions.len(),
        plural: questions.len() != 1,
        questions,
    };

    let mut tt = TinyTemplate::new();
    tt.set_default_formatter(&tinytemplate::format_unescaped);
    tt.add_template("summary", SUMMARY)?;

    tt.render("summary", &context)
}
