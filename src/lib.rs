//! Parse tagged LaTeX solution documents and the XML grading schemas that
//! accompany them.
//!
//! A solution document is a single `enumerate` list where every top-level
//! `\item` opens with a `\qtag{...}` identifier and may carry a nested
//! `solution` environment. The grading schema describes the same questions
//! by tag. [`parsing::parse_latex_soln`] and [`parsing::parse_grade_schema`]
//! turn each into a map keyed by tag, and [`parsing::compare_qtags`] checks
//! that the two agree.

#[macro_use]
mod patterns;

pub mod error;
pub mod language;
pub mod output;
pub mod parsing;
