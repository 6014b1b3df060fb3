//! Parsers for solution documents and grading schemas

use std::path::{Path, PathBuf};
use tracing::debug;

use crate::language::LoadingError;

pub mod parser;
mod reconcile;
mod schema;
mod scope;

pub use parser::{parse_latex_soln, strip_environments, ParsingError};
pub use reconcile::{compare_qtags, TagMismatch};
pub use schema::{parse_grade_schema, SchemaError};

/// The name a grading schema is expected to have when it sits alongside
/// the solution document it describes.
pub const SCHEMA_FILENAME: &str = "grade_schema.xml";

/// Environments removed when producing a question sheet.
pub const ANSWER_ENVIRONMENTS: [&str; 2] = ["solution", "gradingnotes"];

/// Read a file and return an owned String. The parsers borrow from it, so
/// ownership stays with the caller.
pub fn load(filename: &Path) -> Result<String, LoadingError<'_>> {
    match std::fs::read_to_string(filename) {
        Ok(content) => Ok(content),
        Err(error) => {
            debug!(?error);
            match error.kind() {
                std::io::ErrorKind::NotFound => Err(LoadingError {
                    problem: "File not found".to_string(),
                    details: String::new(),
                    filename,
                }),
                _ => Err(LoadingError {
                    problem: "Failed reading".to_string(),
                    details: error
                        .kind()
                        .to_string(),
                    filename,
                }),
            }
        }
    }
}

/// Where the grading schema for a given solution document lives by default.
pub fn schema_beside(filename: &Path) -> PathBuf {
    filename.with_file_name(SCHEMA_FILENAME)
}
