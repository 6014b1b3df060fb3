use std::path::Path;

use qtags::error::DocumentError;
use qtags::parsing::{ParsingError, SchemaError, TagMismatch};

use super::messages::*;

/// Something that went wrong in a document, ready to be shown against that
/// document's source text.
pub trait Present {
    fn present<'i>(&self, filename: &'i Path, source: &'i str) -> DocumentError<'i>;
}

impl Present for ParsingError {
    fn present<'i>(&self, filename: &'i Path, source: &'i str) -> DocumentError<'i> {
        let (problem, details) = generate_parsing_message(self);
        DocumentError {
            problem,
            details,
            filename,
            source,
            offset: Some(self.offset()),
        }
    }
}

impl Present for SchemaError {
    fn present<'i>(&self, filename: &'i Path, source: &'i str) -> DocumentError<'i> {
        let (problem, details) = generate_schema_message(self);
        DocumentError {
            problem,
            details,
            filename,
            source,
            offset: self.offset(),
        }
    }
}

impl Present for TagMismatch {
    fn present<'i>(&self, filename: &'i Path, source: &'i str) -> DocumentError<'i> {
        let (problem, details) = generate_mismatch_message(self);
        DocumentError {
            problem,
            details,
            filename,
            source,
            offset: None,
        }
    }
}
