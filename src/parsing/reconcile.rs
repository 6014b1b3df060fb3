use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// The tags on which a solution document and its grading schema disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagMismatch {
    pub only_in_latex: Vec<String>,
    pub only_in_schema: Vec<String>,
}

impl fmt::Display for TagMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "qtag mismatches found")?;
        if !self
            .only_in_latex
            .is_empty()
        {
            write!(f, "; grading schema is missing: {}", self.only_in_latex.join(", "))?;
        }
        if !self
            .only_in_schema
            .is_empty()
        {
            write!(f, "; LaTeX is missing: {}", self.only_in_schema.join(", "))?;
        }
        Ok(())
    }
}

impl std::error::Error for TagMismatch {}

/// Check that two tag-keyed maps have exactly the same keys. Every
/// discrepancy, in both directions, is collected into the one error.
pub fn compare_qtags<A, B>(
    latex: &BTreeMap<String, A>,
    schema: &BTreeMap<String, B>,
) -> Result<(), TagMismatch> {
    let only_in_latex: Vec<String> = latex
        .keys()
        .filter(|tag| !schema.contains_key(*tag))
        .cloned()
        .collect();

    let only_in_schema: Vec<String> = schema
        .keys()
        .filter(|tag| !latex.contains_key(*tag))
        .cloned()
        .collect();

    if only_in_latex.is_empty() && only_in_schema.is_empty() {
        debug!("All {} qtags match", latex.len());
        return Ok(());
    }

    Err(TagMismatch {
        only_in_latex,
        only_in_schema,
    })
}
