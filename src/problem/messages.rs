use qtags::parsing::{ParsingError, SchemaError, TagMismatch};

/// Generate problem and detail messages for errors in a LaTeX solution
/// document.
pub fn generate_parsing_message(error: &ParsingError) -> (String, String) {
    match error {
        ParsingError::Unterminated(_, environment) => (
            format!("Unterminated {} environment", environment),
            format!(
                r#"
This \begin{{{0}}} has no matching \end{{{0}}}. Every environment opened in
the solution document must be closed again; the parser will not guess where
it was meant to stop.
                "#,
                environment
            )
            .trim_ascii()
            .to_string(),
        ),
        ParsingError::MissingTag(_) => (
            "Question is missing its qtag".to_string(),
            r#"
Every top-level \item in the solution document must begin with a tag that
identifies the question, for example:

    \item \qtag{ohms_law} What is the current through the resistor?

The tag is what connects the question to its entry in the grading schema, so
an untagged question cannot be graded.
            "#
            .trim_ascii()
            .to_string(),
        ),
        ParsingError::MultipleTags(_, tag) => (
            "Question has more than one qtag".to_string(),
            format!(
                r#"
A second \qtag{{{}}} was found inside this question. Each \item carries
exactly one tag, at its start. If this was meant to be a separate question it
needs its own \item.
                "#,
                tag
            )
            .trim_ascii()
            .to_string(),
        ),
        ParsingError::DuplicateTag(_, tag) => (
            format!("Duplicate qtag '{}'", tag),
            format!(
                r#"
The tag '{}' has already been used by an earlier question in this document.
Tags must be unique so that each question can be matched with exactly one
entry in the grading schema.
                "#,
                tag
            )
            .trim_ascii()
            .to_string(),
        ),
    }
}

/// Generate problem and detail messages for errors in a grading schema.
pub fn generate_schema_message(error: &SchemaError) -> (String, String) {
    match error {
        SchemaError::Malformed(_, details) => (
            "Malformed grading schema".to_string(),
            format!("The XML could not be read: {}", details),
        ),
        SchemaError::MissingTag(id) => (
            format!("Missing <qtag> in question id={}", id),
            r#"
Every <question> in the grading schema needs a non-empty <qtag> element naming
the question in the solution document that it describes.
            "#
            .trim_ascii()
            .to_string(),
        ),
        SchemaError::DuplicateTag(tag) => (
            format!("Duplicate qtag '{}' in grading schema", tag),
            "Each qtag may only appear in one <question> of the grading schema.".to_string(),
        ),
    }
}

/// Generate problem and detail messages when the solution document and the
/// grading schema describe different sets of questions.
pub fn generate_mismatch_message(error: &TagMismatch) -> (String, String) {
    let mut details = String::new();

    if !error
        .only_in_latex
        .is_empty()
    {
        details.push_str("the grading schema is missing qtags:\n");
        for tag in &error.only_in_latex {
            details.push_str(&format!("  - {}\n", tag));
        }
    }

    if !error
        .only_in_schema
        .is_empty()
    {
        if !details.is_empty() {
            details.push('\n');
        }
        details.push_str("the LaTeX solution is missing qtags:\n");
        for tag in &error.only_in_schema {
            details.push_str(&format!("  - {}\n", tag));
        }
    }

    (
        "Qtag mismatches found; please resolve before proceeding".to_string(),
        details
            .trim_end()
            .to_string(),
    )
}
