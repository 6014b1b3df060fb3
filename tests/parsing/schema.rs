#[cfg(test)]
mod schema {
    use std::path::Path;

    use qtags::language::*;
    use qtags::parsing::{self, parse_grade_schema, SchemaError};

    #[test]
    fn circuits_schema() {
        let content = parsing::load(Path::new("tests/samples/circuits.xml")).unwrap();
        let schema = parse_grade_schema(&content).unwrap();

        assert_eq!(schema.len(), 3);

        let question = &schema["ohms_law"];
        assert_eq!(
            question,
            &SchemaQuestion {
                tag: "ohms_law".to_string(),
                id: Some("1".to_string()),
                grading_notes: "Full credit for 20 V with units.\n  Half credit if units are missing."
                    .to_string(),
                grade: true,
                parts: vec![Part {
                    part_label: "all".to_string(),
                    points: 2.0
                }],
                preferred_model: Some("gpt-4.1-mini".to_string()),
            }
        );

        let question = &schema["series_parallel"];
        assert!(question.grade);
        assert_eq!(question.grading_notes, "");
        assert_eq!(question.preferred_model, None);
        assert_eq!(
            question.parts,
            vec![
                Part {
                    part_label: "a".to_string(),
                    points: 3.0
                },
                Part {
                    part_label: "b".to_string(),
                    points: 0.0
                },
            ]
        );
        assert_eq!(question.total_points(), 3.0);

        let question = &schema["thevenin"];
        assert!(!question.grade);
        assert!(question
            .parts
            .is_empty());
        assert!(question
            .total_points()
            .is_sign_positive());
    }

    #[test]
    fn lenient_points() {
        let schema = parse_grade_schema(
            r#"<s><question><qtag>q</qtag><parts><part><part_label>x</part_label><points>abc</points></part><part><points>1.5</points></part></parts></question></s>"#,
        )
        .unwrap();

        let parts = &schema["q"].parts;
        assert_eq!(parts[0].points, 0.0);
        assert_eq!(parts[1].part_label, "");
        assert_eq!(parts[1].points, 1.5);
    }

    #[test]
    fn repeated_part_labels_allowed() {
        let schema = parse_grade_schema(
            r#"<s><question><qtag>q</qtag><parts><part><part_label>a</part_label><points>1</points></part><part><part_label>a</part_label><points>2</points></part></parts></question></s>"#,
        )
        .unwrap();

        assert_eq!(schema["q"].parts.len(), 2);
    }

    #[test]
    fn missing_tag_names_question() {
        let result = parse_grade_schema(r#"<s><question id="7"><grade>true</grade></question></s>"#);
        assert_eq!(result, Err(SchemaError::MissingTag("7".to_string())));

        let result = parse_grade_schema(r#"<s><question><qtag>   </qtag></question></s>"#);
        assert_eq!(result, Err(SchemaError::MissingTag("<no id>".to_string())));
    }

    #[test]
    fn duplicate_tag() {
        let result = parse_grade_schema(
            r#"<s><question id="1"><qtag>same</qtag></question><question id="2"><qtag> same </qtag></question></s>"#,
        );
        assert_eq!(result, Err(SchemaError::DuplicateTag("same".to_string())));
    }

    #[test]
    fn malformed() {
        let result = parse_grade_schema(r#"<s><question><qtag>a</qtag></questions></s>"#);
        assert!(matches!(result, Err(SchemaError::Malformed(_, _))));

        let result = parse_grade_schema("");
        assert!(matches!(result, Err(SchemaError::Malformed(_, _))));
    }

    #[test]
    fn reconcile_reports_both_directions() {
        let latex = parsing::parse_latex_soln(
            r"\begin{enumerate}\item \qtag{A} a\item \qtag{B} b\end{enumerate}",
        )
        .unwrap();
        let schema = parse_grade_schema(
            r#"<s><question><qtag>B</qtag></question><question><qtag>C</qtag></question></s>"#,
        )
        .unwrap();

        let error = parsing::compare_qtags(&latex, &schema).unwrap_err();
        assert_eq!(error.only_in_latex, vec!["A".to_string()]);
        assert_eq!(error.only_in_schema, vec!["C".to_string()]);
    }
}
