#[cfg(test)]
mod syntax {
    use qtags::parsing::{parse_latex_soln, ParsingError};

    /// Helper function to check if parsing produces the expected error type
    fn expect_error(content: &str, expected: ParsingError) {
        let result = parse_latex_soln(content);
        match result {
            Ok(_) => panic!(
                "Expected parsing to fail, but it succeeded for input: {}",
                content
            ),
            Err(error) => {
                if std::mem::discriminant(&error) != std::mem::discriminant(&expected) {
                    panic!(
                        "Expected error type like {:?} but got: {:?} for input '{}'",
                        expected, error, content
                    );
                }
            }
        }
    }

    #[test]
    fn duplicate_tag() {
        let result = parse_latex_soln(
            r"\begin{enumerate}\item \qtag{dup} a\item \qtag{other} b\item \qtag{dup} c\end{enumerate}",
        );
        match result {
            Err(ParsingError::DuplicateTag(_, tag)) => assert_eq!(tag, "dup"),
            other => panic!("Expected a duplicate tag error, got {:?}", other),
        }
    }

    #[test]
    fn missing_tag() {
        expect_error(
            r"\begin{enumerate}\item \qtag{a} tagged\item untagged\end{enumerate}",
            ParsingError::MissingTag(0),
        );
    }

    #[test]
    fn missing_tag_first() {
        expect_error(
            r"\begin{enumerate}\item untagged\item \qtag{a} tagged\end{enumerate}",
            ParsingError::MissingTag(0),
        );
    }

    #[test]
    fn empty_tag() {
        expect_error(
            r"\begin{enumerate}\item \qtag{} nothing\end{enumerate}",
            ParsingError::MissingTag(0),
        );
    }

    #[test]
    fn empty_item() {
        expect_error(
            r"\begin{enumerate}\item\item \qtag{a} tagged\end{enumerate}",
            ParsingError::MissingTag(0),
        );
    }

    #[test]
    fn two_tags_in_one_item() {
        expect_error(
            r"\begin{enumerate}\item \qtag{a} one \qtag{b} two\end{enumerate}",
            ParsingError::MultipleTags(0, String::new()),
        );
    }

    #[test]
    fn unterminated_list() {
        let result = parse_latex_soln("Front matter\n\\begin{enumerate}\n\\item \\qtag{a} open");
        assert_eq!(
            result,
            Err(ParsingError::Unterminated(13, "enumerate".to_string()))
        );
    }

    #[test]
    fn unterminated_solution() {
        expect_error(
            r"\begin{enumerate}\item \qtag{a} q \begin{solution} s \item \qtag{b} q\end{enumerate}",
            ParsingError::Unterminated(0, String::new()),
        );
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            ParsingError::DuplicateTag(0, "dup".to_string()).to_string(),
            "duplicate qtag 'dup'"
        );
        assert_eq!(
            ParsingError::Unterminated(0, "solution".to_string()).to_string(),
            r"unterminated \begin{solution}"
        );
        assert_eq!(
            ParsingError::MissingTag(7).offset(),
            7
        );
    }
}
