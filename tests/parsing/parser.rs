#[cfg(test)]
mod verify {
    use qtags::language::*;
    use qtags::parsing::parser::{decompose_item, split_top_level_items};
    use qtags::parsing::parse_latex_soln;

    fn trim(s: &str) -> &str {
        s.strip_prefix('\n')
            .unwrap_or(s)
    }

    #[test]
    fn single_question_with_solution() {
        let solutions = parse_latex_soln(
            r"\begin{enumerate}\item \qtag{Q1} What is 2+2?\begin{solution}4\end{solution}\end{enumerate}",
        )
        .unwrap();

        let mut expected = Solutions::new();
        expected.insert(
            "Q1".to_string(),
            Question {
                tag: "Q1".to_string(),
                question_latex: "What is 2+2?".to_string(),
                solution: Some("4".to_string()),
            },
        );
        assert_eq!(solutions, expected);
    }

    #[test]
    fn several_questions() {
        let solutions = parse_latex_soln(trim(
            r"
\begin{enumerate}
    \item \qtag{first} One.
    \begin{solution}
        Uno.
    \end{solution}
    \item \qtag{second} Two.
    \item \qtag{third} Three.
    \begin{solution}Tres.\end{solution}
\end{enumerate}
            ",
        ))
        .unwrap();

        assert_eq!(solutions.len(), 3);
        assert_eq!(solutions["first"].question_latex, "One.");
        assert_eq!(solutions["first"].solution, Some("Uno.".to_string()));
        assert_eq!(solutions["second"].question_latex, "Two.");
        assert_eq!(solutions["second"].solution, None);
        assert_eq!(solutions["third"].solution, Some("Tres.".to_string()));
    }

    #[test]
    fn nested_list_in_solution() {
        let solutions = parse_latex_soln(
            r"\begin{enumerate}\item \qtag{A} Q \begin{solution}\begin{itemize}\item a\item b\end{itemize}\end{solution}\end{enumerate}",
        )
        .unwrap();

        assert_eq!(solutions.len(), 1);
        assert_eq!(
            solutions["A"].solution,
            Some(r"\begin{itemize}\item a\item b\end{itemize}".to_string())
        );
    }

    #[test]
    fn nested_list_in_question() {
        let solutions = parse_latex_soln(
            r"\begin{enumerate}\item \qtag{A} Parts: \begin{enumerate}\item x\item y\end{enumerate}\item \qtag{B} Next\end{enumerate}",
        )
        .unwrap();

        assert_eq!(solutions.len(), 2);
        assert_eq!(
            solutions["A"].question_latex,
            r"Parts: \begin{enumerate}\item x\item y\end{enumerate}"
        );
        assert_eq!(solutions["B"].question_latex, "Next");
    }

    #[test]
    fn front_matter_only() {
        let solutions = parse_latex_soln(trim(
            r"
\documentclass{article}
\begin{document}
Nothing to grade.
\end{document}
            ",
        ))
        .unwrap();
        assert!(solutions.is_empty());

        let solutions = parse_latex_soln("").unwrap();
        assert!(solutions.is_empty());
    }

    #[test]
    fn empty_list() {
        let solutions = parse_latex_soln(r"\begin{enumerate}\end{enumerate}").unwrap();
        assert!(solutions.is_empty());

        // text but no items
        let solutions = parse_latex_soln(r"\begin{enumerate} nothing here \end{enumerate}").unwrap();
        assert!(solutions.is_empty());
    }

    #[test]
    fn tags_compared_exactly() {
        let solutions = parse_latex_soln(
            r"\begin{enumerate}\item \qtag{a} one\item \qtag{A} two\item \qtag{a } three\end{enumerate}",
        );
        // surrounding whitespace is trimmed from the tag, case is not folded
        assert!(solutions.is_err());

        let solutions = parse_latex_soln(
            r"\begin{enumerate}\item \qtag{a} one\item \qtag{A} two\end{enumerate}",
        )
        .unwrap();
        assert_eq!(solutions.len(), 2);
    }

    #[test]
    fn idempotent() {
        let content = trim(
            r"
\begin{enumerate}
\item \qtag{x} Question x. \begin{solution} sx \end{solution}
\item \qtag{y} Question y.
\end{enumerate}
            ",
        );

        let one = parse_latex_soln(content);
        let two = parse_latex_soln(content);
        assert_eq!(one, two);
    }

    #[test]
    fn item_count_matches_tagged_items() {
        let content = trim(
            r"
\begin{enumerate}
\item \qtag{a} \begin{itemize}\item inner\end{itemize}
\item \qtag{b} \begin{center}\item not top level\end{center}
\item \qtag{c} \itemsep is not an item
\end{enumerate}
            ",
        );

        let solutions = parse_latex_soln(content).unwrap();
        assert_eq!(solutions.len(), 3);

        let keys: Vec<&str> = solutions
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }

    #[test]
    fn commented_out_items() {
        let content = trim(
            r"
\begin{enumerate}
\item \qtag{kept} A question.
% \item \qtag{dropped} An old question, commented out.
\end{enumerate}
            ",
        );

        let solutions = parse_latex_soln(content).unwrap();
        assert_eq!(solutions.len(), 1);
        assert!(solutions.contains_key("kept"));
    }

    #[test]
    fn components_in_sequence() {
        let items = split_top_level_items(r"\item \qtag{p} first \item \qtag{q} second");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].ordinal, 1);
        assert_eq!(items[1].ordinal, 2);

        let question = decompose_item(items[1].text).unwrap();
        assert_eq!(question.tag, "q");
        assert_eq!(question.question_latex, "second");
        assert_eq!(question.solution, None);
    }
}
