/// The stack of LaTeX environments currently open while walking a list
/// body. Every `\begin{..}` pushes and every `\end{..}` pops, whatever the
/// environment's name; an `\item` only starts a new question when the stack
/// is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Scope<'i> {
    stack: Vec<&'i str>,
}

impl<'i> Scope<'i> {
    pub(crate) fn new() -> Scope<'i> {
        Scope { stack: vec![] }
    }

    pub(crate) fn depth(&self) -> usize {
        self.stack
            .len()
    }

    pub(crate) fn is_outermost(&self) -> bool {
        self.stack
            .is_empty()
    }

    pub(crate) fn push(&mut self, environment: &'i str) {
        self.stack
            .push(environment);
    }

    /// Close the innermost environment. An `\end` with nothing open leaves
    /// the stack at the outermost level rather than going negative.
    pub(crate) fn pop(&mut self) -> Option<&'i str> {
        self.stack
            .pop()
    }
}
