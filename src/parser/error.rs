use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError<E> {
    #[error("failed to read edge list")]
    Io(#[from] std::io::Error),

    #[error("line {line}: cannot convert {text:?}")]
    Value {
        line: usize,
        text: String,
        #[source]
        source: E,
    },
}

impl<E> ParseError<E> {
    /// 1-based line on which conversion failed, if that is the cause.
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::Io(_) => None,
            ParseError::Value { line, .. } => Some(*line),
        }
    }
}
