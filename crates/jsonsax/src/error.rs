use thiserror::Error;

/// The category of a syntax error found by the tokenizer.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// End of input inside a string literal or one of its escapes.
    #[error("unterminated string")]
    UnterminatedString,
    /// A character that cannot appear at this position.
    #[error("unexpected token")]
    UnexpectedToken,
    /// A closing bracket that does not match the open container, or input
    /// that ends while containers are still open.
    #[error("unbalanced brackets")]
    UnbalancedBrackets,
    /// A numeric literal that does not follow the JSON number grammar.
    #[error("invalid number")]
    InvalidNumber,
    /// An unknown escape sequence, a malformed `\u` escape or an unpaired
    /// UTF-16 surrogate.
    #[error("invalid escape sequence")]
    InvalidEscape,
}

/// A syntax error, located at the character where tokenizing stopped.
///
/// `offset` counts characters (not bytes) from the start of the input and is
/// zero-based; `line` and `column` are one-based. Errors raised at the end of
/// the input point one past the last character.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{kind} at {line}:{column}")]
pub struct ParserError {
    /// What went wrong.
    pub kind: ErrorKind,
    /// Character offset of the failure.
    pub offset: usize,
    /// Line of the failure.
    pub line: usize,
    /// Column of the failure.
    pub column: usize,
}

/// Failure while tokenizing from a byte source such as a reader or a
/// [`Data`](crate::data::Data) payload.
#[cfg(feature = "std")]
#[derive(Error, Debug)]
pub enum ReadError {
    /// The source itself failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    /// The source produced bytes that are not UTF-8.
    #[error("invalid UTF-8 at byte {byte_offset}")]
    InvalidUtf8 {
        /// Byte offset of the first invalid sequence.
        byte_offset: u64,
    },
    /// The decoded text is not valid JSON.
    #[error("syntax error: {0}")]
    Syntax(#[from] ParserError),
}
