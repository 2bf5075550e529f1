/// How numeric literals are delivered to the listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumberMode {
    /// Integral literals that fit in an `i64` are delivered through
    /// `long_token`; everything else through `numeric_token`.
    #[default]
    Longs,
    /// Every number is delivered through `numeric_token`.
    Doubles,
}

/// Configuration options for the JSON tokenizer.
///
/// # Examples
///
/// ```rust
/// use jsonsax::{EventRecorder, JsonTokenizer, NumberMode, ParserOptions};
///
/// let mut recorder = EventRecorder::new();
/// let tokenizer = JsonTokenizer::new(
///     &mut recorder,
///     ParserOptions {
///         allow_multiple_json_values: true,
///         number_mode: NumberMode::Doubles,
///         ..Default::default()
///     },
/// );
/// # drop(tokenizer);
/// ```
///
/// # Default
///
/// Single-value mode with [`NumberMode::Longs`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ParserOptions {
    /// Whether to tokenize multiple JSON values from a single input stream.
    ///
    /// When `true`, the tokenizer returns to its initial state after each
    /// root value and continues with any further whitespace-delimited
    /// values. This supports JSON Lines (JSONL), newline-delimited JSON and
    /// plain concatenation such as:
    ///
    /// ```json
    /// {}{}[1] "x"
    /// ```
    ///
    /// When `false`, anything but whitespace after the first root value is
    /// an error.
    ///
    /// # Default
    ///
    /// `false`
    pub allow_multiple_json_values: bool,

    /// Whether integral literals are reported as `long_token`.
    ///
    /// # Default
    ///
    /// [`NumberMode::Longs`]
    pub number_mode: NumberMode,

    #[cfg(any(test, feature = "fuzzing"))]
    /// Panic on syntax errors instead of returning them.
    ///
    /// Enabled only in test builds to produce backtraces on parse failures.
    pub panic_on_error: bool,
}
