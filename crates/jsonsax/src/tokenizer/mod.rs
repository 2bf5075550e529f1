//! The push-based JSON tokenizer.
//!
//! [`JsonTokenizer`] is a character-level state machine. Input arrives in
//! arbitrary chunks through [`JsonTokenizer::feed`]; chunks may split any
//! token, escape sequence or literal. Events are delivered to the borrowed
//! [`JsonListener`] as soon as the token they describe is complete, so a
//! number is only reported once the character after it (or the end of input)
//! has been seen.
//!
//! # Examples
//!
//! ```rust
//! use jsonsax::{EventRecorder, JsonEvent, JsonTokenizer, ParseStatus, ParserOptions};
//!
//! let mut recorder = EventRecorder::new();
//! let mut tokenizer = JsonTokenizer::new(&mut recorder, ParserOptions::default());
//! assert_eq!(tokenizer.feed(r#"{"a":1,"b":[tr"#), Ok(ParseStatus::Incomplete));
//! assert_eq!(tokenizer.feed("ue,false]}"), Ok(ParseStatus::Complete));
//! assert_eq!(tokenizer.finish(), Ok(ParseStatus::Complete));
//!
//! assert_eq!(
//!     recorder.into_events(),
//!     vec![
//!         JsonEvent::StartBlock(String::new()),
//!         JsonEvent::Long(1),
//!         JsonEvent::StartArray("b".to_string()),
//!         JsonEvent::Boolean(true),
//!         JsonEvent::Boolean(false),
//!         JsonEvent::EndArray("b".to_string()),
//!         JsonEvent::EndBlock(String::new()),
//!     ]
//! );
//! ```

mod escape_buffer;
mod frame;
mod literal_buffer;
mod number;

use alloc::string::String;
use core::mem;

use escape_buffer::{UnicodeEscapeBuffer, UnicodeStep};
use frame::{FrameKind, FrameStack};
use literal_buffer::{ExpectedLiteralBuffer, Literal, Step};
use number::Number;

use crate::{
    error::{ErrorKind, ParserError},
    listener::JsonListener,
    options::ParserOptions,
};

/// Where the tokenizer stands after a call to [`JsonTokenizer::feed`] or
/// [`JsonTokenizer::finish`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStatus {
    /// More input is needed to complete the document.
    Incomplete,
    /// The root value has been closed. Only whitespace may follow, unless
    /// multiple values are allowed.
    Complete,
    /// The listener reported that it is no longer alive. No further events
    /// are delivered and the remaining input is ignored.
    Cancelled,
}

/// Syntactic position between tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    Start,
    BeforePropertyName,
    BeforeNextPropertyName,
    AfterPropertyName,
    BeforePropertyValue,
    BeforeArrayValue,
    BeforeNextArrayValue,
    AfterPropertyValue,
    AfterArrayValue,
    End,
}

/// Position inside the token currently being read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexState {
    Default,
    Literal,
    Sign,
    Zero,
    DecimalInteger,
    DecimalPoint,
    DecimalFraction,
    DecimalExponent,
    DecimalExponentSign,
    DecimalExponentInteger,
    String,
    StringEscape,
    StringEscapeUnicode,
    SurrogateEscape,
    SurrogateEscapeUnicode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Running,
    Cancelled,
    Failed(ParserError),
}

/// Why tokenizing stopped early.
enum Stop {
    Cancelled,
    Failed(ParserError),
}

/// Streaming, event-driven JSON tokenizer.
///
/// The tokenizer borrows its listener for its whole lifetime and is meant to
/// be used for a single parse: feed all input, then call
/// [`finish`](Self::finish).
pub struct JsonTokenizer<'a, L: JsonListener + ?Sized> {
    listener: &'a mut L,
    options: ParserOptions,

    /// Position of the next character, in characters.
    offset: usize,
    line: usize,
    column: usize,

    parse_state: ParseState,
    lex_state: LexState,
    status: Status,

    /// Current scalar: decoded string contents or numeric literal text.
    buffer: String,
    string_is_key: bool,
    pending_key: Option<String>,
    unicode_escape: UnicodeEscapeBuffer,
    expected_literal: ExpectedLiteralBuffer,
    frames: FrameStack,

    completed_values: usize,
}

impl<'a, L: JsonListener + ?Sized> JsonTokenizer<'a, L> {
    /// Creates a tokenizer that reports to `listener`.
    #[must_use]
    pub fn new(listener: &'a mut L, options: ParserOptions) -> Self {
        Self {
            listener,
            options,
            offset: 0,
            line: 1,
            column: 1,
            parse_state: ParseState::Start,
            lex_state: LexState::Default,
            status: Status::Running,
            buffer: String::new(),
            string_is_key: false,
            pending_key: None,
            unicode_escape: UnicodeEscapeBuffer::new(),
            expected_literal: ExpectedLiteralBuffer::none(),
            frames: FrameStack::new(),
            completed_values: 0,
        }
    }

    /// Feeds the next chunk of JSON text.
    ///
    /// # Errors
    ///
    /// Returns the first syntax error found. The tokenizer does not recover:
    /// every later call returns the same error.
    pub fn feed(&mut self, text: &str) -> Result<ParseStatus, ParserError> {
        if let Some(result) = self.terminal_status() {
            return result;
        }

        for c in text.chars() {
            if let Err(stop) = self.step(c) {
                return self.stop(stop);
            }
            self.advance(c);
        }

        if self.parse_state == ParseState::End && !self.options.allow_multiple_json_values {
            Ok(ParseStatus::Complete)
        } else {
            Ok(ParseStatus::Incomplete)
        }
    }

    /// Marks the end of input.
    ///
    /// A number at the very end of the input is only reported here, since
    /// until now more digits could have followed.
    ///
    /// # Errors
    ///
    /// Fails if the input ended inside a token, with containers still open,
    /// or (in single-value mode) before any value.
    pub fn finish(mut self) -> Result<ParseStatus, ParserError> {
        if let Some(result) = self.terminal_status() {
            return result;
        }

        match self.end_of_input() {
            Ok(status) => Ok(status),
            Err(stop) => self.stop(stop),
        }
    }

    /// Number of characters consumed so far.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of containers currently open.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.depth()
    }

    /// Number of root values fully tokenized so far.
    #[must_use]
    pub fn completed_values(&self) -> usize {
        self.completed_values
    }

    fn terminal_status(&self) -> Option<Result<ParseStatus, ParserError>> {
        match self.status {
            Status::Running => None,
            Status::Cancelled => Some(Ok(ParseStatus::Cancelled)),
            Status::Failed(err) => Some(Err(err)),
        }
    }

    fn stop(&mut self, stop: Stop) -> Result<ParseStatus, ParserError> {
        match stop {
            Stop::Cancelled => {
                log::debug!("listener stopped tokenizing at offset {}", self.offset);
                self.status = Status::Cancelled;
                Ok(ParseStatus::Cancelled)
            }
            Stop::Failed(err) => {
                log::debug!("json syntax error at offset {}: {err}", err.offset);
                self.status = Status::Failed(err);
                Err(err)
            }
        }
    }

    #[inline]
    fn advance(&mut self, c: char) {
        self.offset += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }

    fn fail(&self, kind: ErrorKind) -> Stop {
        let err = ParserError {
            kind,
            offset: self.offset,
            line: self.line,
            column: self.column,
        };
        #[cfg(any(test, feature = "fuzzing"))]
        assert!(!self.options.panic_on_error, "{err}");
        Stop::Failed(err)
    }

    /// Checks that the listener still wants events.
    #[inline]
    fn poll(&self) -> Result<(), Stop> {
        if self.listener.is_alive() {
            Ok(())
        } else {
            Err(Stop::Cancelled)
        }
    }

    #[inline]
    fn emit(&mut self, event: impl FnOnce(&mut L)) -> Result<(), Stop> {
        self.poll()?;
        event(&mut *self.listener);
        Ok(())
    }

    // --------------------------------------------------------------------------------------------
    // Lexer
    // --------------------------------------------------------------------------------------------

    fn step(&mut self, c: char) -> Result<(), Stop> {
        use LexState::*;

        match self.lex_state {
            Default => self.step_structural(c),
            LexState::Literal => self.step_literal(c),
            Sign | Zero | DecimalInteger | DecimalPoint | DecimalFraction | DecimalExponent
            | DecimalExponentSign | DecimalExponentInteger => self.step_number(c),
            LexState::String => self.step_string(c),
            StringEscape => self.step_string_escape(c),
            StringEscapeUnicode => self.step_unicode_escape(c),
            SurrogateEscape => match c {
                '\\' => {
                    self.lex_state = SurrogateEscapeUnicode;
                    Ok(())
                }
                _ => Err(self.fail(ErrorKind::InvalidEscape)),
            },
            SurrogateEscapeUnicode => match c {
                'u' => {
                    self.lex_state = StringEscapeUnicode;
                    Ok(())
                }
                _ => Err(self.fail(ErrorKind::InvalidEscape)),
            },
        }
    }

    fn step_structural(&mut self, c: char) -> Result<(), Stop> {
        use ParseState::*;

        match (self.parse_state, c) {
            (_, ' ' | '\t' | '\n' | '\r') => Ok(()),

            (End, _) if self.options.allow_multiple_json_values => {
                self.parse_state = Start;
                self.step_structural(c)
            }

            (BeforeArrayValue | BeforePropertyName, '}' | ']') => self.close(c),

            (Start | BeforePropertyValue | BeforeArrayValue | BeforeNextArrayValue, _) => {
                self.start_value(c)
            }

            (BeforePropertyName | BeforeNextPropertyName, '"') => {
                self.buffer.clear();
                self.string_is_key = true;
                self.lex_state = LexState::String;
                Ok(())
            }

            (AfterPropertyName, ':') => {
                self.poll()?;
                self.parse_state = BeforePropertyValue;
                Ok(())
            }

            (AfterPropertyValue, ',') => {
                self.poll()?;
                self.parse_state = BeforeNextPropertyName;
                Ok(())
            }

            (AfterArrayValue, ',') => {
                self.poll()?;
                self.parse_state = BeforeNextArrayValue;
                Ok(())
            }

            (AfterPropertyValue | AfterArrayValue | End, '}' | ']') => self.close(c),

            _ => Err(self.fail(ErrorKind::UnexpectedToken)),
        }
    }

    fn start_value(&mut self, c: char) -> Result<(), Stop> {
        match c {
            '{' => self.open(FrameKind::Block),
            '[' => self.open(FrameKind::Array),
            '"' => {
                self.buffer.clear();
                self.string_is_key = false;
                self.lex_state = LexState::String;
                Ok(())
            }
            't' | 'f' | 'n' => {
                self.expected_literal = ExpectedLiteralBuffer::new(c);
                self.lex_state = LexState::Literal;
                Ok(())
            }
            '-' | '0'..='9' => {
                self.buffer.clear();
                self.buffer.push(c);
                self.lex_state = match c {
                    '-' => LexState::Sign,
                    '0' => LexState::Zero,
                    _ => LexState::DecimalInteger,
                };
                Ok(())
            }
            // A closer at the root has nothing to close; inside a container
            // the value it interrupts is simply missing.
            '}' | ']' if self.frames.is_empty() => Err(self.fail(ErrorKind::UnbalancedBrackets)),
            _ => Err(self.fail(ErrorKind::UnexpectedToken)),
        }
    }

    fn open(&mut self, kind: FrameKind) -> Result<(), Stop> {
        let name = self.pending_key.take().unwrap_or_default();
        match kind {
            FrameKind::Block => self.emit(|l| l.start_block(&name))?,
            FrameKind::Array => self.emit(|l| l.start_array(&name))?,
        }
        self.frames.push(kind, name);
        self.parse_state = match kind {
            FrameKind::Block => ParseState::BeforePropertyName,
            FrameKind::Array => ParseState::BeforeArrayValue,
        };
        Ok(())
    }

    fn close(&mut self, c: char) -> Result<(), Stop> {
        let Some(kind) = FrameKind::closed_by(c) else {
            return Err(self.fail(ErrorKind::UnexpectedToken));
        };
        let Some(frame) = self.frames.pop_matching(kind) else {
            return Err(self.fail(ErrorKind::UnbalancedBrackets));
        };
        match kind {
            FrameKind::Block => self.emit(|l| l.end_block(&frame.name))?,
            FrameKind::Array => self.emit(|l| l.end_array(&frame.name))?,
        }
        self.after_value();
        Ok(())
    }

    /// Moves past a completed value, whatever its kind.
    fn after_value(&mut self) {
        self.pending_key = None;
        self.parse_state = match self.frames.last_kind() {
            None => {
                self.completed_values += 1;
                log::trace!("json value complete at offset {}", self.offset);
                ParseState::End
            }
            Some(FrameKind::Block) => ParseState::AfterPropertyValue,
            Some(FrameKind::Array) => ParseState::AfterArrayValue,
        };
    }

    fn step_literal(&mut self, c: char) -> Result<(), Stop> {
        match self.expected_literal.step(c) {
            Step::NeedMore => Ok(()),
            Step::Done(literal) => {
                self.lex_state = LexState::Default;
                match literal {
                    Literal::True => self.emit(|l| l.boolean_token(true))?,
                    Literal::False => self.emit(|l| l.boolean_token(false))?,
                    Literal::Null => self.emit(|l| l.null_token())?,
                }
                self.after_value();
                Ok(())
            }
            Step::Reject => Err(self.fail(ErrorKind::UnexpectedToken)),
        }
    }

    fn step_number(&mut self, c: char) -> Result<(), Stop> {
        use LexState::*;

        let next = match (self.lex_state, c) {
            (Sign, '0') => Some(Zero),
            (Sign | DecimalInteger, '0'..='9') => Some(DecimalInteger),
            (Zero | DecimalInteger, '.') => Some(DecimalPoint),
            (Zero | DecimalInteger | DecimalFraction, 'e' | 'E') => Some(DecimalExponent),
            (DecimalPoint | DecimalFraction, '0'..='9') => Some(DecimalFraction),
            (DecimalExponent, '+' | '-') => Some(DecimalExponentSign),
            (DecimalExponent | DecimalExponentSign | DecimalExponentInteger, '0'..='9') => {
                Some(DecimalExponentInteger)
            }
            (Sign | DecimalPoint | DecimalExponent | DecimalExponentSign, _) => {
                return Err(self.fail(ErrorKind::InvalidNumber));
            }
            (_, ' ' | '\t' | '\n' | '\r' | ',' | ']' | '}') => None,
            _ => return Err(self.fail(ErrorKind::InvalidNumber)),
        };

        match next {
            Some(state) => {
                self.buffer.push(c);
                self.lex_state = state;
                Ok(())
            }
            None => {
                // `c` terminates the number and still needs structural handling.
                self.finish_number()?;
                self.step_structural(c)
            }
        }
    }

    fn finish_number(&mut self) -> Result<(), Stop> {
        let Some(number) = number::classify(&self.buffer, self.options.number_mode) else {
            return Err(self.fail(ErrorKind::InvalidNumber));
        };
        self.buffer.clear();
        self.lex_state = LexState::Default;
        match number {
            Number::Long(value) => self.emit(|l| l.long_token(value))?,
            Number::Double(value) => self.emit(|l| l.numeric_token(value))?,
        }
        self.after_value();
        Ok(())
    }

    fn step_string(&mut self, c: char) -> Result<(), Stop> {
        match c {
            '"' => self.finish_string(),
            '\\' => {
                self.lex_state = LexState::StringEscape;
                Ok(())
            }
            // JSON allows only U+0020 and above unescaped.
            '\0'..='\x1F' => Err(self.fail(ErrorKind::UnexpectedToken)),
            _ => {
                self.buffer.push(c);
                Ok(())
            }
        }
    }

    fn step_string_escape(&mut self, c: char) -> Result<(), Stop> {
        let decoded = match c {
            '"' | '\\' | '/' => c,
            'b' => '\u{0008}',
            'f' => '\u{000C}',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'u' => {
                self.unicode_escape.reset();
                self.lex_state = LexState::StringEscapeUnicode;
                return Ok(());
            }
            _ => return Err(self.fail(ErrorKind::InvalidEscape)),
        };
        self.buffer.push(decoded);
        self.lex_state = LexState::String;
        Ok(())
    }

    fn step_unicode_escape(&mut self, c: char) -> Result<(), Stop> {
        match self.unicode_escape.feed(c) {
            UnicodeStep::NeedMore => Ok(()),
            UnicodeStep::Char(decoded) => {
                self.buffer.push(decoded);
                self.lex_state = LexState::String;
                Ok(())
            }
            UnicodeStep::NeedLowSurrogate => {
                self.lex_state = LexState::SurrogateEscape;
                Ok(())
            }
            UnicodeStep::Invalid => Err(self.fail(ErrorKind::InvalidEscape)),
        }
    }

    fn finish_string(&mut self) -> Result<(), Stop> {
        self.lex_state = LexState::Default;
        let value = mem::take(&mut self.buffer);

        if self.string_is_key {
            self.emit(|l| l.member_key(&value))?;
            self.pending_key = Some(value);
            self.parse_state = ParseState::AfterPropertyName;
            return Ok(());
        }

        self.emit(|l| l.string_token(&value))?;
        if self.frames.last_kind() == Some(FrameKind::Block) {
            let key = self.pending_key.take().unwrap_or_default();
            self.emit(|l| l.key_value(&key, &value))?;
        }
        self.after_value();
        Ok(())
    }

    fn end_of_input(&mut self) -> Result<ParseStatus, Stop> {
        use LexState::*;

        match self.lex_state {
            Default => {}
            Zero | DecimalInteger | DecimalFraction | DecimalExponentInteger => {
                self.finish_number()?;
            }
            Sign | DecimalPoint | DecimalExponent | DecimalExponentSign => {
                return Err(self.fail(ErrorKind::InvalidNumber));
            }
            LexState::Literal => return Err(self.fail(ErrorKind::UnexpectedToken)),
            LexState::String | StringEscape | StringEscapeUnicode | SurrogateEscape
            | SurrogateEscapeUnicode => {
                return Err(self.fail(ErrorKind::UnterminatedString));
            }
        }

        match self.parse_state {
            ParseState::End => Ok(ParseStatus::Complete),
            ParseState::Start if self.options.allow_multiple_json_values => {
                Ok(ParseStatus::Complete)
            }
            ParseState::Start => Err(self.fail(ErrorKind::UnexpectedToken)),
            _ => Err(self.fail(ErrorKind::UnbalancedBrackets)),
        }
    }
}
